//! Image intake types.
//!
//! The file handle type `F` is whatever the platform hands us: a
//! `web_sys::File` in the browser, a path on native.

use crate::constants::IMAGE_MIME_PREFIX;

/// A file offered by the picker or a drop, before it is decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo<F> {
    pub handle: F,
    pub name: String,
    /// Declared MIME type, empty if the platform did not provide one
    pub mime: String,
}

impl<F> FileInfo<F> {
    pub fn new(handle: F, name: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            handle,
            name: name.into(),
            mime: mime.into(),
        }
    }

    /// Whether the declared MIME type marks this as an image.
    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime)
    }
}

/// The image currently staged for analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage<F> {
    pub file: FileInfo<F>,
    /// `data:` URL used as the preview source
    pub data_url: String,
}

/// Check whether a MIME type starts with `image/`.
pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with(IMAGE_MIME_PREFIX)
}

/// Identifies one asynchronous operation (a decode or a request).
///
/// Completions carry the token they were started with; if it no longer
/// matches what the controller is waiting for, the result is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationToken(u64);

impl std::fmt::Display for OperationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out strictly increasing tokens.
#[derive(Debug, Default)]
pub struct TokenSource {
    last: u64,
}

impl TokenSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_token(&mut self) -> OperationToken {
        self.last += 1;
        OperationToken(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_mime() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("image/jpeg"));
        assert!(!is_image_mime("application/pdf"));
        assert!(!is_image_mime(""));
        assert!(!is_image_mime("Image/png"));
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut tokens = TokenSource::new();
        let a = tokens.next_token();
        let b = tokens.next_token();
        assert_ne!(a, b);
        assert!(b > a);
        assert_eq!(b.to_string(), "#2");
    }
}
