//! Global constants for the pictag client

use std::time::Duration;

/// Default path of the prediction endpoint
pub const DEFAULT_ENDPOINT: &str = "/predict";

/// Multipart field name carrying the raw image bytes
pub const DEFAULT_UPLOAD_FIELD: &str = "file";

/// Storage key for the dark mode preference
pub const DARK_MODE_KEY: &str = "darkMode";

/// Storage key for the client configuration (browser only)
pub const CONFIG_STORAGE_KEY: &str = "pictag-config";

/// MIME prefix a dropped file must carry to be accepted
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// Delay before the first confidence bar starts growing
pub const BAR_BASE_DELAY: Duration = Duration::from_millis(100);

/// Extra delay added per card so bars reveal in order
pub const BAR_STRIDE: Duration = Duration::from_millis(100);

/// How long a notification stays on screen
pub const NOTIFICATION_DWELL: Duration = Duration::from_millis(3000);

/// Exit transition length before a notification leaves the document
pub const NOTIFICATION_EXIT: Duration = Duration::from_millis(300);

/// User-facing notification texts.
pub mod text {
    pub const IMAGE_LOADED: &str = "Image loaded! Ready to analyze! 🎉";
    pub const IMAGE_REMOVED: &str = "Image removed!";
    pub const NOT_AN_IMAGE: &str = "Please drop an image file! 🖼️";
    pub const READ_FAILED: &str = "Could not read that image file.";
    pub const ANALYSIS_COMPLETE: &str = "Analysis complete! ✨";
    pub const ANALYSIS_BUSY: &str = "Already analyzing, hang tight! ⏳";
    pub const ANALYSIS_FAILED: &str = "Failed to analyze image. Please try again! 😅";
    pub const REJECTED_PREFIX: &str = "Oops! ";
    pub const UNKNOWN_ERROR: &str = "Unknown error";
    pub const DARK_MODE_ON: &str = "Dark mode activated! 🌙";
    pub const LIGHT_MODE_ON: &str = "Light mode activated! ☀️";
}
