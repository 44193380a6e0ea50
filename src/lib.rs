//! Pictag - image classification page client
//!
//! Browser build: binds the page's drop zone, buttons and result area to the
//! `pictag_core` controller. Native build: a small command-line front-end
//! over the same controller.

pub use pictag_core;

// WASM entry point and browser surface
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod http;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod styles;
#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
mod wasm_file;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
