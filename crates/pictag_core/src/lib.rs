//! Pictag core: the headless state machine behind the image classification page.
//!
//! Everything here is platform independent. The browser and native
//! front-ends translate user input into [`Message`]s, feed them to a
//! [`Controller`], and carry out the returned [`Effect`]s.

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod intake;
pub mod message;
pub mod notification;
pub mod prediction;
pub mod preference;
pub mod render;
pub mod view;

pub use config::{ClientConfig, ConfigError, LogLevel};
pub use controller::Controller;
pub use error::ClientError;
pub use intake::{FileInfo, OperationToken, SelectedImage, is_image_mime};
pub use message::{Effect, Message};
pub use notification::{Notification, NotificationCenter, NotificationKind};
pub use prediction::{AnalysisOutcome, PredictionRecord, decode_response};
pub use preference::{KeyValueStore, MemoryStore, PreferenceStore};
pub use render::{CardDescriptor, render_card, render_cards};
pub use view::{ViewState, Visibility};
