//! Controller message and effect types.
//!
//! Page events come in as [`Message`]s; the controller answers each one with
//! a list of [`Effect`]s for the surface (DOM or terminal) to carry out, in
//! order.

use crate::intake::{FileInfo, OperationToken};
use crate::notification::Notification;
use crate::prediction::AnalysisOutcome;
use crate::render::CardDescriptor;
use crate::view::Visibility;

/// Events that can update the page state.
#[derive(Debug, Clone)]
pub enum Message<F> {
    // Header
    /// Dark mode toggle clicked
    DarkModeToggled,

    // Drop zone
    /// Drop zone itself clicked
    DropZoneClicked,
    /// Browse button clicked
    BrowseClicked,
    /// File chosen in the picker
    FilePicked(FileInfo<F>),
    /// Something is being dragged over the drop zone
    DragOver,
    /// Drag left the drop zone
    DragLeave,
    /// Something was dropped; the first dropped file, if any
    FileDropped(Option<FileInfo<F>>),
    /// Asynchronous file decode finished
    FileDecoded {
        token: OperationToken,
        /// `data:` URL on success, error description otherwise
        result: Result<String, String>,
    },
    /// Remove button clicked
    RemoveClicked,

    // Analysis
    /// Analyze button clicked
    AnalyzeClicked,
    /// Prediction request finished
    AnalysisResolved {
        token: OperationToken,
        outcome: AnalysisOutcome,
    },

    // Notifications
    /// A notification's dwell and exit transition are over
    NotificationExpired(u64),
}

/// Side effects requested by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<F> {
    /// Open the platform file chooser
    OpenPicker,
    /// Forget the chooser's last value so picking the same file fires again
    ClearPicker,
    /// Toggle the drag-over highlight on the drop zone
    SetDragOver(bool),
    /// Start decoding a file into a `data:` URL; answer with `Message::FileDecoded`
    ReadFile {
        token: OperationToken,
        file: FileInfo<F>,
    },
    /// Point the preview image at this source
    ShowPreview { data_url: String },
    /// POST the file to the endpoint; answer with `Message::AnalysisResolved`
    Submit {
        token: OperationToken,
        file: FileInfo<F>,
    },
    /// Replace the prediction cards and schedule their bar reveals
    RenderCards(Vec<CardDescriptor>),
    /// Apply region visibility and the analyze button state
    ShowView(Visibility),
    /// Switch the document between dark and light mode
    SetDarkMode(bool),
    /// Show a notification, replacing any visible one
    Notify(Notification),
    /// Remove the notification with this id from the document
    DismissNotification(u64),
}
