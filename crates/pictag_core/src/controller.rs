//! Page controller.
//!
//! Owns every piece of mutable page state: the staged image, the view state,
//! pending operation tokens, notifications and preferences. All changes go
//! through [`Controller::update`], which returns the effects the surface must
//! apply.

use crate::constants::text;
use crate::intake::{FileInfo, OperationToken, SelectedImage, TokenSource};
use crate::message::{Effect, Message};
use crate::notification::{NotificationCenter, NotificationKind};
use crate::prediction::AnalysisOutcome;
use crate::preference::PreferenceStore;
use crate::render::render_cards;
use crate::view::ViewState;

/// State machine behind the classification page.
pub struct Controller<F> {
    view: ViewState,
    selected: Option<SelectedImage<F>>,
    /// Decode we are waiting for, and the file it belongs to
    pending_read: Option<(OperationToken, FileInfo<F>)>,
    /// Analysis request we are waiting for
    in_flight: Option<OperationToken>,
    tokens: TokenSource,
    notifications: NotificationCenter,
    preferences: PreferenceStore,
}

impl<F: Clone> Controller<F> {
    pub fn new(preferences: PreferenceStore) -> Self {
        Self {
            view: ViewState::Empty,
            selected: None,
            pending_read: None,
            in_flight: None,
            tokens: TokenSource::new(),
            notifications: NotificationCenter::new(),
            preferences,
        }
    }

    /// Startup effects: initial view and the restored display mode.
    /// No notification is shown for the restored preference.
    pub fn start(&mut self) -> Vec<Effect<F>> {
        let mut effects = vec![Effect::ShowView(self.view.visibility())];
        if self.preferences.restore() {
            effects.push(Effect::SetDarkMode(true));
        }
        effects
    }

    /// Handle one message.
    pub fn update(&mut self, message: Message<F>) -> Vec<Effect<F>> {
        match message {
            Message::DarkModeToggled => self.toggle_dark_mode(),
            Message::DropZoneClicked => self.drop_zone_clicked(),
            Message::BrowseClicked => self.select_via_picker(),
            Message::FilePicked(file) => self.handle_file(file),
            Message::DragOver => vec![Effect::SetDragOver(true)],
            Message::DragLeave => vec![Effect::SetDragOver(false)],
            Message::FileDropped(file) => self.handle_drop(file),
            Message::FileDecoded { token, result } => self.file_decoded(token, result),
            Message::RemoveClicked => self.remove_selection(),
            Message::AnalyzeClicked => self.analyze(),
            Message::AnalysisResolved { token, outcome } => self.resolve_analysis(token, outcome),
            Message::NotificationExpired(id) => self.notification_expired(id),
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn selected(&self) -> Option<&SelectedImage<F>> {
        self.selected.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn dark_mode(&self) -> bool {
        self.preferences.dark_mode()
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    // ------------------------------------------------------------------
    // Preferences
    // ------------------------------------------------------------------

    fn toggle_dark_mode(&mut self) -> Vec<Effect<F>> {
        let dark = self.preferences.toggle();
        let message = if dark {
            text::DARK_MODE_ON
        } else {
            text::LIGHT_MODE_ON
        };
        vec![
            Effect::SetDarkMode(dark),
            self.notify(message, NotificationKind::Info),
        ]
    }

    // ------------------------------------------------------------------
    // Intake
    // ------------------------------------------------------------------

    /// Open the chooser; the picked file comes back as `Message::FilePicked`.
    pub fn select_via_picker(&mut self) -> Vec<Effect<F>> {
        vec![Effect::OpenPicker]
    }

    /// Clicking the drop zone only opens the picker when nothing is staged.
    fn drop_zone_clicked(&mut self) -> Vec<Effect<F>> {
        if self.view.has_image() {
            Vec::new()
        } else {
            self.select_via_picker()
        }
    }

    /// Accept a file and start decoding it. Any earlier decode is superseded.
    pub fn handle_file(&mut self, file: FileInfo<F>) -> Vec<Effect<F>> {
        let token = self.tokens.next_token();
        log::debug!("Reading {} ({}) as {}", file.name, file.mime, token);
        self.pending_read = Some((token, file.clone()));
        vec![Effect::ReadFile { token, file }]
    }

    /// Accept the first dropped file if it declares an image MIME type.
    pub fn handle_drop(&mut self, file: Option<FileInfo<F>>) -> Vec<Effect<F>> {
        let mut effects = vec![Effect::SetDragOver(false)];
        match file {
            Some(file) if file.is_image() => effects.extend(self.handle_file(file)),
            other => {
                if let Some(file) = other {
                    log::debug!("Rejected drop of {} ({})", file.name, file.mime);
                }
                effects.push(self.notify(text::NOT_AN_IMAGE, NotificationKind::Error));
            }
        }
        effects
    }

    fn file_decoded(
        &mut self,
        token: OperationToken,
        result: Result<String, String>,
    ) -> Vec<Effect<F>> {
        let file = match self.pending_read.take() {
            Some((pending, file)) if pending == token => file,
            other => {
                log::debug!("Ignoring stale decode {}", token);
                self.pending_read = other;
                return Vec::new();
            }
        };

        let data_url = match result {
            Ok(data_url) => data_url,
            Err(e) => {
                log::warn!("Failed to read {}: {}", file.name, e);
                return vec![self.notify(text::READ_FAILED, NotificationKind::Error)];
            }
        };

        log::info!("Staged image {}", file.name);
        self.selected = Some(SelectedImage {
            file,
            data_url: data_url.clone(),
        });
        // A request for the previous image must not land on this one.
        self.in_flight = None;
        self.view = ViewState::Preview;

        vec![
            Effect::ShowPreview { data_url },
            Effect::ShowView(self.view.visibility()),
            self.notify(text::IMAGE_LOADED, NotificationKind::Success),
        ]
    }

    /// Drop the staged image and anything still pending for it.
    pub fn remove_selection(&mut self) -> Vec<Effect<F>> {
        if let Some(selected) = self.selected.take() {
            log::info!("Removed image {}", selected.file.name);
        }
        self.pending_read = None;
        self.in_flight = None;
        self.view = ViewState::Empty;

        vec![
            Effect::ClearPicker,
            Effect::ShowView(self.view.visibility()),
            self.notify(text::IMAGE_REMOVED, NotificationKind::Info),
        ]
    }

    // ------------------------------------------------------------------
    // Analysis
    // ------------------------------------------------------------------

    /// Submit the staged image. Rejected while another request is in flight.
    pub fn analyze(&mut self) -> Vec<Effect<F>> {
        let Some(file) = self.selected.as_ref().map(|s| s.file.clone()) else {
            log::debug!("Analyze requested with no image staged");
            return Vec::new();
        };

        if let Some(token) = self.in_flight {
            log::debug!("Analyze requested while {} is in flight", token);
            return vec![self.notify(text::ANALYSIS_BUSY, NotificationKind::Info)];
        }

        let token = self.tokens.next_token();
        log::info!("Submitting {} as {}", file.name, token);
        self.in_flight = Some(token);
        self.view = ViewState::Loading;

        vec![
            Effect::ShowView(self.view.visibility()),
            Effect::Submit { token, file },
        ]
    }

    /// Apply the result of a request. Every accepted result ends with a
    /// single view update that hides the loading indicator.
    pub fn resolve_analysis(
        &mut self,
        token: OperationToken,
        outcome: AnalysisOutcome,
    ) -> Vec<Effect<F>> {
        if self.in_flight != Some(token) {
            log::debug!("Ignoring stale analysis result {}", token);
            return Vec::new();
        }
        self.in_flight = None;

        let mut effects = Vec::new();
        match outcome {
            AnalysisOutcome::Success(predictions) => {
                log::info!("Analysis {} returned {} predictions", token, predictions.len());
                effects.push(Effect::RenderCards(render_cards(&predictions)));
                effects.push(self.notify(text::ANALYSIS_COMPLETE, NotificationKind::Success));
                self.view = ViewState::Results;
            }
            AnalysisOutcome::Rejected(error) => {
                let reason = error.as_deref().unwrap_or(text::UNKNOWN_ERROR);
                let message = format!("{}{}", text::REJECTED_PREFIX, reason);
                effects.push(self.notify(message, NotificationKind::Error));
                self.view = ViewState::ErrorReverted;
            }
            AnalysisOutcome::Failed(_) => {
                effects.push(self.notify(text::ANALYSIS_FAILED, NotificationKind::Error));
                self.view = ViewState::ErrorReverted;
            }
        }

        effects.push(Effect::ShowView(self.view.visibility()));
        effects
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> Effect<F> {
        Effect::Notify(self.notifications.notify(message, kind))
    }

    fn notification_expired(&mut self, id: u64) -> Vec<Effect<F>> {
        if self.notifications.expire(id) {
            vec![Effect::DismissNotification(id)]
        } else {
            Vec::new()
        }
    }
}
