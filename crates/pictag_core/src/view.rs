//! Page view state.
//!
//! The page has two areas: the drop zone (either the prompt or the staged
//! preview) and the results area (loading spinner, prediction cards, or the
//! empty placeholder). Every region's visibility is derived from a single
//! [`ViewState`], so contradictory combinations cannot be expressed.

/// Mode the page is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Nothing staged, drop zone prompt showing
    #[default]
    Empty,
    /// Image staged and previewed, results area empty
    Preview,
    /// Image staged, request in flight
    Loading,
    /// Image staged, prediction cards showing
    Results,
    /// Image staged, last analysis failed and the results area went back to empty
    ErrorReverted,
}

impl ViewState {
    /// Whether an image is staged in this state.
    pub fn has_image(&self) -> bool {
        !matches!(self, ViewState::Empty)
    }

    /// Region visibility for this state.
    pub fn visibility(&self) -> Visibility {
        let staged = self.has_image();
        Visibility {
            drop_zone_content: !staged,
            preview: staged,
            loading: matches!(self, ViewState::Loading),
            results: matches!(self, ViewState::Results),
            empty_state: matches!(
                self,
                ViewState::Empty | ViewState::Preview | ViewState::ErrorReverted
            ),
            analyze_enabled: staged,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Empty => "empty",
            ViewState::Preview => "preview",
            ViewState::Loading => "loading",
            ViewState::Results => "results",
            ViewState::ErrorReverted => "error-reverted",
        }
    }
}

/// Which page regions are shown, plus whether the analyze button is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub drop_zone_content: bool,
    pub preview: bool,
    pub loading: bool,
    pub results: bool,
    pub empty_state: bool,
    pub analyze_enabled: bool,
}

impl Visibility {
    /// Exactly one drop zone region, at most one results-area region.
    pub fn is_consistent(&self) -> bool {
        let results_area = [self.loading, self.results, self.empty_state]
            .iter()
            .filter(|shown| **shown)
            .count();
        self.drop_zone_content != self.preview && results_area <= 1
    }
}
