use crate::history::HistoryChange;
use crate::search::ResultsView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageSeverity {
    #[default]
    Success,
    Error,
}

/// Everything a presentation layer needs to draw the rebuild panel.
///
/// Derived from a single snapshot by [`crate::render`]; the default value is
/// what is shown before the first snapshot arrives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiState {
    pub message_severity: MessageSeverity,
    pub message_text: String,
    pub controls: ControlVisibility,
    pub progress: Option<ProgressPanel>,
    pub history: Vec<HistoryLine>,
}

impl UiState {
    pub fn progress_visible(&self) -> bool {
        self.progress.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlVisibility {
    pub abort_button: bool,
    pub worker_input: bool,
    pub job_selector: bool,
    pub overwrite_selector: bool,
    pub start_button: bool,
    pub clean_button: bool,
}

impl ControlVisibility {
    pub fn for_running(running: bool) -> Self {
        let idle = !running;
        Self {
            abort_button: running,
            worker_input: idle,
            job_selector: idle,
            overwrite_selector: idle,
            start_button: idle,
            clean_button: idle,
        }
    }

    pub fn start_controls_visible(&self) -> bool {
        self.worker_input
            && self.job_selector
            && self.overwrite_selector
            && self.start_button
            && self.clean_button
    }
}

impl Default for ControlVisibility {
    fn default() -> Self {
        Self::for_running(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressPanel {
    pub current_workers: u32,
    pub currently_processing_name: String,
    pub current_index: u32,
    pub current_max: u32,
    pub processed_items: u64,
    pub elapsed_millis: u64,
    /// `elapsed_millis` as seconds, formatted for display (`"1.5"`).
    pub elapsed_display: String,
}

impl ProgressPanel {
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_millis as f64 / 1000.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLine {
    pub text: String,
    pub kind: LineKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status: UiState,
    pub results: Option<ResultsView>,
    pub last_history_change: Option<HistoryChange>,
    pub dirty: bool,
}
