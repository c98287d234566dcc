use crate::history::{HistoryChange, HistoryTracker};
use crate::search::{render_results, ResultsPage};
use crate::view_model::AppViewModel;
use crate::{render, JobSnapshot, OverwriteMode, RequestId, StartRequest};

/// Knobs for the pure update function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateConfig {
    /// Smallest worker count a start request may carry.
    pub min_workers: u32,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self { min_workers: 1 }
    }
}

/// Values of the start form as last edited by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StartForm {
    pub workers_input: String,
    pub job: Option<String>,
    pub overwrite: Option<OverwriteMode>,
}

/// Single owner of the latest known snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    config: UpdateConfig,
    latest: Option<JobSnapshot>,
    tracker: HistoryTracker,
    last_history_change: Option<HistoryChange>,
    form: StartForm,
    results: Option<ResultsPage>,
    last_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: UpdateConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            status: self.latest.as_ref().map(render).unwrap_or_default(),
            results: self.results.as_ref().map(render_results),
            last_history_change: self.last_history_change,
            dirty: self.dirty,
        }
    }

    pub fn latest_snapshot(&self) -> Option<&JobSnapshot> {
        self.latest.as_ref()
    }

    pub fn form(&self) -> &StartForm {
        &self.form
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn form_mut(&mut self) -> &mut StartForm {
        &mut self.form
    }

    /// Builds a start request from the form, or `None` if the worker count
    /// is missing, malformed or below the configured minimum.
    pub(crate) fn start_request(&self) -> Option<StartRequest> {
        let workers: i64 = self.form.workers_input.trim().parse().ok()?;
        if workers < i64::from(self.config.min_workers) || workers < 1 {
            return None;
        }
        let workers = u32::try_from(workers).ok()?;
        Some(StartRequest {
            workers,
            job: self.form.job.clone(),
            overwrite: self.form.overwrite,
        })
    }

    pub(crate) fn allocate_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    /// Replaces the latest snapshot wholesale.
    pub(crate) fn apply_snapshot(&mut self, snapshot: JobSnapshot) {
        self.last_history_change = Some(self.tracker.observe(&snapshot));
        if self.latest.as_ref() != Some(&snapshot) {
            self.dirty = true;
        }
        self.latest = Some(snapshot);
    }

    pub(crate) fn apply_results(&mut self, page: ResultsPage) {
        if self.results.as_ref() != Some(&page) {
            self.dirty = true;
        }
        self.results = Some(page);
    }
}
