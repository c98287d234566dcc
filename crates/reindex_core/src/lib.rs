//! Reindex core: pure state machine, snapshot model and render reducer.
mod effect;
mod history;
mod msg;
mod render;
mod search;
mod snapshot;
mod state;
mod update;
mod view_model;

pub use effect::{Command, CommandKind, Effect, OverwriteMode, RequestId, StartRequest};
pub use history::{is_prefix_extension, HistoryChange, HistoryTracker};
pub use msg::{Msg, SnapshotSource};
pub use render::{format_seconds, history_line, render};
pub use search::{
    render_results, Hit, PageDirection, ResultRow, ResultsPage, ResultsView, RESULT_COUNT_CAP,
};
pub use snapshot::{HistoryEntry, JobSnapshot, ProgressInfo};
pub use state::{AppState, StartForm, UpdateConfig};
pub use update::update;
pub use view_model::{
    AppViewModel, ControlVisibility, HistoryLine, LineKind, MessageSeverity, ProgressPanel,
    UiState,
};
