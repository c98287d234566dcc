use crate::{CommandKind, JobSnapshot, OverwriteMode, PageDirection, RequestId, ResultsPage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the worker-count input (raw text).
    WorkersInputChanged(String),
    /// User picked a single job to rebuild, or cleared the selection.
    JobSelected(Option<String>),
    /// User picked an overwrite policy, or cleared it.
    OverwriteSelected(Option<OverwriteMode>),
    /// User clicked Start.
    StartClicked,
    /// User clicked Abort.
    AbortClicked,
    /// User clicked Clean.
    CleanClicked,
    /// Page load or manual refresh: read the current status once.
    RefreshRequested,
    /// User asked for the previous or next page of search hits.
    ResultsRequested(PageDirection),
    /// The controller answered a command or a poll.
    SnapshotReceived {
        source: SnapshotSource,
        snapshot: JobSnapshot,
    },
    /// A command never produced a snapshot.
    TransportFailed { source: SnapshotSource, error: String },
    /// The search pager delivered a page.
    ResultsReceived {
        request_id: RequestId,
        page: ResultsPage,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Where a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    Command {
        request_id: RequestId,
        kind: CommandKind,
    },
    Poll,
}
