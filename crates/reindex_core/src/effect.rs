use serde::{Deserialize, Serialize};

use crate::search::PageDirection;

/// Correlates a command with the snapshot (or failure) it produced.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one command against the job controller.
    Send {
        request_id: RequestId,
        command: Command,
    },
    /// Make sure a status poller is live; no-op if one already is.
    EnsurePolling,
    /// Ask the search pager for the previous or next page of hits.
    FetchResults {
        request_id: RequestId,
        direction: PageDirection,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start(StartRequest),
    Abort,
    Clean,
    Status,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Start(_) => CommandKind::Start,
            Command::Abort => CommandKind::Abort,
            Command::Clean => CommandKind::Clean,
            Command::Status => CommandKind::Status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Start,
    Abort,
    Clean,
    Status,
}

impl CommandKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::Start => "start",
            CommandKind::Abort => "abort",
            CommandKind::Clean => "clean",
            CommandKind::Status => "status",
        }
    }
}

/// Parameters of a rebuild. `job` and `overwrite` are only honoured by
/// controllers that support selecting a single job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartRequest {
    pub workers: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<OverwriteMode>,
}

impl StartRequest {
    pub fn new(workers: u32) -> Self {
        Self {
            workers,
            job: None,
            overwrite: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverwriteMode {
    /// Re-index builds that are already present.
    Overwrite,
    /// Leave already indexed builds alone.
    Skip,
}
