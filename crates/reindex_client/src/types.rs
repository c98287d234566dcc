use std::fmt;

use reindex_core::{JobSnapshot, RequestId, ResultsPage, SnapshotSource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// A command or poll produced a snapshot.
    Snapshot {
        source: SnapshotSource,
        snapshot: JobSnapshot,
    },
    /// A command or poll never produced a snapshot.
    TransportFailed {
        source: SnapshotSource,
        error: TransportError,
    },
    /// The search pager answered (or failed to answer) a page request.
    Results {
        request_id: RequestId,
        result: Result<ResultsPage, TransportError>,
    },
    /// The status poller ended on its own or was cancelled.
    PollerStopped { exit: PollExit },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollExit {
    /// A terminal snapshot was delivered and idle polling is disabled.
    Idle,
    Cancelled,
}

/// Which request shape the remote controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControllerVariant {
    /// Accepts only a worker count.
    Minimal,
    /// Also accepts a job identifier and an overwrite policy.
    #[default]
    Extended,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub(crate) fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportErrorKind {
    InvalidUrl,
    Timeout,
    HttpStatus(u16),
    Network,
    Encode,
    Decode,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::InvalidUrl => write!(f, "invalid url"),
            TransportErrorKind::Timeout => write!(f, "timeout"),
            TransportErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            TransportErrorKind::Network => write!(f, "network error"),
            TransportErrorKind::Encode => write!(f, "malformed request"),
            TransportErrorKind::Decode => write!(f, "malformed response"),
        }
    }
}
