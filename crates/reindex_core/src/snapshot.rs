//! Job state as reported by the remote job controller.
//!
//! A [`JobSnapshot`] is produced by the controller for every command response
//! and every status poll. The client never edits one; it only swaps the
//! latest snapshot it holds for a newer one.

use serde::{Deserialize, Deserializer, Serialize};

/// Point-in-time description of the controller's job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSnapshot {
    /// 0 means success/neutral, anything else is a controller-level error.
    #[serde(default)]
    pub code: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub running: bool,
    /// Active worker threads. Only meaningful while `running`.
    #[serde(default)]
    pub workers: u32,
    /// Present iff a run has produced output since the last clean.
    #[serde(default)]
    pub progress: Option<ProgressInfo>,
}

impl JobSnapshot {
    pub fn is_error(&self) -> bool {
        self.code != 0
    }

    /// No job is in flight; nothing more will change without a new command.
    pub fn is_terminal(&self) -> bool {
        !self.running
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.progress
            .as_ref()
            .map(|progress| progress.history.as_slice())
            .unwrap_or(&[])
    }
}

/// Progress of the current (or most recent) run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressInfo {
    /// Sub-job currently or most recently active.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// 1-based position of the active sub-job.
    #[serde(default)]
    pub current: u32,
    #[serde(default)]
    pub max: u32,
    #[serde(default)]
    pub processed_items: u64,
    /// Milliseconds spent in the current sub-job.
    #[serde(default)]
    pub elapsed_time: u64,
    /// Completed sub-jobs, oldest first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<HistoryEntry>,
}

impl ProgressInfo {
    /// Checks the history length against `current`/`max` for the given run state.
    ///
    /// While running, every sub-job before the active one has completed; once
    /// the run is over all `max` sub-jobs have an entry.
    pub fn is_consistent(&self, running: bool) -> bool {
        let len = self.history.len() as u64;
        if len > u64::from(self.max) {
            return false;
        }
        if running {
            len + 1 == u64::from(self.current)
        } else {
            len == u64::from(self.max)
        }
    }
}

/// Outcome of one completed sub-job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub elapsed_time: u64,
    /// Items processed by this sub-job.
    #[serde(default)]
    pub current: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_message: Option<String>,
}

impl HistoryEntry {
    /// A sub-job failed only when it carries a non-empty reason.
    pub fn is_failure(&self) -> bool {
        self.failure_reason().is_some()
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.reason_message
            .as_deref()
            .filter(|reason| !reason.is_empty())
    }
}

/// The controller sends `null` for strings it never set; read it as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
