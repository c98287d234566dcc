//! Tracks how the rendered history evolves between snapshots.
//!
//! The controller owns the history; this only classifies each transition so
//! that out-of-contract changes can be reported. It never alters what is
//! rendered.

use crate::{HistoryEntry, JobSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryChange {
    Unchanged,
    /// New entries were appended at the end.
    Appended { added: usize },
    /// A new run started or the controller was cleaned.
    Reset,
    /// Entries vanished or moved while a run was in flight. Either the
    /// controller broke its append-only contract or a stale response was
    /// delivered after a newer one.
    Regressed,
}

/// True when `later` starts with every entry of `earlier`, in order.
pub fn is_prefix_extension(earlier: &[HistoryEntry], later: &[HistoryEntry]) -> bool {
    later.len() >= earlier.len() && later[..earlier.len()] == *earlier
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryTracker {
    last: Option<Observed>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Observed {
    history: Vec<HistoryEntry>,
    has_progress: bool,
    terminal: bool,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, snapshot: &JobSnapshot) -> HistoryChange {
        let next = Observed {
            history: snapshot.history().to_vec(),
            has_progress: snapshot.progress.is_some(),
            terminal: snapshot.is_terminal(),
        };
        let change = match &self.last {
            None if next.history.is_empty() => HistoryChange::Unchanged,
            None => HistoryChange::Appended {
                added: next.history.len(),
            },
            Some(prev) => classify(prev, &next),
        };
        self.last = Some(next);
        change
    }

    pub fn len(&self) -> usize {
        self.last.as_ref().map_or(0, |last| last.history.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn classify(prev: &Observed, next: &Observed) -> HistoryChange {
    if prev.has_progress && !next.has_progress {
        return HistoryChange::Reset;
    }
    if is_prefix_extension(&prev.history, &next.history) {
        let added = next.history.len() - prev.history.len();
        return if added == 0 {
            HistoryChange::Unchanged
        } else {
            HistoryChange::Appended { added }
        };
    }
    if prev.terminal {
        HistoryChange::Reset
    } else {
        HistoryChange::Regressed
    }
}
