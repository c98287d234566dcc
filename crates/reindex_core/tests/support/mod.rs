#![allow(dead_code)]

use reindex_core::{HistoryEntry, JobSnapshot, ProgressInfo};

pub fn init_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(reindex_logging::initialize_for_tests);
}

pub fn entry(name: &str, elapsed_time: u64, current: u64, reason: Option<&str>) -> HistoryEntry {
    HistoryEntry {
        name: name.to_string(),
        elapsed_time,
        current,
        reason_message: reason.map(str::to_string),
    }
}

pub fn running(
    workers: u32,
    name: &str,
    current: u32,
    max: u32,
    history: Vec<HistoryEntry>,
) -> JobSnapshot {
    JobSnapshot {
        code: 0,
        message: "processing".to_string(),
        running: true,
        workers,
        progress: Some(ProgressInfo {
            name: name.to_string(),
            current,
            max,
            processed_items: 0,
            elapsed_time: 0,
            history,
        }),
    }
}

pub fn finished(name: &str, max: u32, history: Vec<HistoryEntry>) -> JobSnapshot {
    JobSnapshot {
        code: 0,
        message: "Completed without errors".to_string(),
        running: false,
        workers: 0,
        progress: Some(ProgressInfo {
            name: name.to_string(),
            current: max,
            max,
            processed_items: 0,
            elapsed_time: 0,
            history,
        }),
    }
}

pub fn never_started() -> JobSnapshot {
    JobSnapshot {
        code: 0,
        message: "Never started".to_string(),
        running: false,
        workers: 0,
        progress: None,
    }
}
