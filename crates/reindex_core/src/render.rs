use crate::{
    ControlVisibility, HistoryEntry, HistoryLine, JobSnapshot, LineKind, MessageSeverity,
    ProgressPanel, UiState,
};

/// Pure reducer: derives the full panel state from one snapshot.
///
/// Nothing is carried over from earlier renders, so a history list from a
/// previous run can never leak into the current one.
pub fn render(snapshot: &JobSnapshot) -> UiState {
    let message_severity = if snapshot.is_error() {
        MessageSeverity::Error
    } else {
        MessageSeverity::Success
    };

    let (progress, history) = match &snapshot.progress {
        Some(progress) => (
            Some(ProgressPanel {
                current_workers: snapshot.workers,
                currently_processing_name: progress.name.clone(),
                current_index: progress.current,
                current_max: progress.max,
                processed_items: progress.processed_items,
                elapsed_millis: progress.elapsed_time,
                elapsed_display: format_seconds(progress.elapsed_time),
            }),
            progress.history.iter().map(history_line).collect(),
        ),
        None => (None, Vec::new()),
    };

    UiState {
        message_severity,
        message_text: snapshot.message.clone(),
        controls: ControlVisibility::for_running(snapshot.running),
        progress,
        history,
    }
}

/// One line per completed sub-job, e.g.
/// `p1 completed after 5s (120 elements processed): disk full`.
pub fn history_line(entry: &HistoryEntry) -> HistoryLine {
    let base = format!(
        "{} completed after {}s ({} elements processed)",
        entry.name,
        format_seconds(entry.elapsed_time),
        entry.current
    );
    match entry.failure_reason() {
        Some(reason) => HistoryLine {
            text: format!("{base}: {reason}"),
            kind: LineKind::Error,
        },
        None => HistoryLine {
            text: base,
            kind: LineKind::Success,
        },
    }
}

/// Milliseconds as decimal seconds without trailing zeros: 5000 -> "5",
/// 1500 -> "1.5", 1234 -> "1.234".
pub fn format_seconds(millis: u64) -> String {
    let whole = millis / 1000;
    let frac = millis % 1000;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:03}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}
