use reindex_core::{
    AppViewModel, ControlVisibility, LineKind, MessageSeverity, ProgressPanel, ResultsView,
    UiState,
};

use super::constants::*;

/// Renders the rebuild panel as terminal lines. `updated_at` is the local
/// time of the snapshot being shown, if any.
pub fn render(view: &AppViewModel, updated_at: Option<&str>) -> Vec<String> {
    let mut lines = render_status(&view.status, updated_at);
    if let Some(results) = &view.results {
        lines.push(String::new());
        lines.extend(render_results(results));
    }
    lines
}

fn render_status(status: &UiState, updated_at: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();

    let tag = match status.message_severity {
        MessageSeverity::Success => TAG_OK,
        MessageSeverity::Error => TAG_ERROR,
    };
    let header = match updated_at {
        Some(time) => format!("{tag} {} (updated {time})", status.message_text),
        None => format!("{tag} {}", status.message_text),
    };
    lines.push(header);

    if let Some(progress) = &status.progress {
        lines.push(format!("{INDENT}{}", progress_label(progress)));
    }

    if !status.history.is_empty() {
        lines.push(format!("{INDENT}History:"));
        for line in &status.history {
            let mark = match line.kind {
                LineKind::Success => MARK_SUCCESS,
                LineKind::Error => MARK_FAILURE,
            };
            lines.push(format!("{INDENT}{INDENT}{mark} {}", line.text));
        }
    }

    lines.push(format!("{INDENT}Available: {}", available_actions(&status.controls)));
    lines
}

/// `p1 (1/3) - 120 items, 5s, 4 workers`
pub fn progress_label(progress: &ProgressPanel) -> String {
    format!(
        "{} ({}/{}) - {} items, {}s, {} workers",
        progress.currently_processing_name,
        progress.current_index,
        progress.current_max,
        progress.processed_items,
        progress.elapsed_display,
        progress.current_workers
    )
}

fn available_actions(controls: &ControlVisibility) -> String {
    let mut actions = Vec::new();
    if controls.start_button {
        actions.push("start");
    }
    if controls.clean_button {
        actions.push("clean");
    }
    if controls.abort_button {
        actions.push("abort");
    }
    actions.join(", ")
}

fn render_results(results: &ResultsView) -> Vec<String> {
    let mut lines = vec![results.count_label.clone()];
    for row in &results.rows {
        lines.push(format!("{INDENT}{} <{}>", row.title, row.url));
        for fragment in &row.fragments {
            for text in fragment.lines() {
                lines.push(format!("{INDENT}{INDENT}{text}"));
            }
        }
    }

    let mut pager = Vec::new();
    if results.prev_visible {
        pager.push("prev");
    }
    if results.next_visible {
        pager.push("next");
    }
    if !pager.is_empty() {
        lines.push(format!("{INDENT}More: {}", pager.join(", ")));
    }
    lines
}
