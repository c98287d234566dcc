mod support;

use reindex_core::{
    is_prefix_extension, render, update, AppState, HistoryChange, HistoryTracker, JobSnapshot,
    Msg, SnapshotSource,
};
use support::{entry, finished, never_started, running};

#[test]
fn prefix_extension_basics() {
    let a = entry("a", 1, 1, None);
    let b = entry("b", 2, 2, Some("x"));

    assert!(is_prefix_extension(&[], &[]));
    assert!(is_prefix_extension(&[], &[a.clone()]));
    assert!(is_prefix_extension(&[a.clone()], &[a.clone(), b.clone()]));
    assert!(!is_prefix_extension(&[a.clone(), b.clone()], &[a.clone()]));
    assert!(!is_prefix_extension(&[a.clone()], &[b.clone(), a]));
}

#[test]
fn tracker_classifies_a_full_run() {
    let p1 = entry("p1", 5000, 120, None);
    let p2 = entry("p2", 1000, 12, Some("disk full"));
    let p3 = entry("p3", 10, 1, None);
    let mut tracker = HistoryTracker::new();

    assert_eq!(tracker.observe(&never_started()), HistoryChange::Unchanged);
    assert_eq!(
        tracker.observe(&running(4, "p1", 1, 3, Vec::new())),
        HistoryChange::Unchanged
    );
    assert_eq!(
        tracker.observe(&running(4, "p2", 2, 3, vec![p1.clone()])),
        HistoryChange::Appended { added: 1 }
    );
    assert_eq!(
        tracker.observe(&running(4, "p2", 2, 3, vec![p1.clone()])),
        HistoryChange::Unchanged
    );
    assert_eq!(
        tracker.observe(&finished("p3", 3, vec![p1.clone(), p2.clone(), p3.clone()])),
        HistoryChange::Appended { added: 2 }
    );
    assert_eq!(tracker.len(), 3);

    // Next run starts from scratch once the previous one is over.
    assert_eq!(
        tracker.observe(&running(4, "p1", 1, 3, Vec::new())),
        HistoryChange::Reset
    );
    assert!(tracker.is_empty());
}

#[test]
fn clean_resets_history() {
    let mut tracker = HistoryTracker::new();
    tracker.observe(&finished("p1", 1, vec![entry("p1", 1, 1, None)]));

    let cleaned = JobSnapshot {
        message: "cleaned".into(),
        ..JobSnapshot::default()
    };
    assert_eq!(tracker.observe(&cleaned), HistoryChange::Reset);
}

#[test]
fn shrinking_history_mid_run_is_a_regression() {
    let p1 = entry("p1", 1, 1, None);
    let p2 = entry("p2", 1, 1, None);
    let mut tracker = HistoryTracker::new();
    tracker.observe(&running(2, "p3", 3, 4, vec![p1.clone(), p2]));

    assert_eq!(
        tracker.observe(&running(2, "p2", 2, 4, vec![p1])),
        HistoryChange::Regressed
    );
}

#[test]
fn rendered_history_is_monotonic_within_a_run() {
    let entries = vec![
        entry("p1", 100, 1, None),
        entry("p2", 200, 2, Some("oops")),
        entry("p3", 300, 3, None),
    ];
    let mut state = AppState::new();
    let mut previous: Vec<String> = Vec::new();

    for done in 0..=entries.len() {
        let snapshot = if done == entries.len() {
            finished("p3", 3, entries.clone())
        } else {
            running(2, "p", done as u32 + 1, 3, entries[..done].to_vec())
        };
        assert!(snapshot
            .progress
            .as_ref()
            .is_some_and(|progress| progress.is_consistent(snapshot.running)));

        let (next, _) = update(
            state,
            Msg::SnapshotReceived {
                source: SnapshotSource::Poll,
                snapshot: snapshot.clone(),
            },
        );
        state = next;
        let lines: Vec<String> = state
            .view()
            .status
            .history
            .into_iter()
            .map(|line| line.text)
            .collect();
        assert!(lines.starts_with(&previous));
        let rendered: Vec<String> = render(&snapshot)
            .history
            .into_iter()
            .map(|line| line.text)
            .collect();
        assert_eq!(lines, rendered);
        previous = lines;
    }
    assert_eq!(previous.len(), 3);
}

#[test]
fn consistency_check_flags_bad_lengths() {
    let snapshot = running(1, "p2", 2, 3, Vec::new());
    let progress = snapshot.progress.expect("progress");
    assert!(!progress.is_consistent(true));
    assert!(!progress.is_consistent(false));
}
