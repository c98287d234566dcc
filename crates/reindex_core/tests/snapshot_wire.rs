use reindex_core::{render, Hit, JobSnapshot, MessageSeverity, OverwriteMode, StartRequest};

#[test]
fn decodes_controller_json() {
    let json = r#"{
        "code": 0,
        "message": "processing",
        "running": true,
        "workers": 4,
        "progress": {
            "name": "p2",
            "current": 2,
            "max": 3,
            "processedItems": 120,
            "elapsedTime": 2500,
            "history": [
                {"name": "p1", "elapsedTime": 5000, "current": 120, "reasonMessage": ""}
            ]
        }
    }"#;

    let snapshot: JobSnapshot = serde_json::from_str(json).expect("valid snapshot");

    assert!(snapshot.running);
    let progress = snapshot.progress.as_ref().expect("progress");
    assert_eq!(progress.processed_items, 120);
    assert_eq!(progress.elapsed_time, 2500);
    assert_eq!(progress.history[0].reason_message.as_deref(), Some(""));
    assert!(!progress.history[0].is_failure());
}

#[test]
fn missing_and_null_fields_default() {
    let snapshot: JobSnapshot =
        serde_json::from_str(r#"{"code": 2, "message": "boom", "progress": null}"#)
            .expect("valid snapshot");
    assert_eq!(snapshot.code, 2);
    assert!(!snapshot.running);
    assert_eq!(snapshot.workers, 0);
    assert!(snapshot.progress.is_none());
    assert!(snapshot.history().is_empty());

    let snapshot: JobSnapshot = serde_json::from_str(
        r#"{"running": true, "progress": {"name": "p1", "current": 1, "max": 1,
            "history": [{"name": "x", "reasonMessage": null}]}}"#,
    )
    .expect("valid snapshot");
    assert_eq!(snapshot.history()[0].reason_message, None);
}

#[test]
fn null_strings_read_as_empty() {
    let snapshot: JobSnapshot = serde_json::from_str(
        r#"{"code": 2, "message": null, "running": false, "progress": null}"#,
    )
    .expect("valid snapshot");
    assert_eq!(snapshot.message, "");

    let view = render(&snapshot);
    assert_eq!(view.message_severity, MessageSeverity::Error);
    assert_eq!(view.message_text, "");
}

#[test]
fn status_reply_with_unset_progress_name_renders() {
    let json = r#"{
        "code": 0,
        "message": "Currently working, wait for it ....",
        "running": true,
        "progress": {
            "name": null,
            "current": 2,
            "max": 3,
            "processedItems": 40,
            "elapsedTime": 1500,
            "history": [
                {"name": "p1", "elapsedTime": 3000, "current": 40, "reasonMessage": null},
                {"name": null, "elapsedTime": 0, "current": 0, "reasonMessage": "gone"}
            ]
        }
    }"#;

    let snapshot: JobSnapshot = serde_json::from_str(json).expect("valid snapshot");

    assert_eq!(snapshot.workers, 0);
    let progress = snapshot.progress.as_ref().expect("progress");
    assert_eq!(progress.name, "");
    assert_eq!(progress.history[1].name, "");

    let view = render(&snapshot);
    assert!(view.progress_visible());
    assert_eq!(view.history.len(), 2);
    assert_eq!(
        view.history[0].text,
        "p1 completed after 3s (40 elements processed)"
    );
}

#[test]
fn start_request_omits_absent_options() {
    let json = serde_json::to_value(StartRequest::new(3)).expect("serializable");
    assert_eq!(json, serde_json::json!({"workers": 3}));

    let request = StartRequest {
        workers: 1,
        job: Some("app".into()),
        overwrite: Some(OverwriteMode::Overwrite),
    };
    let json = serde_json::to_value(request).expect("serializable");
    assert_eq!(
        json,
        serde_json::json!({"workers": 1, "job": "app", "overwrite": "OVERWRITE"})
    );
}

#[test]
fn decodes_search_hits() {
    let hits: Vec<Hit> = serde_json::from_str(
        r#"[{"url": "/job/a/1/", "searchName": "a #1", "showConsole": true,
             "bestFragments": ["<b>error</b>"]}]"#,
    )
    .expect("valid hits");
    assert_eq!(hits[0].search_name, "a #1");
    assert!(hits[0].show_console);
}
