use std::time::Duration;

use pretty_assertions::assert_eq;
use reindex_client::{
    execute, ControllerSettings, ControllerVariant, HttpJobController, HttpSettings,
    JobController, TransportErrorKind,
};
use reindex_core::{Command, HistoryEntry, JobSnapshot, OverwriteMode, ProgressInfo, StartRequest};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn controller(server: &MockServer, variant: ControllerVariant) -> HttpJobController {
    let settings = ControllerSettings {
        variant,
        ..ControllerSettings::new(format!("{}/manage/", server.uri()))
    };
    HttpJobController::new(settings).expect("client builds")
}

fn running_json() -> serde_json::Value {
    json!({
        "code": 0,
        "message": "processing",
        "running": true,
        "workers": 4,
        "progress": {
            "name": "p2",
            "current": 2,
            "max": 3,
            "processedItems": 120,
            "elapsedTime": 1500,
            "history": [
                {"name": "p1", "elapsedTime": 5000, "current": 120, "reasonMessage": ""}
            ]
        }
    })
}

#[tokio::test]
async fn status_decodes_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/manage/getStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(running_json()))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = controller(&server, ControllerVariant::Extended)
        .status()
        .await
        .expect("status ok");

    assert_eq!(
        snapshot,
        JobSnapshot {
            code: 0,
            message: "processing".to_string(),
            running: true,
            workers: 4,
            progress: Some(ProgressInfo {
                name: "p2".to_string(),
                current: 2,
                max: 3,
                processed_items: 120,
                elapsed_time: 1500,
                history: vec![HistoryEntry {
                    name: "p1".to_string(),
                    elapsed_time: 5000,
                    current: 120,
                    reason_message: Some(String::new()),
                }],
            }),
        }
    );
}

#[tokio::test]
async fn extended_start_sends_all_options() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/manage/rebuildDatabase"))
        .and(body_json(json!({"workers": 4, "job": "app", "overwrite": "SKIP"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(running_json()))
        .expect(1)
        .mount(&server)
        .await;

    let request = StartRequest {
        workers: 4,
        job: Some("app".to_string()),
        overwrite: Some(OverwriteMode::Skip),
    };
    let snapshot = execute(
        &controller(&server, ControllerVariant::Extended),
        &Command::Start(request),
    )
    .await
    .expect("start ok");
    assert!(snapshot.running);
}

#[tokio::test]
async fn minimal_start_sends_only_worker_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/manage/rebuildDatabase"))
        .and(body_json(json!({"workers": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(running_json()))
        .expect(1)
        .mount(&server)
        .await;

    let request = StartRequest {
        workers: 2,
        job: Some("app".to_string()),
        overwrite: Some(OverwriteMode::Overwrite),
    };
    controller(&server, ControllerVariant::Minimal)
        .start(&request)
        .await
        .expect("start ok");
}

#[tokio::test]
async fn abort_and_clean_hit_their_endpoints() {
    let server = MockServer::start().await;
    for endpoint in ["/manage/abort", "/manage/clean"] {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "message": "idle",
                "running": false
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let controller = controller(&server, ControllerVariant::Extended);
    let aborted = controller.abort().await.expect("abort ok");
    let cleaned = controller.clean().await.expect("clean ok");

    assert!(!aborted.running);
    assert!(cleaned.progress.is_none());
}

#[tokio::test]
async fn http_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/manage/getStatus"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = controller(&server, ControllerVariant::Extended)
        .status()
        .await
        .unwrap_err();
    assert_eq!(err.kind, TransportErrorKind::HttpStatus(503));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/manage/getStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = controller(&server, ControllerVariant::Extended)
        .status()
        .await
        .unwrap_err();
    assert_eq!(err.kind, TransportErrorKind::Decode);
}

#[tokio::test]
async fn slow_controller_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/manage/getStatus"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(running_json()),
        )
        .mount(&server)
        .await;

    let settings = ControllerSettings {
        http: HttpSettings {
            request_timeout: Duration::from_millis(50),
            ..HttpSettings::default()
        },
        ..ControllerSettings::new(format!("{}/manage", server.uri()))
    };
    let err = HttpJobController::new(settings)
        .expect("client builds")
        .status()
        .await
        .unwrap_err();
    assert_eq!(err.kind, TransportErrorKind::Timeout);
}

#[tokio::test]
async fn invalid_base_url_fails_without_request() {
    let controller =
        HttpJobController::new(ControllerSettings::new("not a url")).expect("client builds");
    let err = controller.status().await.unwrap_err();
    assert_eq!(err.kind, TransportErrorKind::InvalidUrl);
}
