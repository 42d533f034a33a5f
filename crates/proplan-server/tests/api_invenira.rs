use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use proplan_server::{app, build_state, config::Config, repository::StaticRepository, AppState};
use proplan_types::{ActivityId, AnalyticsContract, AnalyticsDescriptor, StudentAnalytics};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

const BASE_URL: &str = "https://proplan.test";

fn descriptor(name: &str, kind: &str) -> AnalyticsDescriptor {
    AnalyticsDescriptor {
        name: name.to_string(),
        kind: kind.to_string(),
    }
}

fn test_state() -> AppState {
    let contract = AnalyticsContract {
        quant_analytics: vec![descriptor("decisions_count", "integer")],
        qual_analytics: vec![descriptor("decision_log_url", "URL")],
    };
    let repo = StaticRepository::new(BASE_URL, "1001", Vec::new(), contract);
    AppState::new(Arc::new(repo))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_check_returns_ok() {
    let (status, body) = send(app(test_state()), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn config_page_is_html() {
    let response = app(test_state())
        .oneshot(get("/config-proplan"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
}

#[tokio::test]
async fn deploy_returns_plain_text_launch_url() {
    let state = test_state();
    let response = app(state.clone())
        .oneshot(get("/deploy-proplan?activityID=A1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"https://proplan.test/atividade/A1");

    let record = state
        .deploy_registry
        .get(&ActivityId::parse("A1").unwrap())
        .unwrap()
        .expect("deploy should be registered");
    assert_eq!(record.access_url, "https://proplan.test/atividade/A1");
}

#[tokio::test]
async fn deploy_without_activity_id_is_bad_request() {
    let state = test_state();

    for uri in ["/deploy-proplan", "/deploy-proplan?activityID="] {
        let (status, body) = send(app(state.clone()), get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
        assert_eq!(body, b"Missing 'activityID' parameter.");
    }

    assert!(state.deploy_registry.deployments().unwrap().is_empty());
    assert!(state.decision_log.logs().unwrap().is_empty());
}

#[tokio::test]
async fn deploy_accepts_whitespace_activity_id() {
    let state = test_state();

    let (status, body) = send(app(state.clone()), get("/deploy-proplan?activityID=%20%20")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"https://proplan.test/atividade/  ");
    let record = state
        .deploy_registry
        .get(&ActivityId::parse("  ").unwrap())
        .unwrap()
        .expect("deploy should be registered");
    assert_eq!(record.access_url, "https://proplan.test/atividade/  ");
}

#[tokio::test]
async fn analytics_returns_one_student_and_counts_request() {
    let state = test_state();
    let (status, body) = send(
        app(state.clone()),
        post_json("/analytics-proplan", r#"{"activityID":"A2"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let records: Vec<StudentAnalytics> = serde_json::from_slice(&body).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].invenira_std_id, "1001");
    assert_eq!(records[0].quant_analytics[0].value, 12);
    assert_eq!(
        records[0].qual_analytics[0].value,
        "https://proplan.test/analytics/A2/1001/decision-log"
    );

    let id = ActivityId::parse("A2").unwrap();
    assert_eq!(state.request_counter.count(&id).unwrap(), 1);
}

#[tokio::test]
async fn analytics_rejects_missing_or_malformed_activity_id() {
    let state = test_state();

    for body in ["{}", r#"{"activityID":""}"#, r#"{"activityID":42}"#, "not json"] {
        let (status, response) =
            send(app(state.clone()), post_json("/analytics-proplan", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        let json: Value = serde_json::from_slice(&response).unwrap();
        assert!(json["error"].is_string());
    }

    assert!(state.request_counter.counters().unwrap().is_empty());
}

#[tokio::test]
async fn analytics_body_is_read_regardless_of_content_type() {
    let state = test_state();
    let request = Request::builder()
        .method("POST")
        .uri("/analytics-proplan")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"activityID":"A4"}"#))
        .unwrap();

    let (status, _) = send(app(state.clone()), request).await;

    assert_eq!(status, StatusCode::OK);
    let id = ActivityId::parse("A4").unwrap();
    assert_eq!(state.request_counter.count(&id).unwrap(), 1);
}

#[tokio::test]
async fn analytics_list_serves_contract() {
    let (status, body) = send(app(test_state()), get("/analytics-list-proplan")).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["quantAnalytics"][0]["name"], "decisions_count");
    assert_eq!(json["qualAnalytics"][0]["type"], "URL");
}

#[tokio::test]
async fn shipped_data_files_load() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..");
    let mut config = Config::default();
    config.provider.json_params_path = root.join("data/json_params_url.json");
    config.provider.analytics_schema_path = root.join("data/analytics_url.json");

    let state = build_state(&config).expect("shipped data should load");

    let (status, body) = send(app(state.clone()), get("/json-params-proplan")).await;
    assert_eq!(status, StatusCode::OK);
    let params: Value = serde_json::from_slice(&body).unwrap();
    assert!(!params.as_array().unwrap().is_empty());

    let (status, body) = send(app(state), get("/analytics-list-proplan")).await;
    assert_eq!(status, StatusCode::OK);
    let contract: AnalyticsContract = serde_json::from_slice(&body).unwrap();
    assert_eq!(contract.quant_analytics.len(), 6);
    assert_eq!(contract.qual_analytics.len(), 3);
}
