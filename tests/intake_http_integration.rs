//! Integration tests for the intake HTTP API.
//!
//! The full router is driven with `tower::ServiceExt::oneshot` against an
//! in-memory store and scripted generators.

use axum::body::{to_bytes, Body};
use axum::Router;
use http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use consult_intake::adapters::ai::{LlmReportGenerator, MockError, MockTextGenerator, ReportSettings};
use consult_intake::adapters::http::{app_router, IntakeHandlers};
use consult_intake::adapters::storage::InMemorySessionStore;
use consult_intake::application::handlers::intake::{
    GenerationLimits, HandleTurnHandler, IntakeService, ReportTriggerHandler,
};
use consult_intake::domain::foundation::SessionKey;
use consult_intake::domain::intake::IntakeSettings;
use consult_intake::ports::SessionStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    store: Arc<InMemorySessionStore>,
    dialogue: MockTextGenerator,
}

fn test_app_with(dialogue: MockTextGenerator, writer: MockTextGenerator) -> TestApp {
    let store = Arc::new(InMemorySessionStore::new());
    let settings = Arc::new(IntakeSettings::default());

    let reports = LlmReportGenerator::new(Arc::new(writer), ReportSettings::default());
    let trigger = Arc::new(ReportTriggerHandler::new(
        Arc::new(reports),
        settings.report_completion,
        Duration::from_secs(5),
    ));
    let controller = HandleTurnHandler::new(
        Arc::new(dialogue.clone()),
        trigger,
        settings,
        GenerationLimits::default(),
    );
    let service = Arc::new(IntakeService::new(store.clone(), controller));

    TestApp {
        router: app_router(
            IntakeHandlers::new(service, 2000),
            &["http://localhost:3000".to_string()],
            Duration::from_secs(30),
        ),
        store,
        dialogue,
    }
}

fn test_app() -> TestApp {
    test_app_with(MockTextGenerator::new(), MockTextGenerator::new())
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn turn(app: &TestApp, key: &str, query: &str) -> Value {
    let (status, body) = send(
        &app.router,
        Method::POST,
        "/intake/turns",
        Some(json!({ "query": query, "session_key": key })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    body
}

// =============================================================================
// Health and original endpoint
// =============================================================================

#[tokio::test]
async fn health_check_reports_ok() {
    let app = test_app();

    let (status, body) = send(&app.router, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "message": "consult-intake API is running"}));
}

#[tokio::test]
async fn original_endpoint_accepts_spanish_fields_and_generates_key() {
    let app = test_app_with(
        MockTextGenerator::new().with_response("¿Qué herramientas usan hoy?"),
        MockTextGenerator::new(),
    );

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/gpt",
        Some(json!({"query": "Hola", "rol": "Investigador", "temperatura": 0.3, "estilo": "Conversacional"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "¿Qué herramientas usan hoy?");
    assert_eq!(body["kind"], "reply");
    assert_eq!(body["ready_to_generate"], false);
    assert!(body.get("report").is_none());

    let key = SessionKey::new(body["session_key"].as_str().unwrap()).unwrap();
    let session = app.store.load(&key).await.unwrap().unwrap();
    assert_eq!(session.history().len(), 1);
    assert_eq!(app.dialogue.get_calls()[0].temperature, 0.3);
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn invalid_turn_requests_are_rejected_before_the_core() {
    let app = test_app();
    let too_long = "a".repeat(2001);
    let cases = [
        json!({"query": "   "}),
        json!({"query": too_long}),
        json!({"query": "hello", "temperature": 3.0}),
        json!({"query": "hello", "session_key": "bad key/"}),
    ];

    for case in cases {
        let (status, body) = send(&app.router, Method::POST, "/intake/turns", Some(case)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    assert_eq!(app.dialogue.call_count(), 0);
    assert_eq!(app.store.session_count().await, 0);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/gpt")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Dialogue lifecycle
// =============================================================================

#[tokio::test]
async fn full_intake_reaches_readiness_and_produces_report() {
    let app = test_app_with(
        MockTextGenerator::new(),
        MockTextGenerator::new().with_response("Strategic Diagnosis ..."),
    );

    let greeting = turn(&app, "acme", "start").await;
    assert_eq!(greeting["kind"], "greeting");

    turn(&app, "acme", "Our invoicing process is manual").await;
    turn(&app, "acme", "We use a spreadsheet tool").await;
    turn(&app, "acme", "The main problem is duplicated data").await;
    let nudged = turn(&app, "acme", "Approvals take a week").await;
    assert_eq!(nudged["kind"], "nudged");
    assert_eq!(nudged["ready_to_generate"], true);
    assert!(nudged["reply"].as_str().unwrap().contains("generate report"));

    let report = turn(&app, "acme", "generate report").await;
    assert_eq!(report["kind"], "report");
    assert_eq!(report["report"], "Strategic Diagnosis ...");

    let (status, view) = send(&app.router, Method::GET, "/intake/sessions/acme", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["phase"], "idle");
    assert_eq!(view["turns"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn generation_failure_is_a_categorized_reply() {
    let app = test_app_with(
        MockTextGenerator::new().with_error(MockError::AuthenticationFailed),
        MockTextGenerator::new(),
    );

    let body = turn(&app, "user-1", "hello").await;

    assert_eq!(body["kind"], "failed");
    assert!(body["reply"].as_str().unwrap().starts_with("❌ Authentication error"));
}

// =============================================================================
// Session endpoints
// =============================================================================

#[tokio::test]
async fn unknown_session_is_not_found() {
    let app = test_app();

    let (status, body) = send(&app.router, Method::GET, "/intake/sessions/ghost", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SESSION_NOT_FOUND");
    assert!(body["message"].as_str().unwrap().contains("start a new conversation"));

    let (status, _) = send(&app.router, Method::POST, "/intake/sessions/ghost/report", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn report_endpoint_runs_trigger_for_stored_session() {
    let app = test_app_with(
        MockTextGenerator::new(),
        MockTextGenerator::new().with_response("Full report"),
    );
    turn(&app, "user-2", "Our data flow breaks weekly").await;

    let (status, body) = send(&app.router, Method::POST, "/intake/sessions/user-2/report", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "report");
    assert_eq!(body["report"], "Full report");
}

#[tokio::test]
async fn delete_resets_the_session() {
    let app = test_app();
    turn(&app, "user-3", "hello").await;

    let (status, body) = send(&app.router, Method::DELETE, "/intake/sessions/user-3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_key"], "user-3");

    let (status, _) = send(&app.router, Method::GET, "/intake/sessions/user-3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/gpt")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
}
