//! HTTP-level tests for the action dispatch and discovery endpoints, wired
//! with the same middleware chain as the production server.

use std::sync::Arc;
use std::time::SystemTime;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use parlor_backend::modes::blackjack::BlackjackMode;
use parlor_backend::modes::erase;
use parlor_backend::{
    mint_access_token, routes, AppState, GameModeRegistry, RequestTrace, SecurityConfig,
    StructuredLogger, TraceSpan,
};
use serde_json::json;

const TEST_SECRET: &[u8] = b"routes-test-secret";

fn test_state() -> web::Data<AppState> {
    let mut registry = GameModeRegistry::new();
    registry.register(erase(BlackjackMode)).unwrap();
    web::Data::new(AppState::new(
        Arc::new(registry),
        SecurityConfig::new(TEST_SECRET),
    ))
}

fn bearer(modes: Option<Vec<String>>) -> String {
    let token = mint_access_token(
        "player-1",
        "player@example.com",
        modes,
        SystemTime::now(),
        &SecurityConfig::new(TEST_SECRET),
    )
    .unwrap();
    format!("Bearer {token}")
}

#[actix_web::test]
async fn health_returns_ok() {
    let app = test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(test_state())
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "ok");
}

#[actix_web::test]
async fn action_without_credential_is_401() {
    let app = test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(test_state())
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/actions")
        .set_json(json!({ "modeId": "blackjack", "payload": { "action": "hit" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
}

#[actix_web::test]
async fn action_on_unknown_mode_is_404() {
    let app = test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(test_state())
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/actions")
        .insert_header(("Authorization", bearer(None)))
        .set_json(json!({ "modeId": "poker", "payload": { "action": "hit" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNKNOWN_MODE",
        StatusCode::NOT_FOUND,
        Some("poker"),
    )
    .await;
}

#[actix_web::test]
async fn action_outside_allowlist_is_403() {
    let app = test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(test_state())
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/actions")
        .insert_header(("Authorization", bearer(Some(vec![]))))
        .set_json(json!({ "modeId": "blackjack", "payload": { "action": "hit" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "MODE_NOT_ALLOWED",
        StatusCode::FORBIDDEN,
        Some("blackjack"),
    )
    .await;
}

#[actix_web::test]
async fn action_with_mismatched_payload_is_400() {
    let app = test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(test_state())
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/actions")
        .insert_header(("Authorization", bearer(None)))
        .set_json(json!({ "modeId": "blackjack", "payload": { "action": "double_down" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "INVALID_PAYLOAD",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn malformed_json_body_is_400() {
    let app = test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(test_state())
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/actions")
        .insert_header(("Authorization", bearer(None)))
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid JSON"),
    )
    .await;
}

#[actix_web::test]
async fn valid_action_returns_result_with_trace_header() {
    let app = test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(test_state())
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/actions")
        .insert_header(("Authorization", bearer(None)))
        .set_json(json!({ "modeId": "blackjack", "payload": { "action": "stand", "table": "table-9" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-trace-id"));

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["result"]["mode"], "blackjack");
    assert_eq!(body["result"]["action"], "stand");
    assert_eq!(body["result"]["table"], "table-9");
    assert_eq!(body["result"]["accepted"], true);
}
