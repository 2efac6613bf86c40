//! Discovery endpoint tests: registered identifiers, insertion order.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use async_trait::async_trait;
use parlor_backend::modes::blackjack::BlackjackMode;
use parlor_backend::modes::{erase, GameMode};
use parlor_backend::{routes, AppState, AuthContext, DomainError, GameModeRegistry, SecurityConfig};
use serde::{Deserialize, Serialize};

struct HeartsMode;

#[derive(Deserialize)]
struct HeartsInput {}

#[derive(Serialize)]
struct HeartsOutput {}

#[async_trait]
impl GameMode for HeartsMode {
    type Input = HeartsInput;
    type Output = HeartsOutput;

    fn name(&self) -> &'static str {
        "hearts"
    }

    fn version(&self) -> &'static str {
        "0.2"
    }

    async fn handle(
        &self,
        _ctx: &AuthContext,
        _input: HeartsInput,
    ) -> Result<HeartsOutput, DomainError> {
        Ok(HeartsOutput {})
    }
}

#[actix_web::test]
async fn modes_are_listed_in_registration_order() {
    let mut registry = GameModeRegistry::new();
    registry.register(erase(BlackjackMode)).unwrap();
    registry.register(erase(HeartsMode)).unwrap();

    let state = web::Data::new(AppState::new(
        Arc::new(registry),
        SecurityConfig::new(b"discovery-test-secret".to_vec()),
    ));

    let app = test::init_service(
        App::new()
            .app_data(state)
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/modes").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;

    assert_eq!(body["modes"][0]["id"], "blackjack");
    assert_eq!(body["modes"][0]["version"], "0.1");
    assert_eq!(body["modes"][1]["id"], "hearts");
    assert_eq!(body["modes"][1]["version"], "0.2");
    assert!(body["modes"][2].is_null());
}
