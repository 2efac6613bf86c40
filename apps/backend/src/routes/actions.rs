//! Action dispatch endpoint.

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::dispatch::ActionRequest;
use crate::error::AppError;
use crate::extractors::validated_json::ValidatedJson;
use crate::state::app_state::AppState;

/// POST /api/actions
///
/// Body: `{ "modeId": "...", "payload": { ... } }` with the caller's bearer
/// credential in the `Authorization` header. Authentication onwards belongs
/// to the dispatcher's pipeline; this handler only peels the wire shapes.
async fn post_action(
    http_req: HttpRequest,
    body: ValidatedJson<ActionRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let authorization = http_req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let response = app_state
        .dispatcher
        .dispatch(authorization, body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(post_action));
}
