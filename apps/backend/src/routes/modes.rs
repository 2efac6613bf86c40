//! Game-mode discovery endpoint.

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Serialize)]
struct ModeInfo {
    id: String,
    version: String,
}

#[derive(Serialize)]
struct ModesResponse {
    modes: Vec<ModeInfo>,
}

/// GET /api/modes
///
/// Lists registered game-mode identifiers in registration order.
async fn list_modes(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let modes = app_state
        .registry
        .entries()
        .map(|handler| ModeInfo {
            id: handler.name().to_string(),
            version: handler.version().to_string(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(ModesResponse { modes }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_modes));
}
