use actix_web::web;

pub mod actions;
pub mod health;
pub mod modes;

/// Configure application routes for the production server and tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Mode discovery routes: /api/modes
    cfg.service(web::scope("/api/modes").configure(modes::configure_routes));

    // Action dispatch routes: /api/actions
    cfg.service(web::scope("/api/actions").configure(actions::configure_routes));
}
