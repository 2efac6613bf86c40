use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use parlor_backend::config::modes::load_registry;
use parlor_backend::middleware::cors::cors_middleware;
use parlor_backend::middleware::request_trace::RequestTrace;
use parlor_backend::middleware::structured_logger::StructuredLogger;
use parlor_backend::middleware::trace_span::TraceSpan;
use parlor_backend::routes;
use parlor_backend::state::app_state::AppState;
use parlor_backend::state::security_config::SecurityConfig;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let jwt = match std::env::var("BACKEND_JWT_SECRET") {
        Ok(jwt) => jwt,
        Err(_) => {
            eprintln!("❌ BACKEND_JWT_SECRET must be set");
            std::process::exit(1);
        }
    };
    let security_config = SecurityConfig::new(jwt.as_bytes());

    // Registration is serialized here, before any request traffic. A bad
    // mode list is fatal rather than running with an inconsistent registry.
    let registry = match load_registry() {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            eprintln!("❌ Failed to build game-mode registry: {e}");
            std::process::exit(1);
        }
    };

    println!("🚀 Starting Parlor Backend on http://{host}:{port}");
    println!(
        "✅ Game modes: {}",
        registry.modes().collect::<Vec<_>>().join(", ")
    );

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(AppState::new(registry, security_config));

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
