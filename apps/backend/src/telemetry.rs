//! Tracing bootstrap for the server binary.
//!
//! JSON lines on stdout. `RUST_LOG` overrides the default filter; the
//! default keeps the dispatcher's stage logging visible while quieting
//! actix internals.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,parlor_backend=debug,actix_http=warn"));

    let fmt_layer = fmt::layer()
        .json()
        .flatten_event(true)
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
