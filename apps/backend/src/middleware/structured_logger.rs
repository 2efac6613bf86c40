//! Request completion logging.
//!
//! Emits one `request_completed` event per request carrying the method,
//! path, status, latency, and trace_id. The level follows the status class,
//! so a pipeline stage rejecting a request (4xx) surfaces as a warning and
//! a 5xx as an error, with no handler involvement either way.
//!
//! Must run inside `RequestTrace`, which seeds the trace_id this reads.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();

        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            // An Err here never left the ResponseError impl; log the status
            // it will render with.
            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

            if status.is_server_error() {
                error!(%method, %path, status = status.as_u16(), elapsed_ms, %trace_id, "request_completed");
            } else if status.is_client_error() {
                warn!(%method, %path, status = status.as_u16(), elapsed_ms, %trace_id, "request_completed");
            } else {
                info!(%method, %path, status = status.as_u16(), elapsed_ms, %trace_id, "request_completed");
            }

            result
        })
    }
}
