//! # taxcode-api: HTTP Service for the Tax Code Codec
//!
//! Exposes the encoder and decoder of `taxcode-core` over JSON.
//!
//! ## API Surface
//!
//! | Route                                        | Module               |
//! |----------------------------------------------|----------------------|
//! | `POST /api/v1/taxcode:calculate-tax-code`    | [`routes::taxcode`]  |
//! | `POST /api/v1/taxcode:calculate-person-data` | [`routes::taxcode`]  |
//! | `GET /openapi.json`                          | [`openapi`]          |
//! | `GET /health/liveness`, `/health/readiness`  | this module          |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::taxcode::router())
        .merge(openapi::router())
        .layer(middleware::tracing_layer::layer())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: the registry is loaded before the listener binds.
async fn readiness() -> &'static str {
    "ready"
}
