//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI spec served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tax Code Converter API",
        version = "0.1.0",
        description = "Computes Italian tax codes (codice fiscale) from person data and decodes them back.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::taxcode::calculate_tax_code,
        crate::routes::taxcode::calculate_person_data,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::error::FieldViolation,
        crate::routes::taxcode::Gender,
        crate::routes::taxcode::CalculateTaxCodeRequest,
        crate::routes::taxcode::CalculateTaxCodeResponse,
        crate::routes::taxcode::CalculatePersonDataRequest,
        crate::routes::taxcode::CalculatePersonDataResponse,
    )),
    tags(
        (name = "taxcode", description = "Tax code conversion"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
