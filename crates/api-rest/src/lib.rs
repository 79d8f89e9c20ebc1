//! # API REST
//!
//! REST API implementation for the patient directory.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, the failure boundary)
//!
//! Uses `directory-core` for the listing pipeline and `api-shared` for wire types.

#![warn(rust_2018_idioms)]

use std::any::Any;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{ErrorRes, HealthRes, HealthService};
use directory_core::{DirectoryService, IssueColor, PatientPage, PatientRecord, QueryParams};

/// Application state shared across REST API handlers.
///
/// Holds the directory service, whose records are shared read-only by every request.
#[derive(Clone)]
pub struct AppState {
    directory: DirectoryService,
}

impl AppState {
    pub fn new(directory: DirectoryService) -> Self {
        Self { directory }
    }
}

/// The only failure a client ever sees: a 500 with a generic body.
pub type ApiFailure = (StatusCode, Json<ErrorRes>);

#[derive(OpenApi)]
#[openapi(
    paths(health, list_patients),
    components(schemas(HealthRes, ErrorRes, PatientPage, PatientRecord, IssueColor))
)]
pub struct ApiDoc;

/// Build the REST router.
///
/// `/api/data` is an alias of `/data` for UI builds that call the prefixed path.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/data", get(list_patients))
        .route("/api/data", get(list_patients))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/data",
    params(
        ("limit" = Option<u32>, Query, description = "Page size, clamped to 1..=100 (default 12)"),
        ("page" = Option<u32>, Query, description = "Requested page, clamped to the last available page (default 1)"),
        ("q" = Option<String>, Query, description = "Case-insensitive search across id, name, issue, address and email"),
        ("issue" = Option<String>, Query, description = "Comma-separated issue names, matched exactly and case-insensitively"),
        ("hasEmail" = Option<String>, Query, description = "`1` or `true` to require an email"),
        ("hasPhone" = Option<String>, Query, description = "`1` or `true` to require a phone number"),
        ("ageMin" = Option<i64>, Query, description = "Inclusive lower age bound"),
        ("ageMax" = Option<i64>, Query, description = "Inclusive upper age bound"),
        ("sortBy" = Option<String>, Query, description = "One of id, name, age, issue, email"),
        ("order" = Option<String>, Query, description = "`desc` for descending, anything else ascending"),
    ),
    responses(
        (status = 200, description = "One page of patients", body = PatientPage),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List patients with filtering, sorting and pagination
///
/// Parameters are coerced permissively: malformed values fall back to their
/// defaults instead of rejecting the request.
///
/// # Errors
/// Returns `500 Internal Server Error` with a generic body if the page cannot be
/// assembled. Details are logged, never returned.
#[axum::debug_handler]
async fn list_patients(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<PatientPage>, ApiFailure> {
    let params = QueryParams::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    match state.directory.list_patients(&params) {
        Ok(page) => Ok(Json(page)),
        Err(e) => {
            tracing::error!("List patients error: {:?}", e);
            Err(internal_error())
        }
    }
}

fn internal_error() -> ApiFailure {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorRes::internal()))
}

fn panic_response(_err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("request handler panicked");
    internal_error().into_response()
}
