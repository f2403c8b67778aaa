//! csvbucket REST API Server
//!
//! HTTP/JSON API that appends validated persona records to a CSV document
//! held in object storage and reports how many rows it holds.
//!
//! ## Endpoints
//!
//! - `POST /personas`: validate, read the document, append one row, rewrite it
//! - `GET /personas/count`: read the document and count its data rows
//! - `GET /health`, `GET /live`, `GET /ready`: probes
//! - `GET /swagger-ui`: interactive API docs
//!
//! Writes are read-modify-write without any concurrency token, so concurrent
//! creates race and the last write wins.

use axum::{
    routing::{get, post},
    Router,
};
use csvbucket_storage::RecordStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod shutdown;

pub use config::ServiceConfig;
pub use error::ApiError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let swagger = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/personas", post(handlers::personas::create_persona))
        .route("/personas/count", get(handlers::personas::count_personas))
        .route("/health", get(handlers::health::health_check))
        .route("/live", get(handlers::health::liveness_check))
        .route("/ready", get(handlers::health::readiness_check))
        .merge(swagger)
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// OpenAPI specification
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::personas::create_persona,
        handlers::personas::count_personas,
        handlers::health::health_check,
        handlers::health::liveness_check,
        handlers::health::readiness_check,
    ),
    components(schemas(
        models::CreatePersonaRequest,
        models::CreatePersonaResponse,
        models::CountResponse,
        models::HealthResponse,
        models::ErrorResponse,
        models::FieldErrorBody,
        models::ValidationErrorResponse,
    )),
    tags(
        (name = "personas", description = "Persona records stored as CSV"),
        (name = "health", description = "Service probes"),
    ),
    info(title = "csvbucket API", description = "Append persona records to a CSV document in S3")
)]
pub struct ApiDoc;
