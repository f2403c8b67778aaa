//! Persona endpoints
//!
//! Both endpoints read the whole document. Creating a persona then rewrites
//! the whole document with one more row; counting never writes.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use csvbucket_storage::FetchOutcome;

use crate::error::{ApiError, Result};
use crate::{models::*, AppState};

#[utoipa::path(
    post,
    path = "/personas",
    request_body = CreatePersonaRequest,
    responses(
        (status = 201, description = "Persona appended", body = CreatePersonaResponse),
        (status = 422, description = "Invalid persona", body = ValidationErrorResponse),
        (status = 500, description = "Object store failure", body = ErrorResponse)
    ),
    tag = "personas"
)]
pub async fn create_persona(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreatePersonaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePersonaResponse>)> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!("Rejected persona body: {}", rejection.body_text());
        ApiError::InvalidBody(rejection.body_text())
    })?;

    let record = req.into_record().map_err(|e| {
        tracing::warn!(fields = ?e.fields(), "Rejected persona: {}", e);
        e
    })?;

    let mut document = state
        .store
        .fetch()
        .await
        .map_err(|e| {
            tracing::error!("Failed to read document: {}", e);
            ApiError::UpstreamRead(e)
        })?
        .into_document();

    let rows = document.append(&record);

    state.store.store(&document).await.map_err(|e| {
        tracing::error!("Failed to write document: {}", e);
        ApiError::UpstreamWrite(e)
    })?;

    tracing::debug!(
        nombre = %record.nombre(),
        edad = record.edad(),
        altura = record.altura(),
        "Persona appended"
    );
    tracing::info!(rows = rows, "Persona saved");

    Ok((
        StatusCode::CREATED,
        Json(CreatePersonaResponse {
            message: PERSONA_SAVED.to_string(),
            rows,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/personas/count",
    responses(
        (status = 200, description = "Data rows in the document", body = CountResponse),
        (status = 500, description = "Object store failure", body = ErrorResponse)
    ),
    tag = "personas"
)]
pub async fn count_personas(State(state): State<AppState>) -> Result<Json<CountResponse>> {
    let outcome = state.store.fetch().await.map_err(|e| {
        tracing::error!("Failed to read document: {}", e);
        ApiError::UpstreamRead(e)
    })?;

    let rows = match outcome {
        FetchOutcome::Found(document) => document.len(),
        FetchOutcome::NotFound => 0,
    };

    Ok(Json(CountResponse { rows }))
}
