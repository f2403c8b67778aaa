//! API models for REST endpoints

use csvbucket_core::{Record, ValidationError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success message returned after a record is appended.
pub const PERSONA_SAVED: &str = "Persona guardada";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePersonaRequest {
    /// Person name, at least one character
    #[schema(min_length = 1, example = "Ana")]
    pub nombre: String,
    /// Age in years, 0 to 150
    #[schema(minimum = 0, maximum = 150, example = 30)]
    pub edad: i64,
    /// Height, strictly positive
    #[schema(exclusive_minimum = 0, example = 1.65)]
    pub altura: f64,
}

impl CreatePersonaRequest {
    pub fn into_record(self) -> Result<Record, ValidationError> {
        Record::new(self.nombre, self.edad, self.altura)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePersonaResponse {
    pub message: String,
    /// Data rows in the document after the append
    pub rows: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    pub rows: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Body of a 500 response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

/// One entry of a 422 response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FieldErrorBody {
    /// Location of the offending input, e.g. `["body", "edad"]`
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Body of a 422 response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub detail: Vec<FieldErrorBody>,
}
