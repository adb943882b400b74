//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid VIN: {0}")]
    InvalidVin(String),

    #[error("Model year is invalid: {0}")]
    InvalidModelYear(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("Missing field in upstream response: {0}")]
    MissingField(String),

    #[error("Vehicle {0} already exists in cache")]
    DuplicateVin(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Upstream error: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Los errores de validación nunca llegan al store ni al upstream
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidVin(_) | AppError::InvalidModelYear(_) | AppError::Validation(_)
        )
    }
}

impl From<parquet::errors::ParquetError> for AppError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        AppError::Export(e.to_string())
    }
}

impl From<arrow::error::ArrowError> for AppError {
    fn from(e: arrow::error::ArrowError) -> Self {
        AppError::Export(e.to_string())
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::InvalidVin(vin) => {
                warn!("Invalid VIN: {}", vin);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        error: "Invalid VIN".to_string(),
                        message: "VIN must be exactly 17 uppercase alphanumeric characters".to_string(),
                        details: Some(json!({ "vin": vin })),
                        code: Some("INVALID_VIN".to_string()),
                    },
                )
            }

            AppError::InvalidModelYear(year) => {
                warn!("Invalid model year: {}", year);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        error: "Invalid Model Year".to_string(),
                        message: "Model year must be an integer between 1886 and 9999".to_string(),
                        details: Some(json!({ "model_year": year })),
                        code: Some("INVALID_MODEL_YEAR".to_string()),
                    },
                )
            }

            AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::MalformedResponse(msg) => {
                error!("Malformed upstream response: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "Malformed Upstream Response".to_string(),
                        message: "The vehicle lookup service returned an unusable response".to_string(),
                        details: Some(json!({ "reason": msg })),
                        code: Some("MALFORMED_RESPONSE".to_string()),
                    },
                )
            }

            AppError::MissingField(field) => {
                error!("Upstream response is missing field: {}", field);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "Missing Field".to_string(),
                        message: format!("The vehicle lookup response is missing '{}'", field),
                        details: Some(json!({ "field": field })),
                        code: Some("MISSING_FIELD".to_string()),
                    },
                )
            }

            AppError::DuplicateVin(vin) => {
                warn!("Duplicate VIN insert: {}", vin);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message: format!("Vehicle {} already exists in cache", vin),
                        details: None,
                        code: Some("DUPLICATE_VIN".to_string()),
                    },
                )
            }

            AppError::Database(e) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(json!({ "sql_error": e.to_string() })),
                        code: Some("DB_ERROR".to_string()),
                    },
                )
            }

            AppError::Upstream(e) => {
                error!("Upstream error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "External API Error".to_string(),
                        message: "An error occurred while communicating with external service".to_string(),
                        details: Some(json!({ "external_api_error": e.to_string() })),
                        code: Some("EXTERNAL_API_ERROR".to_string()),
                    },
                )
            }

            AppError::UpstreamStatus(status) => {
                error!("Upstream returned status {}", status);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "External API Error".to_string(),
                        message: format!("The vehicle lookup service answered with status {}", status),
                        details: Some(json!({ "upstream_status": status })),
                        code: Some("EXTERNAL_API_ERROR".to_string()),
                    },
                )
            }

            AppError::Export(msg) => {
                error!("Export error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Export Error".to_string(),
                        message: "An error occurred while exporting the cache".to_string(),
                        details: Some(json!({ "export_error": msg })),
                        code: Some("EXPORT_ERROR".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de campo faltante
pub fn missing_field_error(field: &str) -> AppError {
    AppError::MissingField(field.to_string())
}

/// Función helper para crear errores de respuesta mal formada
pub fn malformed_response_error(reason: &str) -> AppError {
    AppError::MalformedResponse(reason.to_string())
}
