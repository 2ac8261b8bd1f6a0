//! Error types for the Digital Library server

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_path_to_error::Segment;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Unprocessable request")]
    Unprocessable(Vec<ErrorDetail>),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error body carrying a single message
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

/// One invalid input location
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Where the problem is, e.g. `["body", "year"]`
    pub loc: Vec<String>,
    pub msg: String,
    /// Violated constraint (`range`, `length`, `json_invalid`, ...)
    #[serde(rename = "type")]
    pub kind: String,
}

/// Error body for field-level failures (422)
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub detail: Vec<ErrorDetail>,
}

impl ErrorDetail {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: loc.iter().map(|part| part.to_string()).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

/// Flatten validator output into one entry per violated constraint, sorted by field
pub fn validation_details(errors: &ValidationErrors) -> Vec<ErrorDetail> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let msg = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                ErrorDetail::new(&["body", &*field], msg, err.code.to_string())
            })
        })
        .collect()
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::JsonDataError(_) => "value_error",
            JsonRejection::JsonSyntaxError(_) => "json_invalid",
            JsonRejection::MissingJsonContentType(_) => "content_type",
            _ => "body_invalid",
        };
        AppError::Unprocessable(vec![ErrorDetail::new(&["body"], rejection.body_text(), kind)])
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for AppError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let mut loc = vec!["body".to_string()];
        for segment in err.path().iter() {
            match segment {
                Segment::Map { key } => loc.push(key.clone()),
                Segment::Seq { index } => loc.push(index.to_string()),
                Segment::Enum { variant } => loc.push(variant.clone()),
                Segment::Unknown => {}
            }
        }

        let msg = err.inner().to_string();
        let kind = if let Some(field) = missing_field_name(&msg) {
            loc.push(field.to_string());
            "missing"
        } else if msg.starts_with("invalid type") {
            "type_error"
        } else {
            "value_error"
        };

        AppError::Unprocessable(vec![ErrorDetail {
            loc,
            msg,
            kind: kind.to_string(),
        }])
    }
}

/// Field name out of serde's "missing field `name`" message
fn missing_field_name(msg: &str) -> Option<&str> {
    msg.strip_prefix("missing field `")?.split('`').next()
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Unprocessable(vec![ErrorDetail::new(
            &["path", "id"],
            rejection.body_text(),
            "int_parsing",
        )])
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(errors) => {
                let body = ValidationErrorResponse {
                    detail: validation_details(&errors),
                };
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
            }
            AppError::Unprocessable(detail) => {
                let body = ValidationErrorResponse { detail };
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { detail: message })).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
