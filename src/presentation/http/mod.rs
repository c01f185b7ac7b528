use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::errors::ActionError;

pub mod categories;
pub mod health;
pub mod nodes;
pub mod sync;
pub mod tracker;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Wraps an [`ActionError`] so handlers can `?` straight into the uniform
/// failure envelope.
#[derive(Debug)]
pub struct ApiError(pub ActionError);

impl From<ActionError> for ApiError {
    fn from(e: ActionError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ActionError::Validation(_) => StatusCode::BAD_REQUEST,
            ActionError::Conflict(_) => StatusCode::CONFLICT,
            ActionError::NotFound(_) => StatusCode::NOT_FOUND,
            ActionError::Store(e) => {
                tracing::error!(error = ?e, "store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let error = match &self.0 {
            ActionError::Store(_) => "internal error".to_string(),
            other => other.to_string(),
        };
        (
            status,
            Json(ErrorResponse {
                success: false,
                error,
            }),
        )
            .into_response()
    }
}
