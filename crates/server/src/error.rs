use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use billcraft_render::RenderError;
use billcraft_store::StoreError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("invoice not found")]
    NotFound,

    #[error("PDF rendering failed: {0}")]
    Rendering(#[from] RenderError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "NotFound", self.to_string()),
            Self::Rendering(_) => {
                tracing::error!("rendering failed: {}", self);
                (StatusCode::UNPROCESSABLE_ENTITY, "RenderingError", self.to_string())
            }
            Self::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, "InvalidRequest", self.to_string())
            }
            Self::Internal(_) => {
                tracing::error!("internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
