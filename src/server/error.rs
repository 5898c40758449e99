use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unprocessable: {0}")]
    Unprocessable(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(detail) => format!("bad request: {detail}"),
            ApiError::Unprocessable(detail) => format!("unprocessable: {detail}"),
            ApiError::Database(sqlx::Error::RowNotFound) => "resource not found".to_owned(),
            // store internals stay in the logs
            ApiError::Database(_) => "unprocessable".to_owned(),
            ApiError::Internal(_) => "internal server error".to_owned(),
            other => other.to_string(),
        }
    }
}

/// Body of every failed response.
#[derive(Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        match &self {
            ApiError::Database(_) | ApiError::Internal(_) => {
                tracing::error!(error = %self, status = status.as_u16(), "request failed")
            }
            _ => tracing::debug!(error = %self, status = status.as_u16(), "request rejected"),
        }
        let body = ErrorEnvelope {
            success: false,
            error: status.as_u16(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}
