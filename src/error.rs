use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid user type: {0}")]
    InvalidRole(String),

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Invalid conversation id: {0}")]
    MalformedIdentifier(String),

    #[error("Conversation not found")]
    ConversationNotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRole(_)
            | AppError::EmptyMessage
            | AppError::MalformedIdentifier(_)
            | AppError::BadRequest(_)
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::ConversationNotFound => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Store failures are logged in full but never echoed back to the client
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_client_statuses() {
        assert_eq!(AppError::InvalidRole("nurse".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::EmptyMessage.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::MalformedIdentifier("abc".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::ConversationNotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_failures_map_to_server_error() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(AppError::EmptyMessage.to_string(), "Message cannot be empty");
        assert_eq!(AppError::ConversationNotFound.to_string(), "Conversation not found");
        assert_eq!(AppError::InvalidRole("nurse".into()).to_string(), "Invalid user type: nurse");
    }
}
