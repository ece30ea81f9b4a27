use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("{0}")]
    InvalidSource(String),

    #[error("Failed to fetch article: {0}")]
    Fetch(String),

    #[error("Quiz not found")]
    NotFound(i64),

    #[error("A quiz already exists for {0}")]
    DuplicateUrl(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
}

impl From<JsonRejection> for QuizError {
    fn from(rejection: JsonRejection) -> Self {
        QuizError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<reqwest::Error> for QuizError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            QuizError::Fetch(format!("request timed out: {}", err))
        } else {
            QuizError::Fetch(err.to_string())
        }
    }
}

impl From<tokio::task::JoinError> for QuizError {
    fn from(err: tokio::task::JoinError) -> Self {
        QuizError::Internal(err.to_string())
    }
}

impl QuizError {
    pub fn status(&self) -> StatusCode {
        match self {
            QuizError::InvalidSource(_) | QuizError::Fetch(_) => StatusCode::BAD_REQUEST,
            QuizError::NotFound(_) => StatusCode::NOT_FOUND,
            QuizError::DuplicateUrl(_) => StatusCode::CONFLICT,
            QuizError::Rejected { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;
