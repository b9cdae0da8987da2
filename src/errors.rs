use std::borrow::Cow;
use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<String>),
    DuplicateEmail,
    NotFound(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                write!(f, "validation error: {}", errors.join(", "))
            }
            AppError::DuplicateEmail => write!(f, "Email already exists"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                serde_json::json!({ "errors": errors })
            }
            AppError::DuplicateEmail => {
                serde_json::json!({ "error": "Email already exists" })
            }
            AppError::NotFound(msg) => {
                serde_json::json!({ "error": msg })
            }
            AppError::InternalError(msg) => {
                serde_json::json!({ "error": "Internal server error", "details": msg })
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23505")) => {
                AppError::DuplicateEmail
            }
            // A ColumnDecode on the skills column means the stored JSON is
            // corrupt; that is a data-integrity failure, not a usage error.
            _ => AppError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Client-side failures. Anything here is surfaced to the user as a single
/// generic alert plus whatever detail the server provided.
#[derive(Debug, Display)]
pub enum ClientError {
    #[display("Request failed: {_0}")]
    Transport(reqwest::Error),

    #[display("Server returned {_0}: {_1}")]
    UnexpectedStatus(u16, String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err)
    }
}

impl std::error::Error for ClientError {}
