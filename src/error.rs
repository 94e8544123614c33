// src/error.rs

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

/// Global Application Error Enum.
/// Every failure a handler can hit ends up as one of these variants, and each
/// variant maps to exactly one status code and public message. The `String`
/// payloads carry internal detail for the logs only.
#[derive(Debug)]
pub enum AppError {
    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 404, the quiz pool is exhausted
    NoQuestionAvailable,

    // 405 Method Not Allowed
    MethodNotAllowed,

    // 422 Unprocessable Entity (the store failed or rejected the statement)
    Unprocessable(String),
}

/// The `{success, error, message}` body shared by every error response.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: u16,
    pub message: &'static str,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::NoQuestionAvailable => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad request",
            AppError::NotFound(_) => "resource not found",
            AppError::NoQuestionAvailable => "no question available",
            AppError::MethodNotAllowed => "method not allowed",
            AppError::Unprocessable(_) => "unprocessable",
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            success: false,
            error: self.status().as_u16(),
            message: self.message(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts the error into the JSON envelope with the matching status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Unprocessable(detail) => tracing::warn!("Unprocessable: {}", detail),
            AppError::BadRequest(detail) | AppError::NotFound(detail) => {
                tracing::debug!("{}: {}", self.message(), detail)
            }
            AppError::NoQuestionAvailable | AppError::MethodNotAllowed => {}
        }

        (self.status(), Json(self.envelope())).into_response()
    }
}

/// Any store failure, read or write, surfaces as 422.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Unprocessable(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Non-numeric ids never match a route, so they read as missing resources.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::NotFound(rejection.body_text())
    }
}
