use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::application::AppError;

/// Error body returned by every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// HTTP face of a failed request: either a ledger error or input axum
/// could not decode.
#[derive(Debug)]
pub enum ApiError {
    App(AppError),
    InvalidBody(String),
    InvalidQuery(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        // every failure is the caller's to fix
        StatusCode::BAD_REQUEST
    }

    /// Message shown to clients. Internal details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::App(AppError::CustomerNotFound(_)) => "Customer not found",
            ApiError::App(AppError::CustomerAlreadyExists(_)) => "Customer already exists",
            ApiError::App(AppError::InsufficientFunds { .. }) => "Insufficient funds!",
            ApiError::App(AppError::InvalidAmount(_)) => "Invalid amount",
            ApiError::App(AppError::InvalidDate(_)) => "Invalid date",
            ApiError::App(AppError::BalanceOverflow(_)) => "Balance out of range",
            ApiError::InvalidBody(_) => "Invalid request body",
            ApiError::InvalidQuery(_) => "Invalid query",
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::App(err) => err.to_string(),
            ApiError::InvalidBody(detail) | ApiError::InvalidQuery(detail) => detail.clone(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::App(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        warn!(
            status_code = %status_code.as_u16(),
            error = %self.detail(),
            "request rejected"
        );

        let body = ErrorBody {
            error: self.public_message().to_string(),
        };

        (status_code, Json(body)).into_response()
    }
}
