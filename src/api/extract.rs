use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};

use crate::application::AppError;

use super::error::ApiError;

/// Header carrying the caller's tax-id.
pub const CPF_HEADER: &str = "cpf";

/// The credential presented with an account-scoped request.
///
/// Only extraction happens here; whether the tax-id belongs to a customer is
/// decided by the service. A missing or unreadable header is reported the
/// same way as an unknown tax-id.
#[derive(Debug, Clone)]
pub struct Cpf(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for Cpf
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(CPF_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|cpf| Cpf(cpf.to_string()))
            .ok_or_else(|| ApiError::App(AppError::CustomerNotFound(String::new())))
    }
}

impl std::ops::Deref for Cpf {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// `axum::Json` whose rejections answer with the ledger's error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` whose rejections answer with the ledger's error body.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);
