//! HTTP surface of the ledger.
//!
//! Every account-scoped route reads the `cpf` header through [`extract::Cpf`]
//! and hands it to [`LedgerService`], which performs the account lookup.

pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::application::LedgerService;

pub mod paths {
    pub const ACCOUNT: &str = "/account";
    pub const STATEMENT: &str = "/statement";
    pub const STATEMENT_BY_DATE: &str = "/statement/date";
    pub const BALANCE: &str = "/balance";
    pub const DEPOSIT: &str = "/deposit";
    pub const WITHDRAW: &str = "/withdraw";
}

/// Build the application router around a shared ledger.
pub fn router(ledger: Arc<LedgerService>) -> Router {
    Router::new()
        .route(
            paths::ACCOUNT,
            post(handlers::create_account)
                .get(handlers::get_account)
                .put(handlers::rename_account)
                .delete(handlers::delete_account),
        )
        .route(paths::STATEMENT, get(handlers::get_statement))
        .route(paths::STATEMENT_BY_DATE, get(handlers::get_statement_by_date))
        .route(paths::BALANCE, get(handlers::get_balance))
        .route(paths::DEPOSIT, post(handlers::deposit))
        .route(paths::WITHDRAW, post(handlers::withdraw))
        .layer(TraceLayer::new_for_http())
        .with_state(ledger)
}
