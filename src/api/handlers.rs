use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::Number;

use crate::application::{AppError, LedgerService};
use crate::domain::{amount_from_json, Cents, Customer, StatementEntry, Units};

use super::{
    error::ApiError,
    extract::{AppJson, AppQuery, Cpf},
};

pub type SharedLedger = Arc<LedgerService>;

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub cpf: String,
    pub name: String,
}

/// Amounts arrive as currency units (`100`, `10.5`) and are stored as cents.
#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    #[serde(default)]
    pub description: Option<String>,
    pub amount: Number,
}

#[derive(Debug, Deserialize)]
pub struct WithdrawRequest {
    pub amount: Number,
}

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct StatementDateQuery {
    pub date: String,
}

/// POST /account
pub async fn create_account(
    State(ledger): State<SharedLedger>,
    AppJson(body): AppJson<CreateAccountRequest>,
) -> Result<StatusCode, ApiError> {
    ledger.create_account(body.cpf, body.name).await?;
    Ok(StatusCode::CREATED)
}

/// GET /account
pub async fn get_account(
    State(ledger): State<SharedLedger>,
    cpf: Cpf,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(ledger.get_account(&cpf).await?))
}

/// PUT /account
pub async fn rename_account(
    State(ledger): State<SharedLedger>,
    cpf: Cpf,
    AppJson(body): AppJson<RenameRequest>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let customer = ledger.rename_account(&cpf, body.name).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// DELETE /account
pub async fn delete_account(
    State(ledger): State<SharedLedger>,
    cpf: Cpf,
) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(ledger.delete_account(&cpf).await?))
}

/// GET /statement
pub async fn get_statement(
    State(ledger): State<SharedLedger>,
    cpf: Cpf,
) -> Result<Json<Vec<StatementEntry>>, ApiError> {
    Ok(Json(ledger.get_statement(&cpf).await?))
}

/// GET /statement/date?date=YYYY-MM-DD
pub async fn get_statement_by_date(
    State(ledger): State<SharedLedger>,
    cpf: Cpf,
    AppQuery(query): AppQuery<StatementDateQuery>,
) -> Result<Json<Vec<StatementEntry>>, ApiError> {
    Ok(Json(ledger.get_statement_by_date(&cpf, &query.date).await?))
}

/// GET /balance
pub async fn get_balance(
    State(ledger): State<SharedLedger>,
    cpf: Cpf,
) -> Result<Json<Units>, ApiError> {
    Ok(Json(Units(ledger.get_balance(&cpf).await?)))
}

/// POST /deposit
pub async fn deposit(
    State(ledger): State<SharedLedger>,
    cpf: Cpf,
    AppJson(body): AppJson<DepositRequest>,
) -> Result<StatusCode, ApiError> {
    let amount = parse_amount(&body.amount)?;
    ledger.deposit(&cpf, amount, body.description).await?;
    Ok(StatusCode::CREATED)
}

/// POST /withdraw
pub async fn withdraw(
    State(ledger): State<SharedLedger>,
    cpf: Cpf,
    AppJson(body): AppJson<WithdrawRequest>,
) -> Result<StatusCode, ApiError> {
    let amount = parse_amount(&body.amount)?;
    ledger.withdraw(&cpf, amount).await?;
    Ok(StatusCode::CREATED)
}

fn parse_amount(amount: &Number) -> Result<Cents, AppError> {
    amount_from_json(amount).map_err(|err| AppError::InvalidAmount(format!("{}: {}", amount, err)))
}
