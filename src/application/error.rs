use thiserror::Error;

use crate::domain::Cents;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Customer already exists: {0}")]
    CustomerAlreadyExists(String),

    #[error("Insufficient funds for customer {cpf}: balance {balance}, required {required}")]
    InsufficientFunds {
        cpf: String,
        balance: Cents,
        required: Cents,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Balance of customer {0} does not fit in the ledger's amount range")]
    BalanceOverflow(String),
}
