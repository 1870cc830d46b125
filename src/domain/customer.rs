use serde::Serialize;
use uuid::Uuid;

use super::{compute_balance, Cents, StatementEntry};

pub type CustomerId = Uuid;

/// An account holder. `cpf` is the lookup key and the only credential;
/// it never changes once the account exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub cpf: String,
    pub name: String,
    pub id: CustomerId,
    pub statement: Vec<StatementEntry>,
}

impl Customer {
    pub fn new(cpf: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cpf: cpf.into(),
            name: name.into(),
            id: Uuid::new_v4(),
            statement: Vec::new(),
        }
    }

    /// `None` only if the statement no longer fits in `Cents`.
    pub fn balance(&self) -> Option<Cents> {
        compute_balance(&self.statement)
    }

    /// Append an entry to the end of the statement.
    pub fn record(&mut self, entry: StatementEntry) {
        self.statement.push(entry);
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
