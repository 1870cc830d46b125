use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{parse_day, statement_on, Cents, Customer, StatementEntry};
use crate::storage::Repository;

use super::{AppError, Clock, SystemClock};

/// Application service providing every ledger operation.
/// This is the primary interface for any client (HTTP API, tests, etc.).
///
/// All operations run under one lock around the customer collection, so a
/// withdrawal's funds check and its append can never interleave with another
/// mutation.
pub struct LedgerService {
    repo: Mutex<Repository>,
    clock: Arc<dyn Clock>,
    day_offset: FixedOffset,
}

impl LedgerService {
    /// Create a new ledger service over the given repository.
    pub fn new(repo: Repository) -> Self {
        Self {
            repo: Mutex::new(repo),
            clock: Arc::new(SystemClock),
            day_offset: utc(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Offset used to decide which calendar day an entry belongs to.
    pub fn with_day_offset(mut self, offset: FixedOffset) -> Self {
        self.day_offset = offset;
        self
    }

    // ========================
    // Account lookup
    // ========================

    /// Resolve the customer that owns `cpf`. Every account-scoped operation
    /// goes through the same check.
    pub async fn resolve_account(&self, cpf: &str) -> Result<Customer, AppError> {
        let repo = self.repo.lock().await;
        resolve(&repo, cpf).cloned()
    }

    // ========================
    // Account operations
    // ========================

    /// Open a new account. Fails if the tax-id is already registered.
    pub async fn create_account(
        &self,
        cpf: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Customer, AppError> {
        let cpf = cpf.into();
        let mut repo = self.repo.lock().await;

        if repo.contains(&cpf) {
            warn!(cpf = %cpf, "rejected duplicate account");
            return Err(AppError::CustomerAlreadyExists(cpf));
        }

        let customer = Customer::new(cpf, name);
        repo.save_customer(customer.clone());
        info!(cpf = %customer.cpf, id = %customer.id, "account created");
        Ok(customer)
    }

    /// Get the full customer record.
    pub async fn get_account(&self, cpf: &str) -> Result<Customer, AppError> {
        self.resolve_account(cpf).await
    }

    /// Change the display name. Tax-id and id are untouched.
    pub async fn rename_account(
        &self,
        cpf: &str,
        name: impl Into<String>,
    ) -> Result<Customer, AppError> {
        let mut repo = self.repo.lock().await;
        let customer = resolve_mut(&mut repo, cpf)?;
        customer.rename(name);
        info!(cpf = %customer.cpf, "account renamed");
        Ok(customer.clone())
    }

    /// Delete an account and return the customers that remain.
    pub async fn delete_account(&self, cpf: &str) -> Result<Vec<Customer>, AppError> {
        let mut repo = self.repo.lock().await;
        let removed = repo
            .remove_customer(cpf)
            .ok_or_else(|| AppError::CustomerNotFound(cpf.to_string()))?;
        info!(cpf = %removed.cpf, id = %removed.id, "account deleted");
        Ok(repo.list_customers().to_vec())
    }

    /// Snapshot of every registered customer.
    pub async fn list_customers(&self) -> Vec<Customer> {
        self.repo.lock().await.list_customers().to_vec()
    }

    pub async fn customer_count(&self) -> usize {
        self.repo.lock().await.len()
    }

    // ========================
    // Statement operations
    // ========================

    /// The whole statement in the order it was recorded.
    pub async fn get_statement(&self, cpf: &str) -> Result<Vec<StatementEntry>, AppError> {
        let repo = self.repo.lock().await;
        let customer = resolve(&repo, cpf)?;
        debug!(cpf = %cpf, entries = customer.statement.len(), "statement read");
        Ok(customer.statement.clone())
    }

    /// Entries recorded on the given calendar day.
    pub async fn get_statement_on(
        &self,
        cpf: &str,
        day: NaiveDate,
    ) -> Result<Vec<StatementEntry>, AppError> {
        let repo = self.repo.lock().await;
        let customer = resolve(&repo, cpf)?;
        Ok(self.entries_on(customer, day))
    }

    /// Entries recorded on a `YYYY-MM-DD` day. The account is resolved
    /// before the date is looked at, so an unknown tax-id always wins.
    pub async fn get_statement_by_date(
        &self,
        cpf: &str,
        date: &str,
    ) -> Result<Vec<StatementEntry>, AppError> {
        let repo = self.repo.lock().await;
        let customer = resolve(&repo, cpf)?;
        let day = parse_day(date).ok_or_else(|| AppError::InvalidDate(date.to_string()))?;
        Ok(self.entries_on(customer, day))
    }

    /// Balance over the full statement.
    pub async fn get_balance(&self, cpf: &str) -> Result<Cents, AppError> {
        let repo = self.repo.lock().await;
        balance_of(resolve(&repo, cpf)?)
    }

    fn entries_on(&self, customer: &Customer, day: NaiveDate) -> Vec<StatementEntry> {
        let entries = statement_on(&customer.statement, day, &self.day_offset);
        debug!(cpf = %customer.cpf, %day, entries = entries.len(), "statement read by date");
        entries
    }

    // ========================
    // Money movements
    // ========================

    /// Record a deposit. The resulting balance must still fit in `Cents`.
    pub async fn deposit(
        &self,
        cpf: &str,
        amount: Cents,
        description: Option<String>,
    ) -> Result<StatementEntry, AppError> {
        let mut repo = self.repo.lock().await;
        let customer = resolve_mut(&mut repo, cpf)?;
        validate_amount(amount)?;

        let balance = balance_of(customer)?;
        if balance.checked_add(amount).is_none() {
            warn!(cpf = %cpf, balance, amount, "deposit would overflow balance");
            return Err(AppError::InvalidAmount(
                "Amount would overflow the balance".to_string(),
            ));
        }

        let entry = StatementEntry::credit(amount, description, self.clock.now());
        customer.record(entry.clone());
        info!(cpf = %cpf, amount, kind = %entry.entry_type, "entry recorded");
        Ok(entry)
    }

    /// Record a withdrawal if the current balance covers it.
    pub async fn withdraw(&self, cpf: &str, amount: Cents) -> Result<StatementEntry, AppError> {
        let mut repo = self.repo.lock().await;
        let customer = resolve_mut(&mut repo, cpf)?;
        validate_amount(amount)?;

        let balance = balance_of(customer)?;
        if balance < amount {
            warn!(cpf = %cpf, balance, amount, "withdrawal rejected");
            return Err(AppError::InsufficientFunds {
                cpf: cpf.to_string(),
                balance,
                required: amount,
            });
        }

        let entry = StatementEntry::debit(amount, self.clock.now());
        customer.record(entry.clone());
        info!(cpf = %cpf, amount, kind = %entry.entry_type, "entry recorded");
        Ok(entry)
    }
}

fn resolve<'a>(repo: &'a Repository, cpf: &str) -> Result<&'a Customer, AppError> {
    repo.get_customer(cpf)
        .ok_or_else(|| AppError::CustomerNotFound(cpf.to_string()))
}

fn resolve_mut<'a>(repo: &'a mut Repository, cpf: &str) -> Result<&'a mut Customer, AppError> {
    repo.get_customer_mut(cpf)
        .ok_or_else(|| AppError::CustomerNotFound(cpf.to_string()))
}

fn balance_of(customer: &Customer) -> Result<Cents, AppError> {
    customer
        .balance()
        .ok_or_else(|| AppError::BalanceOverflow(customer.cpf.clone()))
}

fn validate_amount(amount: Cents) -> Result<(), AppError> {
    if amount <= 0 {
        return Err(AppError::InvalidAmount(
            "Amount must be positive".to_string(),
        ));
    }
    Ok(())
}

fn utc() -> FixedOffset {
    Utc.fix()
}
