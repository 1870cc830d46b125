use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Serialize;

use super::{serialize_units, Cents};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Funds added to the account
    Credit,
    /// Funds removed from the account
    Debit,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Credit => "credit",
            EntryType::Debit => "debit",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single line of a customer's statement. Entries are immutable once
/// appended; the statement only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(serialize_with = "serialize_units")]
    pub amount: Cents,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

impl StatementEntry {
    /// Deposits carry whatever description the client sent.
    pub fn credit(amount: Cents, description: Option<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            description,
            amount,
            created_at,
            entry_type: EntryType::Credit,
        }
    }

    /// Withdrawals never carry a description.
    pub fn debit(amount: Cents, created_at: DateTime<Utc>) -> Self {
        Self {
            description: None,
            amount,
            created_at,
            entry_type: EntryType::Debit,
        }
    }

    /// Calendar day of the entry as seen from the given offset.
    pub fn day(&self, offset: &FixedOffset) -> NaiveDate {
        self.created_at.with_timezone(offset).date_naive()
    }
}

/// Compute the balance of a statement.
/// Balance = sum of credits - sum of debits
///
/// Returns `None` if the running total leaves the `Cents` range.
pub fn compute_balance(entries: &[StatementEntry]) -> Option<Cents> {
    entries
        .iter()
        .try_fold(0 as Cents, |balance, entry| apply_entry(balance, entry))
}

/// Balance after `entry` is applied to `balance`, if it fits.
pub fn apply_entry(balance: Cents, entry: &StatementEntry) -> Option<Cents> {
    match entry.entry_type {
        EntryType::Credit => balance.checked_add(entry.amount),
        EntryType::Debit => balance.checked_sub(entry.amount),
    }
}

/// Entries created on `day`, compared at day granularity in `offset`.
/// Stored order is preserved.
pub fn statement_on(
    entries: &[StatementEntry],
    day: NaiveDate,
    offset: &FixedOffset,
) -> Vec<StatementEntry> {
    entries
        .iter()
        .filter(|entry| entry.day(offset) == day)
        .cloned()
        .collect()
}

/// Parse a `YYYY-MM-DD` query date.
pub fn parse_day(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}
