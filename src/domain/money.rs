use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// Money is kept as integer cents so balances never drift.
/// On the wire amounts are currency units: `10.5` is 1050 cents.
pub type Cents = i64;

/// Parse a unit amount such as `"100"` or `"10.5"` into cents.
/// Anything finer than a cent is refused rather than rounded.
pub fn parse_amount(input: &str) -> Result<Cents, ParseAmountError> {
    let units = Decimal::from_str(input.trim()).map_err(|_| ParseAmountError::InvalidFormat)?;

    let cents = units
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(ParseAmountError::OutOfRange)?;
    if !cents.fract().is_zero() {
        return Err(ParseAmountError::TooPrecise);
    }

    cents.to_i64().ok_or(ParseAmountError::OutOfRange)
}

/// Parse an amount straight from a JSON number.
pub fn amount_from_json(number: &serde_json::Number) -> Result<Cents, ParseAmountError> {
    parse_amount(&number.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    TooPrecise,
    OutOfRange,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
            ParseAmountError::TooPrecise => write!(f, "more than two decimal places"),
            ParseAmountError::OutOfRange => write!(f, "amount out of range"),
        }
    }
}

impl std::error::Error for ParseAmountError {}

/// JSON view of a cent amount: a whole number when it is exact units,
/// a decimal otherwise. 5000 -> 50, 1050 -> 10.5
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Units(pub Cents);

impl Serialize for Units {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

/// `serialize_with` adapter for `Cents` fields.
pub fn serialize_units<S: Serializer>(cents: &Cents, serializer: S) -> Result<S::Ok, S::Error> {
    Units(*cents).serialize(serializer)
}
