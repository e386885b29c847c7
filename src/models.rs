use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

/// Which amount column of the statement was populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "Debit",
            Self::Credit => "Credit",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Five-tier size bucket of a transaction amount, ordered smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MagnitudeClass {
    Small,
    Medium,
    Large,
    Extreme,
    Massive,
}

impl MagnitudeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
            Self::Extreme => "Extreme",
            Self::Massive => "Massive",
        }
    }
}

impl fmt::Display for MagnitudeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified statement line, ready to hand to storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTransaction {
    /// `YYYY-MM`
    pub period: String,
    pub amount: Decimal,
    pub direction: Direction,
    pub magnitude_class: MagnitudeClass,
    pub vendor: String,
}

/// A stored expense row as read back by the report queries.
#[derive(Debug, Clone, Serialize)]
pub struct Expense {
    pub id: i64,
    pub period: String,
    pub cost: f64,
    pub magnitude_class: String,
    pub direction: String,
    pub vendor: String,
}
