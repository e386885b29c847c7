//! Turns one raw statement line into a [`ParsedTransaction`].
//!
//! Expected column layout: `date,description,debit,credit`. Fields are split naively on `,`.
//! Quoted fields containing commas are not supported and shift the columns.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{LedgerError, Result};
use crate::models::{Direction, MagnitudeClass, ParsedTransaction};
use crate::vendor::extract_vendor;

const DATE_FIELD: usize = 0;
const DESCRIPTION_FIELD: usize = 1;
const DEBIT_FIELD: usize = 2;
const CREDIT_FIELD: usize = 3;

/// Fields of one input line. Missing trailing fields read as empty.
#[derive(Debug, Clone)]
pub struct RawRow<'a> {
    fields: Vec<&'a str>,
}

impl<'a> RawRow<'a> {
    pub fn from_line(line: &'a str) -> Self {
        let trimmed = line.trim().trim_end_matches(',');
        Self {
            fields: trimmed.split(',').collect(),
        }
    }

    pub fn field(&self, idx: usize) -> &'a str {
        self.fields.get(idx).copied().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Parsed(ParsedTransaction),
    /// Neither amount column is populated.
    Skip,
}

/// Amount and direction from whichever amount column is populated, debit first.
pub fn resolve_amount(row: &RawRow, line: &str) -> Result<Option<(Decimal, Direction)>> {
    let candidates = [
        (row.field(DEBIT_FIELD).trim(), Direction::Debit),
        (row.field(CREDIT_FIELD).trim(), Direction::Credit),
    ];
    let Some((raw, direction)) = candidates.into_iter().find(|(raw, _)| !raw.is_empty()) else {
        return Ok(None);
    };
    let invalid = || LedgerError::InvalidAmount {
        value: raw.to_string(),
        line: line.to_string(),
    };
    let amount = Decimal::from_str(raw).map_err(|_| invalid())?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(invalid());
    }
    Ok(Some((amount, direction)))
}

pub fn magnitude_class(amount: Decimal) -> MagnitudeClass {
    if amount < Decimal::TEN {
        MagnitudeClass::Small
    } else if amount < Decimal::ONE_HUNDRED {
        MagnitudeClass::Medium
    } else if amount < Decimal::ONE_THOUSAND {
        MagnitudeClass::Large
    } else if amount < Decimal::from(10_000) {
        MagnitudeClass::Extreme
    } else {
        MagnitudeClass::Massive
    }
}

/// Period key from the first two dash-separated parts of a date field.
///
/// A four-digit year and a month 1-12 are normalised to `YYYY-MM` (`2024-3-5` gives `2024-03`).
/// Anything else is kept as the raw join of those two parts, so the row is still stored.
pub fn period_key(date_field: &str) -> String {
    let mut parts = date_field.trim().split('-');
    let year = parts.next().unwrap_or("");
    let month = parts.next();

    if let Some(month) = month {
        if let Some(period) = normalized_period(year, month) {
            return period;
        }
        return format!("{year}-{month}");
    }
    year.to_string()
}

fn normalized_period(year: &str, month: &str) -> Option<String> {
    if year.len() != 4 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    chrono::NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(format!("{year:04}-{month:02}"))
}

pub fn parse_row(line: &str) -> Result<RowOutcome> {
    let row = RawRow::from_line(line);
    let Some((amount, direction)) = resolve_amount(&row, line)? else {
        return Ok(RowOutcome::Skip);
    };
    let period = period_key(row.field(DATE_FIELD));

    Ok(RowOutcome::Parsed(ParsedTransaction {
        period,
        amount,
        direction,
        magnitude_class: magnitude_class(amount),
        vendor: extract_vendor(row.field(DESCRIPTION_FIELD)),
    }))
}
