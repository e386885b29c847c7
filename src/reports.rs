use std::collections::BTreeMap;

use rusqlite::Connection;

use crate::error::Result;
use crate::models::Expense;

// Every purchase-oriented report looks at debits only.
const DEBITS_ONLY: &str = "transaction_type = 'Debit'";

const EXPENSE_COLUMNS: &str = "id, year_month, cost, price_category, transaction_type, vendor";

fn expense_from_row(row: &rusqlite::Row) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        period: row.get(1)?,
        cost: row.get(2)?,
        magnitude_class: row.get(3)?,
        direction: row.get(4)?,
        vendor: row.get(5)?,
    })
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

pub fn get_all_expenses(conn: &Connection) -> Result<Vec<Expense>> {
    let sql = format!("SELECT {EXPENSE_COLUMNS} FROM expenses ORDER BY year_month, id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], expense_from_row)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn get_largest_purchases(conn: &Connection, limit: usize) -> Result<Vec<Expense>> {
    let sql = format!(
        "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE {DEBITS_ONLY} \
         ORDER BY cost DESC, id LIMIT ?1"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([limit as i64], expense_from_row)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

// ---------------------------------------------------------------------------
// Grouped totals
// ---------------------------------------------------------------------------

pub struct GroupTotal {
    pub name: String,
    pub total: f64,
    pub count: i64,
}

fn query_group_totals(conn: &Connection, sql: &str) -> Result<Vec<GroupTotal>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(GroupTotal {
            name: row.get(0)?,
            total: row.get(1)?,
            count: row.get(2)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Debit and credit totals, largest first.
pub fn get_direction_totals(conn: &Connection) -> Result<Vec<GroupTotal>> {
    query_group_totals(
        conn,
        "SELECT transaction_type, SUM(cost) AS total, COUNT(*) FROM expenses \
         GROUP BY transaction_type ORDER BY total DESC",
    )
}

/// Purchase totals per magnitude class, largest first.
pub fn get_magnitude_totals(conn: &Connection) -> Result<Vec<GroupTotal>> {
    query_group_totals(
        conn,
        &format!(
            "SELECT price_category, SUM(cost) AS total, COUNT(*) FROM expenses \
             WHERE {DEBITS_ONLY} GROUP BY price_category ORDER BY total DESC"
        ),
    )
}

/// Purchase totals per vendor, most frequent first.
pub fn get_vendor_totals(conn: &Connection) -> Result<Vec<GroupTotal>> {
    query_group_totals(
        conn,
        &format!(
            "SELECT vendor, SUM(cost) AS total, COUNT(*) AS n FROM expenses \
             WHERE {DEBITS_ONLY} GROUP BY vendor ORDER BY n DESC, total DESC, vendor"
        ),
    )
}

// ---------------------------------------------------------------------------
// Period summaries
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
pub struct PeriodTotal {
    pub period: String,
    pub count: i64,
    pub total: f64,
}

pub fn get_monthly_summary(conn: &Connection, year: Option<i32>) -> Result<Vec<PeriodTotal>> {
    let prefix = year.map(|y| format!("{y:04}-%")).unwrap_or_else(|| "%".to_string());
    let sql = format!(
        "SELECT year_month, COUNT(*), SUM(cost) FROM expenses \
         WHERE {DEBITS_ONLY} AND year_month LIKE ?1 \
         GROUP BY year_month ORDER BY year_month"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([prefix], |row| {
        Ok(PeriodTotal {
            period: row.get(0)?,
            count: row.get(1)?,
            total: row.get(2)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn get_yearly_summary(conn: &Connection) -> Result<Vec<PeriodTotal>> {
    let sql = format!(
        "SELECT substr(year_month, 1, 4) AS year, COUNT(*), SUM(cost) FROM expenses \
         WHERE {DEBITS_ONLY} GROUP BY year ORDER BY year"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(PeriodTotal {
            period: row.get(0)?,
            count: row.get(1)?,
            total: row.get(2)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn get_available_years(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT substr(year_month, 1, 4) AS year FROM expenses ORDER BY year",
    )?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Monthly purchase totals for vendors containing any of `keywords` (case-insensitive).
pub fn get_keyword_group_monthly(conn: &Connection, keywords: &[String]) -> Result<Vec<PeriodTotal>> {
    let needles: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let sql = format!("SELECT year_month, vendor, cost FROM expenses WHERE {DEBITS_ONLY}");
    let mut stmt = conn.prepare(&sql)?;
    let rows: Vec<(String, String, f64)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut by_period: BTreeMap<String, (i64, f64)> = BTreeMap::new();
    for (period, vendor, cost) in rows {
        let vendor = vendor.to_lowercase();
        if needles.iter().any(|n| vendor.contains(n.as_str())) {
            let entry = by_period.entry(period).or_default();
            entry.0 += 1;
            entry.1 += cost;
        }
    }
    Ok(by_period
        .into_iter()
        .map(|(period, (count, total))| PeriodTotal { period, count, total })
        .collect())
}
