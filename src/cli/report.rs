use colored::Colorize;
use comfy_table::{Cell, Table};
use rusqlite::Connection;

use crate::db::open_existing;
use crate::error::Result;
use crate::fmt::money;
use crate::models::Expense;
use crate::reports::{self, GroupTotal, PeriodTotal};
use crate::settings::{get_data_dir, load_settings};

fn open() -> Result<Connection> {
    open_existing(&get_data_dir())
}

fn cost_cell(expense: &Expense) -> Cell {
    if expense.direction == "Credit" {
        Cell::new(money(expense.cost).green())
    } else {
        Cell::new(money(expense.cost))
    }
}

fn print_periods(title: &str, label: &str, rows: &[PeriodTotal]) {
    if rows.is_empty() {
        println!("No purchases found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![label, "Transaction Count", "Total Spent"]);
    for r in rows {
        table.add_row(vec![
            Cell::new(&r.period),
            Cell::new(r.count),
            Cell::new(money(r.total)),
        ]);
    }
    let total: f64 = rows.iter().map(|r| r.total).sum();
    table.add_row(vec![Cell::new("Total".bold()), Cell::new(""), Cell::new(money(total))]);
    println!("{title}\n{table}");
}

fn print_groups(title: &str, label: &str, rows: &[GroupTotal]) {
    if rows.is_empty() {
        println!("No transactions found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![label, "Count", "Total"]);
    for r in rows {
        table.add_row(vec![
            Cell::new(&r.name),
            Cell::new(r.count),
            Cell::new(money(r.total)),
        ]);
    }
    println!("{title}\n{table}");
}

pub fn top(limit: usize) -> Result<()> {
    let conn = open()?;
    let rows = reports::get_largest_purchases(&conn, limit)?;

    let mut table = Table::new();
    table.set_header(vec!["Date", "Cost", "Size", "Vendor"]);
    for e in &rows {
        table.add_row(vec![
            Cell::new(&e.period),
            Cell::new(money(e.cost)),
            Cell::new(&e.magnitude_class),
            Cell::new(&e.vendor),
        ]);
    }
    println!("Top {} Largest Purchases\n{table}", rows.len());
    Ok(())
}

pub fn monthly(year: Option<i32>) -> Result<()> {
    let conn = open()?;
    let rows = reports::get_monthly_summary(&conn, year)?;
    print_periods("Monthly Summary", "Month", &rows);
    Ok(())
}

pub fn yearly() -> Result<()> {
    let conn = open()?;
    let rows = reports::get_yearly_summary(&conn)?;
    print_periods("Yearly Summary", "Year", &rows);
    Ok(())
}

pub fn vendors(limit: Option<usize>) -> Result<()> {
    let conn = open()?;
    let mut rows = reports::get_vendor_totals(&conn)?;
    if let Some(n) = limit {
        rows.truncate(n);
    }
    print_groups("Spending by Vendor", "Vendor", &rows);
    Ok(())
}

pub fn types() -> Result<()> {
    let conn = open()?;
    let rows = reports::get_direction_totals(&conn)?;
    print_groups("Spending by Transaction Type", "Transaction Type", &rows);
    Ok(())
}

pub fn sizes() -> Result<()> {
    let conn = open()?;
    let rows = reports::get_magnitude_totals(&conn)?;
    print_groups("Spending by Purchase Size", "Size", &rows);
    Ok(())
}

pub fn all() -> Result<()> {
    let conn = open()?;
    let rows = reports::get_all_expenses(&conn)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Cost", "Size", "Type", "Vendor"]);
    for e in &rows {
        table.add_row(vec![
            Cell::new(e.id),
            Cell::new(&e.period),
            cost_cell(e),
            Cell::new(&e.magnitude_class),
            Cell::new(&e.direction),
            Cell::new(&e.vendor),
        ]);
    }
    println!("All Expenses ({})\n{table}", rows.len());
    Ok(())
}

pub fn years() -> Result<()> {
    let conn = open()?;
    let years = reports::get_available_years(&conn)?;
    if years.is_empty() {
        println!("No data imported yet.");
    } else {
        println!("{}", years.join("\n"));
    }
    Ok(())
}

pub fn group(name: &str) -> Result<()> {
    let settings = load_settings();
    let keywords = settings.keyword_group(name)?;
    let conn = open()?;
    let rows = reports::get_keyword_group_monthly(&conn, keywords)?;
    print_periods(&format!("Monthly Spending: {name}"), "Month", &rows);
    Ok(())
}
