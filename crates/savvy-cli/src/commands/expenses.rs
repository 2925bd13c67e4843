//! Expense command implementations

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};

use savvy_core::db::Database;
use savvy_core::models::NewExpense;

pub fn cmd_expenses_list(db: &Database, skip: i64, limit: i64, json: bool) -> Result<()> {
    let expenses = db.list_expenses(skip.max(0), limit.max(1))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&expenses)?);
        return Ok(());
    }

    if expenses.is_empty() {
        println!("No expenses recorded.");
        return Ok(());
    }

    println!("{:>6}  {:<10}  {:>12}  Description", "ID", "Date", "Amount");
    for expense in &expenses {
        println!(
            "{:>6}  {:<10}  {:>12.2}  {}",
            expense.id, expense.date, expense.amount, expense.description
        );
    }
    println!(
        "\nShowing {} of {} expense(s)",
        expenses.len(),
        db.count_expenses()?
    );

    Ok(())
}

pub fn cmd_expenses_add(
    db: &Database,
    description: &str,
    amount: f64,
    date: Option<&str>,
) -> Result<()> {
    let date = match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))?,
        None => Utc::now().date_naive(),
    };

    let created = db.insert_expense(&NewExpense {
        description: description.to_string(),
        amount,
        date,
    })?;

    println!(
        "Added expense #{}: {} ({:.2}) on {}",
        created.id, created.description, created.amount, created.date
    );

    Ok(())
}

pub fn cmd_expenses_delete(db: &Database, id: i64) -> Result<()> {
    db.delete_expense(id)?;
    println!("Deleted expense #{}", id);

    Ok(())
}
