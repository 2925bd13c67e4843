//! Expense operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use super::Database;
use crate::error::{Error, Result};
use crate::models::{Expense, NewExpense};

impl Database {
    /// Insert an expense, returning the stored record with its assigned id
    ///
    /// Validates the payload (description 1-255 chars, amount > 0) before
    /// touching the database.
    pub fn insert_expense(&self, expense: &NewExpense) -> Result<Expense> {
        expense.validate()?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO expenses (description, amount, date) VALUES (?, ?, ?)",
            params![
                expense.description,
                expense.amount,
                expense.date.to_string()
            ],
        )?;

        Ok(Expense {
            id: conn.last_insert_rowid(),
            description: expense.description.clone(),
            amount: expense.amount,
            date: expense.date,
        })
    }

    /// List expenses with skip/limit pagination
    ///
    /// Ordered by id ascending so consecutive pages are disjoint even
    /// while new expenses are being inserted.
    pub fn list_expenses(&self, skip: i64, limit: i64) -> Result<Vec<Expense>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, description, amount, date FROM expenses
             ORDER BY id ASC
             LIMIT ? OFFSET ?",
        )?;

        let expenses = stmt
            .query_map(params![limit, skip.max(0)], Self::row_to_expense)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Get a single expense by id
    pub fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;

        let expense = conn
            .query_row(
                "SELECT id, description, amount, date FROM expenses WHERE id = ?",
                params![id],
                Self::row_to_expense,
            )
            .optional()?;

        Ok(expense)
    }

    /// Delete an expense by id
    pub fn delete_expense(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;

        let deleted = conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Expense {} not found", id)));
        }

        Ok(())
    }

    /// Count all expenses
    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }

    fn row_to_expense(row: &Row) -> rusqlite::Result<Expense> {
        let date_str: String = row.get(3)?;
        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;

        Ok(Expense {
            id: row.get(0)?,
            description: row.get(1)?,
            amount: row.get(2)?,
            date,
        })
    }
}
