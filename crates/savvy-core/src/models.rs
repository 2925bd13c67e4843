//! Domain models for SavvySpend

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum length of an expense description
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// A recorded expense
///
/// Immutable once created; the only lifecycle transition is deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
}

/// A new expense prior to insertion (no id yet)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl NewExpense {
    /// Validate field constraints: description 1-255 chars, amount > 0
    pub fn validate(&self) -> Result<()> {
        if self.description.is_empty() {
            return Err(Error::InvalidData(
                "description must not be empty".to_string(),
            ));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(Error::InvalidData(format!(
                "description must be at most {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }
        if !(self.amount > 0.0) {
            return Err(Error::InvalidData("amount must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(description: &str, amount: f64) -> NewExpense {
        NewExpense {
            description: description.to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(expense("Groceries", 42.50).validate().is_ok());
    }

    #[test]
    fn test_validate_empty_description() {
        assert!(expense("", 10.0).validate().is_err());
    }

    #[test]
    fn test_validate_long_description() {
        let long = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(expense(&long, 10.0).validate().is_err());

        let max = "x".repeat(MAX_DESCRIPTION_LEN);
        assert!(expense(&max, 10.0).validate().is_ok());
    }

    #[test]
    fn test_validate_amount() {
        assert!(expense("Coffee", 0.0).validate().is_err());
        assert!(expense("Refund", -5.0).validate().is_err());
        assert!(expense("Coffee", f64::NAN).validate().is_err());
        assert!(expense("Coffee", 0.01).validate().is_ok());
    }
}
