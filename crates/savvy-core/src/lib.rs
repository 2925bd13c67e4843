//! SavvySpend Core Library
//!
//! Shared functionality for the SavvySpend personal finance backend:
//! - Database access and migrations
//! - Expense record store with skip/limit pagination
//! - Disk-backed linear-regression budget forecaster

pub mod db;
pub mod error;
pub mod forecast;
pub mod models;

pub use db::Database;
pub use error::{Error, Result};
pub use forecast::{BudgetForecaster, LinearModel, FEATURE_DIM};
pub use models::{Expense, NewExpense};
