//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// SavvySpend - Record expenses and forecast your budget
#[derive(Parser)]
#[command(name = "savvy")]
#[command(about = "Personal finance backend: expenses and budget forecasting", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (falls back to SAVVYSPEND_DB, then savvyspend.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Forecast model file path (falls back to SAVVYSPEND_MODEL, then
    /// budget_forecast_model.json)
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Manage expenses (list, add, delete)
    Expenses {
        #[command(subcommand)]
        action: Option<ExpensesAction>,
    },

    /// Train or query the budget forecast model
    Forecast {
        #[command(subcommand)]
        action: ForecastAction,
    },
}

#[derive(Subcommand)]
pub enum ExpensesAction {
    /// List expenses
    List {
        /// Number of expenses to skip
        #[arg(long, default_value = "0")]
        skip: i64,

        /// Maximum number of expenses to show
        #[arg(long, default_value = "20")]
        limit: i64,

        /// Output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add an expense
    Add {
        /// What the money was spent on
        description: String,

        /// Amount spent (must be positive)
        amount: f64,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an expense by id
    Delete {
        /// Expense ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ForecastAction {
    /// Fit the model on feature rows and targets, overwriting any previous fit
    Train {
        /// Feature rows as semicolon-separated pairs, e.g. "1,2;2,3;3,4"
        #[arg(long)]
        features: String,

        /// Target values, comma-separated, e.g. "100,200,300"
        #[arg(long)]
        targets: String,
    },

    /// Predict against the persisted model
    Predict {
        /// Feature rows as semicolon-separated pairs, e.g. "4,5" or "4,5;5,6"
        #[arg(long)]
        features: String,
    },
}
