//! SavvySpend CLI - Personal finance backend
//!
//! Usage:
//!   savvy init                        Initialize database
//!   savvy serve --port 8000           Start web server
//!   savvy expenses add "Coffee" 4.5   Record an expense
//!   savvy forecast train ...          Fit the budget forecast model

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let db_path = commands::resolve_db_path(cli.db.as_deref());
    let model_path = commands::resolve_model_path(cli.model.as_deref());

    match cli.command {
        Commands::Init => commands::cmd_init(&db_path),
        Commands::Serve { port, host } => {
            commands::cmd_serve(&db_path, &model_path, &host, port).await
        }
        Commands::Expenses { action } => {
            let db = commands::open_db(&db_path)?;
            match action {
                None => commands::cmd_expenses_list(&db, 0, 20, false),
                Some(ExpensesAction::List { skip, limit, json }) => {
                    commands::cmd_expenses_list(&db, skip, limit, json)
                }
                Some(ExpensesAction::Add {
                    description,
                    amount,
                    date,
                }) => commands::cmd_expenses_add(&db, &description, amount, date.as_deref()),
                Some(ExpensesAction::Delete { id }) => commands::cmd_expenses_delete(&db, id),
            }
        }
        Commands::Forecast { action } => match action {
            ForecastAction::Train { features, targets } => {
                commands::cmd_forecast_train(&model_path, &features, &targets)
            }
            ForecastAction::Predict { features } => {
                commands::cmd_forecast_predict(&model_path, &features)
            }
        },
    }
}
