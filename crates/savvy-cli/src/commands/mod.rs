//! Command implementations

mod core;
mod expenses;
mod forecast;
mod serve;

pub use self::core::cmd_init;
pub use expenses::{cmd_expenses_add, cmd_expenses_delete, cmd_expenses_list};
pub use forecast::{cmd_forecast_predict, cmd_forecast_train};
pub use serve::cmd_serve;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use savvy_core::db::Database;

/// Resolve the database path: --db flag, then SAVVYSPEND_DB, then default
pub fn resolve_db_path(flag: Option<&Path>) -> PathBuf {
    flag.map(|p| p.to_path_buf())
        .or_else(|| std::env::var_os("SAVVYSPEND_DB").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("savvyspend.db"))
}

/// Resolve the model path: --model flag, then SAVVYSPEND_MODEL, then default
pub fn resolve_model_path(flag: Option<&Path>) -> PathBuf {
    flag.map(|p| p.to_path_buf())
        .or_else(|| std::env::var_os("SAVVYSPEND_MODEL").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("budget_forecast_model.json"))
}

/// Open the database, running migrations if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    tracing::debug!(path = %db_path.display(), "Opening database");
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    Database::new(path_str).with_context(|| format!("Failed to open database at {}", path_str))
}
