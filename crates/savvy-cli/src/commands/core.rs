//! Init command implementation

use std::path::Path;

use anyhow::Result;

use super::open_db;

pub fn cmd_init(db_path: &Path) -> Result<()> {
    let db = open_db(db_path)?;

    println!("Database initialized at {}", db.path());
    println!("Expenses recorded: {}", db.count_expenses()?);

    Ok(())
}
