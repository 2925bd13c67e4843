//! Server command implementation

use std::path::Path;

use anyhow::Result;

use super::open_db;

pub async fn cmd_serve(db_path: &Path, model_path: &Path, host: &str, port: u16) -> Result<()> {
    println!("🚀 Starting SavvySpend backend...");
    println!("   Database: {}", db_path.display());
    println!("   Model file: {}", model_path.display());
    println!("   Listening: http://{}:{}", host, port);
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path)?;

    savvy_server::serve(db, model_path.to_path_buf(), host, port).await?;

    Ok(())
}
