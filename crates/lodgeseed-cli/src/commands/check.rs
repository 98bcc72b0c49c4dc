use anyhow::Result;

use lodgeseed_core::db;

use crate::args::Cli;
use crate::commands::{load_config, resolve_db_url};

/// Verify the database is reachable and list its public tables.
///
/// Exit codes:
///   0: connected
///   1: connection or query failed
pub async fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let db_url = resolve_db_url(cli, config.as_ref())?;

    let info = db::check_connection(&db_url).await?;

    println!("Connected to {}", db::sanitize_url(&db_url));
    println!("{}", info.server_version);
    if info.tables.is_empty() {
        println!("No tables in the public schema. Run `lodgeseed run-sql` to create them.");
    } else {
        println!("Tables ({}):", info.tables.len());
        for table in &info.tables {
            println!("  {}", table);
        }
    }

    Ok(())
}
