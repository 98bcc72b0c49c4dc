use std::path::PathBuf;

use anyhow::{bail, Result};

use lodgeseed_core::config::{default_sql_files, DEFAULT_SQL_DIR};
use lodgeseed_core::sqlfiles::execute_sql_files;

use crate::args::{Cli, RunSqlArgs};
use crate::commands::{load_config, resolve_db_url};

pub async fn run(cli: &Cli, args: &RunSqlArgs) -> Result<()> {
    let config = load_config(cli)?;
    let db_url = resolve_db_url(cli, config.as_ref())?;

    let dir = match (&args.dir, &config) {
        (Some(dir), _) => dir.clone(),
        (None, Some(cfg)) => cfg.sql_dir(),
        (None, None) => PathBuf::from(DEFAULT_SQL_DIR),
    };
    let files = if !args.files.is_empty() {
        args.files.clone()
    } else {
        config
            .as_ref()
            .map(|c| c.sql_files())
            .unwrap_or_else(default_sql_files)
    };

    let report = execute_sql_files(&db_url, &dir, &files).await?;

    for outcome in &report.outcomes {
        match &outcome.error {
            None => println!("  ✓ {}", outcome.file.display()),
            Some(e) => println!("  ✗ {}\n      {}", outcome.file.display(), e),
        }
    }

    if !report.all_succeeded() {
        bail!(
            "{} of {} SQL files failed",
            report.failed(),
            report.outcomes.len()
        );
    }

    println!("Executed {} SQL files from {}", report.succeeded(), dir.display());
    Ok(())
}
