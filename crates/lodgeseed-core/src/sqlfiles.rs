//! # SQL File Runner
//!
//! Executes an ordered list of `.sql` files against one connection. A file
//! that cannot be read or fails to execute is logged and skipped; the
//! remaining files still run.

use std::path::{Path, PathBuf};

use sqlx::{Connection, PgConnection};
use tracing::{info, warn};

use crate::db;
use crate::error::{Result, SeedError};
use crate::lookup::statement_error;
use crate::statements;

/// Outcome of one file. `error` is `None` on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub file: PathBuf,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlRunReport {
    pub outcomes: Vec<FileOutcome>,
}

impl SqlRunReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error.is_none()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }
}

/// Connect to `db_url`, run the files, and close the connection. Only a
/// failed connection is an error; per-file failures are in the report.
pub async fn execute_sql_files(
    db_url: &str,
    dir: &Path,
    files: &[String],
) -> Result<SqlRunReport> {
    let mut conn = db::connect(db_url).await?;
    let report = run_sql_files(&mut conn, dir, files).await;
    let _ = conn.close().await;
    Ok(report)
}

/// Run each of `files`, resolved against `dir`, in order.
pub async fn run_sql_files(
    conn: &mut PgConnection,
    dir: &Path,
    files: &[String],
) -> SqlRunReport {
    let mut report = SqlRunReport::default();

    for file in files {
        let path = dir.join(file);
        let error = match run_sql_file(conn, &path).await {
            Ok(()) => {
                info!(file = %path.display(), "Executed SQL file");
                None
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "SQL file failed, continuing");
                Some(e.to_string())
            }
        };
        report.outcomes.push(FileOutcome { file: path, error });
    }

    report
}

/// A file that fails after its own `BEGIN` leaves the session in an aborted
/// transaction; it is rolled back so the next file starts clean.
async fn run_sql_file(conn: &mut PgConnection, path: &Path) -> Result<()> {
    let sql = read_sql_file(path)?;
    if let Err(e) = sqlx::raw_sql(&sql).execute(&mut *conn).await {
        // Outside a transaction this only raises a server warning.
        if let Err(rollback) = sqlx::raw_sql(statements::ROLLBACK).execute(&mut *conn).await {
            warn!(
                file = %path.display(),
                error = %rollback,
                "Rollback after failed SQL file failed"
            );
        }
        return Err(statement_error(
            &path.display().to_string(),
            "SQL file failed",
            &sql,
            e,
        ));
    }
    Ok(())
}

fn read_sql_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| SeedError::Io {
        message: format!("Failed to read {}", path.display()),
        source: e,
    })
}
