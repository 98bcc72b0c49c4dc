//! # Seeding Pipeline
//!
//! Derives the insertion order from the dependency graph and seeds each table
//! in turn on a single transaction. The transaction commits once, after the
//! last table; any error drops it and PostgreSQL rolls everything back.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::{Connection, PgConnection};
use tracing::info;

use crate::config::SeedConfig;
use crate::db;
use crate::error::{Result, SeedError};
use crate::graph::topo::insertion_order;
use crate::load;
use crate::schema::Table;

/// Called before each table is seeded with `(table, position, total)`;
/// `position` starts at 1.
pub type ProgressCallback<'a> = &'a (dyn Fn(Table, usize, usize) + Send + Sync);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableReport {
    pub table: Table,
    pub rows: usize,
}

/// Rows inserted per table, in the order the tables were seeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub tables: Vec<TableReport>,
}

impl SeedReport {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }

    pub fn rows_for(&self, table: Table) -> Option<usize> {
        self.tables.iter().find(|t| t.table == table).map(|t| t.rows)
    }
}

/// Seeded RNG when `rng_seed` is set, otherwise seeded from the OS.
pub fn build_rng(config: &SeedConfig) -> StdRng {
    match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Connect to `db_url`, seed, and close the connection.
pub async fn seed_database(
    db_url: &str,
    config: &SeedConfig,
    selection: &[Table],
    progress: Option<ProgressCallback<'_>>,
) -> Result<SeedReport> {
    let mut conn = db::connect(db_url).await?;
    let report = seed_with(&mut conn, config, selection, progress).await;
    let _ = conn.close().await;
    report
}

/// Seed `selection` and every table it depends on (all tables when empty)
/// on an already open connection.
pub async fn seed_with(
    conn: &mut PgConnection,
    config: &SeedConfig,
    selection: &[Table],
    progress: Option<ProgressCallback<'_>>,
) -> Result<SeedReport> {
    config.validate()?;
    let order = insertion_order(selection)?;
    let mut rng = build_rng(config);

    info!(
        tables = order.len(),
        rows = config.rows,
        seed = ?config.rng_seed,
        "Starting seed run"
    );

    let mut tx = conn.begin().await.map_err(|e| SeedError::Statement {
        table: "(session)".to_string(),
        message: "Failed to begin transaction".to_string(),
        sql_preview: "BEGIN".to_string(),
        source: e,
    })?;

    let mut report = SeedReport::default();
    for (position, &table) in order.iter().enumerate() {
        if let Some(cb) = progress {
            cb(table, position + 1, order.len());
        }
        let rows = load::seed_table(&mut *tx, table, config, &mut rng).await?;
        info!(table = %table, rows, "Seeded table");
        report.tables.push(TableReport { table, rows });
    }

    tx.commit().await.map_err(|e| SeedError::Statement {
        table: "(session)".to_string(),
        message: "Failed to commit transaction".to_string(),
        sql_preview: "COMMIT".to_string(),
        source: e,
    })?;

    info!(total_rows = report.total_rows(), "Seed run committed");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_report_totals() {
        let report = SeedReport {
            tables: vec![
                TableReport {
                    table: Table::Accounts,
                    rows: 40,
                },
                TableReport {
                    table: Table::Images,
                    rows: 160,
                },
            ],
        };
        assert_eq!(report.total_rows(), 200);
        assert_eq!(report.rows_for(Table::Images), Some(160));
        assert_eq!(report.rows_for(Table::Bookings), None);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = SeedConfig {
            rng_seed: Some(99),
            ..SeedConfig::default()
        };
        let a: Vec<u32> = (0..8).map(|_| build_rng(&config).random()).collect();
        let mut rng = build_rng(&config);
        let b: u32 = rng.random();
        assert!(a.iter().all(|v| *v == b));
    }
}
