use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Table as ComfyTable};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use lodgeseed_core::pipeline::{seed_database, SeedReport};
use lodgeseed_core::{SeedConfig, Table};

use crate::args::{Cli, SeedArgs};
use crate::commands::{load_config, parse_tables, resolve_db_url};

pub async fn run(cli: &Cli, args: &SeedArgs) -> Result<()> {
    let config = load_config(cli)?;
    let db_url = resolve_db_url(cli, config.as_ref())?;

    let mut seed_config = match &config {
        Some(cfg) => cfg.seed_config()?,
        None => SeedConfig::default(),
    };
    if let Some(rows) = args.rows {
        seed_config.rows = rows;
    }
    if let Some(admins) = args.admins {
        seed_config.admin_count = admins;
    }
    if args.seed.is_some() {
        seed_config.rng_seed = args.seed;
    }
    seed_config.validate()?;

    let selection = parse_tables(&args.only)?;
    debug!(?selection, rows = seed_config.rows, "Resolved seed options");

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [{prefix}] {msg}")
            .context("Invalid progress template")?,
    );
    pb.set_message("Connecting...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let on_table = |table: Table, position: usize, total: usize| {
        pb.set_prefix(format!("{}/{}", position, total));
        pb.set_message(format!("Seeding {}...", table));
    };

    let report = match seed_database(&db_url, &seed_config, &selection, Some(&on_table)).await {
        Ok(report) => report,
        Err(e) => {
            pb.abandon_with_message("Seeding failed, all changes rolled back");
            return Err(e.into());
        }
    };

    pb.finish_with_message(format!(
        "Seeding... ✓ {} rows across {} tables",
        report.total_rows(),
        report.tables.len()
    ));

    println!("{}", summary_table(&report));
    if let Some(seed) = seed_config.rng_seed {
        println!("Seed: {} (rerun with --seed {} for the same data)", seed, seed);
    }

    Ok(())
}

fn summary_table(report: &SeedReport) -> ComfyTable {
    let mut table = ComfyTable::new();
    table.set_header(vec!["#", "Table", "Rows"]);
    for (i, entry) in report.tables.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(entry.table.name()),
            Cell::new(entry.rows).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new(""),
        Cell::new("total"),
        Cell::new(report.total_rows()).set_alignment(CellAlignment::Right),
    ]);
    table
}
