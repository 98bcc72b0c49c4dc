pub mod check;
pub mod graph;
pub mod run_sql;
pub mod seed;

use anyhow::{Context, Result};

use lodgeseed_core::config::{read_config, LodgeseedConfig};
use lodgeseed_core::error::SeedError;
use lodgeseed_core::Table;

use crate::args::Cli;

/// Load the config file named by `--config`, if it exists.
pub fn load_config(cli: &Cli) -> Result<Option<LodgeseedConfig>> {
    read_config(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))
}

/// `--db` (or `DATABASE_URL`, possibly from `.env`), then `[database] url`.
pub fn resolve_db_url(cli: &Cli, config: Option<&LodgeseedConfig>) -> Result<String> {
    if let Some(url) = &cli.db {
        return Ok(url.clone());
    }

    if let Some(url) = config.and_then(|c| c.database.url.as_ref()) {
        return Ok(url.clone());
    }

    Err(SeedError::NoDatabaseUrl.into())
}

/// Parse `--only` table names.
pub fn parse_tables(names: &[String]) -> Result<Vec<Table>> {
    names
        .iter()
        .filter(|n| !n.trim().is_empty())
        .map(|n| n.parse::<Table>().map_err(anyhow::Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_tables() {
        let tables = parse_tables(&["bookings".to_string(), " Reviews ".to_string()]).unwrap();
        assert_eq!(tables, vec![Table::Bookings, Table::Reviews]);
        assert!(parse_tables(&["bookingz".to_string()]).is_err());
        assert!(parse_tables(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_db_flag_wins_over_config() {
        let cli = Cli::parse_from(["lodgeseed", "--db", "postgres://flag/db", "check"]);
        let config = LodgeseedConfig {
            database: lodgeseed_core::config::DatabaseConfig {
                url: Some("postgres://file/db".to_string()),
            },
            ..LodgeseedConfig::default()
        };
        assert_eq!(
            resolve_db_url(&cli, Some(&config)).unwrap(),
            "postgres://flag/db"
        );
    }

    #[test]
    fn test_seed_args() {
        let cli = Cli::parse_from([
            "lodgeseed", "seed", "--rows", "10", "--seed", "7", "--only", "credit_cards,paypal",
        ]);
        match cli.command {
            crate::args::Command::Seed(args) => {
                assert_eq!(args.rows, Some(10));
                assert_eq!(args.seed, Some(7));
                assert_eq!(args.only, vec!["credit_cards", "paypal"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
