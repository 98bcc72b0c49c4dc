use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;

use args::{Cli, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env before parsing so DATABASE_URL reaches clap's env fallback
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(cli.verbose))),
        )
        .with_target(false)
        .init();

    let result = match &cli.command {
        Command::Check => commands::check::run(&cli).await,
        Command::RunSql(args) => commands::run_sql::run(&cli, args).await,
        Command::Seed(args) => commands::seed::run(&cli, args).await,
        Command::Graph(args) => commands::graph::run(args),
    };

    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

/// `-v` raises our own crates to debug; dependencies such as sqlx stay at warn.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "lodgeseed=debug,lodgeseed_core=debug,warn"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter_excludes_dependencies() {
        let filter = default_filter(true);
        assert!(filter.contains("lodgeseed_core=debug"));
        assert!(!filter.split(',').any(|directive| directive == "debug"));
        assert!(EnvFilter::try_new(filter).is_ok());
        assert_eq!(default_filter(false), "warn");
    }
}
