use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "lodgeseed",
    about = "Seed a rental marketplace PostgreSQL database with realistic synthetic data",
    version,
    after_help = "Examples:\n  lodgeseed check --db postgres://localhost/rentals\n  lodgeseed run-sql                        # runs the [sql] files from lodgeseed.toml\n  lodgeseed seed --rows 100 --seed 7\n  lodgeseed seed --only bookings,reviews\n  lodgeseed graph --format mermaid"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Database connection URL (postgres://).
    /// Falls back to DATABASE_URL env var, .env file, or lodgeseed.toml
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub db: Option<String>,

    /// Path to the config file
    #[arg(long, global = true, default_value = "lodgeseed.toml")]
    pub config: PathBuf,

    /// Enable verbose output (debug logging and table dumps)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the database is reachable and list its tables
    Check,

    /// Execute the configured SQL files in order
    RunSql(RunSqlArgs),

    /// Truncate and repopulate the marketplace tables
    Seed(SeedArgs),

    /// Show the table insertion order or dependency graph
    Graph(GraphArgs),
}

#[derive(Parser, Debug)]
pub struct RunSqlArgs {
    /// Directory holding the SQL files (default: [sql] dir, then "sql")
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Files to run, in order (default: [sql] files, then 01_schema.sql)
    pub files: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Rows per table before multipliers
    #[arg(long)]
    pub rows: Option<usize>,

    /// Number of admin accounts
    #[arg(long)]
    pub admins: Option<usize>,

    /// Random seed for reproducible data
    #[arg(long)]
    pub seed: Option<u64>,

    /// Only seed these tables (plus the tables they depend on)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct GraphArgs {
    /// Output format
    #[arg(long, default_value = "order")]
    pub format: GraphFormat,

    /// Restrict to these tables and their ancestors
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GraphFormat {
    Order,
    Mermaid,
    Dot,
}
