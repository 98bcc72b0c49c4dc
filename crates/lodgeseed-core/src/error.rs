//! # Error Types
//!
//! Defines `SeedError`, the unified error enum for every failure mode in the
//! seeding pipeline. Variants carry the table, the SQL preview or the config
//! key involved so a failed run can be diagnosed from the message alone.

use thiserror::Error;

/// All errors that can occur while generating or loading seed data.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Database connection failed: {message}\n  Connection string: {connection_hint}\n  Cause: {source}")]
    Connection {
        message: String,
        connection_hint: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("No database URL provided. lodgeseed looks for a connection in this order:\n  1. --db flag\n  2. DATABASE_URL environment variable\n  3. .env file with DATABASE_URL\n  4. lodgeseed.toml [database] section")]
    NoDatabaseUrl,

    #[error("Statement failed on {table}: {message}\n  SQL: {sql_preview}\n  DB error: {source}")]
    Statement {
        table: String,
        message: String,
        sql_preview: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Table '{table}' has no single-column primary key (found {found} key columns)")]
    PrimaryKey { table: String, found: usize },

    #[error("Cannot generate rows for {table}: no rows available in {parent}\n  Seed the parent table first or raise the row count")]
    MissingParentRows { table: String, parent: String },

    #[error("Failed to generate unique value for {table}.{column} at row {row_index}: {max_retries} retries exhausted\n  Consider reducing the row count or extending the seed catalogue")]
    UniqueExhausted {
        table: String,
        column: String,
        row_index: usize,
        max_retries: usize,
    },

    #[error("Circular dependency detected involving table '{table}'")]
    CircularDependency { table: String },

    #[error("Unknown table '{name}'")]
    UnknownTable { name: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {message}: {source}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SeedError>;
