pub mod catalogue;
pub mod config;
pub mod db;
pub mod error;
pub mod generate;
pub mod graph;
pub mod load;
pub mod lookup;
pub mod pipeline;
pub mod schema;
pub mod sqlfiles;
pub mod statements;

// Re-export key types for convenience
pub use config::SeedConfig;
pub use error::{Result, SeedError};
pub use schema::Table;
