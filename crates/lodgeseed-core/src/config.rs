//! # Configuration
//!
//! `SeedConfig` is the explicit set of seed parameters every generator
//! receives: the global row count, the number of admin accounts, the
//! timestamp window, password length and per-table multipliers.
//!
//! Values are layered: built-in defaults, then the optional `lodgeseed.toml`,
//! then whatever the CLI applies on top. Example file:
//!
//! ```toml
//! [database]
//! url = "postgres://localhost/rentals"
//!
//! [seed]
//! rows = 40
//! admin_count = 3
//! start = "2022-01-01T00:00:00"
//! stop = "2025-12-31T00:00:00"
//! password_length = 32
//! rng_seed = 7
//!
//! [multipliers]
//! images = 4
//! messages = 3
//!
//! [sql]
//! dir = "sql"
//! files = ["01_schema.sql"]
//! ```

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::error::{Result, SeedError};

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "lodgeseed.toml";

/// Default number of rows per table.
pub const DEFAULT_ROWS: usize = 40;

/// Default number of admin accounts carved from the account pool.
pub const DEFAULT_ADMIN_COUNT: usize = 3;

/// Default length of generated password hashes.
pub const DEFAULT_PASSWORD_LENGTH: usize = 32;

/// Default directory holding the SQL files for `run-sql`.
pub const DEFAULT_SQL_DIR: &str = "sql";

/// Inclusive window every generated timestamp falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, stop: NaiveDateTime) -> Result<Self> {
        if start >= stop {
            return Err(SeedError::Config {
                message: format!("seed window start ({start}) must be before stop ({stop})"),
            });
        }
        Ok(Self { start, stop })
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.start <= ts && ts <= self.stop
    }

    /// Length of the window in whole seconds.
    pub fn span_seconds(&self) -> i64 {
        (self.stop - self.start).num_seconds()
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            start: midnight(2022, 1, 1),
            stop: midnight(2025, 12, 31),
        }
    }
}

fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Per-table row multipliers applied on top of `SeedConfig::rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multipliers {
    pub images: usize,
    pub messages: usize,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            images: 4,
            messages: 3,
        }
    }
}

/// Seed parameters passed to every generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    /// Number of rows per table before multipliers.
    pub rows: usize,
    /// Accounts with role `admin`; the rest are guests or hosts.
    pub admin_count: usize,
    pub window: TimeWindow,
    pub password_length: usize,
    pub multipliers: Multipliers,
    /// Fixed RNG seed for reproducible runs. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            admin_count: DEFAULT_ADMIN_COUNT,
            window: TimeWindow::default(),
            password_length: DEFAULT_PASSWORD_LENGTH,
            multipliers: Multipliers::default(),
            rng_seed: None,
        }
    }
}

impl SeedConfig {
    pub fn image_rows(&self) -> usize {
        self.rows * self.multipliers.images
    }

    pub fn message_rows(&self) -> usize {
        self.rows * self.multipliers.messages
    }

    /// Validate constraints that the types alone cannot enforce.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 {
            return Err(config_error("seed.rows must be at least 1"));
        }
        if self.admin_count > self.rows {
            return Err(config_error(format!(
                "seed.admin_count ({}) cannot exceed seed.rows ({})",
                self.admin_count, self.rows
            )));
        }
        if self.password_length == 0 {
            return Err(config_error("seed.password_length must be at least 1"));
        }
        if self.multipliers.images == 0 || self.multipliers.messages == 0 {
            return Err(config_error("multipliers must be at least 1"));
        }
        TimeWindow::new(self.window.start, self.window.stop)?;
        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> SeedError {
    SeedError::Config {
        message: message.into(),
    }
}

/// Top-level `lodgeseed.toml` structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LodgeseedConfig {
    pub database: DatabaseConfig,
    pub seed: SeedSection,
    pub multipliers: MultiplierSection,
    pub sql: SqlConfig,

    /// Directory containing the config file; relative `sql.dir` resolves
    /// against it.
    #[serde(skip)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedSection {
    pub rows: Option<usize>,
    pub admin_count: Option<usize>,
    pub start: Option<NaiveDateTime>,
    pub stop: Option<NaiveDateTime>,
    pub password_length: Option<usize>,
    pub rng_seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MultiplierSection {
    pub images: Option<usize>,
    pub messages: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SqlConfig {
    pub dir: Option<PathBuf>,
    pub files: Option<Vec<String>>,
}

/// Read and parse a config file.
///
/// Returns `None` if the file doesn't exist (config is optional).
/// Returns an error if the file exists but can't be parsed or validated.
pub fn read_config(path: &Path) -> Result<Option<LodgeseedConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| SeedError::Io {
        message: format!("Failed to read {}", path.display()),
        source: e,
    })?;

    let mut config: LodgeseedConfig = toml::from_str(&content).map_err(|e| SeedError::Config {
        message: format!("Failed to parse {}: {}", path.display(), e),
    })?;

    config.config_dir = path.parent().map(|dir| {
        if dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            dir.to_path_buf()
        }
    });

    config.seed_config()?;

    Ok(Some(config))
}

impl LodgeseedConfig {
    /// Merge the `[seed]` and `[multipliers]` sections over the defaults.
    pub fn seed_config(&self) -> Result<SeedConfig> {
        let defaults = SeedConfig::default();
        let config = SeedConfig {
            rows: self.seed.rows.unwrap_or(defaults.rows),
            admin_count: self.seed.admin_count.unwrap_or(defaults.admin_count),
            window: TimeWindow {
                start: self.seed.start.unwrap_or(defaults.window.start),
                stop: self.seed.stop.unwrap_or(defaults.window.stop),
            },
            password_length: self
                .seed
                .password_length
                .unwrap_or(defaults.password_length),
            multipliers: Multipliers {
                images: self.multipliers.images.unwrap_or(defaults.multipliers.images),
                messages: self
                    .multipliers
                    .messages
                    .unwrap_or(defaults.multipliers.messages),
            },
            rng_seed: self.seed.rng_seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Directory holding the SQL files, resolved against the config location.
    pub fn sql_dir(&self) -> PathBuf {
        let dir = self
            .sql
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SQL_DIR));
        match &self.config_dir {
            Some(base) if dir.is_relative() => base.join(dir),
            _ => dir,
        }
    }

    /// SQL files to execute, in order.
    pub fn sql_files(&self) -> Vec<String> {
        self.sql
            .files
            .clone()
            .unwrap_or_else(default_sql_files)
    }
}

pub fn default_sql_files() -> Vec<String> {
    vec!["01_schema.sql".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = SeedConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rows, 40);
        assert_eq!(config.admin_count, 3);
        assert_eq!(config.image_rows(), 160);
        assert_eq!(config.message_rows(), 120);
    }

    #[test]
    fn test_admin_count_cannot_exceed_rows() {
        let config = SeedConfig {
            rows: 2,
            admin_count: 3,
            ..SeedConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("admin_count"));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let window = TimeWindow::default();
        assert!(TimeWindow::new(window.stop, window.start).is_err());
        assert!(TimeWindow::new(window.start, window.start).is_err());
    }

    #[test]
    fn test_window_contains_bounds() {
        let window = TimeWindow::default();
        assert!(window.contains(window.start));
        assert!(window.contains(window.stop));
        assert!(!window.contains(window.stop + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_read_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_read_config_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[database]
url = "postgres://localhost/rentals"

[seed]
rows = 12
start = "2023-06-01T00:00:00"
rng_seed = 99

[multipliers]
images = 2

[sql]
dir = "migrations"
files = ["01_schema.sql", "02_extra.sql"]
"#
        )
        .unwrap();

        let config = read_config(&path).unwrap().unwrap();
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgres://localhost/rentals")
        );

        let seed = config.seed_config().unwrap();
        assert_eq!(seed.rows, 12);
        assert_eq!(seed.admin_count, DEFAULT_ADMIN_COUNT);
        assert_eq!(seed.window.start, midnight(2023, 6, 1));
        assert_eq!(seed.window.stop, TimeWindow::default().stop);
        assert_eq!(seed.multipliers.images, 2);
        assert_eq!(seed.multipliers.messages, 3);
        assert_eq!(seed.rng_seed, Some(99));

        assert_eq!(config.sql_dir(), dir.path().join("migrations"));
        assert_eq!(config.sql_files(), vec!["01_schema.sql", "02_extra.sql"]);
    }

    #[test]
    fn test_read_config_rejects_invalid_seed_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[seed]\nrows = 2\nadmin_count = 5\n").unwrap();

        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, SeedError::Config { .. }));
    }

    #[test]
    fn test_read_config_rejects_unknown_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[generate]\nrows = 2\n").unwrap();

        assert!(read_config(&path).is_err());
    }

    #[test]
    fn test_default_sql_files() {
        let config = LodgeseedConfig::default();
        assert_eq!(config.sql_files(), vec!["01_schema.sql"]);
        assert_eq!(config.sql_dir(), PathBuf::from("sql"));
    }
}
