use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use mondaysync_core::error::CoreError;
use mondaysync_core::ColumnMapping;
use mondaysync_db::TargetTable;

/// Trigger column used when `TRIGGER_COLUMN_IDS` is unset (the board's status column).
pub const DEFAULT_TRIGGER_COLUMN: &str = "color_mksysrr6";

/// Errors raised while loading [`SyncConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("failed to read column map {path}: {source}")]
    ColumnMapFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid column map: {0}")]
    ColumnMap(#[from] CoreError),
}

/// Log output format, selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Process-wide configuration, built once at startup and shared read-only.
#[derive(Clone)]
pub struct SyncConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Server-side request timeout in seconds (default: `60`). Must exceed the
    /// outbound monday.com timeout.
    pub request_timeout_secs: u64,
    /// Sent verbatim as the `Authorization` header to monday.com.
    pub monday_api_token: String,
    /// GraphQL endpoint (default: the public monday.com v2 API).
    pub monday_api_url: String,
    /// `None` disables signature verification.
    pub signing_secret: Option<String>,
    /// Only events for this board are synced.
    pub board_id: i64,
    pub database_url: String,
    pub db_max_connections: u32,
    /// Column ids whose changes trigger a sync. Empty means every column.
    pub trigger_column_ids: BTreeSet<String>,
    pub column_mapping: ColumnMapping,
    pub target_table: TargetTable,
    /// Apply bundled migrations on startup (default: `true`).
    pub run_migrations: bool,
    pub log_format: LogFormat,
}

impl SyncConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                      |
    /// |-------------------------|------------------------------|
    /// | `MONDAY_API_TOKEN`      | required                     |
    /// | `MONDAY_SIGNING_SECRET` | unset (verification off)     |
    /// | `BOARD_ID`              | required                     |
    /// | `DATABASE_URL`          | required                     |
    /// | `TRIGGER_COLUMN_IDS`    | `color_mksysrr6`             |
    /// | `MONDAY_API_URL`        | `https://api.monday.com/v2`  |
    /// | `TARGET_SCHEMA`         | `public`                     |
    /// | `TARGET_TABLE`          | `monday_logger`              |
    /// | `COLUMN_MAP_PATH`       | built-in mapping             |
    /// | `HOST`                  | `0.0.0.0`                    |
    /// | `PORT`                  | `8000`                       |
    /// | `REQUEST_TIMEOUT_SECS`  | `60`                         |
    /// | `DB_MAX_CONNECTIONS`    | `10`                         |
    /// | `RUN_MIGRATIONS`        | `true`                       |
    /// | `LOG_FORMAT`            | `pretty`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| var(key).ok_or(ConfigError::Missing(key));

        let monday_api_token = required("MONDAY_API_TOKEN")?;
        let database_url = required("DATABASE_URL")?;
        let board_id = parse_var("BOARD_ID", &required("BOARD_ID")?)?;

        let column_mapping = match var("COLUMN_MAP_PATH") {
            Some(path) => load_column_map(PathBuf::from(path))?,
            None => ColumnMapping::default(),
        };

        let target_table = TargetTable::new(
            var("TARGET_SCHEMA").unwrap_or_else(|| "public".into()),
            var("TARGET_TABLE").unwrap_or_else(|| "monday_logger".into()),
        );

        let request_timeout_secs = parse_or("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS"), 60)?;
        let outbound_secs = mondaysync_monday::REQUEST_TIMEOUT.as_secs();
        if request_timeout_secs <= outbound_secs {
            return Err(ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS",
                reason: format!("must exceed the {outbound_secs}s monday.com timeout"),
            });
        }

        let log_format = match var("LOG_FORMAT").as_deref().map(str::to_ascii_lowercase) {
            None => LogFormat::Pretty,
            Some(f) if f == "pretty" => LogFormat::Pretty,
            Some(f) if f == "json" => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    reason: format!("expected 'pretty' or 'json', got '{other}'"),
                })
            }
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or("PORT", var("PORT"), 8000)?,
            request_timeout_secs,
            monday_api_token,
            monday_api_url: var("MONDAY_API_URL")
                .unwrap_or_else(|| mondaysync_monday::DEFAULT_API_URL.into()),
            signing_secret: var("MONDAY_SIGNING_SECRET"),
            board_id,
            database_url,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", var("DB_MAX_CONNECTIONS"), 10)?,
            trigger_column_ids: parse_trigger_columns(lookup("TRIGGER_COLUMN_IDS").as_deref()),
            column_mapping,
            target_table,
            run_migrations: parse_or("RUN_MIGRATIONS", var("RUN_MIGRATIONS"), true)?,
            log_format,
        })
    }

    /// Whether a change to `column` should trigger a sync.
    pub fn tracks_column(&self, column: Option<&str>) -> bool {
        if self.trigger_column_ids.is_empty() {
            return true;
        }
        column.is_some_and(|c| self.trigger_column_ids.contains(c))
    }
}

impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("monday_api_token", &"<redacted>")
            .field("monday_api_url", &self.monday_api_url)
            .field("signing_secret", &self.signing_secret.as_ref().map(|_| "<redacted>"))
            .field("board_id", &self.board_id)
            .field("database_url", &"<redacted>")
            .field("db_max_connections", &self.db_max_connections)
            .field("trigger_column_ids", &self.trigger_column_ids)
            .field("column_mapping", &self.column_mapping)
            .field("target_table", &self.target_table)
            .field("run_migrations", &self.run_migrations)
            .field("log_format", &self.log_format)
            .finish()
    }
}

/// Split a comma-separated list of column ids.
///
/// Unset or blank falls back to [`DEFAULT_TRIGGER_COLUMN`]. A value made only of
/// separators (e.g. `","`) yields an empty set, which tracks every column.
pub fn parse_trigger_columns(raw: Option<&str>) -> BTreeSet<String> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        None => BTreeSet::from([DEFAULT_TRIGGER_COLUMN.to_string()]),
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

fn load_column_map(path: PathBuf) -> Result<ColumnMapping, ConfigError> {
    let raw = std::fs::read_to_string(&path)
        .map_err(|source| ConfigError::ColumnMapFile { path, source })?;
    Ok(ColumnMapping::from_json(&raw)?)
}

fn parse_var<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    raw.map_or(Ok(default), |r| parse_var(var, &r))
}
