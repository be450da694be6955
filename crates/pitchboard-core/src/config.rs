// Configuration loading and parsing (config/pitchboard.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the single config file, both in `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "pitchboard.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// pitchboard.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub ingest: IngestConfig,
    pub rankings: RankingsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    /// Collection (table) the loader writes to and leaderboards read from.
    pub collection: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// An `.xlsx` workbook or a directory of `<season>.csv` sheets.
    pub workbook: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingsConfig {
    /// Season shown when a leaderboard is requested without one.
    pub default_season: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "pitchboard=info,warn".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/pitchboard.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;
    let config = parse_config(&text, &path)?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy `defaults/pitchboard.toml` into `config/` when it is not there yet.
/// Returns the copied path, or `None` if the config already existed.
pub fn ensure_config_files(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let default_path = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if target.exists() {
        return Ok(None);
    }
    if !default_path.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither {} nor {} found; run from the project root",
                target.display(),
                default_path.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::copy(&default_path, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", default_path.display()),
    })?;

    Ok(Some(target))
}

/// Loads config relative to the current working directory, copying defaults
/// first if needed.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.database.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "database.path".into(),
            message: "must not be empty".into(),
        });
    }

    let collection = &config.database.collection;
    if collection.is_empty()
        || !collection
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ConfigError::ValidationError {
            field: "database.collection".into(),
            message: format!("must be a non-empty identifier, got `{collection}`"),
        });
    }

    let season = config.rankings.default_season;
    if !(1982..=2100).contains(&season) {
        return Err(ConfigError::ValidationError {
            field: "rankings.default_season".into(),
            message: format!("must be between 1982 and 2100, got {season}"),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VALID: &str = r#"
[database]
path = "pitchboard.db"
collection = "kbo_pitcher_stats"

[ingest]
workbook = "data/kbo_pitcher_stats.xlsx"

[rankings]
default_season = 2025
"#;

    /// Workspace root, where `defaults/` lives.
    fn workspace_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    fn temp_base(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(format!("pitchboard_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        tmp
    }

    fn write_config(base: &Path, text: &str) {
        fs::write(base.join("config").join(CONFIG_FILE), text).unwrap();
    }

    #[test]
    fn shipped_defaults_are_valid() {
        let text = fs::read_to_string(workspace_root().join("defaults").join(CONFIG_FILE))
            .expect("defaults/pitchboard.toml should exist");
        let config = parse_config(&text, Path::new(CONFIG_FILE)).unwrap();
        validate(&config).unwrap();
        assert_eq!(config.database.collection, "kbo_pitcher_stats");
        assert_eq!(config.rankings.default_season, 2025);
    }

    #[test]
    fn load_valid_config() {
        let base = temp_base("valid");
        write_config(&base, VALID);

        let config = load_config_from(&base).expect("should load valid config");
        assert_eq!(config.database.path, "pitchboard.db");
        assert_eq!(config.ingest.workbook, "data/kbo_pitcher_stats.xlsx");
        assert_eq!(config.logging.filter, "pitchboard=info,warn");

        let _ = fs::remove_dir_all(&base);
    }

    #[test]
    fn logging_section_overrides_default_filter() {
        let base = temp_base("logging");
        write_config(&base, &format!("{VALID}\n[logging]\nfilter = \"debug\"\n"));

        let config = load_config_from(&base).unwrap();
        assert_eq!(config.logging.filter, "debug");

        let _ = fs::remove_dir_all(&base);
    }

    #[test]
    fn missing_file_reports_path() {
        let base = temp_base("missing");
        let err = load_config_from(&base).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
        let _ = fs::remove_dir_all(&base);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let base = temp_base("malformed");
        write_config(&base, "[database\npath = 1");
        let err = load_config_from(&base).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        let _ = fs::remove_dir_all(&base);
    }

    #[test]
    fn rejects_non_identifier_collection() {
        let base = temp_base("collection");
        write_config(
            &base,
            &VALID.replace("\"kbo_pitcher_stats\"", "\"kbo-pitcher stats\""),
        );
        match load_config_from(&base).unwrap_err() {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "database.collection");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&base);
    }

    #[test]
    fn rejects_out_of_range_season() {
        let base = temp_base("season");
        write_config(&base, &VALID.replace("2025", "1881"));
        match load_config_from(&base).unwrap_err() {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "rankings.default_season");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&base);
    }

    #[test]
    fn ensure_config_files_copies_once() {
        let base = temp_base("ensure");
        fs::remove_dir_all(base.join("config")).unwrap();
        fs::create_dir_all(base.join("defaults")).unwrap();
        fs::write(base.join("defaults").join(CONFIG_FILE), VALID).unwrap();

        let copied = ensure_config_files(&base).unwrap();
        assert_eq!(copied, Some(base.join("config").join(CONFIG_FILE)));
        assert_eq!(ensure_config_files(&base).unwrap(), None);
        assert!(load_config_from(&base).is_ok());

        let _ = fs::remove_dir_all(&base);
    }

    #[test]
    fn ensure_config_files_without_defaults_errors() {
        let base = temp_base("no_defaults");
        let err = ensure_config_files(&base).unwrap_err();
        assert!(matches!(err, ConfigError::DefaultsCopyError { .. }));
        let _ = fs::remove_dir_all(&base);
    }
}
