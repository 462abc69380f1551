//! Configuration file loading with precedence handling.
//!
//! Precedence chain: built-in defaults → config file → `PAGECAT_*`
//! environment variables. The host application may layer its own CLI
//! handling on top; none is owned here.

use crate::model::{SortBy, SortKey, SortOrder};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable overriding the sort field.
pub const ENV_SORT_BY: &str = "PAGECAT_SORT_BY";
/// Environment variable overriding the sort direction.
pub const ENV_SORT_ORDER: &str = "PAGECAT_SORT_ORDER";
/// Environment variable overriding the log file path.
pub const ENV_LOG_FILE: &str = "PAGECAT_LOG_FILE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permissions, or an explicit path that
    /// does not exist).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or invalid values.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are
/// used. Corresponds to `~/.config/pagecat/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Default sort field (`"popularity"`, `"release_date"`, ...).
    #[serde(default)]
    pub sort_by: Option<SortBy>,

    /// Default sort direction (`"asc"` or `"desc"`).
    #[serde(default)]
    pub sort_order: Option<SortOrder>,

    /// Directory the favorites store lives under.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Path to the log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Initial sort configuration.
    pub sort: SortKey,
    /// Directory the favorites store lives under.
    pub data_dir: PathBuf,
    /// Path tracing output is written to.
    pub log_file_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pagecat");
        let log_file_path = data_dir.join("pagecat.log");
        Self {
            sort: SortKey::default(),
            data_dir,
            log_file_path,
        }
    }
}

/// Default config file location: `<config dir>/pagecat/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pagecat").join("config.toml"))
}

/// Load the config file, if one exists.
///
/// An explicit `path` must exist and parse - failures are errors. The
/// default location is optional: a missing file there is `Ok(None)`.
pub fn load_config(path: Option<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let (path, explicit) = match path {
        Some(p) => (p, true),
        None => match default_config_path() {
            Some(p) => (p, false),
            None => return Ok(None),
        },
    };

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !explicit => return Ok(None),
        Err(err) => {
            return Err(ConfigError::ReadError {
                path,
                reason: err.to_string(),
            })
        }
    };

    let parsed = toml::from_str(&raw).map_err(|err| ConfigError::ParseError {
        path,
        reason: err.to_string(),
    })?;
    Ok(Some(parsed))
}

/// Merge a loaded config file over the built-in defaults.
pub fn merge_config(file: Option<ConfigFile>) -> Config {
    let mut config = Config::default();
    let Some(file) = file else { return config };

    if let Some(by) = file.sort_by {
        config.sort.by = by;
    }
    if let Some(order) = file.sort_order {
        config.sort.order = order;
    }
    if let Some(data_dir) = file.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(log_file_path) = file.log_file_path {
        config.log_file_path = log_file_path;
    }
    config
}

/// Apply `PAGECAT_*` environment overrides.
///
/// Unparsable values are ignored with a warning rather than failing
/// startup.
pub fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(raw) = std::env::var(ENV_SORT_BY) {
        match raw.parse() {
            Ok(by) => config.sort.by = by,
            Err(err) => warn!(%err, "ignoring {ENV_SORT_BY}"),
        }
    }
    if let Ok(raw) = std::env::var(ENV_SORT_ORDER) {
        match raw.parse() {
            Ok(order) => config.sort.order = order,
            Err(err) => warn!(%err, "ignoring {ENV_SORT_ORDER}"),
        }
    }
    if let Ok(raw) = std::env::var(ENV_LOG_FILE) {
        config.log_file_path = PathBuf::from(raw);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn defaults_sort_by_popularity_descending() {
        let config = Config::default();
        assert_eq!(config.sort, SortKey::default());
        assert!(config.data_dir.ends_with("pagecat"));
    }

    #[test]
    fn config_file_parses_all_fields() {
        let file: ConfigFile = toml::from_str(
            r#"
            sort_by = "vote_average"
            sort_order = "asc"
            data_dir = "/tmp/pagecat-data"
            log_file_path = "/tmp/pagecat.log"
            "#,
        )
        .expect("valid config");
        assert_eq!(file.sort_by, Some(SortBy::VoteAverage));
        assert_eq!(file.sort_order, Some(SortOrder::Asc));
        assert_eq!(file.data_dir, Some(PathBuf::from("/tmp/pagecat-data")));
    }

    #[test]
    fn config_file_rejects_unknown_fields() {
        let result = toml::from_str::<ConfigFile>("page_size = 20");
        assert!(result.is_err(), "unknown fields are configuration typos");
    }

    #[test]
    fn config_file_rejects_invalid_sort_value() {
        let result = toml::from_str::<ConfigFile>(r#"sort_by = "watchability""#);
        assert!(result.is_err());
    }

    #[test]
    fn merge_overrides_only_present_fields() {
        let file = ConfigFile {
            sort_order: Some(SortOrder::Asc),
            ..ConfigFile::default()
        };
        let config = merge_config(Some(file));
        assert_eq!(config.sort.by, SortBy::Popularity, "field keeps default");
        assert_eq!(config.sort.order, SortOrder::Asc, "file wins where set");
    }

    #[test]
    fn merge_of_nothing_is_the_defaults() {
        assert_eq!(merge_config(None), Config::default());
    }

    #[test]
    fn load_config_explicit_missing_path_is_an_error() {
        let missing = PathBuf::from("/nonexistent/pagecat/config.toml");
        let err = load_config(Some(missing)).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn load_config_parses_explicit_file() {
        let path = std::env::temp_dir().join(format!(
            "pagecat-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, r#"sort_by = "release_date""#).expect("write temp config");

        let file = load_config(Some(path.clone()))
            .expect("load")
            .expect("present");
        assert_eq!(file.sort_by, Some(SortBy::ReleaseDate));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn load_config_reports_invalid_toml() {
        let path = std::env::temp_dir().join(format!(
            "pagecat-config-bad-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "sort_by = [not toml").expect("write temp config");

        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    #[serial]
    fn env_overrides_win_over_file_values() {
        std::env::set_var(ENV_SORT_BY, "original_title");
        std::env::set_var(ENV_SORT_ORDER, "asc");
        let config = apply_env_overrides(Config::default());
        std::env::remove_var(ENV_SORT_BY);
        std::env::remove_var(ENV_SORT_ORDER);

        assert_eq!(config.sort, SortKey::new(SortBy::Title, SortOrder::Asc));
    }

    #[test]
    #[serial]
    fn invalid_env_values_are_ignored() {
        std::env::set_var(ENV_SORT_BY, "watchability");
        let config = apply_env_overrides(Config::default());
        std::env::remove_var(ENV_SORT_BY);

        assert_eq!(config.sort.by, SortBy::Popularity, "bad value is skipped");
    }

    #[test]
    #[serial]
    fn env_log_file_override_applies() {
        std::env::set_var(ENV_LOG_FILE, "/tmp/custom-pagecat.log");
        let config = apply_env_overrides(Config::default());
        std::env::remove_var(ENV_LOG_FILE);

        assert_eq!(config.log_file_path, PathBuf::from("/tmp/custom-pagecat.log"));
    }
}
