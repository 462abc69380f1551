//! Configuration module.

pub mod loader;

pub use loader::{apply_env_overrides, load_config, merge_config, Config, ConfigError, ConfigFile};
