//! Configuration loading for fitbit-sync
//!
//! Settings are read from a TOML file; every key has a default taken from the
//! embedded `default_config.toml`.

#[expect(clippy::module_inception, reason = "mirrors the file layout of the configuration types")]
mod config;

pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_CONFIG_TOML, MAX_ECG_PAGE_SIZE};
