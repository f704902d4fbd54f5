//! Arguments and setup shared by the commands that touch the credential store.

use crate::Result;
use crate::config::Config;
use crate::credentials::FileCredentialStore;
use crate::sink::JsonFileTable;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use directories::BaseDirs;
use ohno::IntoAppError;

/// File name of the credential store inside the data directory
const CREDENTIALS_FILE_NAME: &str = "credentials.json";

/// File name of the table inside the data directory
const TABLE_FILE_NAME: &str = "table.json";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared between the collect and subscribe commands
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to configuration file (default is `fitbit-sync.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Path to the credential store (default is in the user's data directory)
    #[arg(long, value_name = "PATH", env = "FITBIT_SYNC_CREDENTIALS")]
    pub credentials: Option<Utf8PathBuf>,

    /// Path to the table that receives the records (default is in the user's data directory)
    #[arg(long, value_name = "PATH", env = "FITBIT_SYNC_TABLE")]
    pub table: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LogLevel,
}

impl CommonArgs {
    /// Load and validate the configuration, looking for the default file in the current directory.
    pub fn load_config(&self) -> Result<Config> {
        Config::load(Utf8Path::new("."), self.config.as_ref())
    }

    pub fn credential_store(&self) -> Result<FileCredentialStore> {
        let path = match &self.credentials {
            Some(path) => path.clone(),
            None => data_dir()?.join(CREDENTIALS_FILE_NAME),
        };

        Ok(FileCredentialStore::new(path.into_std_path_buf()))
    }

    pub fn table(&self) -> Result<JsonFileTable> {
        let path = match &self.table {
            Some(path) => path.clone(),
            None => data_dir()?.join(TABLE_FILE_NAME),
        };

        Ok(JsonFileTable::new(path.into_std_path_buf()))
    }
}

/// Per-user directory holding the credential store and the table
pub fn data_dir() -> Result<Utf8PathBuf> {
    let dir = BaseDirs::new()
        .into_app_err("could not determine data directory")?
        .data_dir()
        .join("fitbit-sync");
    Utf8PathBuf::from_path_buf(dir)
        .map_err(|path| ohno::app_err!("data directory '{}' is not valid UTF-8", path.display()))
}

/// Initialize the global logger.
///
/// Only the first call in a process takes effect.
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CommonArgs {
        CommonArgs {
            config: None,
            credentials: Some(Utf8PathBuf::from("/tmp/creds.json")),
            table: Some(Utf8PathBuf::from("/tmp/table.json")),
            log_level: LogLevel::None,
        }
    }

    #[test]
    fn test_explicit_paths_win() {
        let args = args();
        assert_eq!(args.credential_store().unwrap().path(), std::path::Path::new("/tmp/creds.json"));
        assert_eq!(args.table().unwrap().path(), std::path::Path::new("/tmp/table.json"));
    }

    #[test]
    fn test_init_logging_none_is_noop() {
        init_logging(LogLevel::None);
    }
}
