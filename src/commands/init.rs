use super::Host;
use super::common::data_dir;
use crate::Result;
use crate::config::{CONFIG_FILE_NAME, Config};
use crate::credentials::{CLIENT_ID, CLIENT_SECRET, CredentialStore, FileCredentialStore, REFRESH_TOKEN};
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path (default is `fitbit-sync.toml` in the current directory)
    #[arg(value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Path to the credential store to seed (default is in the user's data directory)
    #[arg(long, value_name = "PATH", env = "FITBIT_SYNC_CREDENTIALS")]
    pub credentials: Option<Utf8PathBuf>,

    /// OAuth2 client id to store
    #[arg(long, value_name = "ID", env = "FITBIT_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth2 client secret to store
    #[arg(long, value_name = "SECRET", env = "FITBIT_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Initial refresh token to store
    #[arg(long, value_name = "TOKEN", env = "FITBIT_REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: Option<String>,
}

impl InitArgs {
    fn seeds(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (CLIENT_ID, self.client_id.as_deref()),
            (CLIENT_SECRET, self.client_secret.as_deref()),
            (REFRESH_TOKEN, self.refresh_token.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}

async fn init_inner<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| Utf8PathBuf::from(CONFIG_FILE_NAME));
    Config::save_default(&output)?;
    let _ = writeln!(host.output(), "Generated default configuration file: {output}");

    if args.seeds().next().is_none() {
        return Ok(());
    }

    let path = match &args.credentials {
        Some(path) => path.clone(),
        None => data_dir()?.join("credentials.json"),
    };
    let mut store = FileCredentialStore::new(path.as_std_path());

    for (name, value) in args.seeds() {
        store.put(name, value, true).await?;
        let _ = writeln!(host.output(), "Stored '{name}' in {path}");
    }

    Ok(())
}

/// Write the default configuration and optionally seed the credential store
///
/// # Errors
///
/// Returns an error if a file cannot be written
pub async fn init_config<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    match init_inner(host, args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Initialization failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
