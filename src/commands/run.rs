//! Command dispatch logic for fitbit-sync

use super::{CollectArgs, InitArgs, SubscribeArgs, VerifyArgs, init_config, process_collect, process_subscribe, verify_code};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "fitbit-sync", author, version, long_about = None)]
#[command(about = "Collect daily Fitbit health metrics into a key-value table")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: SyncSubcommand,
}

#[derive(Subcommand, Debug)]
enum SyncSubcommand {
    /// Rotate the token pair, then fetch, normalize, and store today's metrics
    Collect(Box<CollectArgs>),
    /// Create a push subscription for the token owner
    Subscribe(Box<SubscribeArgs>),
    /// Answer a subscriber verification probe
    Verify(VerifyArgs),
    /// Generate a default configuration file and seed the credential store
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        SyncSubcommand::Collect(collect_args) => process_collect(host, collect_args).await,
        SyncSubcommand::Subscribe(subscribe_args) => process_subscribe(host, subscribe_args).await,
        SyncSubcommand::Verify(verify_args) => verify_code(host, verify_args),
        SyncSubcommand::Init(init_args) => init_config(host, init_args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_collect() {
        let cli = Cli::try_parse_from(["fitbit-sync", "collect", "--date", "2024-03-09", "--log-level", "debug"]).unwrap();
        let SyncSubcommand::Collect(args) = cli.command else {
            panic!("expected collect");
        };
        assert_eq!(args.date, chrono::NaiveDate::from_ymd_opt(2024, 3, 9));
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let _ = Cli::try_parse_from(["fitbit-sync", "collect", "--date", "yesterday"]).unwrap_err();
    }

    #[test]
    fn test_subscribe_requires_id() {
        let _ = Cli::try_parse_from(["fitbit-sync", "subscribe"]).unwrap_err();
    }
}
