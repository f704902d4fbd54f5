use super::Host;
use crate::Result;
use crate::subscription::verify_subscriber;
use clap::Parser;
use reqwest::StatusCode;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Value of the `verify` query parameter sent by the Web API
    #[arg(long, value_name = "CODE", default_value = "")]
    pub code: String,

    /// Verification code shown in the developer console
    #[arg(long, value_name = "CODE", env = "FITBIT_VERIFICATION_CODE", hide_env_values = true)]
    pub verification_code: String,
}

/// Answer a subscriber verification probe.
///
/// Prints the HTTP status the endpoint must respond with and exits with status 1
/// when the code does not verify.
pub fn verify_code<H: Host>(host: &mut H, args: &VerifyArgs) -> Result<()> {
    let status = verify_subscriber(&args.verification_code, &args.code);
    let _ = writeln!(host.output(), "{status}");

    if status != StatusCode::NO_CONTENT {
        host.exit(1);
    }

    Ok(())
}
