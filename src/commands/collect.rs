use super::Host;
use super::common::{CommonArgs, init_logging};
use crate::Result;
use crate::pipeline::{InvocationContext, InvocationSummary, run_invocation};
use chrono::NaiveDate;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct CollectArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Collect the metrics of this day instead of today (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: Option<NaiveDate>,
}

async fn collect_inner(args: &CollectArgs) -> Result<InvocationSummary> {
    let config = args.common.load_config()?;
    let ctx = match args.date {
        Some(date) => InvocationContext::for_date(config, date)?,
        None => InvocationContext::new(config)?,
    };

    let mut store = args.common.credential_store()?;
    let mut table = args.common.table()?;

    run_invocation(&ctx, &mut store, &mut table).await
}

/// Run one collection and print its summary
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the token refresh fails
pub async fn process_collect<H: Host>(host: &mut H, args: &CollectArgs) -> Result<()> {
    init_logging(args.common.log_level);

    match collect_inner(args).await {
        Ok(summary) => {
            let _ = writeln!(host.output(), "{summary}");
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Collection failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
