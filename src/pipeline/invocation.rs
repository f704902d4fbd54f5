use super::InvocationContext;
use crate::Result;
use crate::credentials::{ACCESS_TOKEN, CredentialStore};
use crate::metrics::{MetricKind, Normalized, normalize_all};
use crate::oauth::RefreshOutcome;
use crate::sink::{Table, persist};
use chrono::NaiveDate;
use core::fmt::{self, Display, Formatter};
use ohno::app_err;
use strum::IntoEnumIterator;

const LOG_TARGET: &str = "invocation";

/// What one invocation accomplished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSummary {
    pub date: NaiveDate,

    /// Records produced by normalization
    pub records: usize,

    /// Records written to the table
    pub persisted: usize,

    /// Records whose write failed
    pub failed_writes: usize,

    /// Metrics whose fetch failed
    pub failed_fetches: Vec<MetricKind>,

    /// Metrics fetched but without usable data, with the reason
    pub absent: Vec<(MetricKind, String)>,
}

impl InvocationSummary {
    /// Whether every fetched metric and every produced record made it to the table
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed_fetches.is_empty() && self.failed_writes == 0
    }
}

impl Display for InvocationSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Date:           {}", self.date)?;
        writeln!(f, "Records:        {}", self.records)?;
        writeln!(f, "Persisted:      {}", self.persisted)?;
        writeln!(f, "Failed writes:  {}", self.failed_writes)?;

        let failed: Vec<String> = self.failed_fetches.iter().map(ToString::to_string).collect();
        writeln!(f, "Failed fetches: {}", if failed.is_empty() { "none".to_string() } else { failed.join(", ") })?;

        let absent: Vec<String> = self.absent.iter().map(|(kind, _)| kind.to_string()).collect();
        write!(f, "No data:        {}", if absent.is_empty() { "none".to_string() } else { absent.join(", ") })
    }
}

/// Run one collection: rotate the token pair, fetch every metric, normalize, and persist.
///
/// # Errors
///
/// Returns an error if the token exchange is rejected or fails, or if the new access
/// token cannot be read back. In either case no metric is fetched. Fetch, normalization,
/// and write problems are reported in the summary instead.
pub async fn run_invocation(ctx: &InvocationContext, store: &mut impl CredentialStore, table: &mut impl Table) -> Result<InvocationSummary> {
    match ctx.refresher().refresh(store).await? {
        RefreshOutcome::Rotated(_) => {}
        RefreshOutcome::Rejected(reason) => return Err(app_err!("token refresh was rejected: {reason}")),
    }

    let access_token = store.get(ACCESS_TOKEN, true).await?;
    let date = ctx.today();

    let bundle = ctx.fetcher().fetch(date, &access_token).await;
    let failed_fetches: Vec<MetricKind> = bundle.failed_kinds().collect();

    let mut records = Vec::new();
    let mut absent = Vec::new();
    for (kind, normalized) in MetricKind::iter().zip(normalize_all(&bundle, date)) {
        match normalized {
            Normalized::Record(record) => records.push(record),
            Normalized::Absent(reason) => {
                if !failed_fetches.contains(&kind) {
                    absent.push((kind, reason));
                }
            }
        }
    }

    let report = persist(&records, table).await;

    let summary = InvocationSummary {
        date,
        records: records.len(),
        persisted: report.persisted,
        failed_writes: report.failed,
        failed_fetches,
        absent,
    };

    log::info!(
        target: LOG_TARGET,
        "Invocation for {date} complete: {} record(s), {} persisted, {} failed write(s), {} failed fetch(es)",
        summary.records,
        summary.persisted,
        summary.failed_writes,
        summary.failed_fetches.len()
    );
    if !summary.is_clean() {
        log::warn!(target: LOG_TARGET, "Invocation for {date} is incomplete; failed metrics can be collected again with a rerun");
    }

    Ok(summary)
}
