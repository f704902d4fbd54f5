use super::{MetricKind, RawMetricBundle};
use crate::Result;
use crate::http;
use chrono::NaiveDate;
use ohno::EnrichableExt;
use serde_json::Value;
use strum::IntoEnumIterator;

const LOG_TARGET: &str = "     fetch";

/// Fetches the raw daily payload of every metric.
#[derive(Debug, Clone)]
pub struct MetricFetcher {
    client: reqwest::Client,
    base_url: String,
    user_id: String,
    ecg_page_size: u32,
}

impl MetricFetcher {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, user_id: &str, ecg_page_size: u32) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: user_id.to_string(),
            ecg_page_size,
        }
    }

    /// Full URL of the resource for `kind` on `date`
    #[must_use]
    pub fn url_for(&self, kind: MetricKind, date: NaiveDate) -> String {
        format!("{}{}", self.base_url, kind.resource_path(&self.user_id, date, self.ecg_page_size))
    }

    /// Fetch a single metric.
    pub async fn fetch_one(&self, kind: MetricKind, date: NaiveDate, access_token: &str) -> Result<Value> {
        let url = self.url_for(kind, date);
        log::debug!(target: LOG_TARGET, "Fetching {kind} from '{url}'");

        http::get_json(&self.client, &url, access_token)
            .await
            .map_err(|e| e.enrich_with(|| format!("fetching {kind}")))
    }

    /// Fetch every metric, one request at a time.
    ///
    /// A failed request only costs its own metric: the error is kept in the bundle and
    /// the remaining metrics are still fetched.
    pub async fn fetch(&self, date: NaiveDate, access_token: &str) -> RawMetricBundle {
        let mut bundle = RawMetricBundle::new();

        for kind in MetricKind::iter() {
            match self.fetch_one(kind, date, access_token).await {
                Ok(payload) => bundle.insert(kind, payload),
                Err(e) => {
                    log::error!(target: LOG_TARGET, "Could not fetch {kind}: {e:#}");
                    bundle.insert_failure(kind, e);
                }
            }
        }

        log::info!(target: LOG_TARGET, "Fetched {} of {} metric(s) for {date}", bundle.len(), MetricKind::iter().len());
        bundle
    }
}
