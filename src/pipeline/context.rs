use crate::Result;
use crate::config::Config;
use crate::http;
use crate::metrics::MetricFetcher;
use crate::oauth::TokenRefresher;
use chrono::{Local, NaiveDate};

/// Everything a single invocation shares: one HTTP client, the configuration, and the
/// date stamped on every record it produces.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    client: reqwest::Client,
    config: Config,
    today: NaiveDate,
}

impl InvocationContext {
    /// Build a context dated with the local calendar day.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: Config) -> Result<Self> {
        Self::for_date(config, Local::now().date_naive())
    }

    /// Build a context for a fixed date.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn for_date(config: Config, today: NaiveDate) -> Result<Self> {
        let client = http::build_client(config.request_timeout)?;
        Ok(Self { client, config, today })
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    #[must_use]
    pub fn refresher(&self) -> TokenRefresher {
        TokenRefresher::new(self.client.clone(), self.config.token_url.clone())
    }

    #[must_use]
    pub fn fetcher(&self) -> MetricFetcher {
        MetricFetcher::new(
            self.client.clone(),
            &self.config.api_base_url,
            &self.config.user_id,
            self.config.ecg_page_size,
        )
    }
}
