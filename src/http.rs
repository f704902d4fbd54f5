//! HTTP plumbing shared by the token, metric, and subscription clients.
//!
//! Requests are sent exactly once. Failures are reported to the caller, which decides
//! whether they are fatal for the invocation or only for a single metric.

use core::time::Duration;
use ohno::{IntoAppError, app_err};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::de::DeserializeOwned;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("fitbit-sync/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used for a whole invocation.
pub fn build_client(timeout: Duration) -> crate::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .into_app_err("unable to create HTTP client")
}

/// Build a `Bearer` authorization header value that is hidden from debug output.
pub fn bearer(access_token: &str) -> crate::Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {access_token}")).into_app_err("access token is not a valid header value")?;
    value.set_sensitive(true);
    Ok(value)
}

/// Send a `GET` with bearer authentication and decode a successful JSON response.
///
/// Non-success statuses and bodies that are not JSON are errors.
pub async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str, access_token: &str) -> crate::Result<T> {
    let resp = client
        .get(url)
        .header(AUTHORIZATION, bearer(access_token)?)
        .send()
        .await
        .into_app_err_with(|| format!("sending request to '{url}'"))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(app_err!("request to '{url}' failed with HTTP status {status}"));
    }

    resp.json::<T>()
        .await
        .into_app_err_with(|| format!("decoding JSON response from '{url}'"))
}
