use crate::Result;
use crate::http;
use ohno::IntoAppError;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;

const LOG_TARGET: &str = " subscribe";

/// Header naming the subscriber endpoint configured in the developer console
pub const SUBSCRIBER_ID_HEADER: &str = "X-Fitbit-Subscriber-Id";

/// How the Web API answered a subscription request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionOutcome {
    /// `201`: the subscription was created.
    Created,

    /// `200`: this subscription already existed for this subscriber.
    AlreadyExists,

    /// `409`: the subscription id is already used by a different subscriber.
    Conflict,

    /// Any other status.
    Failed(StatusCode),
}

impl SubscriptionOutcome {
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            201 => Self::Created,
            200 => Self::AlreadyExists,
            409 => Self::Conflict,
            _ => Self::Failed(status),
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Created | Self::AlreadyExists)
    }
}

/// Registers push subscriptions with the Web API.
#[derive(Debug, Clone)]
pub struct SubscriptionClient {
    client: reqwest::Client,
    base_url: String,
    user_id: String,
}

impl SubscriptionClient {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, user_id: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: user_id.to_string(),
        }
    }

    /// URL of a subscription, optionally scoped to one collection
    #[must_use]
    pub fn url_for(&self, collection: Option<&str>, subscription_id: &str) -> String {
        match collection {
            Some(collection) => format!(
                "{}/1/user/{}/{collection}/apiSubscriptions/{subscription_id}.json",
                self.base_url, self.user_id
            ),
            None => format!("{}/1/user/{}/apiSubscriptions/{subscription_id}.json", self.base_url, self.user_id),
        }
    }

    /// Create a subscription.
    ///
    /// # Errors
    ///
    /// Returns an error only if the request could not be sent. Every HTTP status is
    /// mapped to a [`SubscriptionOutcome`].
    pub async fn create(
        &self,
        access_token: &str,
        collection: Option<&str>,
        subscription_id: &str,
        subscriber_id: Option<&str>,
    ) -> Result<SubscriptionOutcome> {
        let url = self.url_for(collection, subscription_id);
        log::info!(target: LOG_TARGET, "Creating subscription '{subscription_id}' at '{url}'");

        let mut request = self
            .client
            .post(&url)
            .header(AUTHORIZATION, http::bearer(access_token)?);
        if let Some(subscriber_id) = subscriber_id {
            request = request.header(SUBSCRIBER_ID_HEADER, subscriber_id);
        }

        let resp = request
            .send()
            .await
            .into_app_err_with(|| format!("sending subscription request to '{url}'"))?;

        let outcome = SubscriptionOutcome::from_status(resp.status());
        match outcome {
            SubscriptionOutcome::Created => log::info!(target: LOG_TARGET, "Subscription '{subscription_id}' created"),
            SubscriptionOutcome::AlreadyExists => log::info!(target: LOG_TARGET, "Subscription '{subscription_id}' already exists"),
            SubscriptionOutcome::Conflict => {
                log::error!(target: LOG_TARGET, "Subscription '{subscription_id}' is already used by another subscriber");
            }
            SubscriptionOutcome::Failed(status) => {
                let body = resp.text().await.unwrap_or_default();
                log::error!(target: LOG_TARGET, "Subscription request failed with HTTP status {status}: {body}");
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(SubscriptionOutcome::from_status(StatusCode::CREATED), SubscriptionOutcome::Created);
        assert_eq!(SubscriptionOutcome::from_status(StatusCode::OK), SubscriptionOutcome::AlreadyExists);
        assert_eq!(SubscriptionOutcome::from_status(StatusCode::CONFLICT), SubscriptionOutcome::Conflict);
        assert_eq!(
            SubscriptionOutcome::from_status(StatusCode::UNAUTHORIZED),
            SubscriptionOutcome::Failed(StatusCode::UNAUTHORIZED)
        );
        assert_eq!(
            SubscriptionOutcome::from_status(StatusCode::NO_CONTENT),
            SubscriptionOutcome::Failed(StatusCode::NO_CONTENT)
        );
    }

    #[test]
    fn test_is_success() {
        assert!(SubscriptionOutcome::Created.is_success());
        assert!(SubscriptionOutcome::AlreadyExists.is_success());
        assert!(!SubscriptionOutcome::Conflict.is_success());
        assert!(!SubscriptionOutcome::Failed(StatusCode::BAD_REQUEST).is_success());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetSystemTimePreciseAsFileTime")]
    fn test_urls() {
        let client = SubscriptionClient::new(reqwest::Client::new(), "https://api.fitbit.com/", "-");
        assert_eq!(client.url_for(None, "1"), "https://api.fitbit.com/1/user/-/apiSubscriptions/1.json");
        assert_eq!(
            client.url_for(Some("sleep"), "sub-7"),
            "https://api.fitbit.com/1/user/-/sleep/apiSubscriptions/sub-7.json"
        );
    }
}
