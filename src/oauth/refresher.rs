use super::{TokenExchange, TokenPair, TokenResponse};
use crate::Result;
use crate::credentials::{ACCESS_TOKEN, ClientCredentials, CredentialStore, REFRESH_TOKEN};
use ohno::IntoAppError;

const LOG_TARGET: &str = "     oauth";

/// Outcome of a refresh against the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new pair was issued and committed to the store.
    Rotated(TokenPair),

    /// The token endpoint refused the exchange. The store was left untouched.
    Rejected(String),
}

/// Exchanges refresh tokens at the OAuth2 token endpoint.
#[derive(Debug, Clone)]
pub struct TokenRefresher {
    client: reqwest::Client,
    token_url: String,
}

impl TokenRefresher {
    #[must_use]
    pub fn new(client: reqwest::Client, token_url: impl Into<String>) -> Self {
        Self {
            client,
            token_url: token_url.into(),
        }
    }

    /// Perform one `refresh_token` grant.
    ///
    /// The response body is decoded whatever the HTTP status is, since the endpoint
    /// reports refused grants as a JSON error object.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the body is not JSON.
    pub async fn exchange(&self, client_credentials: &ClientCredentials, refresh_token: &str) -> Result<TokenExchange> {
        log::info!(target: LOG_TARGET, "Exchanging refresh token at '{}'", self.token_url);

        let resp = self
            .client
            .post(&self.token_url)
            .basic_auth(&client_credentials.client_id, Some(&client_credentials.client_secret))
            .form(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)])
            .send()
            .await
            .into_app_err_with(|| format!("sending token request to '{}'", self.token_url))?;

        let status = resp.status();
        let body: TokenResponse = resp
            .json()
            .await
            .into_app_err_with(|| format!("decoding token response from '{}' (HTTP status {status})", self.token_url))?;

        if let Some(expires_in) = body.expires_in() {
            log::debug!(target: LOG_TARGET, "New access token expires in {expires_in}s");
        }
        if let Some(user_id) = body.user_id() {
            log::debug!(target: LOG_TARGET, "Tokens issued for user '{user_id}'");
        }

        Ok(body.into_exchange())
    }

    /// Rotate the token pair held in `store`.
    ///
    /// Reads the client credentials and current refresh token, performs one exchange,
    /// and on success overwrites both stored tokens. On rejection nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if a secret cannot be read, the exchange fails at the transport
    /// level, or the new pair cannot be written.
    pub async fn refresh(&self, store: &mut impl CredentialStore) -> Result<RefreshOutcome> {
        let client_credentials = ClientCredentials::load(&*store).await?;
        let refresh_token = store.get(REFRESH_TOKEN, true).await?;

        match self.exchange(&client_credentials, &refresh_token).await? {
            TokenExchange::Granted(pair) => {
                commit(store, &pair).await?;
                log::info!(target: LOG_TARGET, "Token pair rotated");
                Ok(RefreshOutcome::Rotated(pair))
            }
            TokenExchange::Rejected(reason) => {
                log::error!(target: LOG_TARGET, "Token refresh rejected: {reason}");
                Ok(RefreshOutcome::Rejected(reason))
            }
        }
    }
}

/// Overwrite the stored tokens with a newly issued pair.
///
/// The refresh token is written first: once the exchange succeeded, the old refresh
/// token is no longer valid upstream, so it is the value that must not be lost.
///
/// # Errors
///
/// Returns an error if either write fails.
pub async fn commit(store: &mut impl CredentialStore, pair: &TokenPair) -> Result<()> {
    store.put(REFRESH_TOKEN, &pair.refresh_token, true).await?;
    store.put(ACCESS_TOKEN, &pair.access_token, true).await?;
    Ok(())
}
