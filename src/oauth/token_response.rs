use serde::Deserialize;

/// A freshly issued access/refresh token pair.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl core::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Result of a single token exchange with the upstream token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenExchange {
    /// The endpoint issued a new token pair.
    Granted(TokenPair),

    /// The endpoint answered without a usable token pair, with a description of why.
    Rejected(String),
}

/// Error entry in the Fitbit error envelope (`{"errors": [...], "success": false}`)
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(rename = "errorType")]
    error_type: Option<String>,
    message: Option<String>,
}

/// Token endpoint response body
///
/// Every field is optional because the same endpoint returns either a token grant
/// or an error object, and the two share no fields.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
    user_id: Option<String>,

    #[serde(default)]
    errors: Vec<ApiError>,

    /// RFC 6749 style error code
    error: Option<String>,
    error_description: Option<String>,
}

impl TokenResponse {
    /// Seconds until the new access token expires, when the endpoint reports it
    #[must_use]
    pub const fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }

    /// The user the tokens were issued for, when the endpoint reports it
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Classify the response.
    ///
    /// Both tokens must be present for a grant; a response carrying only one of them
    /// is a rejection so that credentials are never partially rotated.
    #[must_use]
    pub fn into_exchange(self) -> TokenExchange {
        match (self.access_token, self.refresh_token) {
            (Some(access_token), Some(refresh_token)) if !access_token.is_empty() && !refresh_token.is_empty() => {
                TokenExchange::Granted(TokenPair { access_token, refresh_token })
            }
            (Some(_), _) => TokenExchange::Rejected("response does not contain a complete token pair".to_string()),
            (None, _) => TokenExchange::Rejected(describe_errors(&self.errors, self.error.as_deref(), self.error_description.as_deref())),
        }
    }
}

fn describe_errors(errors: &[ApiError], error: Option<&str>, error_description: Option<&str>) -> String {
    let mut parts: Vec<String> = errors
        .iter()
        .map(|e| match (&e.error_type, &e.message) {
            (Some(kind), Some(message)) => format!("{kind}: {message}"),
            (Some(kind), None) => kind.clone(),
            (None, Some(message)) => message.clone(),
            (None, None) => "unspecified error".to_string(),
        })
        .collect();

    match (error, error_description) {
        (Some(code), Some(description)) => parts.push(format!("{code}: {description}")),
        (Some(code), None) => parts.push(code.to_string()),
        (None, Some(description)) => parts.push(description.to_string()),
        (None, None) => {}
    }

    if parts.is_empty() {
        "response contains no access token".to_string()
    } else {
        format!("response contains no access token ({})", parts.join("; "))
    }
}
