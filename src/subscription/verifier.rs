use reqwest::StatusCode;

/// Answer a subscriber verification request.
///
/// The Web API probes a new subscriber endpoint twice: once with the correct code,
/// expecting `204 No Content`, and once with a wrong one, expecting `404 Not Found`.
/// An empty code never verifies, even when nothing is configured.
#[must_use]
pub fn verify_subscriber(expected: &str, provided: &str) -> StatusCode {
    if !expected.is_empty() && provided == expected {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
