//! OAuth2 refresh-token rotation
//!
//! Each invocation performs exactly one `refresh_token` grant. A granted pair is
//! committed to the credential store before anything else happens; a refused grant
//! is reported as [`RefreshOutcome::Rejected`] and leaves the store untouched.

mod refresher;
mod token_response;

pub use refresher::{RefreshOutcome, TokenRefresher, commit};
pub use token_response::{TokenExchange, TokenPair, TokenResponse};
