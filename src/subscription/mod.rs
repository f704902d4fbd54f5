//! Push notifications from the Web API.
//!
//! A subscriber endpoint must first prove it is ours ([`verify_subscriber`]), after
//! which subscriptions can be created for it ([`SubscriptionClient`]).

mod subscriber;
mod verifier;

pub use subscriber::{SUBSCRIBER_ID_HEADER, SubscriptionClient, SubscriptionOutcome};
pub use verifier::verify_subscriber;
