//! One scheduled collection, start to finish.
//!
//! [`run_invocation`] sequences the token refresh, the metric fetches, normalization,
//! and persistence. A refused refresh ends the invocation before any metric is
//! requested; everything after it degrades per metric or per record.

mod context;
mod invocation;

pub use context::InvocationContext;
pub use invocation::{InvocationSummary, run_invocation};
