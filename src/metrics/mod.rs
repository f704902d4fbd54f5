//! Fetching and normalizing the daily health metrics.
//!
//! [`MetricFetcher`] gathers one raw payload per [`MetricKind`] into a
//! [`RawMetricBundle`]. The normalizer then turns each payload into a
//! [`NormalizedRecord`], or reports it as absent when required fields are missing.

mod bundle;
mod fetcher;
mod metric_kind;
mod normalizer;
pub mod payloads;
mod record;

pub use bundle::RawMetricBundle;
pub use fetcher::MetricFetcher;
pub use metric_kind::MetricKind;
pub use normalizer::{Normalized, normalize, normalize_all};
pub use record::{Measurement, NormalizedRecord};
