use super::MetricKind;
use serde_json::Value;
use std::collections::BTreeMap;

/// The raw responses gathered in one run, keyed by metric.
///
/// A metric whose fetch failed has no payload; its error is kept instead so that the
/// run summary can report it.
#[derive(Debug, Default)]
pub struct RawMetricBundle {
    payloads: BTreeMap<MetricKind, Value>,
    failures: BTreeMap<MetricKind, ohno::AppError>,
}

impl RawMetricBundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the decoded payload of a metric, replacing any earlier outcome.
    pub fn insert(&mut self, kind: MetricKind, payload: Value) {
        let _ = self.failures.remove(&kind);
        let _ = self.payloads.insert(kind, payload);
    }

    /// Record that a metric could not be fetched, replacing any earlier outcome.
    pub fn insert_failure(&mut self, kind: MetricKind, error: ohno::AppError) {
        let _ = self.payloads.remove(&kind);
        let _ = self.failures.insert(kind, error);
    }

    /// Builder form of [`Self::insert`]
    #[must_use]
    pub fn with(mut self, kind: MetricKind, payload: Value) -> Self {
        self.insert(kind, payload);
        self
    }

    #[must_use]
    pub fn get(&self, kind: MetricKind) -> Option<&Value> {
        self.payloads.get(&kind)
    }

    #[must_use]
    pub fn failure(&self, kind: MetricKind) -> Option<&ohno::AppError> {
        self.failures.get(&kind)
    }

    /// Metrics whose fetch failed, in metric order
    pub fn failed_kinds(&self) -> impl Iterator<Item = MetricKind> + '_ {
        self.failures.keys().copied()
    }

    /// Number of metrics with a payload
    #[must_use]
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}
