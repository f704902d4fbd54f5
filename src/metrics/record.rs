use super::MetricKind;
use crate::sink::{AttributeValue, DATA_TYPE_ATTRIBUTE, Item, TIMESTAMP_ATTRIBUTE};
use chrono::NaiveDate;

/// The metric-specific part of a normalized record.
///
/// Each variant carries exactly the fields of one metric, so a record can never hold
/// a `DataType` tag that disagrees with its fields, nor a partial set of fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Measurement {
    BreathingRate { breathing_rate: f64 },
    WaterLog { water_log: f64 },
    CoreTemp { temperature: f64 },
    Spo2 { average: f64, min: f64, max: f64 },
    Ecg { average_heart_rate: f64, result_classification: String },
}

impl Measurement {
    #[must_use]
    pub const fn kind(&self) -> MetricKind {
        match self {
            Self::BreathingRate { .. } => MetricKind::BreathingRate,
            Self::WaterLog { .. } => MetricKind::WaterLog,
            Self::CoreTemp { .. } => MetricKind::CoreTemp,
            Self::Spo2 { .. } => MetricKind::Spo2Log,
            Self::Ecg { .. } => MetricKind::EcgLog,
        }
    }

    /// The stored attributes, named as they appear in the table
    fn attributes(&self) -> Vec<(&'static str, AttributeValue)> {
        match self {
            Self::BreathingRate { breathing_rate } => vec![("breathing_rate", AttributeValue::N(*breathing_rate))],
            Self::WaterLog { water_log } => vec![("water_log", AttributeValue::N(*water_log))],
            Self::CoreTemp { temperature } => vec![("temperature", AttributeValue::N(*temperature))],
            Self::Spo2 { average, min, max } => vec![
                ("averageSpO2", AttributeValue::N(*average)),
                ("minSpO2", AttributeValue::N(*min)),
                ("maxSpO2", AttributeValue::N(*max)),
            ],
            Self::Ecg {
                average_heart_rate,
                result_classification,
            } => vec![
                ("averageHeartRate", AttributeValue::N(*average_heart_rate)),
                ("resultClassification", AttributeValue::S(result_classification.clone())),
            ],
        }
    }
}

/// A canonical flat record, ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// The invocation date shared by every record of a run
    pub timestamp: NaiveDate,
    pub measurement: Measurement,
}

impl NormalizedRecord {
    #[must_use]
    pub const fn new(timestamp: NaiveDate, measurement: Measurement) -> Self {
        Self { timestamp, measurement }
    }

    #[must_use]
    pub const fn kind(&self) -> MetricKind {
        self.measurement.kind()
    }

    #[must_use]
    pub const fn data_type(&self) -> &'static str {
        self.kind().data_type()
    }

    /// Convert into a table item. Values are not rounded here.
    #[must_use]
    pub fn to_item(&self) -> Item {
        let mut item = Item::new()
            .with(DATA_TYPE_ATTRIBUTE, AttributeValue::S(self.data_type().to_string()))
            .with(TIMESTAMP_ATTRIBUTE, AttributeValue::S(self.timestamp.format("%Y-%m-%d").to_string()));

        for (name, value) in self.measurement.attributes() {
            item = item.with(name, value);
        }

        item
    }
}
