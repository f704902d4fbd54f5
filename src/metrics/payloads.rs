//! Typed views of the Web API responses.
//!
//! Only the fields used for normalization are declared, and every one of them is
//! optional: the API omits fields (or whole objects) on days without data. List
//! entries are kept as raw values so that only the first one is ever decoded.

use serde::Deserialize;
use serde_json::Value;

/// `GET /1/user/-/br/date/{date}.json`
#[derive(Debug, Default, Deserialize)]
pub struct BreathingRatePayload {
    #[serde(default)]
    pub br: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct BreathingRateEntry {
    pub value: Option<BreathingRateValue>,
}

/// The API reports `{"breathingRate": 17.8}`; a bare number is accepted as well.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum BreathingRateValue {
    Rate(f64),
    Summary {
        #[serde(rename = "breathingRate")]
        breathing_rate: f64,
    },
}

impl BreathingRateValue {
    #[must_use]
    pub const fn rate(self) -> f64 {
        match self {
            Self::Rate(rate) | Self::Summary { breathing_rate: rate } => rate,
        }
    }
}

/// `GET /1/user/-/foods/log/water/date/{date}.json`
#[derive(Debug, Default, Deserialize)]
pub struct WaterLogPayload {
    pub summary: Option<WaterSummary>,
}

#[derive(Debug, Deserialize)]
pub struct WaterSummary {
    pub water: Option<f64>,
}

/// `GET /1/user/-/temp/core/date/{date}.json`
#[derive(Debug, Default, Deserialize)]
pub struct CoreTempPayload {
    #[serde(rename = "tempCore", default)]
    pub temp_core: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct CoreTempEntry {
    pub value: Option<f64>,
}

/// `GET /1/user/-/spo2/date/{date}.json`
#[derive(Debug, Default, Deserialize)]
pub struct Spo2Payload {
    pub value: Option<Spo2Value>,
}

#[derive(Debug, Deserialize)]
pub struct Spo2Value {
    pub avg: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// `GET /1/user/-/ecg/list.json`
#[derive(Debug, Default, Deserialize)]
pub struct EcgPayload {
    #[serde(rename = "ecgReadings", default)]
    pub ecg_readings: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct EcgReading {
    #[serde(rename = "averageHeartRate")]
    pub average_heart_rate: Option<f64>,

    #[serde(rename = "resultClassification")]
    pub result_classification: Option<String>,
}
