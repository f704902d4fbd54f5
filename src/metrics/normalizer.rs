use super::payloads::{
    BreathingRateEntry, BreathingRatePayload, CoreTempEntry, CoreTempPayload, EcgPayload, EcgReading, Spo2Payload, WaterLogPayload,
};
use super::{Measurement, MetricKind, NormalizedRecord, RawMetricBundle};
use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::IntoEnumIterator;

const LOG_TARGET: &str = " normalize";

/// Result of normalizing one metric.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// The payload held every required field.
    Record(NormalizedRecord),

    /// No record for this metric, with the reason.
    Absent(String),
}

impl Normalized {
    #[must_use]
    pub fn into_record(self) -> Option<NormalizedRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Absent(_) => None,
        }
    }
}

/// Normalize the bundle's entry for `kind`.
#[must_use]
pub fn normalize(kind: MetricKind, bundle: &RawMetricBundle, timestamp: NaiveDate) -> Normalized {
    let Some(payload) = bundle.get(kind) else {
        return if bundle.failure(kind).is_some() {
            Normalized::Absent("fetch failed".to_string())
        } else {
            Normalized::Absent("no payload".to_string())
        };
    };

    let measurement = match kind {
        MetricKind::BreathingRate => breathing_rate(payload),
        MetricKind::WaterLog => water_log(payload),
        MetricKind::CoreTemp => core_temp(payload),
        MetricKind::Spo2Log => spo2(payload),
        MetricKind::EcgLog => ecg(payload),
    };

    match measurement {
        Ok(measurement) => Normalized::Record(NormalizedRecord::new(timestamp, measurement)),
        Err(reason) => Normalized::Absent(reason),
    }
}

/// Normalize every metric, logging the ones without data.
#[must_use]
pub fn normalize_all(bundle: &RawMetricBundle, timestamp: NaiveDate) -> Vec<Normalized> {
    MetricKind::iter()
        .map(|kind| {
            let normalized = normalize(kind, bundle, timestamp);
            if let Normalized::Absent(reason) = &normalized {
                log::warn!(target: LOG_TARGET, "No {kind} data for {timestamp}: {reason}");
            }
            normalized
        })
        .collect()
}

type Extracted = core::result::Result<Measurement, String>;

fn decode<'a, T: Deserialize<'a>>(payload: &'a Value) -> core::result::Result<T, String> {
    T::deserialize(payload).map_err(|e| format!("unexpected payload shape: {e}"))
}

/// Decode the first entry of a list; later entries are never looked at.
fn first_entry<T: DeserializeOwned>(entries: &[Value], list: &str) -> core::result::Result<T, String> {
    let entry = entries.first().ok_or_else(|| format!("'{list}' is missing or empty"))?;
    T::deserialize(entry).map_err(|e| format!("unexpected '{list}[0]' shape: {e}"))
}

fn breathing_rate(payload: &Value) -> Extracted {
    let payload: BreathingRatePayload = decode(payload)?;
    let entry: BreathingRateEntry = first_entry(&payload.br, "br")?;
    let value = entry.value.ok_or("'br[0].value' is missing")?;

    Ok(Measurement::BreathingRate {
        breathing_rate: value.rate(),
    })
}

fn water_log(payload: &Value) -> Extracted {
    let payload: WaterLogPayload = decode(payload)?;
    let water = payload
        .summary
        .and_then(|summary| summary.water)
        .ok_or("'summary.water' is missing")?;

    Ok(Measurement::WaterLog { water_log: water })
}

fn core_temp(payload: &Value) -> Extracted {
    let payload: CoreTempPayload = decode(payload)?;
    let entry: CoreTempEntry = first_entry(&payload.temp_core, "tempCore")?;
    let temperature = entry.value.ok_or("'tempCore[0].value' is missing")?;

    Ok(Measurement::CoreTemp { temperature })
}

fn spo2(payload: &Value) -> Extracted {
    let payload: Spo2Payload = decode(payload)?;
    let value = payload.value.ok_or("'value' is missing")?;

    match (value.avg, value.min, value.max) {
        (Some(average), Some(min), Some(max)) => Ok(Measurement::Spo2 { average, min, max }),
        _ => Err("'value' lacks one of 'avg', 'min', 'max'".to_string()),
    }
}

fn ecg(payload: &Value) -> Extracted {
    let payload: EcgPayload = decode(payload)?;
    let reading: EcgReading = first_entry(&payload.ecg_readings, "ecgReadings")?;

    match (reading.average_heart_rate, reading.result_classification) {
        (Some(average_heart_rate), Some(result_classification)) => Ok(Measurement::Ecg {
            average_heart_rate,
            result_classification,
        }),
        _ => Err("'ecgReadings[0]' lacks 'averageHeartRate' or 'resultClassification'".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ohno::app_err;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn single(kind: MetricKind, payload: Value) -> Normalized {
        normalize(kind, &RawMetricBundle::new().with(kind, payload), date())
    }

    fn assert_absent(normalized: &Normalized) {
        assert!(matches!(normalized, Normalized::Absent(_)), "expected Absent, got {normalized:?}");
    }

    #[test]
    fn test_water_log_present() {
        let normalized = single(MetricKind::WaterLog, json!({"summary": {"water": 1234.5}}));
        assert_eq!(
            normalized,
            Normalized::Record(NormalizedRecord::new(date(), Measurement::WaterLog { water_log: 1234.5 }))
        );

        let item = normalized.into_record().unwrap().to_item();
        assert_eq!(item.string("DataType"), Some("waterLog"));
        assert_eq!(item.string("timestamp"), Some("2024-03-09"));
        assert_eq!(item.number("water_log"), Some(1234.5));
    }

    #[test]
    fn test_water_log_absent() {
        assert_absent(&single(MetricKind::WaterLog, json!({"summary": {}})));
        assert_absent(&single(MetricKind::WaterLog, json!({})));
        assert_absent(&single(MetricKind::WaterLog, json!({"summary": null})));
    }

    #[test]
    fn test_breathing_rate_present() {
        let normalized = single(MetricKind::BreathingRate, json!({"br": [{"value": {"breathingRate": 16.4}, "dateTime": "2024-03-09"}]}));
        assert_eq!(
            normalized.into_record().unwrap().measurement,
            Measurement::BreathingRate { breathing_rate: 16.4 }
        );
    }

    #[test]
    fn test_breathing_rate_uses_first_entry() {
        let normalized = single(MetricKind::BreathingRate, json!({"br": [{"value": 14.0}, {"value": 18.0}]}));
        assert_eq!(
            normalized.into_record().unwrap().measurement,
            Measurement::BreathingRate { breathing_rate: 14.0 }
        );
    }

    #[test]
    fn test_breathing_rate_ignores_malformed_later_entry() {
        let normalized = single(
            MetricKind::BreathingRate,
            json!({"br": [{"value": {"breathingRate": 16.2}}, {"value": {"breathingRate": null}}]}),
        );
        assert_eq!(
            normalized.into_record().unwrap().measurement,
            Measurement::BreathingRate { breathing_rate: 16.2 }
        );
    }

    #[test]
    fn test_breathing_rate_absent() {
        assert_absent(&single(MetricKind::BreathingRate, json!({"br": []})));
        assert_absent(&single(MetricKind::BreathingRate, json!({})));
        assert_absent(&single(MetricKind::BreathingRate, json!({"br": [{"dateTime": "2024-03-09"}]})));
    }

    #[test]
    fn test_core_temp_present() {
        let normalized = single(MetricKind::CoreTemp, json!({"tempCore": [{"dateTime": "2024-03-09T10:00:00", "value": 37.25}]}));
        assert_eq!(
            normalized.into_record().unwrap().measurement,
            Measurement::CoreTemp { temperature: 37.25 }
        );
    }

    #[test]
    fn test_core_temp_ignores_malformed_later_entry() {
        let normalized = single(MetricKind::CoreTemp, json!({"tempCore": [{"value": 37.1}, {"value": "37.2"}]}));
        assert_eq!(
            normalized.into_record().unwrap().measurement,
            Measurement::CoreTemp { temperature: 37.1 }
        );
    }

    #[test]
    fn test_core_temp_absent() {
        assert_absent(&single(MetricKind::CoreTemp, json!({"tempCore": []})));
        assert_absent(&single(MetricKind::CoreTemp, json!({"tempSkin": []})));
    }

    #[test]
    fn test_spo2_present() {
        let normalized = single(MetricKind::Spo2Log, json!({"dateTime": "2024-03-09", "value": {"avg": 96.1, "min": 93.2, "max": 99.9}}));
        let record = normalized.into_record().unwrap();
        assert_eq!(record.data_type(), "spO2");
        assert_eq!(
            record.measurement,
            Measurement::Spo2 {
                average: 96.1,
                min: 93.2,
                max: 99.9
            }
        );
    }

    #[test]
    fn test_spo2_absent() {
        assert_absent(&single(MetricKind::Spo2Log, json!({})));
        assert_absent(&single(MetricKind::Spo2Log, json!([])));
        assert_absent(&single(MetricKind::Spo2Log, json!({"value": {"avg": 96.1}})));
    }

    #[test]
    fn test_ecg_present() {
        let normalized = single(
            MetricKind::EcgLog,
            json!({"ecgReadings": [
                {"averageHeartRate": 72, "resultClassification": "Normal Sinus Rhythm"},
                {"averageHeartRate": 90, "resultClassification": "Atrial Fibrillation"}
            ]}),
        );
        assert_eq!(
            normalized.into_record().unwrap().measurement,
            Measurement::Ecg {
                average_heart_rate: 72.0,
                result_classification: "Normal Sinus Rhythm".to_string(),
            }
        );
    }

    #[test]
    fn test_ecg_ignores_malformed_later_reading() {
        let normalized = single(
            MetricKind::EcgLog,
            json!({"ecgReadings": [
                {"averageHeartRate": 68, "resultClassification": "Normal Sinus Rhythm"},
                {"averageHeartRate": "n/a", "resultClassification": "Inconclusive"}
            ]}),
        );
        assert_eq!(
            normalized.into_record().unwrap().measurement,
            Measurement::Ecg {
                average_heart_rate: 68.0,
                result_classification: "Normal Sinus Rhythm".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_first_entry_is_absent() {
        assert_absent(&single(MetricKind::CoreTemp, json!({"tempCore": [{"value": "37.2"}, {"value": 37.1}]})));
        assert_absent(&single(MetricKind::EcgLog, json!({"ecgReadings": [{"averageHeartRate": "n/a"}]})));
    }

    #[test]
    fn test_ecg_absent() {
        assert_absent(&single(MetricKind::EcgLog, json!({"ecgReadings": []})));
        assert_absent(&single(MetricKind::EcgLog, json!({"pagination": {}})));
        assert_absent(&single(MetricKind::EcgLog, json!({"ecgReadings": [{"averageHeartRate": 72}]})));
    }

    #[test]
    fn test_non_object_payload_is_absent() {
        assert_absent(&single(MetricKind::WaterLog, json!("oops")));
        assert_absent(&single(MetricKind::CoreTemp, json!({"tempCore": "oops"})));
    }

    #[test]
    fn test_missing_payload_is_absent() {
        assert_eq!(
            normalize(MetricKind::CoreTemp, &RawMetricBundle::new(), date()),
            Normalized::Absent("no payload".to_string())
        );
    }

    #[test]
    fn test_failed_fetch_is_absent() {
        let mut bundle = RawMetricBundle::new();
        bundle.insert_failure(MetricKind::EcgLog, app_err!("HTTP 500"));
        assert_eq!(
            normalize(MetricKind::EcgLog, &bundle, date()),
            Normalized::Absent("fetch failed".to_string())
        );
    }

    #[test]
    fn test_normalize_all_shares_timestamp() {
        let bundle = RawMetricBundle::new()
            .with(MetricKind::BreathingRate, json!({"br": [{"value": {"breathingRate": 15.0}}]}))
            .with(MetricKind::WaterLog, json!({"summary": {}}))
            .with(MetricKind::Spo2Log, json!({"value": {"avg": 97.0, "min": 95.0, "max": 99.0}}));

        let normalized = normalize_all(&bundle, date());
        assert_eq!(normalized.len(), 5);

        let records: Vec<NormalizedRecord> = normalized.into_iter().filter_map(Normalized::into_record).collect();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.timestamp == date()));
        assert_eq!(records[0].data_type(), "breathingRate");
        assert_eq!(records[1].data_type(), "spO2");
    }
}
