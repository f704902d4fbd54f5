use chrono::NaiveDate;
use strum::{Display, EnumIter, IntoStaticStr};

/// The health metrics collected on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Display, IntoStaticStr)]
pub enum MetricKind {
    #[strum(serialize = "breathing_rate")]
    BreathingRate,

    #[strum(serialize = "water_log")]
    WaterLog,

    #[strum(serialize = "core_temp")]
    CoreTemp,

    #[strum(serialize = "spo2_log")]
    Spo2Log,

    #[strum(serialize = "ecg_log")]
    EcgLog,
}

impl MetricKind {
    /// The `DataType` tag stored with every record of this kind
    #[must_use]
    pub const fn data_type(self) -> &'static str {
        match self {
            Self::BreathingRate => "breathingRate",
            Self::WaterLog => "waterLog",
            Self::CoreTemp => "coreTemp",
            Self::Spo2Log => "spO2",
            Self::EcgLog => "ecgLog",
        }
    }

    /// Path of the Web API resource for this metric, relative to the API base URL.
    ///
    /// Daily resources are requested for `date`; the ECG list is paged backwards from it.
    #[must_use]
    pub fn resource_path(self, user_id: &str, date: NaiveDate, ecg_page_size: u32) -> String {
        match self {
            Self::BreathingRate => format!("/1/user/{user_id}/br/date/{date}.json"),
            Self::WaterLog => format!("/1/user/{user_id}/foods/log/water/date/{date}.json"),
            Self::CoreTemp => format!("/1/user/{user_id}/temp/core/date/{date}.json"),
            Self::Spo2Log => format!("/1/user/{user_id}/spo2/date/{date}.json"),
            Self::EcgLog => format!("/1/user/{user_id}/ecg/list.json?beforeDate={date}&sort=desc&limit={ecg_page_size}&offset=0"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_display_names() {
        let names: Vec<String> = MetricKind::iter().map(|k| k.to_string()).collect();
        assert_eq!(names, ["breathing_rate", "water_log", "core_temp", "spo2_log", "ecg_log"]);
    }

    #[test]
    fn test_data_types() {
        let tags: Vec<&str> = MetricKind::iter().map(MetricKind::data_type).collect();
        assert_eq!(tags, ["breathingRate", "waterLog", "coreTemp", "spO2", "ecgLog"]);
    }

    #[test]
    fn test_daily_resource_paths() {
        assert_eq!(MetricKind::BreathingRate.resource_path("-", date(), 10), "/1/user/-/br/date/2024-03-09.json");
        assert_eq!(
            MetricKind::WaterLog.resource_path("-", date(), 10),
            "/1/user/-/foods/log/water/date/2024-03-09.json"
        );
        assert_eq!(MetricKind::CoreTemp.resource_path("-", date(), 10), "/1/user/-/temp/core/date/2024-03-09.json");
        assert_eq!(MetricKind::Spo2Log.resource_path("ABC123", date(), 10), "/1/user/ABC123/spo2/date/2024-03-09.json");
    }

    #[test]
    fn test_ecg_resource_path_is_paged() {
        assert_eq!(
            MetricKind::EcgLog.resource_path("-", date(), 10),
            "/1/user/-/ecg/list.json?beforeDate=2024-03-09&sort=desc&limit=10&offset=0"
        );
        assert!(MetricKind::EcgLog.resource_path("-", date(), 3).contains("limit=3"));
    }

    #[test]
    fn test_static_str() {
        let name: &'static str = MetricKind::Spo2Log.into();
        assert_eq!(name, "spo2_log");
    }
}
