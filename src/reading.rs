//! Pollutant readings and computed index results

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::{Category, NO_DATA_COLOR, NO_DATA_LABEL};
use crate::pollutant::Pollutant;

/// Concentrations for one place and time, in µg/m³
///
/// Built once from upstream data and read by the engine; there is no way to
/// change a concentration after construction other than building a new
/// reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PollutantReading {
    concentrations: BTreeMap<Pollutant, f64>,
}

impl PollutantReading {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a repeated pollutant keeps the last value
    #[must_use]
    pub fn with(mut self, pollutant: Pollutant, concentration: f64) -> Self {
        self.concentrations.insert(pollutant, concentration);
        self
    }

    #[must_use]
    pub fn get(&self, pollutant: Pollutant) -> Option<f64> {
        self.concentrations.get(&pollutant).copied()
    }

    /// Concentrations in pollutant key order
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        self.concentrations.iter().map(|(p, c)| (*p, *c))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.concentrations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concentrations.is_empty()
    }
}

impl FromIterator<(Pollutant, f64)> for PollutantReading {
    fn from_iter<I: IntoIterator<Item = (Pollutant, f64)>>(iter: I) -> Self {
        Self {
            concentrations: iter.into_iter().collect(),
        }
    }
}

/// Index computed for a single pollutant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubIndex {
    pub pollutant: Pollutant,
    pub value: u16,
    /// The concentration was above the table and the value was clamped
    pub saturated: bool,
}

/// What a sub-index in a report was computed for
///
/// Serialized as the bare key. Known pollutants sort before unlisted keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Contributor {
    Pollutant(Pollutant),
    /// Upstream key without a table of its own, scored on the fallback table
    Unlisted(String),
}

impl Contributor {
    #[must_use]
    pub fn pollutant(&self) -> Option<Pollutant> {
        match self {
            Self::Pollutant(pollutant) => Some(*pollutant),
            Self::Unlisted(_) => None,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Pollutant(pollutant) => pollutant.display_name(),
            Self::Unlisted(key) => key,
        }
    }
}

impl From<Pollutant> for Contributor {
    fn from(pollutant: Pollutant) -> Self {
        Self::Pollutant(pollutant)
    }
}

/// Overall index for a reading with at least one indexed pollutant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AqiReport {
    /// Maximum of `pollutant_aqis` and `fallback_aqis`
    pub aqi: u16,
    /// Lowest-sorted contributor whose sub-index equals `aqi`
    pub dominant_pollutant: Contributor,
    pub pollutant_aqis: BTreeMap<Pollutant, u16>,
    /// Unlisted upstream keys scored on the fallback table, kept apart from
    /// the pollutant whose table was borrowed
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fallback_aqis: BTreeMap<String, u16>,
    /// The dominant sub-index was clamped to the ceiling
    pub saturated: bool,
}

impl AqiReport {
    #[must_use]
    pub fn category(&self) -> Category {
        Category::from_index(self.aqi)
    }
}

/// Outcome of an overall index computation
///
/// `NoData` is kept apart from any numeric value so an empty reading can
/// never be rendered as good air.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AqiResult {
    /// The reading had no indexed pollutant
    NoData,
    Computed(AqiReport),
}

impl AqiResult {
    #[must_use]
    pub fn report(&self) -> Option<&AqiReport> {
        match self {
            Self::NoData => None,
            Self::Computed(report) => Some(report),
        }
    }

    #[must_use]
    pub fn aqi(&self) -> Option<u16> {
        self.report().map(|r| r.aqi)
    }

    /// Dominant pollutant, `None` for no data or when an unlisted key dominates
    #[must_use]
    pub fn dominant_pollutant(&self) -> Option<Pollutant> {
        self.dominant().and_then(Contributor::pollutant)
    }

    #[must_use]
    pub fn dominant(&self) -> Option<&Contributor> {
        self.report().map(|r| &r.dominant_pollutant)
    }

    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.report().map(AqiReport::category)
    }

    #[must_use]
    pub fn is_saturated(&self) -> bool {
        self.report().is_some_and(|r| r.saturated)
    }

    /// Category label, or "No Data"
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.category().map_or(NO_DATA_LABEL, |c| c.label())
    }

    /// Category color, or a neutral gray for no data
    #[must_use]
    pub fn color(&self) -> &'static str {
        self.category().map_or(NO_DATA_COLOR, |c| c.color())
    }
}

impl fmt::Display for AqiResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoData => f.write_str(NO_DATA_LABEL),
            Self::Computed(report) => {
                write!(
                    f,
                    "AQI {}{} ({}, {})",
                    report.aqi,
                    if report.saturated { "+" } else { "" },
                    report.category(),
                    report.dominant_pollutant.display_name()
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn report() -> AqiResult {
        AqiResult::Computed(AqiReport {
            aqi: 100,
            dominant_pollutant: Pollutant::Pm2_5.into(),
            pollutant_aqis: BTreeMap::from([(Pollutant::Pm2_5, 100), (Pollutant::Pm10, 50)]),
            fallback_aqis: BTreeMap::new(),
            saturated: false,
        })
    }

    #[test]
    fn reading_builder_and_iteration_order() {
        let reading = PollutantReading::new()
            .with(Pollutant::So2, 3.0)
            .with(Pollutant::Co, 200.0)
            .with(Pollutant::Pm2_5, 10.0)
            .with(Pollutant::Pm2_5, 12.0);
        assert_eq!(reading.len(), 3);
        assert_eq!(reading.get(Pollutant::Pm2_5), Some(12.0));
        assert_eq!(reading.get(Pollutant::O3), None);
        let keys: Vec<Pollutant> = reading.iter().map(|(p, _)| p).collect();
        assert_eq!(keys, vec![Pollutant::Co, Pollutant::Pm2_5, Pollutant::So2]);
    }

    #[test]
    fn reading_deserializes_from_components() {
        let reading: PollutantReading =
            serde_json::from_str(r#"{"pm2_5": 35.4, "pm10": 54.0, "nh3": 1.2}"#).unwrap();
        assert_eq!(reading.len(), 3);
        assert_eq!(reading.get(Pollutant::Nh3), Some(1.2));
    }

    #[test]
    fn no_data_accessors() {
        let result = AqiResult::NoData;
        assert_eq!(result.aqi(), None);
        assert_eq!(result.dominant_pollutant(), None);
        assert_eq!(result.category(), None);
        assert_eq!(result.label(), "No Data");
        assert_eq!(result.color(), NO_DATA_COLOR);
        assert!(!result.is_saturated());
        assert_eq!(result.to_string(), "No Data");
    }

    #[test]
    fn computed_accessors() {
        let result = report();
        assert_eq!(result.aqi(), Some(100));
        assert_eq!(result.dominant_pollutant(), Some(Pollutant::Pm2_5));
        assert_eq!(result.category(), Some(Category::Moderate));
        assert_eq!(result.label(), "Moderate");
        assert_eq!(result.color(), "#FFFF00");
        assert_eq!(result.to_string(), "AQI 100 (Moderate, PM2.5)");
    }

    #[test]
    fn computed_result_json() {
        assert_snapshot!(serde_json::to_string_pretty(&report()).unwrap(), @r#"
        {
          "status": "computed",
          "aqi": 100,
          "dominantPollutant": "pm2_5",
          "pollutantAqis": {
            "pm10": 50,
            "pm2_5": 100
          },
          "saturated": false
        }
        "#);
    }

    #[test]
    fn unlisted_contributor_json() {
        let result = AqiResult::Computed(AqiReport {
            aqi: 173,
            dominant_pollutant: Contributor::Unlisted("pm1".into()),
            pollutant_aqis: BTreeMap::from([(Pollutant::Pm10, 9)]),
            fallback_aqis: BTreeMap::from([("pm1".to_string(), 173)]),
            saturated: false,
        });
        assert_eq!(result.dominant_pollutant(), None);
        assert_eq!(result.dominant(), Some(&Contributor::Unlisted("pm1".into())));
        assert_eq!(result.to_string(), "AQI 173 (Unhealthy, pm1)");

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"status":"computed","aqi":173,"dominantPollutant":"pm1","pollutantAqis":{"pm10":9},"fallbackAqis":{"pm1":173},"saturated":false}"#
        );
        let back: AqiResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn contributors_sort_pollutants_first() {
        assert!(Contributor::from(Pollutant::So2) < Contributor::Unlisted("bc".into()));
        let back: Contributor = serde_json::from_str("\"pm2_5\"").unwrap();
        assert_eq!(back, Contributor::Pollutant(Pollutant::Pm2_5));
    }

    #[test]
    fn no_data_json() {
        let json = serde_json::to_string(&AqiResult::NoData).unwrap();
        assert_eq!(json, r#"{"status":"noData"}"#);
        let back: AqiResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AqiResult::NoData);
    }
}
