//! OpenWeather air pollution payload decoder
//!
//! Decodes the JSON returned by the current, forecast and history air
//! pollution endpoints:
//! <https://openweathermap.org/api/air-pollution>
//!
//! Only decoding lives here; fetching the payload is the caller's business.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AqiError, Result};
use crate::pollutant::Pollutant;
use crate::reading::PollutantReading;

/// OpenWeather's own 1 to 5 air quality scale
///
/// Reported next to the raw components. It is not an EPA index and is only
/// carried along for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OwmIndex {
    Good = 1,
    Fair = 2,
    Moderate = 3,
    Poor = 4,
    VeryPoor = 5,
}

impl OwmIndex {
    /// Create `OwmIndex` from the numeric value in the payload
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Good),
            2 => Some(Self::Fair),
            3 => Some(Self::Moderate),
            4 => Some(Self::Poor),
            5 => Some(Self::VeryPoor),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }
}

impl fmt::Display for OwmIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Location the payload was reported for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// One timestamped entry of the payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub owm_index: Option<OwmIndex>,
    pub reading: PollutantReading,
}

#[derive(Debug, Deserialize)]
struct AirPollutionResponse {
    coord: Option<Coord>,
    #[serde(default)]
    list: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    dt: i64,
    main: Option<RawMain>,
    #[serde(default)]
    components: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct RawMain {
    aqi: u8,
}

/// Decode an air pollution payload into observations
///
/// # Arguments
///
/// * `json` - Response body of an air pollution endpoint
///
/// # Returns
///
/// * `Ok(Vec<Observation>)` - One observation per `list` entry, in payload order
/// * `Err(AqiError)` - Decoding failed
///
/// Unknown component keys and `null` values are dropped. Values are not
/// validated here; the engine rejects negative or non-finite ones.
///
/// # Errors
///
/// * `AqiError::MalformedPayload` - Invalid JSON, missing fields, or a timestamp out of range
pub fn parse_response(json: &str) -> Result<Vec<Observation>> {
    parse_with_coord(json).map(|(_, observations)| observations)
}

/// Like [`parse_response`], also returning the reported location
///
/// # Errors
///
/// * `AqiError::MalformedPayload` - Invalid JSON, missing fields, or a timestamp out of range
pub fn parse_with_coord(json: &str) -> Result<(Option<Coord>, Vec<Observation>)> {
    let response: AirPollutionResponse = serde_json::from_str(json)?;
    let observations = response
        .list
        .into_iter()
        .map(into_observation)
        .collect::<Result<Vec<_>>>()?;
    Ok((response.coord, observations))
}

fn into_observation(entry: RawEntry) -> Result<Observation> {
    let timestamp = DateTime::from_timestamp(entry.dt, 0)
        .ok_or_else(|| AqiError::MalformedPayload(format!("timestamp out of range: {}", entry.dt)))?;

    let owm_index = entry.main.and_then(|main| {
        let index = OwmIndex::from_u8(main.aqi);
        if index.is_none() {
            tracing::debug!(aqi = main.aqi, "ignoring out-of-range OpenWeather index");
        }
        index
    });

    let reading = entry
        .components
        .into_iter()
        .filter_map(|(key, value)| {
            let pollutant = Pollutant::from_key(&key);
            if pollutant.is_none() {
                tracing::trace!(key = %key, "ignoring unknown component");
            }
            Some((pollutant?, value?))
        })
        .collect();

    Ok(Observation {
        timestamp,
        owm_index,
        reading,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_debug_snapshot;
    use rstest::rstest;

    const KATHMANDU: &str = r#"{
        "coord": {"lon": 85.3206, "lat": 27.7017},
        "list": [{
            "main": {"aqi": 4},
            "components": {
                "co": 647.571, "no": 0.1, "no2": 5.44, "o3": 70.81,
                "so2": 4.65, "pm2_5": 68.87, "pm10": 81.25, "nh3": 8.24
            },
            "dt": 1700000000
        }]
    }"#;

    #[test]
    fn parses_current_payload() {
        let (coord, observations) = parse_with_coord(KATHMANDU).unwrap();
        assert_eq!(
            coord,
            Some(Coord {
                lat: 27.7017,
                lon: 85.3206
            })
        );
        assert_eq!(observations.len(), 1);
        let obs = &observations[0];
        assert_eq!(obs.timestamp.to_rfc3339(), "2023-11-14T22:13:20+00:00");
        assert_eq!(obs.owm_index, Some(OwmIndex::Poor));
        assert_eq!(obs.reading.len(), 8);
        assert_eq!(obs.reading.get(Pollutant::Pm2_5), Some(68.87));
    }

    #[test]
    fn drops_unknown_and_null_components() {
        let json = r#"{"list": [{"dt": 1700003600, "main": {"aqi": 9},
            "components": {"pm10": 81.25, "pm2_5": 68.87, "pm1": 40.0, "o3": null}}]}"#;
        let observations = parse_response(json).unwrap();
        assert_debug_snapshot!(&observations[0], @r"
        Observation {
            timestamp: 2023-11-14T23:13:20Z,
            owm_index: None,
            reading: PollutantReading {
                concentrations: {
                    Pm10: 81.25,
                    Pm2_5: 68.87,
                },
            },
        }
        ");
    }

    #[test]
    fn empty_list_and_components() {
        assert!(parse_response(r#"{"coord": {"lon": 0, "lat": 0}, "list": []}"#).unwrap().is_empty());
        let observations = parse_response(r#"{"list": [{"dt": 0, "components": {}}]}"#).unwrap();
        assert!(observations[0].reading.is_empty());
    }

    #[test]
    fn negative_values_pass_through() {
        let observations =
            parse_response(r#"{"list": [{"dt": 0, "components": {"so2": -1.0}}]}"#).unwrap();
        assert_eq!(observations[0].reading.get(Pollutant::So2), Some(-1.0));
    }

    #[rstest]
    #[case("")]
    #[case("[]")]
    #[case(r#"{"list": [{"components": {}}]}"#)]
    #[case(r#"{"list": [{"dt": "yesterday", "components": {}}]}"#)]
    #[case(r#"{"list": [{"dt": 0, "components": {"pm10": "high"}}]}"#)]
    #[case(r#"{"list": [{"dt": 9223372036854775807, "components": {}}]}"#)]
    fn malformed_payloads(#[case] json: &str) {
        assert!(matches!(parse_response(json), Err(AqiError::MalformedPayload(_))));
    }

    #[rstest]
    #[case(1, Some(OwmIndex::Good))]
    #[case(5, Some(OwmIndex::VeryPoor))]
    #[case(0, None)]
    #[case(6, None)]
    fn owm_index_values(#[case] raw: u8, #[case] expected: Option<OwmIndex>) {
        assert_eq!(OwmIndex::from_u8(raw), expected);
    }
}
