//! Pollutant identifiers
//!
//! Keys match the `components` object of the OpenWeather air pollution API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AqiError, Result};

/// Pollutants reported by the upstream air pollution source
///
/// Variants are declared in the lexical order of their keys, so the derived
/// `Ord` sorts the same way the keys do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    /// Carbon monoxide
    #[serde(rename = "co")]
    Co,
    /// Ammonia (display only)
    #[serde(rename = "nh3")]
    Nh3,
    /// Nitrogen monoxide (display only)
    #[serde(rename = "no")]
    No,
    /// Nitrogen dioxide
    #[serde(rename = "no2")]
    No2,
    /// Ozone
    #[serde(rename = "o3")]
    O3,
    /// Coarse particulate matter
    #[serde(rename = "pm10")]
    Pm10,
    /// Fine particulate matter
    #[serde(rename = "pm2_5")]
    Pm2_5,
    /// Sulphur dioxide
    #[serde(rename = "so2")]
    So2,
}

impl Pollutant {
    /// Every known pollutant, in key order
    pub const ALL: [Self; 8] = [
        Self::Co,
        Self::Nh3,
        Self::No,
        Self::No2,
        Self::O3,
        Self::Pm10,
        Self::Pm2_5,
        Self::So2,
    ];

    /// Pollutants that have a breakpoint table
    pub const INDEXED: [Self; 6] = [
        Self::Co,
        Self::No2,
        Self::O3,
        Self::Pm10,
        Self::Pm2_5,
        Self::So2,
    ];

    /// Create `Pollutant` from its upstream key
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "co" => Some(Self::Co),
            "nh3" => Some(Self::Nh3),
            "no" => Some(Self::No),
            "no2" => Some(Self::No2),
            "o3" => Some(Self::O3),
            "pm10" => Some(Self::Pm10),
            "pm2_5" => Some(Self::Pm2_5),
            "so2" => Some(Self::So2),
            _ => None,
        }
    }

    /// Upstream key for this pollutant
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Co => "co",
            Self::Nh3 => "nh3",
            Self::No => "no",
            Self::No2 => "no2",
            Self::O3 => "o3",
            Self::Pm10 => "pm10",
            Self::Pm2_5 => "pm2_5",
            Self::So2 => "so2",
        }
    }

    /// Human-readable name, for chart legends and marker tooltips
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Co => "CO",
            Self::Nh3 => "NH₃",
            Self::No => "NO",
            Self::No2 => "NO₂",
            Self::O3 => "O₃",
            Self::Pm10 => "PM10",
            Self::Pm2_5 => "PM2.5",
            Self::So2 => "SO₂",
        }
    }

    /// Whether this pollutant contributes to the index
    #[must_use]
    pub fn is_indexed(&self) -> bool {
        !matches!(self, Self::Nh3 | Self::No)
    }

    /// Molecular weight in g/mol, `None` for particulate matter
    ///
    /// Also used to convert the ppb/ppm breakpoint tables to µg/m³.
    #[must_use]
    pub const fn molecular_weight(&self) -> Option<f64> {
        match self {
            Self::Co => Some(28.01),
            Self::Nh3 => Some(17.03),
            Self::No => Some(30.01),
            Self::No2 => Some(46.01),
            Self::O3 => Some(48.00),
            Self::So2 => Some(64.07),
            Self::Pm10 | Self::Pm2_5 => None,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Pollutant {
    type Err = AqiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_key(s.trim()).ok_or_else(|| AqiError::unsupported(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("co", Pollutant::Co)]
    #[case("nh3", Pollutant::Nh3)]
    #[case("no", Pollutant::No)]
    #[case("no2", Pollutant::No2)]
    #[case("o3", Pollutant::O3)]
    #[case("pm10", Pollutant::Pm10)]
    #[case("pm2_5", Pollutant::Pm2_5)]
    #[case("so2", Pollutant::So2)]
    fn key_round_trip(#[case] key: &str, #[case] expected: Pollutant) {
        assert_eq!(key.parse::<Pollutant>().unwrap(), expected);
        assert_eq!(expected.key(), key);
        assert_eq!(expected.to_string(), key);
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert_eq!(
            "pm1".parse::<Pollutant>(),
            Err(AqiError::UnsupportedPollutant("pm1".into()))
        );
        assert_eq!(Pollutant::from_key("PM2_5"), None);
    }

    #[test]
    fn ordering_follows_keys() {
        let mut keys: Vec<&str> = Pollutant::ALL.iter().map(Pollutant::key).collect();
        keys.sort_unstable();
        let ordered: Vec<&str> = Pollutant::ALL.iter().map(Pollutant::key).collect();
        assert_eq!(keys, ordered);
        assert!(Pollutant::Pm10 < Pollutant::Pm2_5);
    }

    #[test]
    fn display_only_pollutants() {
        assert!(!Pollutant::No.is_indexed());
        assert!(!Pollutant::Nh3.is_indexed());
        assert!(Pollutant::INDEXED.iter().all(Pollutant::is_indexed));
        assert_eq!(Pollutant::Pm2_5.molecular_weight(), None);
    }

    #[test]
    fn serde_uses_upstream_keys() {
        let json = serde_json::to_string(&Pollutant::Pm2_5).unwrap();
        assert_eq!(json, "\"pm2_5\"");
        let back: Pollutant = serde_json::from_str("\"so2\"").unwrap();
        assert_eq!(back, Pollutant::So2);
    }
}
