//! Engine configuration
//!
//! The engine has two caller-selectable policies. Both default to rejecting
//! the input, so a misconfigured caller sees an error instead of a plausible
//! looking index.
//!
//! ```toml
//! negative-concentrations = "clamp-to-zero"
//! unsupported-pollutants = { fallback = "pm2_5" }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AqiError, Result};
use crate::pollutant::Pollutant;

/// What to do with a concentration below zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NegativeConcentrationPolicy {
    /// Return `AqiError::InvalidConcentration`
    #[default]
    Reject,
    /// Treat the value as 0
    ClampToZero,
}

/// What to do with a pollutant that has no breakpoint table
///
/// Applies to unknown upstream keys and to display-only pollutants passed
/// to `compute_sub_index` directly. Display-only pollutants inside a
/// reading are skipped by the aggregate operations unless `Fallback` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnsupportedPollutantPolicy {
    /// Return `AqiError::UnsupportedPollutant`
    #[default]
    Reject,
    /// Leave the pollutant out of aggregate results
    Skip,
    /// Evaluate the pollutant against another pollutant's table
    Fallback(Pollutant),
}

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    pub negative_concentrations: NegativeConcentrationPolicy,
    pub unsupported_pollutants: UnsupportedPollutantPolicy,
}

impl EngineConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// * `AqiError::InvalidConfig` - Malformed TOML or an invalid fallback table
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    ///
    /// * `AqiError::InvalidConfig` - The file cannot be read or is invalid
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AqiError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Check that a fallback, if any, points at an indexed pollutant
    ///
    /// # Errors
    ///
    /// * `AqiError::InvalidConfig` - Fallback pollutant has no breakpoint table
    pub fn validate(&self) -> Result<()> {
        if let UnsupportedPollutantPolicy::Fallback(target) = self.unsupported_pollutants
            && !target.is_indexed()
        {
            return Err(AqiError::InvalidConfig(format!(
                "fallback pollutant {target} has no breakpoint table"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_document_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.negative_concentrations, NegativeConcentrationPolicy::Reject);
        assert_eq!(config.unsupported_pollutants, UnsupportedPollutantPolicy::Reject);
    }

    #[rstest]
    #[case(
        "negative-concentrations = \"clamp-to-zero\"",
        NegativeConcentrationPolicy::ClampToZero,
        UnsupportedPollutantPolicy::Reject
    )]
    #[case(
        "unsupported-pollutants = \"skip\"",
        NegativeConcentrationPolicy::Reject,
        UnsupportedPollutantPolicy::Skip
    )]
    #[case(
        "unsupported-pollutants = { fallback = \"pm2_5\" }",
        NegativeConcentrationPolicy::Reject,
        UnsupportedPollutantPolicy::Fallback(Pollutant::Pm2_5)
    )]
    fn parses_policies(
        #[case] doc: &str,
        #[case] negative: NegativeConcentrationPolicy,
        #[case] unsupported: UnsupportedPollutantPolicy,
    ) {
        let config = EngineConfig::from_toml_str(doc).unwrap();
        assert_eq!(config.negative_concentrations, negative);
        assert_eq!(config.unsupported_pollutants, unsupported);
    }

    #[rstest]
    #[case("negative-concentrations = \"ignore\"")]
    #[case("unsupported-pollutants = { fallback = \"benzene\" }")]
    #[case("unsupported-pollutants = { fallback = \"nh3\" }")]
    #[case("negative-concentrations = ")]
    fn rejects_invalid_documents(#[case] doc: &str) {
        assert!(matches!(
            EngineConfig::from_toml_str(doc),
            Err(AqiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = EngineConfig::from_file("/nonexistent/nepal-aqi.toml").unwrap_err();
        assert!(matches!(err, AqiError::InvalidConfig(msg) if msg.contains("nepal-aqi.toml")));
    }
}
