//! Error types for the AQI engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, AqiError>;

/// Errors that can occur while computing an air quality index
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AqiError {
    /// Concentration is negative (under the rejecting policy) or not finite
    #[error("Invalid concentration for {pollutant}: {value}")]
    InvalidConcentration { pollutant: String, value: f64 },

    /// Pollutant key has no breakpoint table
    #[error("Unsupported pollutant: {0}")]
    UnsupportedPollutant(String),

    /// Index value handed to categorization is negative or not finite
    #[error("Invalid AQI value: {0}")]
    InvalidIndex(f64),

    /// Engine configuration could not be parsed or is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Upstream air pollution payload could not be decoded
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl AqiError {
    /// Create a new `InvalidConcentration` error
    #[must_use]
    pub fn invalid_concentration(pollutant: impl Into<String>, value: f64) -> Self {
        Self::InvalidConcentration {
            pollutant: pollutant.into(),
            value,
        }
    }

    /// Create a new `UnsupportedPollutant` error
    #[must_use]
    pub fn unsupported(key: impl Into<String>) -> Self {
        Self::UnsupportedPollutant(key.into())
    }
}

impl From<toml::de::Error> for AqiError {
    fn from(err: toml::de::Error) -> Self {
        Self::InvalidConfig(err.message().to_string())
    }
}

impl From<serde_json::Error> for AqiError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AqiError::invalid_concentration("pm2_5", -1.5);
        assert_eq!(err.to_string(), "Invalid concentration for pm2_5: -1.5");

        let err = AqiError::unsupported("benzene");
        assert_eq!(err.to_string(), "Unsupported pollutant: benzene");

        let err = AqiError::InvalidIndex(f64::NAN);
        assert_eq!(err.to_string(), "Invalid AQI value: NaN");
    }

    #[test]
    fn test_error_equality() {
        let err1 = AqiError::unsupported("nh3");
        let err2 = AqiError::unsupported("nh3");
        let err3 = AqiError::unsupported("no");

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(AqiError::from(err), AqiError::MalformedPayload(_)));
    }
}
