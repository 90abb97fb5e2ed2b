//! Nepal AQI
//!
//! This crate converts air pollutant concentrations into the US EPA Air
//! Quality Index:
//! - Sub-indices for PM2.5, PM10, O₃, NO₂, SO₂ and CO by piecewise-linear
//!   interpolation over EPA breakpoints
//! - The overall index and its dominant pollutant
//! - Health-impact categories with labels and display colors
//!
//! Concentrations are in µg/m³, the unit the OpenWeather air pollution API
//! reports them in.
//!
//! # Example
//!
//! ```rust
//! use nepal_aqi::{compute_overall_aqi, Category, Pollutant, PollutantReading};
//!
//! let reading = PollutantReading::new()
//!     .with(Pollutant::Pm2_5, 35.4)
//!     .with(Pollutant::Pm10, 54.0);
//! let result = compute_overall_aqi(&reading).unwrap();
//!
//! assert_eq!(result.aqi(), Some(100));
//! assert_eq!(result.dominant_pollutant(), Some(Pollutant::Pm2_5));
//! assert_eq!(result.category(), Some(Category::Moderate));
//! ```

pub mod breakpoints;
pub mod category;
pub mod config;
pub mod engine;
pub mod error;
pub mod openweather;
pub mod pollutant;
pub mod reading;
pub mod series;

pub use category::{Category, categorize};
pub use config::{EngineConfig, NegativeConcentrationPolicy, UnsupportedPollutantPolicy};
pub use engine::AqiEngine;
pub use error::{AqiError, Result};
pub use pollutant::Pollutant;
pub use reading::{AqiReport, AqiResult, Contributor, PollutantReading, SubIndex};

/// Sub-index for a single pollutant with the default policies
///
/// # Arguments
///
/// * `pollutant` - Pollutant the concentration was measured for
/// * `concentration` - Concentration in µg/m³
///
/// # Example
///
/// ```rust
/// use nepal_aqi::{compute_sub_index, Pollutant};
///
/// let sub = compute_sub_index(Pollutant::Pm2_5, 12.0).unwrap();
/// assert_eq!(sub.value, 50);
/// ```
///
/// # Errors
///
/// * `AqiError::InvalidConcentration` - Negative or non-finite concentration
/// * `AqiError::UnsupportedPollutant` - Pollutant has no breakpoint table
pub fn compute_sub_index(pollutant: Pollutant, concentration: f64) -> Result<SubIndex> {
    AqiEngine::default().compute_sub_index(pollutant, concentration)
}

/// Overall index for a reading with the default policies
///
/// # Returns
///
/// * `Ok(AqiResult::Computed)` - At least one indexed pollutant was present
/// * `Ok(AqiResult::NoData)` - The reading had no indexed pollutant
/// * `Err(AqiError)` - A concentration failed validation
///
/// # Errors
///
/// * `AqiError::InvalidConcentration` - Negative or non-finite concentration
pub fn compute_overall_aqi(reading: &PollutantReading) -> Result<AqiResult> {
    AqiEngine::default().compute_overall_aqi(reading)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_good_boundary() {
        let result = compute_overall_aqi(&PollutantReading::new().with(Pollutant::Pm2_5, 12.0)).unwrap();
        assert_eq!(result.aqi(), Some(50));
        assert_eq!(result.label(), "Good");
    }

    #[test]
    fn test_moderate_boundary() {
        let result = compute_overall_aqi(&PollutantReading::new().with(Pollutant::Pm2_5, 12.1)).unwrap();
        assert_eq!(result.aqi(), Some(51));
        assert_eq!(result.label(), "Moderate");
    }

    #[test]
    fn test_empty_reading() {
        let result = compute_overall_aqi(&PollutantReading::new()).unwrap();
        assert_eq!(result, AqiResult::NoData);
        assert_eq!(result.label(), "No Data");
    }

    #[test]
    fn test_unsupported_pollutant() {
        assert!(matches!(
            compute_sub_index(Pollutant::No, 1.0),
            Err(AqiError::UnsupportedPollutant(_))
        ));
    }
}
