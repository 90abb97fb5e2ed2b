//! Health-impact categories for index values

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{AqiError, Result};

/// Label shown when no index could be computed
pub const NO_DATA_LABEL: &str = "No Data";

/// Neutral color shown when no index could be computed
pub const NO_DATA_COLOR: &str = "#9E9E9E";

/// EPA health-impact band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// 0 to 50
    Good,
    /// 51 to 100
    Moderate,
    /// 101 to 150
    UnhealthyForSensitiveGroups,
    /// 151 to 200
    Unhealthy,
    /// 201 to 300
    VeryUnhealthy,
    /// Above 300
    Hazardous,
}

impl Category {
    /// Every category, from least to most severe
    pub const ALL: [Self; 6] = [
        Self::Good,
        Self::Moderate,
        Self::UnhealthyForSensitiveGroups,
        Self::Unhealthy,
        Self::VeryUnhealthy,
        Self::Hazardous,
    ];

    /// Category for an integer index value
    #[must_use]
    pub fn from_index(aqi: u16) -> Self {
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitiveGroups,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    /// Integer index values belonging to this category
    ///
    /// `Hazardous` is open-ended; its range stops at `u16::MAX`.
    #[must_use]
    pub fn index_range(&self) -> RangeInclusive<u16> {
        match self {
            Self::Good => 0..=50,
            Self::Moderate => 51..=100,
            Self::UnhealthyForSensitiveGroups => 101..=150,
            Self::Unhealthy => 151..=200,
            Self::VeryUnhealthy => 201..=300,
            Self::Hazardous => 301..=u16::MAX,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// EPA display color as a hex string
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Good => "#00E400",
            Self::Moderate => "#FFFF00",
            Self::UnhealthyForSensitiveGroups => "#FF7E00",
            Self::Unhealthy => "#FF0000",
            Self::VeryUnhealthy => "#8F3F97",
            Self::Hazardous => "#7E0023",
        }
    }

    /// Health implication statement for the category
    #[must_use]
    pub fn health_message(&self) -> &'static str {
        match self {
            Self::Good => "Air quality is satisfactory, and air pollution poses little or no risk.",
            Self::Moderate => {
                "Air quality is acceptable. However, there may be a risk for some people, \
                 particularly those who are unusually sensitive to air pollution."
            }
            Self::UnhealthyForSensitiveGroups => {
                "Members of sensitive groups may experience health effects. \
                 The general public is less likely to be affected."
            }
            Self::Unhealthy => {
                "Some members of the general public may experience health effects; \
                 members of sensitive groups may experience more serious health effects."
            }
            Self::VeryUnhealthy => {
                "Health alert: The risk of health effects is increased for everyone."
            }
            Self::Hazardous => {
                "Health warning of emergency conditions: everyone is more likely to be affected."
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Categorize a real-valued index
///
/// Bands are closed on the right: `[0, 50]`, `(50, 100]`, `(100, 150]`,
/// `(150, 200]`, `(200, 300]` and `(300, ∞)`.
///
/// # Errors
///
/// * `AqiError::InvalidIndex` - `aqi` is negative or not finite
///
/// # Example
///
/// ```rust
/// use nepal_aqi::{categorize, Category};
///
/// assert_eq!(categorize(50.0).unwrap(), Category::Good);
/// assert_eq!(categorize(50.5).unwrap(), Category::Moderate);
/// assert!(categorize(-1.0).is_err());
/// ```
pub fn categorize(aqi: f64) -> Result<Category> {
    if !aqi.is_finite() || aqi < 0.0 {
        return Err(AqiError::InvalidIndex(aqi));
    }

    let category = if aqi <= 50.0 {
        Category::Good
    } else if aqi <= 100.0 {
        Category::Moderate
    } else if aqi <= 150.0 {
        Category::UnhealthyForSensitiveGroups
    } else if aqi <= 200.0 {
        Category::Unhealthy
    } else if aqi <= 300.0 {
        Category::VeryUnhealthy
    } else {
        Category::Hazardous
    };
    Ok(category)
}
