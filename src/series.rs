//! Index series for charts
//!
//! Turns a run of observations (forecast or history) into per-timestamp
//! results and simple summaries of them.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::engine::AqiEngine;
use crate::error::Result;
use crate::openweather::Observation;
use crate::reading::AqiResult;

/// Index result at one point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub result: AqiResult,
}

/// Compute the overall index for every observation
///
/// # Errors
///
/// * `AqiError::InvalidConcentration` - Any observation holds an invalid value
pub fn aqi_series(engine: &AqiEngine, observations: &[Observation]) -> Result<Vec<SeriesPoint>> {
    observations
        .iter()
        .map(|obs| {
            Ok(SeriesPoint {
                timestamp: obs.timestamp,
                result: engine.compute_overall_aqi(&obs.reading)?,
            })
        })
        .collect()
}

/// Point with the highest index; the earliest one wins a tie
///
/// Points without data never count as a peak.
#[must_use]
pub fn peak(points: &[SeriesPoint]) -> Option<&SeriesPoint> {
    points
        .iter()
        .filter_map(|p| p.result.aqi().map(|aqi| (aqi, p)))
        .max_by_key(|(aqi, p)| (*aqi, Reverse(p.timestamp)))
        .map(|(_, p)| p)
}

/// Highest index per UTC calendar day
///
/// Days where every point is `NoData` are left out.
#[must_use]
pub fn daily_max(points: &[SeriesPoint]) -> BTreeMap<NaiveDate, u16> {
    let mut days = BTreeMap::new();
    for point in points {
        let Some(aqi) = point.result.aqi() else {
            continue;
        };
        days.entry(point.timestamp.date_naive())
            .and_modify(|max: &mut u16| *max = (*max).max(aqi))
            .or_insert(aqi);
    }
    days
}
