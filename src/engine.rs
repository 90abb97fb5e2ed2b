//! AQI computation
//!
//! Converts concentrations into EPA sub-indices with piecewise-linear
//! interpolation, and combines sub-indices into an overall index by taking
//! the maximum.
//!
//! Concentrations above the highest segment of a table are clamped to 500
//! and the resulting [`SubIndex`] is marked `saturated`. This is the only
//! above-range behavior; every table follows it.

use std::collections::BTreeMap;

use crate::breakpoints::{self, BreakpointTable};
use crate::config::{EngineConfig, NegativeConcentrationPolicy, UnsupportedPollutantPolicy};
use crate::error::{AqiError, Result};
use crate::pollutant::Pollutant;
use crate::reading::{AqiReport, AqiResult, Contributor, PollutantReading, SubIndex};

/// Stateless AQI calculator
///
/// Holds only its policies, so it is `Copy` and can be shared freely
/// between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AqiEngine {
    config: EngineConfig,
}

impl AqiEngine {
    /// Create an engine with the given policies
    ///
    /// # Errors
    ///
    /// * `AqiError::InvalidConfig` - Fallback pollutant has no breakpoint table
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Sub-index for a single pollutant
    ///
    /// # Arguments
    ///
    /// * `pollutant` - Pollutant the concentration was measured for
    /// * `concentration` - Concentration in µg/m³
    ///
    /// # Returns
    ///
    /// * `Ok(SubIndex)` - Index value in `0..=500`
    /// * `Err(AqiError)` - Validation failed
    ///
    /// # Example
    ///
    /// ```rust
    /// use nepal_aqi::{AqiEngine, Pollutant};
    ///
    /// let engine = AqiEngine::default();
    /// let sub = engine.compute_sub_index(Pollutant::Pm2_5, 12.1).unwrap();
    /// assert_eq!(sub.value, 51);
    /// ```
    ///
    /// # Errors
    ///
    /// * `AqiError::InvalidConcentration` - Non-finite value, or negative under the rejecting policy
    /// * `AqiError::UnsupportedPollutant` - Display-only pollutant without a fallback
    pub fn compute_sub_index(&self, pollutant: Pollutant, concentration: f64) -> Result<SubIndex> {
        let table = self.table_for(pollutant)?;
        self.evaluate(pollutant, table, concentration)
    }

    /// Overall index for a reading
    ///
    /// Display-only pollutants are left out unless a fallback table is
    /// configured. A reading without any indexed pollutant yields
    /// `AqiResult::NoData`.
    ///
    /// # Errors
    ///
    /// * `AqiError::InvalidConcentration` - Any concentration fails validation
    pub fn compute_overall_aqi(&self, reading: &PollutantReading) -> Result<AqiResult> {
        Ok(combine(&self.sub_indices(reading)?, &[]))
    }

    /// Overall index for upstream `(key, concentration)` pairs
    ///
    /// Unknown keys follow the unsupported-pollutant policy: rejected,
    /// skipped, or scored against the fallback table. Fallback-scored keys
    /// are reported under their own key in `fallback_aqis` and never replace
    /// the reading of the pollutant whose table they borrow. Known keys
    /// behave as in [`compute_overall_aqi`](Self::compute_overall_aqi).
    ///
    /// # Errors
    ///
    /// * `AqiError::UnsupportedPollutant` - Unknown key under the rejecting policy
    /// * `AqiError::InvalidConcentration` - Any concentration fails validation
    pub fn compute_from_components<'a, I>(&self, components: I) -> Result<AqiResult>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut known = Vec::new();
        let mut fallbacks = Vec::new();
        for (key, concentration) in components {
            if let Some(pollutant) = Pollutant::from_key(key) {
                known.push((pollutant, concentration));
                continue;
            }
            match self.config.unsupported_pollutants {
                UnsupportedPollutantPolicy::Reject => return Err(AqiError::unsupported(key)),
                UnsupportedPollutantPolicy::Skip => {
                    tracing::debug!(key, "skipping unknown pollutant");
                }
                UnsupportedPollutantPolicy::Fallback(target) => {
                    tracing::warn!(key, fallback = %target, "using fallback breakpoints for unknown pollutant");
                    fallbacks.push((key, target, concentration));
                }
            }
        }

        let reading: PollutantReading = known.into_iter().collect();
        let sub_indices = self.sub_indices(&reading)?;
        let mut unlisted = Vec::with_capacity(fallbacks.len());
        for (key, target, concentration) in fallbacks {
            unlisted.push((key, self.evaluate_unlisted(key, target, concentration)?));
        }
        Ok(combine(&sub_indices, &unlisted))
    }

    fn sub_indices(&self, reading: &PollutantReading) -> Result<Vec<SubIndex>> {
        let mut sub_indices = Vec::with_capacity(reading.len());
        for (pollutant, concentration) in reading.iter() {
            let Some(table) = self.aggregate_table_for(pollutant) else {
                tracing::trace!(%pollutant, "display-only pollutant left out of index");
                continue;
            };
            sub_indices.push(self.evaluate(pollutant, table, concentration)?);
        }
        Ok(sub_indices)
    }

    /// Table used by single-value operations
    fn table_for(&self, pollutant: Pollutant) -> Result<&'static BreakpointTable> {
        if let Some(table) = breakpoints::table(pollutant) {
            return Ok(table);
        }
        match self.config.unsupported_pollutants {
            UnsupportedPollutantPolicy::Fallback(target) => {
                tracing::warn!(%pollutant, fallback = %target, "using fallback breakpoints");
                breakpoints::table(target).ok_or_else(|| AqiError::unsupported(target.key()))
            }
            UnsupportedPollutantPolicy::Reject | UnsupportedPollutantPolicy::Skip => {
                Err(AqiError::unsupported(pollutant.key()))
            }
        }
    }

    /// Table used by aggregate operations, `None` when the pollutant is left out
    fn aggregate_table_for(&self, pollutant: Pollutant) -> Option<&'static BreakpointTable> {
        match (breakpoints::table(pollutant), self.config.unsupported_pollutants) {
            (Some(table), _) => Some(table),
            (None, UnsupportedPollutantPolicy::Fallback(target)) => {
                tracing::warn!(%pollutant, fallback = %target, "using fallback breakpoints");
                breakpoints::table(target)
            }
            (None, _) => None,
        }
    }

    fn evaluate(
        &self,
        pollutant: Pollutant,
        table: &BreakpointTable,
        concentration: f64,
    ) -> Result<SubIndex> {
        let concentration = self.validate(pollutant.key(), concentration)?;
        let (value, saturated) = table.evaluate(concentration);
        if saturated {
            tracing::debug!(
                %pollutant,
                concentration,
                ceiling = table.ceiling(),
                "concentration above breakpoint table, clamping index"
            );
        }
        tracing::trace!(%pollutant, concentration, value, "sub-index");
        Ok(SubIndex {
            pollutant,
            value,
            saturated,
        })
    }

    /// Score an unknown upstream key on `target`'s table
    ///
    /// The returned index carries `target`, the table it was scored on; the
    /// caller keeps it keyed by `key`.
    fn evaluate_unlisted(&self, key: &str, target: Pollutant, concentration: f64) -> Result<SubIndex> {
        let table = breakpoints::table(target).ok_or_else(|| AqiError::unsupported(target.key()))?;
        let concentration = self.validate(key, concentration)?;
        let (value, saturated) = table.evaluate(concentration);
        tracing::trace!(key, fallback = %target, concentration, value, "fallback sub-index");
        Ok(SubIndex {
            pollutant: target,
            value,
            saturated,
        })
    }

    fn validate(&self, key: &str, concentration: f64) -> Result<f64> {
        if !concentration.is_finite() {
            return Err(AqiError::invalid_concentration(key, concentration));
        }
        if concentration < 0.0 {
            return match self.config.negative_concentrations {
                NegativeConcentrationPolicy::Reject => {
                    Err(AqiError::invalid_concentration(key, concentration))
                }
                NegativeConcentrationPolicy::ClampToZero => Ok(0.0),
            };
        }
        Ok(concentration)
    }
}

/// Take the maximum sub-index; ties go to the lowest-sorted contributor
///
/// `unlisted` holds fallback-scored upstream keys, reported apart from the
/// pollutants in `sub_indices`.
fn combine(sub_indices: &[SubIndex], unlisted: &[(&str, SubIndex)]) -> AqiResult {
    let mut pollutant_aqis = BTreeMap::new();
    for sub in sub_indices {
        let entry = pollutant_aqis.entry(sub.pollutant).or_insert(sub.value);
        *entry = (*entry).max(sub.value);
    }
    let mut fallback_aqis = BTreeMap::new();
    for (key, sub) in unlisted {
        let entry = fallback_aqis.entry((*key).to_owned()).or_insert(sub.value);
        *entry = (*entry).max(sub.value);
    }

    let contributions = sub_indices
        .iter()
        .map(|sub| (Contributor::Pollutant(sub.pollutant), *sub))
        .chain(unlisted.iter().map(|(key, sub)| (Contributor::Unlisted((*key).to_owned()), *sub)));

    let mut dominant: Option<(Contributor, SubIndex)> = None;
    for (contributor, sub) in contributions {
        let replace = match &dominant {
            None => true,
            Some((current, best)) => {
                sub.value > best.value || (sub.value == best.value && contributor < *current)
            }
        };
        if replace {
            dominant = Some((contributor, sub));
        }
    }

    match dominant {
        None => AqiResult::NoData,
        Some((contributor, sub)) => AqiResult::Computed(AqiReport {
            aqi: sub.value,
            dominant_pollutant: contributor,
            pollutant_aqis,
            fallback_aqis,
            saturated: sub.saturated,
        }),
    }
}
