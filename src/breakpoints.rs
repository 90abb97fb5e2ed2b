//! US EPA breakpoint tables
//!
//! One authoritative table per indexed pollutant. Constants are written in
//! the unit the EPA publishes them in and converted to µg/m³ at compile time,
//! so every table is compared against concentrations in the unit the
//! upstream API delivers.
//!
//! Sources:
//! <https://www.airnow.gov/sites/default/files/2020-05/aqi-technical-assistance-document-sept2018.pdf>

use serde::Serialize;

use crate::pollutant::Pollutant;

/// Molar volume of an ideal gas at 25 °C and 1 atm, in litres
pub const MOLAR_VOLUME: f64 = 24.45;

/// Highest index value any table can produce
pub const AQI_CEILING: u16 = 500;

/// Index range shared by every table, one entry per segment
const INDEX_BANDS: [(u16, u16); 7] = [
    (0, 50),
    (51, 100),
    (101, 150),
    (151, 200),
    (201, 300),
    (301, 400),
    (401, 500),
];

/// Concentration unit a table was published in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    /// µg/m³
    MicrogramsPerCubicMetre,
    /// ppb
    PartsPerBillion,
    /// ppm
    PartsPerMillion,
}

impl Unit {
    /// Convert `value` in this unit to µg/m³ for a gas of molecular weight `mw`
    ///
    /// `mw` is ignored for values already in µg/m³.
    #[must_use]
    pub const fn to_micrograms(self, value: f64, mw: f64) -> f64 {
        match self {
            Self::MicrogramsPerCubicMetre => value,
            Self::PartsPerBillion => value * mw / MOLAR_VOLUME,
            Self::PartsPerMillion => value * 1000.0 * mw / MOLAR_VOLUME,
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::MicrogramsPerCubicMetre => "µg/m³",
            Self::PartsPerBillion => "ppb",
            Self::PartsPerMillion => "ppm",
        }
    }
}

/// One linear segment of a piecewise conversion, concentrations in µg/m³
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakpoint {
    pub c_low: f64,
    pub c_high: f64,
    pub i_low: u16,
    pub i_high: u16,
}

impl Breakpoint {
    const EMPTY: Self = Self {
        c_low: 0.0,
        c_high: 0.0,
        i_low: 0,
        i_high: 0,
    };

    /// Whether `concentration` lies inside `[c_low, c_high]`
    #[must_use]
    pub fn contains(&self, concentration: f64) -> bool {
        self.c_low <= concentration && concentration <= self.c_high
    }

    /// Linear interpolation of `concentration` onto this segment's index range
    ///
    /// The result is rounded half away from zero and kept inside
    /// `[i_low, i_high]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn interpolate(&self, concentration: f64) -> u16 {
        let slope = f64::from(self.i_high - self.i_low) / (self.c_high - self.c_low);
        let index = slope * (concentration - self.c_low) + f64::from(self.i_low);
        index
            .round()
            .clamp(f64::from(self.i_low), f64::from(self.i_high)) as u16
    }
}

/// Where a concentration falls within a table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// Inside a segment
    Within(&'a Breakpoint),
    /// Between the `c_high` of this segment and the `c_low` of the next one
    Gap(&'a Breakpoint),
    /// Above the last segment
    Above(&'a Breakpoint),
}

/// Breakpoint table for a single pollutant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreakpointTable {
    pub pollutant: Pollutant,
    /// Unit the EPA constants were published in
    pub native_unit: Unit,
    /// Averaging period the EPA table is defined for
    pub averaging: &'static str,
    pub segments: &'static [Breakpoint],
}

impl BreakpointTable {
    /// Find the segment for `concentration`, scanning from the lowest segment
    ///
    /// The first segment whose `c_high` is not below the concentration wins,
    /// so a value on a shared boundary belongs to the lower segment and a
    /// value in the gap between two segments is attributed to the lower one.
    #[must_use]
    pub fn lookup(&self, concentration: f64) -> Lookup<'_> {
        for (idx, segment) in self.segments.iter().enumerate() {
            if concentration <= segment.c_high {
                if concentration >= segment.c_low {
                    return Lookup::Within(segment);
                }
                return match idx.checked_sub(1) {
                    Some(prev) => Lookup::Gap(&self.segments[prev]),
                    None => Lookup::Within(segment),
                };
            }
        }
        Lookup::Above(self.last())
    }

    /// Index for `concentration` and whether it was clamped to the ceiling
    #[must_use]
    pub fn evaluate(&self, concentration: f64) -> (u16, bool) {
        match self.lookup(concentration) {
            Lookup::Within(segment) => (segment.interpolate(concentration), false),
            Lookup::Gap(segment) => (segment.i_high, false),
            Lookup::Above(segment) => (segment.i_high, true),
        }
    }

    /// Upper concentration bound of the table, in µg/m³
    #[must_use]
    pub fn ceiling(&self) -> f64 {
        self.last().c_high
    }

    fn last(&self) -> &Breakpoint {
        // Tables are static and never empty.
        &self.segments[self.segments.len() - 1]
    }
}

/// Pair native concentration bounds with the shared index bands and convert
/// them to µg/m³ with the molecular weight of `pollutant`.
const fn convert(native: [(f64, f64); 7], unit: Unit, pollutant: Pollutant) -> [Breakpoint; 7] {
    let mw = match pollutant.molecular_weight() {
        Some(mw) => mw,
        None => 0.0,
    };
    let mut out = [Breakpoint::EMPTY; 7];
    let mut i = 0;
    while i < native.len() {
        out[i] = Breakpoint {
            c_low: unit.to_micrograms(native[i].0, mw),
            c_high: unit.to_micrograms(native[i].1, mw),
            i_low: INDEX_BANDS[i].0,
            i_high: INDEX_BANDS[i].1,
        };
        i += 1;
    }
    out
}

static PM2_5_SEGMENTS: [Breakpoint; 7] = convert(
    [
        (0.0, 12.0),
        (12.1, 35.4),
        (35.5, 55.4),
        (55.5, 150.4),
        (150.5, 250.4),
        (250.5, 350.4),
        (350.5, 500.4),
    ],
    Unit::MicrogramsPerCubicMetre,
    Pollutant::Pm2_5,
);

static PM10_SEGMENTS: [Breakpoint; 7] = convert(
    [
        (0.0, 54.0),
        (55.0, 154.0),
        (155.0, 254.0),
        (255.0, 354.0),
        (355.0, 424.0),
        (425.0, 504.0),
        (505.0, 604.0),
    ],
    Unit::MicrogramsPerCubicMetre,
    Pollutant::Pm10,
);

// 8-hour ozone up to 200 ppb, 1-hour ozone from 405 ppb. The 1-hour
// 205-404 ppb row shares the 201-300 band with the 8-hour 106-200 row, so
// 200-405 ppb is a gap and reads as 300.
static O3_SEGMENTS: [Breakpoint; 7] = convert(
    [
        (0.0, 54.0),
        (55.0, 70.0),
        (71.0, 85.0),
        (86.0, 105.0),
        (106.0, 200.0),
        (405.0, 504.0),
        (505.0, 604.0),
    ],
    Unit::PartsPerBillion,
    Pollutant::O3,
);

static NO2_SEGMENTS: [Breakpoint; 7] = convert(
    [
        (0.0, 53.0),
        (54.0, 100.0),
        (101.0, 360.0),
        (361.0, 649.0),
        (650.0, 1249.0),
        (1250.0, 1649.0),
        (1650.0, 2049.0),
    ],
    Unit::PartsPerBillion,
    Pollutant::No2,
);

static SO2_SEGMENTS: [Breakpoint; 7] = convert(
    [
        (0.0, 35.0),
        (36.0, 75.0),
        (76.0, 185.0),
        (186.0, 304.0),
        (305.0, 604.0),
        (605.0, 804.0),
        (805.0, 1004.0),
    ],
    Unit::PartsPerBillion,
    Pollutant::So2,
);

static CO_SEGMENTS: [Breakpoint; 7] = convert(
    [
        (0.0, 4.4),
        (4.5, 9.4),
        (9.5, 12.4),
        (12.5, 15.4),
        (15.5, 30.4),
        (30.5, 40.4),
        (40.5, 50.4),
    ],
    Unit::PartsPerMillion,
    Pollutant::Co,
);

static PM2_5: BreakpointTable = BreakpointTable {
    pollutant: Pollutant::Pm2_5,
    native_unit: Unit::MicrogramsPerCubicMetre,
    averaging: "24-hour",
    segments: &PM2_5_SEGMENTS,
};

static PM10: BreakpointTable = BreakpointTable {
    pollutant: Pollutant::Pm10,
    native_unit: Unit::MicrogramsPerCubicMetre,
    averaging: "24-hour",
    segments: &PM10_SEGMENTS,
};

static O3: BreakpointTable = BreakpointTable {
    pollutant: Pollutant::O3,
    native_unit: Unit::PartsPerBillion,
    averaging: "8-hour / 1-hour",
    segments: &O3_SEGMENTS,
};

static NO2: BreakpointTable = BreakpointTable {
    pollutant: Pollutant::No2,
    native_unit: Unit::PartsPerBillion,
    averaging: "1-hour",
    segments: &NO2_SEGMENTS,
};

static SO2: BreakpointTable = BreakpointTable {
    pollutant: Pollutant::So2,
    native_unit: Unit::PartsPerBillion,
    averaging: "1-hour / 24-hour",
    segments: &SO2_SEGMENTS,
};

static CO: BreakpointTable = BreakpointTable {
    pollutant: Pollutant::Co,
    native_unit: Unit::PartsPerMillion,
    averaging: "8-hour",
    segments: &CO_SEGMENTS,
};

/// Breakpoint table for `pollutant`, `None` for display-only pollutants
#[must_use]
pub fn table(pollutant: Pollutant) -> Option<&'static BreakpointTable> {
    match pollutant {
        Pollutant::Pm2_5 => Some(&PM2_5),
        Pollutant::Pm10 => Some(&PM10),
        Pollutant::O3 => Some(&O3),
        Pollutant::No2 => Some(&NO2),
        Pollutant::So2 => Some(&SO2),
        Pollutant::Co => Some(&CO),
        Pollutant::No | Pollutant::Nh3 => None,
    }
}
