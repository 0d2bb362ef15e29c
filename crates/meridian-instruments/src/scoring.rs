use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use meridian_core::models::score::Level;

use crate::gate::GatePolicy;
use crate::normalize::ScaleKind;

/// Defines the valid range for a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl ScoreRange {
    pub const fn new(min: f64, max: f64, step: Option<f64>) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f64) -> bool {
        if value < self.min || value > self.max {
            return false;
        }
        if let Some(step) = self.step {
            let offset = value - self.min;
            let remainder = offset % step;
            // Allow floating point tolerance
            remainder < 1e-9 || (step - remainder) < 1e-9
        } else {
            true
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Linearly map `value` from this range onto `target`.
    pub fn rescale(&self, value: f64, target: &ScoreRange) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            return target.min;
        }
        target.min + (value - self.min) / span * (target.max - target.min)
    }
}

/// One rung of a severity ladder: values at or above `from` get `level`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BandStep {
    pub from: f64,
    pub level: Level,
}

/// Ordered, lower-inclusive severity ladder.
///
/// Total over `f64`: anything below the first step (including NaN) maps to
/// `floor`, and a value equal to a boundary lands in the band that starts
/// there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BandTable {
    pub floor: Level,
    pub steps: Vec<BandStep>,
}

impl BandTable {
    pub fn new(floor: Level, steps: &[(f64, Level)]) -> Self {
        debug_assert!(
            steps.windows(2).all(|w| w[0].0 < w[1].0),
            "band steps must be strictly ascending"
        );
        Self {
            floor,
            steps: steps
                .iter()
                .map(|&(from, level)| BandStep { from, level })
                .collect(),
        }
    }

    pub fn classify(&self, value: f64) -> Level {
        self.steps
            .iter()
            .rev()
            .find(|step| value >= step.from)
            .map_or(self.floor, |step| step.level)
    }

    /// Five-level trait ladder for 1–5 means.
    pub fn trait_levels() -> Self {
        Self::new(
            Level::VeryLow,
            &[
                (1.5, Level::Low),
                (2.5, Level::Average),
                (3.5, Level::High),
                (4.5, Level::VeryHigh),
            ],
        )
    }
}

/// How a domain's headline score is formed from its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Aggregation {
    /// Sum of real item scores.
    Total,
    /// Mean of real item scores.
    Mean,
    /// Mean of the reportable subscale averages; item mean when none are.
    FacetMeans,
}

/// A subscale (facet) definition within a domain.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Subscale {
    pub id: String,
    pub name: String,
    pub gate: GatePolicy,
    pub description: Option<String>,
}

impl Subscale {
    pub fn new(id: &str, name: &str, gate: GatePolicy) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            gate,
            description: None,
        }
    }
}

/// A top-level domain within an instrument, containing subscales.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Domain {
    pub id: String,
    pub name: String,
    pub subscales: Vec<Subscale>,
    pub scale: ScaleKind,
    pub aggregation: Aggregation,
    pub bands: BandTable,
    /// Decimal places of the reported score.
    pub precision: u32,
    /// Number of items the full form carries.
    pub item_count: usize,
    pub gate: GatePolicy,
    pub description: Option<String>,
}

impl Domain {
    /// Upper bound of the reported score.
    pub fn scale_max(&self) -> f64 {
        let item_max = self.scale.canonical().max;
        match self.aggregation {
            Aggregation::Total => item_max * self.item_count as f64,
            Aggregation::Mean | Aggregation::FacetMeans => item_max,
        }
    }
}

/// Guard digits used to settle binary noise before the half-up decision.
const GUARD_DIGITS: u32 = 6;

/// Round half up (away from zero) to `precision` decimal places, deciding
/// ties on the decimal value: `4.065` rounds to `4.07` even though its
/// nearest `f64` sits just below the midpoint.
pub fn round_half_up(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let guard = 10i128.pow(GUARD_DIGITS);
    let scaled = (value.abs() * factor * guard as f64).round();
    // Beyond 2^53 the float has no fractional digits left to round.
    if !scaled.is_finite() || scaled > 9_007_199_254_740_992.0 {
        return value;
    }

    let scaled = scaled as i128;
    let mut units = scaled / guard;
    if scaled % guard >= guard / 2 {
        units += 1;
    }
    (units as f64 / factor).copysign(value)
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub question_id: String,
    pub value: f64,
    pub expected_range: ScoreRange,
    pub message: String,
}
