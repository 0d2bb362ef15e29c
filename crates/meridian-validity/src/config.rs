use serde::{Deserialize, Serialize};
use ts_rs::TS;

use meridian_core::models::validity::Severity;

/// Two items worded to elicit opposite answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemPair {
    pub first: String,
    pub second: String,
}

impl ItemPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

/// Ratio cutoffs for one proportion-based scale. Both are strict (`>`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RatioThresholds {
    pub high: f64,
    pub moderate: f64,
}

impl RatioThresholds {
    pub fn severity(&self, ratio: f64) -> Option<Severity> {
        if ratio > self.high {
            Some(Severity::High)
        } else if ratio > self.moderate {
            Some(Severity::Moderate)
        } else {
            None
        }
    }
}

/// Designated validity items and cutoffs.
///
/// The defaults mirror the questionnaire's built-in validity block; they are
/// data, and deployments validating against published cutoffs override them
/// through the scoring config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ValidityConfig {
    pub inconsistency_pairs: Vec<ItemPair>,
    pub infrequency_items: Vec<String>,
    pub positive_impression_items: Vec<String>,
    pub inconsistency: RatioThresholds,
    pub infrequency: RatioThresholds,
    pub positive_impression: RatioThresholds,
    /// A pair is inconsistent when its scores differ by less than this.
    pub inconsistency_gap: f64,
    /// Score (1–5) at or above which an item counts as endorsed.
    pub endorsement: f64,
    /// Random responding is only assessed with at least this many answers.
    pub min_scorable_answers: usize,
    /// Standard deviation below which the answer pattern is "flat".
    pub flat_deviation: f64,
    /// Inconsistency ratio above which a flat pattern is called random.
    pub random_inconsistency: f64,
}

impl Default for ValidityConfig {
    fn default() -> Self {
        Self {
            inconsistency_pairs: (1..=10)
                .map(|n| ItemPair::new(format!("validity_inc_{n:02}a"), format!("validity_inc_{n:02}b")))
                .collect(),
            infrequency_items: (1..=8).map(|n| format!("validity_inf_{n:02}")).collect(),
            positive_impression_items: (1..=8).map(|n| format!("validity_pim_{n:02}")).collect(),
            inconsistency: RatioThresholds {
                high: 0.30,
                moderate: 0.20,
            },
            infrequency: RatioThresholds {
                high: 0.40,
                moderate: 0.25,
            },
            positive_impression: RatioThresholds {
                high: 0.50,
                moderate: 0.375,
            },
            inconsistency_gap: 2.0,
            endorsement: 4.0,
            min_scorable_answers: 10,
            flat_deviation: 0.5,
            random_inconsistency: 0.30,
        }
    }
}
