use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Severity shared by validity flags and report alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Severity {
    Moderate,
    High,
    Critical,
}

/// Overall trustworthiness of a response pattern, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Reliability {
    Good,
    Acceptable,
    Caution,
    Questionable,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValidityScale {
    Inconsistency,
    Infrequency,
    PositiveImpression,
    RandomResponding,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidityFlag {
    pub scale: ValidityScale,
    pub severity: Severity,
    /// The ratio (or standard deviation, for random responding) that tripped the flag.
    pub value: f64,
}

/// One proportion-based validity signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValiditySignal {
    pub ratio: f64,
    /// Items (or pairs) that hit the criterion.
    pub hits: usize,
    /// Items (or pairs) that were answered.
    pub answered: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RandomResponding {
    pub flagged: bool,
    pub standard_deviation: f64,
    pub scorable_answers: usize,
}

/// Advisory validity metadata for one full response set.
///
/// A signal is `None` when none of its designated items were answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidityAssessment {
    pub inconsistency: Option<ValiditySignal>,
    pub infrequency: Option<ValiditySignal>,
    pub positive_impression: Option<ValiditySignal>,
    pub random_responding: Option<RandomResponding>,
    pub reliability: Reliability,
    pub flags: Vec<ValidityFlag>,
}
