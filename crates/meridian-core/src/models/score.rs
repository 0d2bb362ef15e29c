use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// How a raw answer became a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Provenance {
    /// Numeric answer, taken as-is.
    Numeric,
    /// Numeral sent as text, parsed and rescaled.
    ParsedText,
    Boolean,
    /// Categorical label resolved through the scale's lookup table.
    Label,
    /// Unrecognized or absent answer replaced by the scale's neutral default.
    /// Never counts as data present.
    Defaulted,
}

/// A response after normalization onto its instrument's canonical scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoredItem {
    pub question_id: String,
    pub subscale_tag: Option<String>,
    pub domain_tag: Option<String>,
    pub value: f64,
    pub provenance: Provenance,
}

impl ScoredItem {
    pub fn is_defaulted(&self) -> bool {
        self.provenance == Provenance::Defaulted
    }
}

/// Aggregate over a group of scored items.
///
/// `average` is `None` when no real (non-defaulted) item contributed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScaleSummary {
    pub total: f64,
    pub count: usize,
    pub defaulted: usize,
    pub average: Option<f64>,
}

impl ScaleSummary {
    pub const EMPTY: Self = Self {
        total: 0.0,
        count: 0,
        defaulted: 0,
        average: None,
    };

    pub fn has_data(&self) -> bool {
        self.count > 0
    }
}

/// Severity or trait level label. Each instrument uses its own subset
/// through its band table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Level {
    Minimal,
    VeryLow,
    Low,
    Mild,
    Medium,
    Average,
    Moderate,
    ModeratelySevere,
    High,
    Severe,
    VeryHigh,
}

/// Which computation produced a domain score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "path", rename_all = "snake_case")]
#[ts(export)]
pub enum Derivation {
    /// Sum of item scores.
    ItemTotal,
    /// Mean of item scores.
    ItemMean,
    /// Mean of facet averages.
    FacetMeans { facets_used: usize },
    /// Facet data absent; mean of domain-tagged items.
    RawItems,
    /// Facet and item data absent; value supplied by an external source.
    External { source: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DomainScore {
    pub score: f64,
    pub scale_max: f64,
    pub level: Level,
    pub derivation: Derivation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubscaleScore {
    pub total: f64,
    pub average: f64,
    pub level: Level,
}
