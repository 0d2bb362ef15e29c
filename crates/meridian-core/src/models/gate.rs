use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Marker attached to a reportable score backed by thin data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Caveat {
    LowConfidence,
}

/// Item counts behind a gating decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Evidence {
    pub real_items: usize,
    pub defaulted_items: usize,
    pub minimum: usize,
    pub comfortable: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConfidenceRecord {
    pub reportable: bool,
    pub caveat: Option<Caveat>,
    pub evidence: Evidence,
}

/// A score behind the data-sufficiency gate.
///
/// A value only exists in the `Reported` variant, so consumers can trust
/// that any number they see was approved by the gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum Gated<T> {
    Reported {
        value: T,
        confidence: ConfidenceRecord,
    },
    Insufficient {
        confidence: ConfidenceRecord,
    },
}

impl<T> Gated<T> {
    pub fn reported(value: T, evidence: Evidence, caveat: Option<Caveat>) -> Self {
        Self::Reported {
            value,
            confidence: ConfidenceRecord {
                reportable: true,
                caveat,
                evidence,
            },
        }
    }

    pub fn insufficient(evidence: Evidence) -> Self {
        Self::Insufficient {
            confidence: ConfidenceRecord {
                reportable: false,
                caveat: None,
                evidence,
            },
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Reported { value, .. } => Some(value),
            Self::Insufficient { .. } => None,
        }
    }

    pub fn confidence(&self) -> &ConfidenceRecord {
        match self {
            Self::Reported { confidence, .. } | Self::Insufficient { confidence } => confidence,
        }
    }

    pub fn is_reportable(&self) -> bool {
        matches!(self, Self::Reported { .. })
    }

    /// Withdraw a reported value, keeping its evidence.
    pub fn suppress(self) -> Self {
        let evidence = self.confidence().evidence;
        Self::insufficient(evidence)
    }
}
