use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::gate::Gated;
use super::response::RespondentMetadata;
use super::score::{DomainScore, SubscaleScore};
use super::validity::{Reliability, Severity, ValidityAssessment};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubscaleResult {
    pub id: String,
    pub name: String,
    pub score: Gated<SubscaleScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DomainResult {
    pub id: String,
    pub name: String,
    pub score: Gated<DomainScore>,
    pub subscales: Vec<SubscaleResult>,
}

impl DomainResult {
    pub fn subscale(&self, id: &str) -> Option<&SubscaleResult> {
        self.subscales.iter().find(|s| s.id == id)
    }
}

/// Instrument-specific facts derived from gate-approved scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Finding {
    /// Number of symptom items endorsed at all.
    SymptomCount { count: usize },
    /// The instrument's documented positive-screen criteria were all met.
    PositiveScreen { criteria: Vec<String> },
    /// A single item whose endorsement warrants follow-up on its own.
    CriticalItem { question_id: String, value: f64 },
}

/// Scored output of one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InstrumentOutput {
    pub instrument_id: String,
    pub name: String,
    pub domains: Vec<DomainResult>,
    pub findings: Vec<Finding>,
}

impl InstrumentOutput {
    pub fn domain(&self, id: &str) -> Option<&DomainResult> {
        self.domains.iter().find(|d| d.id == id)
    }
}

/// An instrument whose scorer failed. Its output is absent from the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OmittedInstrument {
    pub instrument_id: String,
    pub reason: String,
}

/// Report-wide caveat attached at assembly time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum ReportCaveat {
    ValidityConcern { reliability: Reliability },
}

/// A cross-instrument alert. Message and recommendation are keys into the
/// presentation layer's text catalog, never prose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Alert {
    pub alert_type: String,
    pub severity: Severity,
    pub message_key: String,
    pub recommendation_key: String,
    /// Instrument id, or "validity".
    pub source: String,
}

/// The sole contract between the scoring core and its consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssembledReport {
    pub instruments: BTreeMap<String, InstrumentOutput>,
    pub omitted: Vec<OmittedInstrument>,
    pub validity: ValidityAssessment,
    pub caveats: Vec<ReportCaveat>,
    pub alerts: Vec<Alert>,
    pub metadata: RespondentMetadata,
    pub enrichments: BTreeMap<String, serde_json::Value>,
}
