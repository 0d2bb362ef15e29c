use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// A raw answer as handed over by the survey collector.
///
/// Numbers, booleans and free text all arrive through the same field.
/// Numeric `0` is a real answer (e.g. a binary "No"), never "missing".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum RawValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One respondent answer. Immutable once handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Response {
    pub question_id: String,
    /// Instrument the item belongs to (e.g. "phq15").
    #[serde(default)]
    pub scale_tag: Option<String>,
    /// Facet or subscale within the instrument.
    #[serde(default)]
    pub subscale_tag: Option<String>,
    /// Domain or category within the instrument.
    #[serde(default)]
    pub domain_tag: Option<String>,
    #[serde(default)]
    pub value: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<jiff::Timestamp>,
}

impl Response {
    pub fn new(question_id: impl Into<String>, value: impl Into<RawValue>) -> Self {
        Self {
            question_id: question_id.into(),
            scale_tag: None,
            subscale_tag: None,
            domain_tag: None,
            value: Some(value.into()),
            response_time_ms: None,
            timestamp: None,
        }
    }

    /// A response whose answer is absent (skipped or null).
    pub fn unanswered(question_id: impl Into<String>) -> Self {
        Self {
            value: None,
            ..Self::new(question_id, false)
        }
    }

    pub fn with_scale(mut self, scale: impl Into<String>) -> Self {
        self.scale_tag = Some(scale.into());
        self
    }

    pub fn with_subscale(mut self, subscale: impl Into<String>) -> Self {
        self.subscale_tag = Some(subscale.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain_tag = Some(domain.into());
        self
    }

    pub fn in_scale(&self, scale: &str) -> bool {
        self.scale_tag.as_deref() == Some(scale)
    }
}

/// Metadata about the respondent. Consumed only by collaborators outside the
/// scoring core and carried through to the report untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RespondentMetadata {
    #[serde(default)]
    pub respondent_id: Option<Uuid>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// The full answer set for one assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResponseSet {
    pub responses: Vec<Response>,
    #[serde(default)]
    pub metadata: RespondentMetadata,
}

impl ResponseSet {
    pub fn new(responses: Vec<Response>) -> Self {
        Self {
            responses,
            metadata: RespondentMetadata::default(),
        }
    }

    /// Parse a response set from untrusted JSON and check its structure.
    pub fn from_json(value: serde_json::Value) -> Result<Self, CoreError> {
        let set: Self = serde_json::from_value(value)?;
        set.validate()?;
        Ok(set)
    }

    /// Structural checks only: every response has a question id, and ids are
    /// unique within their instrument. Answer content is never rejected here.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::new();
        for (index, response) in self.responses.iter().enumerate() {
            if response.question_id.trim().is_empty() {
                return Err(CoreError::EmptyQuestionId { index });
            }
            let scale = response.scale_tag.as_deref().unwrap_or_default();
            if !seen.insert((scale, response.question_id.as_str())) {
                return Err(CoreError::DuplicateQuestion {
                    scale: scale.to_string(),
                    question_id: response.question_id.clone(),
                });
            }
        }
        Ok(())
    }
}
