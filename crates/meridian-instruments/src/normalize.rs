//! Response normalization.
//!
//! Turns one heterogeneous raw answer into a number on its instrument's
//! canonical scale. Never fails: unrecognized input becomes the scale's
//! neutral default, marked [`Provenance::Defaulted`] so it is never counted
//! as data.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use meridian_core::models::response::{RawValue, Response};
use meridian_core::models::score::{Provenance, ScoredItem};

use crate::scoring::ScoreRange;

/// Answer scales used by the supported instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScaleKind {
    /// No = 0, Yes = 1.
    Binary,
    /// PHQ-15 somatic items: not bothered (0) to bothered a lot (2).
    Phq15,
    /// PHQ-9 / GAD-7 frequency over two weeks: not at all (0) to nearly every day (3).
    PhqDays,
    /// Five-point agreement or frequency Likert, 1–5.
    Likert5,
    /// MDQ functional impairment: no problem (0) to serious problem (3).
    Impairment,
    /// Five-point answer positions rescaled onto 0–100. Numeric answers are
    /// already percentages (slider input).
    Percent,
}

impl ScaleKind {
    /// Range of answer positions a respondent picks from.
    pub fn answer_range(self) -> ScoreRange {
        match self {
            Self::Binary => ScoreRange::new(0.0, 1.0, Some(1.0)),
            Self::Phq15 => ScoreRange::new(0.0, 2.0, Some(1.0)),
            Self::PhqDays | Self::Impairment => ScoreRange::new(0.0, 3.0, Some(1.0)),
            Self::Likert5 | Self::Percent => ScoreRange::new(1.0, 5.0, Some(1.0)),
        }
    }

    /// Range scores are reported on.
    pub fn canonical(self) -> ScoreRange {
        match self {
            Self::Percent => ScoreRange::new(0.0, 100.0, None),
            other => other.answer_range(),
        }
    }

    pub fn neutral(self) -> f64 {
        self.canonical().midpoint()
    }

    /// Answer position for a categorical label, if the scale knows it.
    pub fn label_position(self, label: &str) -> Option<f64> {
        let label = canonical_label(label);
        let position = match self {
            Self::Binary => match label.as_str() {
                "no" | "n" | "false" => 0.0,
                "yes" | "y" | "true" => 1.0,
                _ => return None,
            },
            Self::Phq15 => match label.as_str() {
                "not bothered" | "not bothered at all" => 0.0,
                "bothered a little" => 1.0,
                "bothered a lot" => 2.0,
                _ => return None,
            },
            Self::PhqDays => match label.as_str() {
                "not at all" => 0.0,
                "several days" => 1.0,
                "more than half the days" => 2.0,
                "nearly every day" => 3.0,
                _ => return None,
            },
            Self::Impairment => match label.as_str() {
                "no problem" => 0.0,
                "minor problem" => 1.0,
                "moderate problem" => 2.0,
                "serious problem" => 3.0,
                _ => return None,
            },
            Self::Likert5 | Self::Percent => match label.as_str() {
                "strongly disagree" | "never" => 1.0,
                "disagree" | "rarely" => 2.0,
                "neutral" | "neither agree nor disagree" | "sometimes" => 3.0,
                "agree" | "often" => 4.0,
                "strongly agree" | "very often" | "always" => 5.0,
                _ => return None,
            },
        };
        Some(position)
    }
}

fn canonical_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Normalize one response onto `scale`.
pub fn normalize(response: &Response, scale: ScaleKind) -> ScoredItem {
    let (value, provenance) = normalize_value(response.value.as_ref(), scale);
    ScoredItem {
        question_id: response.question_id.clone(),
        subscale_tag: response.subscale_tag.clone(),
        domain_tag: response.domain_tag.clone(),
        value,
        provenance,
    }
}

/// Precedence: numeric, numeral text, boolean, label, neutral default.
pub fn normalize_value(raw: Option<&RawValue>, scale: ScaleKind) -> (f64, Provenance) {
    let answers = scale.answer_range();
    let canonical = scale.canonical();

    match raw {
        Some(RawValue::Number(n)) if n.is_finite() => (*n, Provenance::Numeric),
        Some(RawValue::Text(text)) => {
            if let Ok(position) = text.trim().parse::<f64>()
                && position.is_finite()
            {
                if answers.contains(position) {
                    return (
                        answers.rescale(position, &canonical),
                        Provenance::ParsedText,
                    );
                }
                return (scale.neutral(), Provenance::Defaulted);
            }
            match scale.label_position(text) {
                Some(position) => (answers.rescale(position, &canonical), Provenance::Label),
                None => (scale.neutral(), Provenance::Defaulted),
            }
        }
        Some(RawValue::Bool(true)) => (canonical.max, Provenance::Boolean),
        Some(RawValue::Bool(false)) => (canonical.min, Provenance::Boolean),
        Some(RawValue::Number(_)) | None => (scale.neutral(), Provenance::Defaulted),
    }
}

/// Numeric view of a raw answer without any scale: numbers and numeral
/// text only.
pub fn numeric_answer(raw: Option<&RawValue>) -> Option<f64> {
    match raw {
        Some(RawValue::Number(n)) if n.is_finite() => Some(*n),
        Some(RawValue::Text(text)) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}
