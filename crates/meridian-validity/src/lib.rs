//! meridian-validity
//!
//! Validity scales for a full response set: inconsistency, infrequency,
//! positive impression and random responding. The result is advisory
//! metadata; it never changes any instrument score.

pub mod config;
pub mod reliability;

use std::collections::HashMap;

use meridian_core::models::response::Response;
use meridian_core::models::score::Provenance;
use meridian_core::models::validity::{
    RandomResponding, Severity, ValidityAssessment, ValidityFlag, ValidityScale, ValiditySignal,
};
use meridian_instruments::normalize::{normalize_value, numeric_answer, ScaleKind};

use config::ValidityConfig;

/// Computes a [`ValidityAssessment`] from designated item sets.
#[derive(Debug, Clone, Default)]
pub struct ValidityCalculator {
    config: ValidityConfig,
}

impl ValidityCalculator {
    pub fn new(config: ValidityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidityConfig {
        &self.config
    }

    pub fn assess(&self, responses: &[Response]) -> ValidityAssessment {
        let index = LikertIndex::new(responses);

        let inconsistency = self.inconsistency(&index);
        let infrequency = endorsement_signal(&index, &self.config.infrequency_items, self.config.endorsement);
        let positive_impression =
            endorsement_signal(&index, &self.config.positive_impression_items, self.config.endorsement);
        let random_responding = self.random_responding(responses, inconsistency.as_ref());

        let mut flags = Vec::new();
        let mut flag = |scale: ValidityScale, thresholds: &config::RatioThresholds, signal: &Option<ValiditySignal>| {
            if let Some(signal) = signal
                && let Some(severity) = thresholds.severity(signal.ratio)
            {
                flags.push(ValidityFlag {
                    scale,
                    severity,
                    value: signal.ratio,
                });
            }
        };
        flag(ValidityScale::Inconsistency, &self.config.inconsistency, &inconsistency);
        flag(ValidityScale::Infrequency, &self.config.infrequency, &infrequency);
        flag(
            ValidityScale::PositiveImpression,
            &self.config.positive_impression,
            &positive_impression,
        );
        if let Some(random) = random_responding.filter(|r| r.flagged) {
            flags.push(ValidityFlag {
                scale: ValidityScale::RandomResponding,
                severity: Severity::Critical,
                value: random.standard_deviation,
            });
        }

        let reliability = reliability::classify(flags.iter().map(|f| f.severity));
        tracing::debug!(?reliability, flags = flags.len(), "validity assessed");

        ValidityAssessment {
            inconsistency,
            infrequency,
            positive_impression,
            random_responding,
            reliability,
            flags,
        }
    }

    /// Share of answered opposite-worded pairs whose scores sit closer than
    /// the configured gap.
    fn inconsistency(&self, index: &LikertIndex) -> Option<ValiditySignal> {
        let mut answered = 0;
        let mut hits = 0;
        for pair in &self.config.inconsistency_pairs {
            if let (Some(first), Some(second)) = (index.get(&pair.first), index.get(&pair.second)) {
                answered += 1;
                if (first - second).abs() < self.config.inconsistency_gap {
                    hits += 1;
                }
            }
        }
        signal(hits, answered)
    }

    /// Flat, inconsistent answering. Needs enough scorable answers to say
    /// anything; low variance on its own is never enough.
    fn random_responding(
        &self,
        responses: &[Response],
        inconsistency: Option<&ValiditySignal>,
    ) -> Option<RandomResponding> {
        let values: Vec<f64> = responses
            .iter()
            .filter_map(|r| numeric_answer(r.value.as_ref()))
            .collect();
        if values.len() < self.config.min_scorable_answers || values.is_empty() {
            return None;
        }

        let standard_deviation = population_std_dev(&values);
        let inconsistent = inconsistency.is_some_and(|s| s.ratio > self.config.random_inconsistency);
        Some(RandomResponding {
            flagged: inconsistent && standard_deviation < self.config.flat_deviation,
            standard_deviation,
            scorable_answers: values.len(),
        })
    }
}

/// Real (non-defaulted) 1–5 scores keyed by question id. The first response
/// for an id wins.
struct LikertIndex<'a> {
    scores: HashMap<&'a str, f64>,
}

impl<'a> LikertIndex<'a> {
    fn new(responses: &'a [Response]) -> Self {
        let mut scores = HashMap::new();
        for response in responses {
            let (value, provenance) = normalize_value(response.value.as_ref(), ScaleKind::Likert5);
            if provenance != Provenance::Defaulted {
                scores.entry(response.question_id.as_str()).or_insert(value);
            }
        }
        Self { scores }
    }

    fn get(&self, question_id: &str) -> Option<f64> {
        self.scores.get(question_id).copied()
    }
}

fn endorsement_signal(index: &LikertIndex, items: &[String], endorsement: f64) -> Option<ValiditySignal> {
    let answered: Vec<f64> = items.iter().filter_map(|id| index.get(id)).collect();
    let hits = answered.iter().filter(|&&score| score >= endorsement).count();
    signal(hits, answered.len())
}

fn signal(hits: usize, answered: usize) -> Option<ValiditySignal> {
    (answered > 0).then(|| ValiditySignal {
        ratio: hits as f64 / answered as f64,
        hits,
        answered,
    })
}

fn population_std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
