//! Scale aggregation shared by every instrument.
//!
//! Items → subscale summaries → domain score. Each stage returns a fresh
//! value; nothing is accumulated in place.

use meridian_core::models::gate::{Evidence, Gated};
use meridian_core::models::report::{DomainResult, SubscaleResult};
use meridian_core::models::score::{Derivation, DomainScore, ScaleSummary, ScoredItem, SubscaleScore};

use crate::error::InstrumentError;
use crate::gate::GateDecision;
use crate::scoring::{round_half_up, Aggregation, Domain};

/// Total, real-item count and average over `items`. Defaulted items are
/// counted separately and contribute nothing else.
pub fn summarize<'a>(items: impl IntoIterator<Item = &'a ScoredItem>) -> ScaleSummary {
    let mut summary = ScaleSummary::EMPTY;
    for item in items {
        if item.is_defaulted() {
            summary.defaulted += 1;
        } else {
            summary.total += item.value;
            summary.count += 1;
        }
    }
    summary.average = (summary.count > 0).then(|| summary.total / summary.count as f64);
    summary
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Domain score from (already rounded) facet averages.
pub fn facet_domain_score(facet_averages: &[f64], precision: u32) -> Option<f64> {
    mean(facet_averages).map(|m| round_half_up(m, precision))
}

/// Score one subscale of `domain` from the domain's items.
pub fn score_subscale(
    domain: &Domain,
    subscale_index: usize,
    items: &[ScoredItem],
    facet_analysis: bool,
) -> SubscaleResult {
    let def = &domain.subscales[subscale_index];
    let summary = summarize(
        items
            .iter()
            .filter(|item| item.subscale_tag.as_deref() == Some(def.id.as_str())),
    );

    let score = if facet_analysis {
        def.gate.gate_summary(&summary, |average| {
            let average = round_half_up(average, domain.precision);
            SubscaleScore {
                total: summary.total,
                average,
                level: domain.bands.classify(average),
            }
        })
    } else {
        Gated::insufficient(def.gate.evidence(summary.count, summary.defaulted))
    };

    SubscaleResult {
        id: def.id.clone(),
        name: def.name.clone(),
        score,
    }
}

/// Score a domain and its subscales, then pass the result through the
/// domain's gate.
///
/// With `facet_analysis` off every subscale is withheld and a
/// [`Aggregation::FacetMeans`] domain falls back to its item mean.
pub fn score_domain(
    domain: &Domain,
    items: &[ScoredItem],
    facet_analysis: bool,
) -> Result<DomainResult, InstrumentError> {
    let summary = summarize(items);
    let subscales: Vec<SubscaleResult> = (0..domain.subscales.len())
        .map(|index| score_subscale(domain, index, items, facet_analysis))
        .collect();

    let evidence = domain.gate.evidence(summary.count, summary.defaulted);
    let average = match summary.average {
        Some(average) if domain.gate.decide(summary.count) != GateDecision::Suppress => average,
        _ => return Ok(insufficient_domain(domain, evidence, subscales)),
    };

    let (raw, derivation) = match domain.aggregation {
        Aggregation::Total => (summary.total, Derivation::ItemTotal),
        Aggregation::Mean => (average, Derivation::ItemMean),
        Aggregation::FacetMeans => {
            let facet_averages: Vec<f64> = subscales
                .iter()
                .filter_map(|s| s.score.value())
                .map(|s| s.average)
                .collect();
            match facet_domain_score(&facet_averages, domain.precision) {
                Some(score) => (
                    score,
                    Derivation::FacetMeans {
                        facets_used: facet_averages.len(),
                    },
                ),
                None => (average, Derivation::RawItems),
            }
        }
    };

    let score = round_half_up(raw, domain.precision);
    if !score.is_finite() {
        return Err(InstrumentError::NonFinite {
            domain_id: domain.id.clone(),
        });
    }

    let value = DomainScore {
        score,
        scale_max: domain.scale_max(),
        level: domain.bands.classify(score),
        derivation,
    };

    Ok(DomainResult {
        id: domain.id.clone(),
        name: domain.name.clone(),
        score: domain.gate.gate(summary.count, summary.defaulted, value),
        subscales,
    })
}

/// A withheld domain. Its subscales are withheld with it so no number
/// leaks out from under a suppressed domain.
pub fn insufficient_domain(
    domain: &Domain,
    evidence: Evidence,
    subscales: Vec<SubscaleResult>,
) -> DomainResult {
    DomainResult {
        id: domain.id.clone(),
        name: domain.name.clone(),
        score: Gated::insufficient(evidence),
        subscales: subscales
            .into_iter()
            .map(|s| SubscaleResult {
                score: s.score.suppress(),
                ..s
            })
            .collect(),
    }
}
