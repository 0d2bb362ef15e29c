use meridian_core::models::report::{DomainResult, Finding};
use meridian_core::models::response::Response;
use meridian_core::models::score::Level;

use crate::gate::{GateOverrides, GatePolicy};
use crate::normalize::ScaleKind;
use crate::scoring::{Aggregation, BandTable, Domain};
use crate::Instrument;

/// Symptom count at which the first MDQ criterion is met.
pub const SYMPTOM_THRESHOLD: f64 = 7.0;
/// "Moderate problem" on the impairment question.
pub const IMPAIRMENT_THRESHOLD: f64 = 2.0;

/// MDQ: Mood Disorder Questionnaire.
/// 13 yes/no symptom items, one co-occurrence question, one impairment
/// question. Responses are routed by `domain_tag`.
pub struct Mdq {
    domains: Vec<Domain>,
}

impl Mdq {
    pub fn new(gates: &GateOverrides) -> Self {
        Self {
            domains: vec![
                Domain {
                    id: "symptoms".to_string(),
                    name: "Manic Symptoms".to_string(),
                    subscales: vec![],
                    scale: ScaleKind::Binary,
                    aggregation: Aggregation::Total,
                    bands: BandTable::new(Level::Low, &[(SYMPTOM_THRESHOLD, Level::High)]),
                    precision: 0,
                    item_count: 13,
                    gate: gates.resolve("mdq.symptoms", GatePolicy::new(10, 13)),
                    description: None,
                },
                Domain {
                    id: "co_occurrence".to_string(),
                    name: "Symptoms Co-occurred".to_string(),
                    subscales: vec![],
                    scale: ScaleKind::Binary,
                    aggregation: Aggregation::Total,
                    bands: BandTable::new(Level::Low, &[(1.0, Level::High)]),
                    precision: 0,
                    item_count: 1,
                    gate: gates.resolve("mdq.co_occurrence", GatePolicy::new(1, 1)),
                    description: None,
                },
                Domain {
                    id: "impairment".to_string(),
                    name: "Functional Impairment".to_string(),
                    subscales: vec![],
                    scale: ScaleKind::Impairment,
                    aggregation: Aggregation::Total,
                    bands: BandTable::new(
                        Level::Minimal,
                        &[
                            (1.0, Level::Mild),
                            (IMPAIRMENT_THRESHOLD, Level::Moderate),
                            (3.0, Level::Severe),
                        ],
                    ),
                    precision: 0,
                    item_count: 1,
                    gate: gates.resolve("mdq.impairment", GatePolicy::new(1, 1)),
                    description: None,
                },
            ],
        }
    }
}

impl Default for Mdq {
    fn default() -> Self {
        Self::new(&GateOverrides::default())
    }
}

fn reported_score(domains: &[DomainResult], id: &str) -> Option<f64> {
    domains
        .iter()
        .find(|d| d.id == id)
        .and_then(|d| d.score.value())
        .map(|s| s.score)
}

impl Instrument for Mdq {
    fn id(&self) -> &str {
        "mdq"
    }

    fn name(&self) -> &str {
        "MDQ"
    }

    fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Positive screen needs all three criteria on gate-approved scores.
    fn findings(&self, domains: &[DomainResult], _responses: &[Response]) -> Vec<Finding> {
        let symptoms = reported_score(domains, "symptoms");
        let co_occurrence = reported_score(domains, "co_occurrence");
        let impairment = reported_score(domains, "impairment");

        let positive = symptoms.is_some_and(|s| s >= SYMPTOM_THRESHOLD)
            && co_occurrence.is_some_and(|c| c >= 1.0)
            && impairment.is_some_and(|i| i >= IMPAIRMENT_THRESHOLD);

        if !positive {
            return Vec::new();
        }
        vec![Finding::PositiveScreen {
            criteria: vec![
                "symptoms_at_least_7".to_string(),
                "symptoms_co_occurred".to_string(),
                "impairment_moderate_or_serious".to_string(),
            ],
        }]
    }
}
