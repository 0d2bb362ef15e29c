use meridian_core::models::report::{DomainResult, Finding};
use meridian_core::models::response::Response;
use meridian_core::models::score::Level;

use crate::gate::{GateOverrides, GatePolicy};
use crate::normalize::ScaleKind;
use crate::scoring::{Aggregation, BandTable, Domain};
use crate::Instrument;

/// PHQ-15: Patient Health Questionnaire somatic symptom scale.
/// 15 items rated 0–2 ("not bothered" to "bothered a lot"). Total 0–30.
pub struct Phq15 {
    domains: Vec<Domain>,
}

impl Phq15 {
    pub fn new(gates: &GateOverrides) -> Self {
        Self {
            domains: vec![Domain {
                id: "somatic".to_string(),
                name: "Somatic Symptom Severity".to_string(),
                subscales: vec![],
                scale: ScaleKind::Phq15,
                aggregation: Aggregation::Total,
                bands: BandTable::new(
                    Level::Minimal,
                    &[(5.0, Level::Low), (10.0, Level::Medium), (15.0, Level::High)],
                ),
                precision: 1,
                item_count: 15,
                gate: gates.resolve("phq15.somatic", GatePolicy::new(5, 10)),
                description: Some(
                    "<5 minimal, 5-9 low, 10-14 medium, 15+ high somatic symptom severity"
                        .to_string(),
                ),
            }],
        }
    }
}

impl Default for Phq15 {
    fn default() -> Self {
        Self::new(&GateOverrides::default())
    }
}

impl Instrument for Phq15 {
    fn id(&self) -> &str {
        "phq15"
    }

    fn name(&self) -> &str {
        "PHQ-15"
    }

    fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Symptom count: items endorsed at all. Only reported alongside a
    /// reportable total.
    fn findings(&self, domains: &[DomainResult], responses: &[Response]) -> Vec<Finding> {
        let (Some(def), Some(somatic)) = (self.domains.first(), domains.first()) else {
            return Vec::new();
        };
        if !somatic.score.is_reportable() {
            return Vec::new();
        }

        let count = self
            .items_for(def, responses)
            .iter()
            .filter(|item| !item.is_defaulted() && item.value >= 1.0)
            .count();
        vec![Finding::SymptomCount { count }]
    }
}
