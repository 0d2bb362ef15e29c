use meridian_core::models::report::{DomainResult, Finding};
use meridian_core::models::response::Response;
use meridian_core::models::score::Level;

use crate::gate::{GateOverrides, GatePolicy};
use crate::normalize::{normalize, ScaleKind};
use crate::scoring::{Aggregation, BandTable, Domain};
use crate::Instrument;

/// Question id of the PHQ-9 self-harm item unless configured otherwise.
pub const DEFAULT_SELF_HARM_ITEM: &str = "phq9_9";

/// PHQ-9: Patient Health Questionnaire depression module.
/// 9 items rated 0–3 over the last two weeks. Total 0–27.
pub struct Phq9 {
    domains: Vec<Domain>,
    self_harm_item: String,
}

impl Phq9 {
    pub fn new(gates: &GateOverrides) -> Self {
        Self {
            domains: vec![Domain {
                id: "depression".to_string(),
                name: "Depression Severity".to_string(),
                subscales: vec![],
                scale: ScaleKind::PhqDays,
                aggregation: Aggregation::Total,
                bands: BandTable::new(
                    Level::Minimal,
                    &[
                        (5.0, Level::Mild),
                        (10.0, Level::Moderate),
                        (15.0, Level::ModeratelySevere),
                        (20.0, Level::Severe),
                    ],
                ),
                precision: 1,
                item_count: 9,
                gate: gates.resolve("phq9.depression", GatePolicy::new(5, 9)),
                description: None,
            }],
            self_harm_item: DEFAULT_SELF_HARM_ITEM.to_string(),
        }
    }

    pub fn with_self_harm_item(mut self, question_id: impl Into<String>) -> Self {
        self.self_harm_item = question_id.into();
        self
    }
}

impl Default for Phq9 {
    fn default() -> Self {
        Self::new(&GateOverrides::default())
    }
}

impl Instrument for Phq9 {
    fn id(&self) -> &str {
        "phq9"
    }

    fn name(&self) -> &str {
        "PHQ-9"
    }

    fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Any real endorsement of the self-harm item is reported regardless of
    /// how many other items were answered: it is an item-level fact, not a
    /// score.
    fn findings(&self, _domains: &[DomainResult], responses: &[Response]) -> Vec<Finding> {
        responses
            .iter()
            .filter(|r| r.in_scale(self.id()) && r.question_id == self.self_harm_item)
            .map(|r| normalize(r, ScaleKind::PhqDays))
            .filter(|item| !item.is_defaulted() && item.value > 0.0)
            .map(|item| Finding::CriticalItem {
                question_id: item.question_id,
                value: item.value,
            })
            .collect()
    }
}
