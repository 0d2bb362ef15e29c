use meridian_core::models::score::Level;

use crate::gate::{GateOverrides, GatePolicy};
use crate::normalize::ScaleKind;
use crate::scoring::{Aggregation, BandTable, Domain};
use crate::Instrument;

/// GAD-7: Generalized Anxiety Disorder scale.
/// 7 items rated 0–3 over the last two weeks. Total 0–21.
pub struct Gad7 {
    domains: Vec<Domain>,
}

impl Gad7 {
    pub fn new(gates: &GateOverrides) -> Self {
        Self {
            domains: vec![Domain {
                id: "anxiety".to_string(),
                name: "Anxiety Severity".to_string(),
                subscales: vec![],
                scale: ScaleKind::PhqDays,
                aggregation: Aggregation::Total,
                bands: BandTable::new(
                    Level::Minimal,
                    &[(5.0, Level::Mild), (10.0, Level::Moderate), (15.0, Level::Severe)],
                ),
                precision: 1,
                item_count: 7,
                gate: gates.resolve("gad7.anxiety", GatePolicy::new(4, 7)),
                description: Some("10+ is the usual positive screen cutoff".to_string()),
            }],
        }
    }
}

impl Default for Gad7 {
    fn default() -> Self {
        Self::new(&GateOverrides::default())
    }
}

impl Instrument for Gad7 {
    fn id(&self) -> &str {
        "gad7"
    }

    fn name(&self) -> &str {
        "GAD-7"
    }

    fn domains(&self) -> &[Domain] {
        &self.domains
    }
}
