use meridian_core::models::score::Level;

use crate::gate::{GateOverrides, GatePolicy};
use crate::normalize::ScaleKind;
use crate::scoring::{Aggregation, BandTable, Domain, Subscale};
use crate::Instrument;

/// Neurodiversity screen: attention, social communication and sensory
/// processing traits rated on a 1–5 frequency scale.
///
/// The domain needs at least five answered items before anything is shown,
/// and each sub-domain at least three.
pub struct Neurodiversity {
    domains: Vec<Domain>,
}

impl Neurodiversity {
    pub fn new(gates: &GateOverrides) -> Self {
        let sub_domain = |id: &str, name: &str| {
            let key = format!("neurodiversity.screen.{id}");
            Subscale::new(id, name, gates.resolve(&key, GatePolicy::new(3, 4)))
        };

        Self {
            domains: vec![Domain {
                id: "screen".to_string(),
                name: "Neurodiversity Screen".to_string(),
                subscales: vec![
                    sub_domain("attention", "Attention and Focus"),
                    sub_domain("social_communication", "Social Communication"),
                    sub_domain("sensory_processing", "Sensory Processing"),
                ],
                scale: ScaleKind::Likert5,
                aggregation: Aggregation::FacetMeans,
                bands: BandTable::new(Level::Low, &[(2.5, Level::Moderate), (3.5, Level::High)]),
                precision: 2,
                item_count: 15,
                gate: gates.resolve("neurodiversity.screen", GatePolicy::new(5, 10)),
                description: Some(
                    "Screening indicator only; elevated sub-domains suggest formal evaluation"
                        .to_string(),
                ),
            }],
        }
    }
}

impl Default for Neurodiversity {
    fn default() -> Self {
        Self::new(&GateOverrides::default())
    }
}

impl Instrument for Neurodiversity {
    fn id(&self) -> &str {
        "neurodiversity"
    }

    fn name(&self) -> &str {
        "Neurodiversity Screen"
    }

    fn domains(&self) -> &[Domain] {
        &self.domains
    }
}
