use crate::gate::{GateOverrides, GatePolicy};
use crate::normalize::ScaleKind;
use crate::scoring::{Aggregation, BandTable, Domain};
use crate::Instrument;

/// HEXACO personality inventory: six domains, each the mean of its 1–5 items.
pub struct Hexaco {
    domains: Vec<Domain>,
}

impl Hexaco {
    pub fn new(gates: &GateOverrides) -> Self {
        let domains = [
            ("honesty_humility", "Honesty-Humility"),
            ("emotionality", "Emotionality"),
            ("extraversion", "eXtraversion"),
            ("agreeableness", "Agreeableness"),
            ("conscientiousness", "Conscientiousness"),
            ("openness", "Openness to Experience"),
        ]
        .iter()
        .map(|(id, name)| Domain {
            id: id.to_string(),
            name: name.to_string(),
            subscales: vec![],
            scale: ScaleKind::Likert5,
            aggregation: Aggregation::Mean,
            bands: BandTable::trait_levels(),
            precision: 2,
            item_count: 10,
            gate: gates.resolve(&format!("hexaco.{id}"), GatePolicy::new(2, 4)),
            description: None,
        })
        .collect();

        Self { domains }
    }
}

impl Default for Hexaco {
    fn default() -> Self {
        Self::new(&GateOverrides::default())
    }
}

impl Instrument for Hexaco {
    fn id(&self) -> &str {
        "hexaco"
    }

    fn name(&self) -> &str {
        "HEXACO"
    }

    fn domains(&self) -> &[Domain] {
        &self.domains
    }
}
