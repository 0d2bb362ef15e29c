use meridian_core::models::gate::Gated;
use meridian_core::models::report::DomainResult;
use meridian_core::models::response::Response;
use meridian_core::models::score::Level;

use crate::aggregate::{insufficient_domain, score_domain};
use crate::error::InstrumentError;
use crate::gate::{GateDecision, GateOverrides, GatePolicy};
use crate::normalize::ScaleKind;
use crate::scoring::{Aggregation, BandTable, Domain, Subscale};
use crate::Instrument;

/// Gate key for the number of executive-function domains present.
pub const BLOCK_KEY: &str = "executive_function.block";

const AREAS: [(&str, &str); 8] = [
    ("inhibition", "Inhibition"),
    ("shifting", "Shifting"),
    ("emotional_control", "Emotional Control"),
    ("initiation", "Initiation"),
    ("working_memory", "Working Memory"),
    ("planning", "Planning and Organizing"),
    ("organization", "Organization of Materials"),
    ("self_monitoring", "Self-Monitoring"),
];

/// Executive function difficulty profile across eight areas, 0–100
/// (higher = more difficulty).
///
/// The whole block is withheld unless enough areas have data; a profile
/// built from one or two areas says nothing about executive function.
pub struct ExecutiveFunction {
    domains: Vec<Domain>,
    block: GatePolicy,
}

impl ExecutiveFunction {
    pub fn new(gates: &GateOverrides) -> Self {
        let areas = AREAS
            .iter()
            .map(|(id, name)| {
                let key = format!("executive_function.profile.{id}");
                Subscale::new(id, name, gates.resolve(&key, GatePolicy::new(1, 2)))
            })
            .collect();

        Self {
            domains: vec![Domain {
                id: "profile".to_string(),
                name: "Executive Function Difficulty".to_string(),
                subscales: areas,
                scale: ScaleKind::Percent,
                aggregation: Aggregation::FacetMeans,
                bands: BandTable::new(Level::Low, &[(40.0, Level::Moderate), (65.0, Level::High)]),
                precision: 1,
                item_count: 24,
                gate: gates.resolve("executive_function.profile", GatePolicy::new(1, 1)),
                description: None,
            }],
            block: gates.resolve(BLOCK_KEY, GatePolicy::new(4, 6)),
        }
    }
}

impl Default for ExecutiveFunction {
    fn default() -> Self {
        Self::new(&GateOverrides::default())
    }
}

impl Instrument for ExecutiveFunction {
    fn id(&self) -> &str {
        "executive_function"
    }

    fn name(&self) -> &str {
        "Executive Function"
    }

    fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// The profile score is gated on areas present rather than items.
    fn score_domains(&self, responses: &[Response]) -> Result<Vec<DomainResult>, InstrumentError> {
        let profile = self.domain("profile")?;
        let items = self.items_for(profile, responses);
        let scored = score_domain(profile, &items, true)?;

        let present = scored
            .subscales
            .iter()
            .filter(|s| s.score.is_reportable())
            .count();
        let defaulted = scored.score.confidence().evidence.defaulted_items;
        let evidence = self.block.evidence(present, defaulted);
        tracing::debug!(present, defaulted, "executive function areas present");

        if self.block.decide(present) == GateDecision::Suppress {
            return Ok(vec![insufficient_domain(profile, evidence, scored.subscales)]);
        }

        let score = match scored.score {
            Gated::Reported { value, .. } => self.block.gate(present, defaulted, value),
            Gated::Insufficient { .. } => Gated::insufficient(evidence),
        };
        Ok(vec![DomainResult { score, ..scored }])
    }
}
