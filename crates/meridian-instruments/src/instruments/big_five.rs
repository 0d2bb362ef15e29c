use std::sync::Arc;

use meridian_core::models::gate::{Caveat, Gated};
use meridian_core::models::report::DomainResult;
use meridian_core::models::response::Response;
use meridian_core::models::score::{Derivation, DomainScore};

use crate::aggregate::{score_domain, summarize};
use crate::error::InstrumentError;
use crate::gate::{GateDecision, GateOverrides, GatePolicy};
use crate::normalize::ScaleKind;
use crate::scoring::{round_half_up, Aggregation, BandTable, Domain, Subscale};
use crate::Instrument;

/// Gate key for the instrument-wide facet analysis threshold.
pub const FACET_ANALYSIS_KEY: &str = "big_five.facet_analysis";

/// Supplies trait scores (1–5) when a domain has no item data at all, e.g.
/// results carried over from a previous short-form administration.
pub trait ExternalTraitSource: Send + Sync {
    fn id(&self) -> &str;
    fn trait_score(&self, domain_id: &str) -> Option<f64>;
}

/// Big Five (NEO-PI-R structure): five domains of six facets, rated 1–5.
///
/// With enough facet-tagged items each domain is the mean of its facet
/// means, so facets and domain can never disagree. Below that threshold
/// the domain falls back to its raw item mean, then to the external source.
pub struct BigFive {
    domains: Vec<Domain>,
    facet_analysis: GatePolicy,
    external: Option<Arc<dyn ExternalTraitSource>>,
}

const DOMAINS: [(&str, &str, [(&str, &str); 6]); 5] = [
    (
        "openness",
        "Openness to Experience",
        [
            ("fantasy", "Fantasy"),
            ("aesthetics", "Aesthetics"),
            ("feelings", "Feelings"),
            ("actions", "Actions"),
            ("ideas", "Ideas"),
            ("values", "Values"),
        ],
    ),
    (
        "conscientiousness",
        "Conscientiousness",
        [
            ("competence", "Competence"),
            ("order", "Order"),
            ("dutifulness", "Dutifulness"),
            ("achievement_striving", "Achievement Striving"),
            ("self_discipline", "Self-Discipline"),
            ("deliberation", "Deliberation"),
        ],
    ),
    (
        "extraversion",
        "Extraversion",
        [
            ("warmth", "Warmth"),
            ("gregariousness", "Gregariousness"),
            ("assertiveness", "Assertiveness"),
            ("activity", "Activity"),
            ("excitement_seeking", "Excitement-Seeking"),
            ("positive_emotions", "Positive Emotions"),
        ],
    ),
    (
        "agreeableness",
        "Agreeableness",
        [
            ("trust", "Trust"),
            ("straightforwardness", "Straightforwardness"),
            ("altruism", "Altruism"),
            ("compliance", "Compliance"),
            ("modesty", "Modesty"),
            ("tender_mindedness", "Tender-Mindedness"),
        ],
    ),
    (
        "neuroticism",
        "Neuroticism",
        [
            ("anxiety", "Anxiety"),
            ("angry_hostility", "Angry Hostility"),
            ("depression", "Depression"),
            ("self_consciousness", "Self-Consciousness"),
            ("impulsiveness", "Impulsiveness"),
            ("vulnerability", "Vulnerability"),
        ],
    ),
];

impl BigFive {
    pub fn new(gates: &GateOverrides) -> Self {
        let domains = DOMAINS
            .iter()
            .map(|(id, name, facets)| Domain {
                id: id.to_string(),
                name: name.to_string(),
                subscales: facets
                    .iter()
                    .map(|(facet_id, facet_name)| {
                        let key = format!("big_five.{id}.{facet_id}");
                        Subscale::new(facet_id, facet_name, gates.resolve(&key, GatePolicy::new(1, 2)))
                    })
                    .collect(),
                scale: ScaleKind::Likert5,
                aggregation: Aggregation::FacetMeans,
                bands: BandTable::trait_levels(),
                precision: 2,
                item_count: 48,
                gate: gates.resolve(&format!("big_five.{id}"), GatePolicy::new(2, 6)),
                description: None,
            })
            .collect();

        Self {
            domains,
            facet_analysis: gates.resolve(FACET_ANALYSIS_KEY, GatePolicy::new(15, 30)),
            external: None,
        }
    }

    pub fn with_external(mut self, source: Arc<dyn ExternalTraitSource>) -> Self {
        self.external = Some(source);
        self
    }

    /// Real facet-tagged items across the whole instrument.
    fn facet_item_count(&self, responses: &[Response]) -> usize {
        self.domains
            .iter()
            .map(|domain| {
                let items = self.items_for(domain, responses);
                let tagged = items.iter().filter(|item| {
                    domain
                        .subscales
                        .iter()
                        .any(|s| item.subscale_tag.as_deref() == Some(s.id.as_str()))
                });
                summarize(tagged).count
            })
            .sum()
    }

    fn external_domain(&self, domain: &Domain, scored: DomainResult) -> DomainResult {
        let Some(source) = &self.external else {
            return scored;
        };
        let Some(raw) = source.trait_score(&domain.id).filter(|s| s.is_finite()) else {
            return scored;
        };

        let score = round_half_up(raw, domain.precision);
        let value = DomainScore {
            score,
            scale_max: domain.scale_max(),
            level: domain.bands.classify(score),
            derivation: Derivation::External {
                source: source.id().to_string(),
            },
        };
        let evidence = scored.score.confidence().evidence;
        tracing::debug!(domain = %domain.id, source = source.id(), "using external trait score");
        DomainResult {
            score: Gated::reported(value, evidence, Some(Caveat::LowConfidence)),
            ..scored
        }
    }
}

impl Default for BigFive {
    fn default() -> Self {
        Self::new(&GateOverrides::default())
    }
}

impl Instrument for BigFive {
    fn id(&self) -> &str {
        "big_five"
    }

    fn name(&self) -> &str {
        "Big Five (NEO-PI-R)"
    }

    fn domains(&self) -> &[Domain] {
        &self.domains
    }

    fn score_domains(&self, responses: &[Response]) -> Result<Vec<DomainResult>, InstrumentError> {
        let facet_items = self.facet_item_count(responses);
        let facet_analysis = self.facet_analysis.decide(facet_items) != GateDecision::Suppress;
        tracing::debug!(facet_items, facet_analysis, "big five facet analysis gate");

        self.domains
            .iter()
            .map(|domain| {
                let items = self.items_for(domain, responses);
                let scored = score_domain(domain, &items, facet_analysis)?;
                if summarize(&items).has_data() {
                    Ok(scored)
                } else {
                    Ok(self.external_domain(domain, scored))
                }
            })
            .collect()
    }
}
