use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use meridian_core::models::report::{AssembledReport, InstrumentOutput, OmittedInstrument, ReportCaveat};
use meridian_core::models::response::{Response, ResponseSet};
use meridian_core::models::validity::Reliability;
use meridian_instruments::{instruments_with_gates, Instrument};
use meridian_validity::ValidityCalculator;

use crate::alerts::{derive_alerts, AlertRule, RULES};
use crate::config::ScoringConfig;
use crate::enrich::EnrichmentProvider;
use crate::error::ReportError;

/// Runs every registered instrument and the validity calculator against one
/// response set and assembles the report.
///
/// Scorers, rules and the enrichment provider are fixed at construction;
/// a missing provider is a configuration fact, not a runtime surprise.
pub struct Orchestrator {
    scorers: Vec<Box<dyn Instrument>>,
    validity: ValidityCalculator,
    rules: &'static [AlertRule],
    enrichment: Option<Box<dyn EnrichmentProvider>>,
}

impl Orchestrator {
    pub fn new(scorers: Vec<Box<dyn Instrument>>, validity: ValidityCalculator) -> Self {
        Self {
            scorers,
            validity,
            rules: RULES,
            enrichment: None,
        }
    }

    /// All registered instruments with the config's gates and validity items.
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(
            instruments_with_gates(&config.gates),
            ValidityCalculator::new(config.validity.clone()),
        )
    }

    pub fn with_enrichment(mut self, provider: Box<dyn EnrichmentProvider>) -> Self {
        self.enrichment = Some(provider);
        self
    }

    pub fn with_rules(mut self, rules: &'static [AlertRule]) -> Self {
        self.rules = rules;
        self
    }

    pub fn scorer_ids(&self) -> Vec<&str> {
        self.scorers.iter().map(|s| s.id()).collect()
    }

    /// Parse untrusted JSON and assemble. Structural problems fail here,
    /// before any scorer runs.
    pub fn assemble_json(&self, value: serde_json::Value) -> Result<AssembledReport, ReportError> {
        let set = ResponseSet::from_json(value)?;
        self.assemble(&set)
    }

    pub fn assemble(&self, set: &ResponseSet) -> Result<AssembledReport, ReportError> {
        set.validate()?;
        let responses = set.responses.as_slice();

        let mut instruments = BTreeMap::new();
        let mut omitted = Vec::new();
        for scorer in &self.scorers {
            match run_scorer(scorer.as_ref(), responses) {
                Ok(output) => {
                    instruments.insert(scorer.id().to_string(), output);
                }
                Err(reason) => {
                    tracing::error!(instrument = scorer.id(), %reason, "instrument scoring failed");
                    omitted.push(OmittedInstrument {
                        instrument_id: scorer.id().to_string(),
                        reason,
                    });
                }
            }
        }

        let validity = self.validity.assess(responses);
        let caveats = if validity.reliability >= Reliability::Caution {
            vec![ReportCaveat::ValidityConcern {
                reliability: validity.reliability,
            }]
        } else {
            Vec::new()
        };
        let alerts = derive_alerts(self.rules, &instruments, &validity);

        let mut report = AssembledReport {
            instruments,
            omitted,
            validity,
            caveats,
            alerts,
            metadata: set.metadata.clone(),
            enrichments: BTreeMap::new(),
        };

        if let Some(provider) = &self.enrichment {
            match provider.enrich(&report) {
                Ok(value) => {
                    report.enrichments.insert(provider.id().to_string(), value);
                }
                Err(e) => {
                    tracing::warn!(provider = provider.id(), error = %e, "enrichment failed");
                }
            }
        }

        tracing::info!(
            instruments = report.instruments.len(),
            omitted = report.omitted.len(),
            reliability = ?report.validity.reliability,
            alerts = report.alerts.len(),
            "report assembled"
        );
        Ok(report)
    }
}

/// Score one instrument, containing both errors and panics.
fn run_scorer(scorer: &dyn Instrument, responses: &[Response]) -> Result<InstrumentOutput, String> {
    for warning in scorer.validate_responses(responses) {
        tracing::warn!(instrument = scorer.id(), question = %warning.question_id, "{warning}");
    }

    match panic::catch_unwind(AssertUnwindSafe(|| scorer.score(responses))) {
        Ok(Ok(output)) => {
            tracing::debug!(instrument = scorer.id(), domains = output.domains.len(), "instrument scored");
            Ok(output)
        }
        Ok(Err(e)) => Err(e.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("scorer panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("scorer panicked: {message}")
    } else {
        "scorer panicked".to_string()
    }
}
