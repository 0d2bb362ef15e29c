//! meridian-instruments
//!
//! Instrument definitions and the shared scoring pipeline: response
//! normalization, scale aggregation and the data-sufficiency gate. Each
//! supported questionnaire declares its domains, subscales, severity bands
//! and gate thresholds; the generic pipeline does the rest.

pub mod aggregate;
pub mod error;
pub mod gate;
pub mod instruments;
pub mod normalize;
pub mod scoring;

use meridian_core::models::report::{DomainResult, Finding, InstrumentOutput};
use meridian_core::models::response::{RawValue, Response};
use meridian_core::models::score::ScoredItem;

use error::InstrumentError;
use gate::GateOverrides;
use normalize::normalize;
use scoring::{Domain, ValidationError};

/// Trait implemented by each clinical or trait instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier; responses carry it as their `scale_tag`.
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "PHQ-15").
    fn name(&self) -> &str;

    /// The domains and subscales this instrument measures.
    fn domains(&self) -> &[Domain];

    /// Instrument-specific facts derived from the scored domains.
    fn findings(&self, _domains: &[DomainResult], _responses: &[Response]) -> Vec<Finding> {
        Vec::new()
    }

    /// Score every domain and collect findings.
    fn score(&self, responses: &[Response]) -> Result<InstrumentOutput, InstrumentError> {
        let domains = self.score_domains(responses)?;
        let findings = self.findings(&domains, responses);
        Ok(InstrumentOutput {
            instrument_id: self.id().to_string(),
            name: self.name().to_string(),
            domains,
            findings,
        })
    }

    fn score_domains(&self, responses: &[Response]) -> Result<Vec<DomainResult>, InstrumentError> {
        self.domains()
            .iter()
            .map(|domain| aggregate::score_domain(domain, &self.items_for(domain, responses), true))
            .collect()
    }

    /// Normalized items for `domain`. A single-domain instrument owns every
    /// response carrying its tag; otherwise responses are matched on
    /// `domain_tag`.
    fn items_for(&self, domain: &Domain, responses: &[Response]) -> Vec<ScoredItem> {
        let single = self.domains().len() == 1;
        responses
            .iter()
            .filter(|r| r.in_scale(self.id()))
            .filter(|r| single || r.domain_tag.as_deref() == Some(domain.id.as_str()))
            .map(|r| normalize(r, domain.scale))
            .collect()
    }

    fn domain(&self, id: &str) -> Result<&Domain, InstrumentError> {
        self.domains()
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| InstrumentError::UnknownDomain {
                instrument_id: self.id().to_string(),
                domain_id: id.to_string(),
            })
    }

    /// Report numeric answers that fall outside their domain's canonical
    /// range. Such answers are still scored as given.
    fn validate_responses(&self, responses: &[Response]) -> Vec<ValidationError> {
        let single = self.domains().len() == 1;
        let mut errors = Vec::new();
        for response in responses.iter().filter(|r| r.in_scale(self.id())) {
            let Some(&RawValue::Number(value)) = response.value.as_ref() else {
                continue;
            };
            let domain = self.domains().iter().find(|d| {
                single || response.domain_tag.as_deref() == Some(d.id.as_str())
            });
            if let Some(domain) = domain
                && !domain.scale.canonical().contains(value)
            {
                let range = domain.scale.canonical();
                errors.push(ValidationError {
                    question_id: response.question_id.clone(),
                    value,
                    expected_range: range,
                    message: format!(
                        "{}: {} answer {} is outside range [{}, {}]",
                        self.name(),
                        response.question_id,
                        value,
                        range.min,
                        range.max,
                    ),
                });
            }
        }
        errors
    }
}

/// Return all registered instruments with their default gate thresholds.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    instruments_with_gates(&GateOverrides::default())
}

/// Return all registered instruments, applying gate overrides.
pub fn instruments_with_gates(gates: &GateOverrides) -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::phq15::Phq15::new(gates)),
        Box::new(instruments::phq9::Phq9::new(gates)),
        Box::new(instruments::gad7::Gad7::new(gates)),
        Box::new(instruments::mdq::Mdq::new(gates)),
        Box::new(instruments::big_five::BigFive::new(gates)),
        Box::new(instruments::hexaco::Hexaco::new(gates)),
        Box::new(instruments::neurodiversity::Neurodiversity::new(gates)),
        Box::new(instruments::executive_function::ExecutiveFunction::new(gates)),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}

/// Keep only the instruments named in `ids`, failing on any unknown id.
pub fn select_instruments(
    instruments: Vec<Box<dyn Instrument>>,
    ids: &[String],
) -> Result<Vec<Box<dyn Instrument>>, InstrumentError> {
    if let Some(unknown) = ids
        .iter()
        .find(|id| !instruments.iter().any(|i| i.id() == id.as_str()))
    {
        return Err(InstrumentError::UnknownInstrument(unknown.clone()));
    }
    Ok(instruments
        .into_iter()
        .filter(|i| ids.iter().any(|id| id == i.id()))
        .collect())
}
