//! Data sufficiency gate.
//!
//! Runs after aggregation and only decides whether a computed score is
//! exposed. It never changes the arithmetic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use meridian_core::models::gate::{Caveat, Evidence, Gated};
use meridian_core::models::score::ScaleSummary;

/// Item-count thresholds for one domain, subscale or block.
///
/// `real < minimum` suppresses the score, `minimum <= real < comfortable`
/// reports it with [`Caveat::LowConfidence`], anything above is reported
/// plainly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GatePolicy {
    pub minimum: usize,
    pub comfortable: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Suppress,
    LowConfidence,
    Full,
}

impl GatePolicy {
    pub const fn new(minimum: usize, comfortable: usize) -> Self {
        Self {
            minimum,
            comfortable,
        }
    }

    pub fn decide(&self, real_items: usize) -> GateDecision {
        if real_items < self.minimum {
            GateDecision::Suppress
        } else if real_items < self.comfortable {
            GateDecision::LowConfidence
        } else {
            GateDecision::Full
        }
    }

    pub fn evidence(&self, real_items: usize, defaulted_items: usize) -> Evidence {
        Evidence {
            real_items,
            defaulted_items,
            minimum: self.minimum,
            comfortable: self.comfortable,
        }
    }

    /// Gate a value backed by `real_items` observations.
    ///
    /// Zero real items is always insufficient, whatever the minimum.
    pub fn gate<T>(&self, real_items: usize, defaulted_items: usize, value: T) -> Gated<T> {
        let evidence = self.evidence(real_items, defaulted_items);
        if real_items == 0 {
            return Gated::insufficient(evidence);
        }
        match self.decide(real_items) {
            GateDecision::Suppress => Gated::insufficient(evidence),
            GateDecision::LowConfidence => Gated::reported(value, evidence, Some(Caveat::LowConfidence)),
            GateDecision::Full => Gated::reported(value, evidence, None),
        }
    }

    /// Gate an aggregate, building the value only when it is reportable.
    pub fn gate_summary<T>(&self, summary: &ScaleSummary, build: impl FnOnce(f64) -> T) -> Gated<T> {
        let evidence = self.evidence(summary.count, summary.defaulted);
        match summary.average {
            Some(average) if self.decide(summary.count) != GateDecision::Suppress => {
                self.gate(summary.count, summary.defaulted, build(average))
            }
            _ => Gated::insufficient(evidence),
        }
    }
}

/// Gate thresholds overriding an instrument's defaults.
///
/// Keys are `"<instrument>.<domain>"`, `"<instrument>.<domain>.<subscale>"`,
/// or an instrument-defined block key such as `"big_five.facet_analysis"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct GateOverrides(pub BTreeMap<String, GatePolicy>);

impl GateOverrides {
    pub fn resolve(&self, key: &str, default: GatePolicy) -> GatePolicy {
        self.0.get(key).copied().unwrap_or(default)
    }

    pub fn insert(&mut self, key: impl Into<String>, policy: GatePolicy) {
        self.0.insert(key.into(), policy);
    }
}
