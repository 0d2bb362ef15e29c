//! Cross-instrument alert rules.
//!
//! Alerts are a pure function of already-gated scores and the validity
//! assessment. Raw responses are never consulted here.

use std::collections::BTreeMap;

use meridian_core::models::report::{Alert, Finding, InstrumentOutput};
use meridian_core::models::score::Level;
use meridian_core::models::validity::{Reliability, Severity, ValidityAssessment};

/// What an alert rule looks for.
#[derive(Debug, Clone, Copy)]
pub enum Condition {
    /// A reported domain score at one of `levels`.
    DomainLevel {
        domain: &'static str,
        levels: &'static [Level],
    },
    /// Any reported subscale of `domain` at `level`.
    SubscaleLevel {
        domain: &'static str,
        level: Level,
    },
    PositiveScreen,
    CriticalItem,
    Reliability(&'static [Reliability]),
}

#[derive(Debug, Clone, Copy)]
pub struct AlertRule {
    pub alert_type: &'static str,
    pub severity: Severity,
    /// Instrument id, or [`VALIDITY_SOURCE`].
    pub source: &'static str,
    pub condition: Condition,
    pub message_key: &'static str,
    pub recommendation_key: &'static str,
}

pub const VALIDITY_SOURCE: &str = "validity";

pub const RULES: &[AlertRule] = &[
    AlertRule {
        alert_type: "self_harm_risk",
        severity: Severity::Critical,
        source: "phq9",
        condition: Condition::CriticalItem,
        message_key: "alert.self_harm_risk",
        recommendation_key: "recommendation.immediate_safety_assessment",
    },
    AlertRule {
        alert_type: "depression_severe",
        severity: Severity::High,
        source: "phq9",
        condition: Condition::DomainLevel {
            domain: "depression",
            levels: &[Level::ModeratelySevere, Level::Severe],
        },
        message_key: "alert.depression_severe",
        recommendation_key: "recommendation.clinical_evaluation",
    },
    AlertRule {
        alert_type: "anxiety_severe",
        severity: Severity::High,
        source: "gad7",
        condition: Condition::DomainLevel {
            domain: "anxiety",
            levels: &[Level::Severe],
        },
        message_key: "alert.anxiety_severe",
        recommendation_key: "recommendation.clinical_evaluation",
    },
    AlertRule {
        alert_type: "anxiety_moderate",
        severity: Severity::Moderate,
        source: "gad7",
        condition: Condition::DomainLevel {
            domain: "anxiety",
            levels: &[Level::Moderate],
        },
        message_key: "alert.anxiety_moderate",
        recommendation_key: "recommendation.monitor_and_follow_up",
    },
    AlertRule {
        alert_type: "bipolar_screen_positive",
        severity: Severity::High,
        source: "mdq",
        condition: Condition::PositiveScreen,
        message_key: "alert.bipolar_screen_positive",
        recommendation_key: "recommendation.mood_disorder_evaluation",
    },
    AlertRule {
        alert_type: "somatic_burden_high",
        severity: Severity::Moderate,
        source: "phq15",
        condition: Condition::DomainLevel {
            domain: "somatic",
            levels: &[Level::High],
        },
        message_key: "alert.somatic_burden_high",
        recommendation_key: "recommendation.medical_review",
    },
    AlertRule {
        alert_type: "neurodivergent_traits",
        severity: Severity::Moderate,
        source: "neurodiversity",
        condition: Condition::SubscaleLevel {
            domain: "screen",
            level: Level::High,
        },
        message_key: "alert.neurodivergent_traits",
        recommendation_key: "recommendation.neurodevelopmental_assessment",
    },
    AlertRule {
        alert_type: "executive_function_difficulty",
        severity: Severity::Moderate,
        source: "executive_function",
        condition: Condition::DomainLevel {
            domain: "profile",
            levels: &[Level::High],
        },
        message_key: "alert.executive_function_difficulty",
        recommendation_key: "recommendation.executive_function_support",
    },
    AlertRule {
        alert_type: "invalid_profile",
        severity: Severity::Critical,
        source: VALIDITY_SOURCE,
        condition: Condition::Reliability(&[Reliability::Invalid]),
        message_key: "alert.invalid_profile",
        recommendation_key: "recommendation.readminister",
    },
    AlertRule {
        alert_type: "questionable_profile",
        severity: Severity::High,
        source: VALIDITY_SOURCE,
        condition: Condition::Reliability(&[Reliability::Questionable]),
        message_key: "alert.questionable_profile",
        recommendation_key: "recommendation.interpret_with_caution",
    },
];

impl AlertRule {
    fn matches(
        &self,
        instruments: &BTreeMap<String, InstrumentOutput>,
        validity: &ValidityAssessment,
    ) -> bool {
        if let Condition::Reliability(levels) = self.condition {
            return levels.contains(&validity.reliability);
        }

        let Some(output) = instruments.get(self.source) else {
            return false;
        };
        match self.condition {
            Condition::DomainLevel { domain, levels } => output
                .domain(domain)
                .and_then(|d| d.score.value())
                .is_some_and(|score| levels.contains(&score.level)),
            Condition::SubscaleLevel { domain, level } => output.domain(domain).is_some_and(|d| {
                d.subscales
                    .iter()
                    .filter_map(|s| s.score.value())
                    .any(|s| s.level == level)
            }),
            Condition::PositiveScreen => output
                .findings
                .iter()
                .any(|f| matches!(f, Finding::PositiveScreen { .. })),
            Condition::CriticalItem => output
                .findings
                .iter()
                .any(|f| matches!(f, Finding::CriticalItem { .. })),
            Condition::Reliability(_) => false,
        }
    }

    fn to_alert(self) -> Alert {
        Alert {
            alert_type: self.alert_type.to_string(),
            severity: self.severity,
            message_key: self.message_key.to_string(),
            recommendation_key: self.recommendation_key.to_string(),
            source: self.source.to_string(),
        }
    }
}

/// Scan the assembled scores against `rules`. Alerts come back most severe
/// first, then by type and source.
pub fn derive_alerts(
    rules: &[AlertRule],
    instruments: &BTreeMap<String, InstrumentOutput>,
    validity: &ValidityAssessment,
) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = rules
        .iter()
        .filter(|rule| rule.matches(instruments, validity))
        .map(|rule| rule.to_alert())
        .collect();
    alerts.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.alert_type.cmp(&b.alert_type))
            .then_with(|| a.source.cmp(&b.source))
    });
    alerts
}
