use meridian_core::models::response::{RawValue, Response};
use meridian_core::models::validity::{Reliability, Severity, ValidityScale};
use meridian_validity::config::{ItemPair, ValidityConfig};
use meridian_validity::reliability::classify;
use meridian_validity::ValidityCalculator;
use proptest::prelude::*;

fn pairs(answers: &[(i32, i32)]) -> Vec<Response> {
    answers
        .iter()
        .enumerate()
        .flat_map(|(n, &(a, b))| {
            [
                Response::new(format!("validity_inc_{:02}a", n + 1), a),
                Response::new(format!("validity_inc_{:02}b", n + 1), b),
            ]
        })
        .collect()
}

fn items(prefix: &str, answers: &[impl Into<RawValue> + Clone]) -> Vec<Response> {
    answers
        .iter()
        .enumerate()
        .map(|(n, a)| Response::new(format!("{prefix}_{:02}", n + 1), a.clone()))
        .collect()
}

/// Eight of ten opposite-worded pairs answered within two points of each
/// other, with enough spread that the pattern is not flat.
fn inconsistent_responses() -> Vec<Response> {
    pairs(&[
        (1, 2),
        (5, 5),
        (3, 4),
        (2, 2),
        (5, 4),
        (1, 1),
        (3, 3),
        (4, 5),
        (1, 5),
        (5, 1),
    ])
}

#[test]
fn high_inconsistency_alone_is_caution() {
    let assessment = ValidityCalculator::default().assess(&inconsistent_responses());

    let inconsistency = assessment.inconsistency.unwrap();
    assert_eq!(inconsistency.ratio, 0.8);
    assert_eq!(inconsistency.hits, 8);
    assert_eq!(inconsistency.answered, 10);

    assert_eq!(assessment.flags.len(), 1);
    assert_eq!(assessment.flags[0].scale, ValidityScale::Inconsistency);
    assert_eq!(assessment.flags[0].severity, Severity::High);
    assert_eq!(assessment.reliability, Reliability::Caution);

    let random = assessment.random_responding.unwrap();
    assert!(!random.flagged);
    assert_eq!(random.scorable_answers, 20);
}

#[test]
fn two_high_flags_are_questionable() {
    let mut responses = inconsistent_responses();
    responses.extend(items("validity_inf", &[5, 5, 4, 4, 1, 2, 1, 2]));

    let assessment = ValidityCalculator::default().assess(&responses);
    assert_eq!(assessment.infrequency.unwrap().ratio, 0.5);
    assert_eq!(assessment.reliability, Reliability::Questionable);
}

#[test]
fn ratio_thresholds_are_strict() {
    // Exactly half endorsed: above moderate, not above high.
    let responses = items("validity_pim", &[5, 5, 5, 5, 1, 1, 1, 1]);
    let assessment = ValidityCalculator::default().assess(&responses);

    assert_eq!(assessment.positive_impression.unwrap().ratio, 0.5);
    assert_eq!(assessment.flags.len(), 1);
    assert_eq!(assessment.flags[0].severity, Severity::Moderate);
    assert_eq!(assessment.reliability, Reliability::Acceptable);
}

#[test]
fn labels_count_as_endorsement() {
    let responses = items(
        "validity_inf",
        &["Strongly agree", "agree", "disagree", "never", "no idea"],
    );
    let infrequency = ValidityCalculator::default()
        .assess(&responses)
        .infrequency
        .unwrap();
    // The unrecognized answer is not counted as answered.
    assert_eq!(infrequency.answered, 4);
    assert_eq!(infrequency.hits, 2);
}

#[test]
fn unanswered_scales_are_absent() {
    let assessment = ValidityCalculator::default().assess(&[]);
    assert!(assessment.inconsistency.is_none());
    assert!(assessment.infrequency.is_none());
    assert!(assessment.positive_impression.is_none());
    assert!(assessment.random_responding.is_none());
    assert!(assessment.flags.is_empty());
    assert_eq!(assessment.reliability, Reliability::Good);
}

#[test]
fn flat_inconsistent_answering_is_random() {
    let assessment = ValidityCalculator::default().assess(&pairs(&[(3, 3); 10]));

    let random = assessment.random_responding.unwrap();
    assert!(random.flagged);
    assert_eq!(random.standard_deviation, 0.0);
    assert!(
        assessment
            .flags
            .iter()
            .any(|f| f.scale == ValidityScale::RandomResponding && f.severity == Severity::Critical)
    );
    assert_eq!(assessment.reliability, Reliability::Invalid);
}

#[test]
fn flat_but_consistent_answering_is_not_random() {
    let responses: Vec<Response> = (1..=15)
        .map(|n| Response::new(format!("agree_{n}"), 4).with_scale("big_five"))
        .collect();
    let assessment = ValidityCalculator::default().assess(&responses);

    let random = assessment.random_responding.unwrap();
    assert!(!random.flagged);
    assert_eq!(random.standard_deviation, 0.0);
    assert_eq!(assessment.reliability, Reliability::Good);
}

#[test]
fn random_responding_needs_enough_answers() {
    let assessment = ValidityCalculator::default().assess(&pairs(&[(3, 3); 4]));
    assert!(assessment.random_responding.is_none());
    assert_eq!(assessment.reliability, Reliability::Caution);
}

#[test]
fn reliability_ladder() {
    use Severity::*;
    assert_eq!(classify(Vec::<Severity>::new()), Reliability::Good);
    assert_eq!(classify([Moderate]), Reliability::Acceptable);
    assert_eq!(classify([Moderate, Moderate]), Reliability::Caution);
    assert_eq!(classify([High]), Reliability::Caution);
    assert_eq!(classify([High, Moderate]), Reliability::Caution);
    assert_eq!(classify([High, High]), Reliability::Questionable);
    assert_eq!(classify([Moderate, Critical]), Reliability::Invalid);
}

#[test]
fn config_round_trips_with_partial_overrides() {
    let config: ValidityConfig = serde_json::from_value(serde_json::json!({
        "inconsistency_pairs": [{ "first": "q1", "second": "q2" }],
        "endorsement": 5.0
    }))
    .unwrap();
    assert_eq!(config.inconsistency_pairs, vec![ItemPair::new("q1", "q2")]);
    assert_eq!(config.endorsement, 5.0);
    assert_eq!(config.min_scorable_answers, ValidityConfig::default().min_scorable_answers);
}

fn severities() -> impl Strategy<Value = Vec<Severity>> {
    prop::collection::vec(
        prop::sample::select(vec![Severity::Moderate, Severity::High, Severity::Critical]),
        0..8,
    )
}

fn pair_config(count: usize) -> ValidityConfig {
    ValidityConfig {
        inconsistency_pairs: (0..count)
            .map(|n| ItemPair::new(format!("p{n}a"), format!("p{n}b")))
            .collect(),
        ..ValidityConfig::default()
    }
}

fn pair_responses(inconsistent: &[bool]) -> Vec<Response> {
    inconsistent
        .iter()
        .enumerate()
        .flat_map(|(n, &hit)| {
            let (a, b) = if hit { (3, 3) } else { (1, 5) };
            [
                Response::new(format!("p{n}a"), a),
                Response::new(format!("p{n}b"), b),
            ]
        })
        .collect()
}

proptest! {
    #[test]
    fn reliability_ignores_flag_order(mut flags in severities()) {
        let forward = classify(flags.clone());
        flags.reverse();
        prop_assert_eq!(forward, classify(flags.clone()));
        flags.sort();
        prop_assert_eq!(forward, classify(flags));
    }

    #[test]
    fn another_inconsistent_pair_never_lowers_inconsistency(
        mut pattern in prop::collection::vec(any::<bool>(), 1..12)
    ) {
        let before = ValidityCalculator::new(pair_config(pattern.len()))
            .assess(&pair_responses(&pattern))
            .inconsistency
            .unwrap();

        pattern.push(true);
        let calculator = ValidityCalculator::new(pair_config(pattern.len()));
        let after = calculator
            .assess(&pair_responses(&pattern))
            .inconsistency
            .unwrap();

        prop_assert!(after.ratio >= before.ratio);
        let thresholds = calculator.config().inconsistency;
        prop_assert!(thresholds.severity(after.ratio) >= thresholds.severity(before.ratio));
    }
}
