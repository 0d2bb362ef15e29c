use meridian_core::models::gate::Caveat;
use meridian_core::models::response::Response;
use meridian_core::models::score::{Derivation, Level, Provenance, ScoredItem};
use meridian_instruments::aggregate::{facet_domain_score, summarize};
use meridian_instruments::gate::{GateOverrides, GatePolicy};
use meridian_instruments::instruments::big_five::BigFive;
use meridian_instruments::instruments::phq15::Phq15;
use meridian_instruments::scoring::{round_half_up, BandTable};
use meridian_instruments::Instrument;
use proptest::prelude::*;

fn item(value: f64, provenance: Provenance) -> ScoredItem {
    ScoredItem {
        question_id: "q".to_string(),
        subscale_tag: None,
        domain_tag: None,
        value,
        provenance,
    }
}

#[test]
fn empty_summary_has_no_average() {
    let none: [ScoredItem; 0] = [];
    let summary = summarize(&none);
    assert_eq!(summary.total, 0.0);
    assert_eq!(summary.count, 0);
    assert_eq!(summary.average, None);
    assert!(!summary.has_data());
}

#[test]
fn defaulted_items_are_not_data() {
    let only_defaults = [item(3.0, Provenance::Defaulted), item(3.0, Provenance::Defaulted)];
    let summary = summarize(&only_defaults);
    assert_eq!(summary.count, 0);
    assert_eq!(summary.defaulted, 2);
    assert_eq!(summary.average, None);

    let mixed = [
        item(5.0, Provenance::Numeric),
        item(3.0, Provenance::Defaulted),
        item(1.0, Provenance::Label),
    ];
    let summary = summarize(&mixed);
    assert_eq!(summary.total, 6.0);
    assert_eq!(summary.count, 2);
    assert_eq!(summary.defaulted, 1);
    assert_eq!(summary.average, Some(3.0));
}

#[test]
fn zero_scores_count_as_data() {
    let zeros = [item(0.0, Provenance::Numeric), item(0.0, Provenance::Boolean)];
    let summary = summarize(&zeros);
    assert_eq!(summary.count, 2);
    assert_eq!(summary.average, Some(0.0));
}

#[test]
fn band_boundaries_are_lower_inclusive() {
    let bands = BandTable::new(
        Level::Minimal,
        &[(5.0, Level::Low), (10.0, Level::Medium), (15.0, Level::High)],
    );
    assert_eq!(bands.classify(0.0), Level::Minimal);
    assert_eq!(bands.classify(4.9), Level::Minimal);
    assert_eq!(bands.classify(5.0), Level::Low);
    assert_eq!(bands.classify(9.99), Level::Low);
    assert_eq!(bands.classify(10.0), Level::Medium);
    assert_eq!(bands.classify(15.0), Level::High);
    assert_eq!(bands.classify(30.0), Level::High);
    assert_eq!(bands.classify(-1.0), Level::Minimal);
    assert_eq!(bands.classify(f64::NAN), Level::Minimal);
}

#[test]
fn trait_levels_cover_the_likert_range() {
    let bands = BandTable::trait_levels();
    assert_eq!(bands.classify(1.0), Level::VeryLow);
    assert_eq!(bands.classify(1.5), Level::Low);
    assert_eq!(bands.classify(3.0), Level::Average);
    assert_eq!(bands.classify(3.5), Level::High);
    assert_eq!(bands.classify(5.0), Level::VeryHigh);
}

#[test]
fn rounding_is_half_up() {
    assert_eq!(round_half_up(2.5, 0), 3.0);
    assert_eq!(round_half_up(0.125, 2), 0.13);
    assert_eq!(round_half_up(3.0, 2), 3.0);
    assert_eq!(round_half_up(14.04, 1), 14.0);
}

#[test]
fn rounding_ties_are_decided_in_decimal() {
    assert_eq!(round_half_up(1.005, 2), 1.01);
    assert_eq!(round_half_up(2.495, 2), 2.5);
    assert_eq!(round_half_up(-1.005, 2), -1.01);
    assert_eq!(facet_domain_score(&[3.33, 4.8], 2), Some(4.07));
    assert_eq!(facet_domain_score(&[1.67, 2.6], 2), Some(2.14));
    assert!(round_half_up(f64::NAN, 2).is_nan());
}

#[test]
fn gate_thresholds() {
    let policy = GatePolicy::new(5, 10);

    assert!(!policy.gate(4, 0, 1.0).is_reportable());

    let thin = policy.gate(5, 2, 1.0);
    assert!(thin.is_reportable());
    assert_eq!(thin.confidence().caveat, Some(Caveat::LowConfidence));
    assert_eq!(thin.confidence().evidence.defaulted_items, 2);

    let full = policy.gate(10, 0, 1.0);
    assert!(full.is_reportable());
    assert_eq!(full.confidence().caveat, None);
}

#[test]
fn zero_real_items_never_pass() {
    let permissive = GatePolicy::new(0, 0);
    assert!(!permissive.gate(0, 5, 1.0).is_reportable());
}

#[test]
fn overrides_replace_defaults() {
    let mut gates = GateOverrides::default();
    gates.insert("phq15.somatic", GatePolicy::new(12, 15));
    let phq15 = Phq15::new(&gates);
    assert_eq!(phq15.domains()[0].gate, GatePolicy::new(12, 15));
    assert_eq!(
        gates.resolve("gad7.anxiety", GatePolicy::new(4, 7)),
        GatePolicy::new(4, 7)
    );
}

const OPENNESS_FACETS: [&str; 6] = ["fantasy", "aesthetics", "feelings", "actions", "ideas", "values"];

proptest! {
    #[test]
    fn facet_derived_domain_round_trips(answers in prop::collection::vec(prop::collection::vec(1i32..=5, 3), 6)) {
        let responses: Vec<Response> = OPENNESS_FACETS
            .iter()
            .zip(&answers)
            .flat_map(|(facet, values)| {
                values.iter().enumerate().map(move |(n, &value)| {
                    Response::new(format!("bf_openness_{facet}_{n}"), value)
                        .with_scale("big_five")
                        .with_domain("openness")
                        .with_subscale(*facet)
                })
            })
            .collect();

        let output = BigFive::default().score(&responses).unwrap();
        let openness = output.domain("openness").unwrap();
        let score = openness.score.value().unwrap();

        let facet_averages: Vec<f64> = openness
            .subscales
            .iter()
            .map(|s| s.score.value().unwrap().average)
            .collect();
        for (average, values) in facet_averages.iter().zip(&answers) {
            let sum: i32 = values.iter().sum();
            prop_assert_eq!(*average, round_half_up(f64::from(sum) / 3.0, 2));
        }

        prop_assert_eq!(Some(score.score), facet_domain_score(&facet_averages, 2));
        prop_assert_eq!(&score.derivation, &Derivation::FacetMeans { facets_used: 6 });
        prop_assert_eq!(score.level, BandTable::trait_levels().classify(score.score));
    }
}
