use meridian_core::models::response::{RawValue, Response};
use meridian_core::models::score::Provenance;
use meridian_instruments::normalize::{normalize, normalize_value, numeric_answer, ScaleKind};
use proptest::prelude::*;

fn text(s: &str) -> RawValue {
    RawValue::Text(s.to_string())
}

#[test]
fn numeric_answers_are_taken_as_given() {
    assert_eq!(
        normalize_value(Some(&RawValue::Number(2.0)), ScaleKind::Phq15),
        (2.0, Provenance::Numeric)
    );
    assert_eq!(
        normalize_value(Some(&RawValue::Number(62.5)), ScaleKind::Percent),
        (62.5, Provenance::Numeric)
    );
}

#[test]
fn numeral_text_is_parsed_and_rescaled() {
    assert_eq!(
        normalize_value(Some(&text("3")), ScaleKind::Likert5),
        (3.0, Provenance::ParsedText)
    );
    assert_eq!(
        normalize_value(Some(&text(" 2 ")), ScaleKind::PhqDays),
        (2.0, Provenance::ParsedText)
    );
    // Answer position 5 of 5 is the top of the percentage scale.
    assert_eq!(
        normalize_value(Some(&text("5")), ScaleKind::Percent),
        (100.0, Provenance::ParsedText)
    );
}

#[test]
fn out_of_range_numeral_text_is_defaulted() {
    assert_eq!(
        normalize_value(Some(&text("7")), ScaleKind::Likert5),
        (3.0, Provenance::Defaulted)
    );
}

#[test]
fn labels_resolve_case_and_whitespace_insensitively() {
    assert_eq!(
        normalize_value(Some(&text("Bothered a lot")), ScaleKind::Phq15),
        (2.0, Provenance::Label)
    );
    assert_eq!(
        normalize_value(Some(&text("  Strongly   AGREE ")), ScaleKind::Likert5),
        (5.0, Provenance::Label)
    );
    assert_eq!(
        normalize_value(Some(&text("Nearly every day")), ScaleKind::PhqDays),
        (3.0, Provenance::Label)
    );
    assert_eq!(
        normalize_value(Some(&text("often")), ScaleKind::Percent),
        (75.0, Provenance::Label)
    );
    assert_eq!(
        normalize_value(Some(&text("Yes")), ScaleKind::Binary),
        (1.0, Provenance::Label)
    );
}

#[test]
fn booleans_map_to_the_scale_ends() {
    assert_eq!(
        normalize_value(Some(&RawValue::Bool(true)), ScaleKind::Phq15),
        (2.0, Provenance::Boolean)
    );
    assert_eq!(
        normalize_value(Some(&RawValue::Bool(false)), ScaleKind::Binary),
        (0.0, Provenance::Boolean)
    );
    assert_eq!(
        normalize_value(Some(&RawValue::Bool(false)), ScaleKind::Likert5),
        (1.0, Provenance::Boolean)
    );
}

#[test]
fn unrecognized_and_missing_answers_default_to_neutral() {
    assert_eq!(
        normalize_value(Some(&text("maybe")), ScaleKind::Likert5),
        (3.0, Provenance::Defaulted)
    );
    assert_eq!(
        normalize_value(None, ScaleKind::Phq15),
        (1.0, Provenance::Defaulted)
    );
    assert_eq!(
        normalize_value(Some(&RawValue::Number(f64::NAN)), ScaleKind::Percent),
        (50.0, Provenance::Defaulted)
    );
}

#[test]
fn normalize_keeps_tags() {
    let response = Response::new("bf_1", "agree")
        .with_scale("big_five")
        .with_domain("openness")
        .with_subscale("ideas");
    let item = normalize(&response, ScaleKind::Likert5);
    assert_eq!(item.question_id, "bf_1");
    assert_eq!(item.domain_tag.as_deref(), Some("openness"));
    assert_eq!(item.subscale_tag.as_deref(), Some("ideas"));
    assert_eq!(item.value, 4.0);
}

#[test]
fn numeric_answer_ignores_labels_and_booleans() {
    assert_eq!(numeric_answer(Some(&RawValue::Number(4.0))), Some(4.0));
    assert_eq!(numeric_answer(Some(&text("2"))), Some(2.0));
    assert_eq!(numeric_answer(Some(&text("agree"))), None);
    assert_eq!(numeric_answer(Some(&RawValue::Bool(true))), None);
    assert_eq!(numeric_answer(None), None);
}

fn scales() -> impl Strategy<Value = ScaleKind> {
    prop::sample::select(vec![
        ScaleKind::Binary,
        ScaleKind::Phq15,
        ScaleKind::PhqDays,
        ScaleKind::Likert5,
        ScaleKind::Impairment,
        ScaleKind::Percent,
    ])
}

proptest! {
    #[test]
    fn zero_is_never_treated_as_missing(scale in scales()) {
        prop_assert_eq!(
            normalize_value(Some(&RawValue::Number(0.0)), scale),
            (0.0, Provenance::Numeric)
        );
    }

    #[test]
    fn finite_numbers_pass_through(scale in scales(), value in -1000.0f64..1000.0) {
        prop_assert_eq!(
            normalize_value(Some(&RawValue::Number(value)), scale),
            (value, Provenance::Numeric)
        );
    }

    #[test]
    fn normalization_is_total(scale in scales(), input in ".*") {
        let (value, _) = normalize_value(Some(&RawValue::Text(input)), scale);
        prop_assert!(value.is_finite());
    }
}
