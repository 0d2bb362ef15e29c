#![allow(dead_code)]

use meridian_core::models::response::{RawValue, Response, ResponseSet};

pub fn tagged(scale: &str, id: impl Into<String>, value: impl Into<RawValue>) -> Response {
    Response::new(id, value).with_scale(scale)
}

pub fn numbered(scale: &str, values: &[i32]) -> Vec<Response> {
    values
        .iter()
        .enumerate()
        .map(|(n, &v)| tagged(scale, format!("{scale}_{}", n + 1), v))
        .collect()
}

pub fn validity_pairs(answers: &[(i32, i32)]) -> Vec<Response> {
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

/// A response set touching several instruments: severe depression with an
/// endorsed self-harm item, severe anxiety, high somatic burden, and one
/// high validity flag.
pub fn clinical_set() -> ResponseSet {
    let mut responses = numbered("phq9", &[3, 3, 3, 2, 2, 2, 1, 1, 2]);
    responses.extend(numbered("gad7", &[3; 7]));
    responses.extend(numbered("phq15", &[2; 10]));
    responses.extend(validity_pairs(&[
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
    ]));
    let mut set = ResponseSet::new(responses);
    set.metadata.age = Some(34);
    set.metadata.tier = Some("standard".to_string());
    set
}
