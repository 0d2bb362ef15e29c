use meridian_core::models::validity::{Reliability, Severity};

/// Overall reliability from the multiset of flag severities.
///
/// Only the counts matter, so the result is independent of the order the
/// flags were raised in.
pub fn classify(severities: impl IntoIterator<Item = Severity>) -> Reliability {
    let (mut critical, mut high, mut moderate) = (0usize, 0usize, 0usize);
    for severity in severities {
        match severity {
            Severity::Critical => critical += 1,
            Severity::High => high += 1,
            Severity::Moderate => moderate += 1,
        }
    }

    if critical > 0 {
        Reliability::Invalid
    } else if high >= 2 {
        Reliability::Questionable
    } else if high == 1 || moderate >= 2 {
        Reliability::Caution
    } else if moderate == 1 {
        Reliability::Acceptable
    } else {
        Reliability::Good
    }
}
