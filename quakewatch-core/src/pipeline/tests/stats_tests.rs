use crate::pipeline::{EventStats, summarize};
use crate::test_support::event;
use pretty_assertions::assert_eq;

#[test]
fn empty_set_reports_zeroes() {
    assert_eq!(
        summarize(&[]),
        EventStats {
            total: 0,
            significant_count: 0,
            strongest: 0.0,
        }
    );
}

#[test]
fn counts_significant_and_strongest() {
    let events = vec![event("a", 3.2), event("b", 4.5), event("c", 5.0)];

    assert_eq!(
        summarize(&events),
        EventStats {
            total: 3,
            significant_count: 2,
            strongest: 5.0,
        }
    );
}

#[test]
fn significant_threshold_is_inclusive() {
    let events = vec![event("a", 3.99), event("b", 4.0)];

    assert_eq!(summarize(&events).significant_count, 1);
}

#[test]
fn strongest_never_drops_below_zero() {
    let events = vec![event("a", -0.8), event("b", -0.2)];
    let stats = summarize(&events);

    assert_eq!(stats.total, 2);
    assert_eq!(stats.strongest, 0.0);
}
