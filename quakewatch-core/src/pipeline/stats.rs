use crate::model::Event;
use serde::Serialize;

/// Magnitude at or above which an event counts as significant.
pub const SIGNIFICANT_MAGNITUDE: f64 = 4.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EventStats {
    pub total: usize,
    pub significant_count: usize,

    /// Largest magnitude in the set. Starts from zero, so an empty set reports `0.0`.
    pub strongest: f64,
}

pub fn summarize(events: &[Event]) -> EventStats {
    events.iter().fold(EventStats::default(), |mut stats, event| {
        let mag = event.magnitude_value();

        stats.total += 1;
        if mag >= SIGNIFICANT_MAGNITUDE {
            stats.significant_count += 1;
        }
        if mag > stats.strongest {
            stats.strongest = mag;
        }

        stats
    })
}
