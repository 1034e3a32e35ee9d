use crate::model::{Event, FilterCriteria};

/// Events passing `criteria`, in input order.
pub fn filter(events: &[Event], criteria: &FilterCriteria) -> Vec<Event> {
    events
        .iter()
        .filter(|event| criteria.matches(event))
        .cloned()
        .collect()
}
