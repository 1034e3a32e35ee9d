use crate::model::Event;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most recent first.
    #[default]
    Time,
    /// Strongest first.
    Magnitude,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Time => f.write_str("time"),
            SortKey::Magnitude => f.write_str("magnitude"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "time" => Ok(SortKey::Time),
            "magnitude" | "mag" => Ok(SortKey::Magnitude),
            other => Err(format!("unknown sort key '{other}' (expected time or magnitude)")),
        }
    }
}

/// Descending copy of `events` by `key`. Equal keys keep their input order.
pub fn sort(events: &[Event], key: SortKey) -> Vec<Event> {
    let mut out = events.to_vec();

    // `sort_by` is stable.
    match key {
        SortKey::Time => out.sort_by(|a, b| b.occurred_at_ms.cmp(&a.occurred_at_ms)),
        SortKey::Magnitude => out.sort_by(|a, b| {
            b.magnitude_value()
                .partial_cmp(&a.magnitude_value())
                .unwrap_or(Ordering::Equal)
        }),
    }

    out
}
