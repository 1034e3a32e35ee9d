use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Source-assigned event identifier. Unique within one fetched set only.
#[derive(Debug, Clone, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize)]
pub struct EventId(pub String);

impl EventId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EventId {
    fn from(value: String) -> Self {
        EventId(value)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        EventId(value.to_string())
    }
}

/// One normalized seismic record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: EventId,

    /// `None` when the feed carried an explicit `null`.
    pub magnitude: Option<f64>,

    pub place: String,
    pub occurred_at_ms: i64,

    pub longitude: f64,
    pub latitude: f64,

    /// Signed as reported; negative values are above the reference surface.
    pub depth_km: f64,

    pub detail_url: String,

    /// Remaining `properties` fields, carried for display only.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Event {
    /// Magnitude used for filtering, ordering and statistics.
    /// A missing magnitude compares as zero.
    pub fn magnitude_value(&self) -> f64 {
        self.magnitude.unwrap_or(0.0)
    }

    pub fn abs_depth_km(&self) -> f64 {
        self.depth_km.abs()
    }
}

/// Snapshot of the events from the most recent successful fetch.
///
/// Cheap to clone; replaced wholesale, never patched.
#[derive(Debug, Clone, Default)]
pub struct EventSet {
    events: Arc<[Event]>,
}

impl EventSet {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into(),
        }
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
