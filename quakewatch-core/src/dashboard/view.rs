use crate::controller::FetchStatus;
use crate::dashboard::FocusTarget;
use crate::feed::FeedMetadata;
use crate::model::{Event, EventId, FilterCriteria};
use crate::pipeline::{EventStats, SortKey};
use chrono::{DateTime, Utc};

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone)]
pub struct DashboardView {
    /// Filtered, then sorted by `sort_key`.
    pub events: Vec<Event>,
    pub stats: EventStats,

    pub status: FetchStatus,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub rejected: usize,
    pub metadata: Option<FeedMetadata>,

    /// Size of the unfiltered event set.
    pub total_events: usize,

    pub criteria: FilterCriteria,
    pub sort_key: SortKey,
    pub selected: Option<EventId>,
    pub focus: Option<FocusTarget>,
}

impl DashboardView {
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    /// Loading with nothing to show yet.
    pub fn is_initial_load(&self) -> bool {
        matches!(self.status, FetchStatus::Idle | FetchStatus::Loading) && self.total_events == 0
    }
}
