//! Composition root
//!
//! `Dashboard` is the single state container: the fetch lifecycle lives in a
//! shared `FetchController`, while the consumer-owned pieces (criteria, sort
//! key, selection) are plain fields changed only through the mutators below.
//! Derived data is recomputed on every `view()`.

mod selection;
mod view;


pub use selection::{FOCUS_ZOOM, FocusTarget, Selection};
pub use view::DashboardView;

use crate::conf::DashboardConfig;
use crate::controller::{FetchController, FetchOutcome, PollError, Poller};
use crate::feed::{FeedSource, FetchError, HttpFeedSource};
use crate::model::{EventId, FilterCriteria};
use crate::pipeline::{SortKey, filter, sort, summarize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct Dashboard {
    controller: Arc<FetchController>,
    poller: Poller,
    criteria: FilterCriteria,
    sort_key: SortKey,
    selection: Selection,
}

impl Dashboard {
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        let controller = Arc::new(FetchController::new(source));
        Self {
            poller: Poller::new(controller.clone()),
            controller,
            criteria: FilterCriteria::default(),
            sort_key: SortKey::default(),
            selection: Selection::default(),
        }
    }

    /// Build a dashboard reading the configured HTTP feed, with the configured
    /// initial criteria and sort key. Polling is not started.
    pub fn from_config(cfg: &DashboardConfig) -> Result<Self, FetchError> {
        let source = HttpFeedSource::new(&cfg.feed.url, cfg.feed.timeout())?;

        let mut dashboard = Self::new(Arc::new(source));
        dashboard.criteria = cfg.filter.clone();
        dashboard.sort_key = cfg.display.sort;

        Ok(dashboard)
    }

    /// Kick off the first fetch.
    pub fn start(&self) -> JoinHandle<FetchOutcome> {
        tracing::info!("dashboard starting");
        self.controller.fetch_now()
    }

    /// Stop background polling. In-flight fetches still complete.
    pub fn shutdown(&mut self) {
        self.poller.stop();
        tracing::info!("dashboard shut down");
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.controller.subscribe()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    /// Derive the current listing, statistics and focus from the latest snapshot.
    pub fn view(&self) -> DashboardView {
        let snapshot = self.controller.snapshot();

        let filtered = filter(snapshot.events.as_slice(), &self.criteria);
        let stats = summarize(&filtered);
        let focus = self.selection.focus(&filtered);
        let events = sort(&filtered, self.sort_key);

        DashboardView {
            events,
            stats,
            status: snapshot.status,
            error: snapshot.error.clone(),
            last_updated: snapshot.last_updated,
            rejected: snapshot.rejected,
            metadata: snapshot.metadata.clone(),
            total_events: snapshot.events.len(),
            criteria: self.criteria.clone(),
            sort_key: self.sort_key,
            selected: self.selection.id().cloned(),
            focus,
        }
    }
}

/// Mutators
impl Dashboard {
    pub fn set_filter_criteria(&mut self, criteria: FilterCriteria) {
        tracing::debug!(?criteria, "filter criteria changed");
        self.criteria = criteria;
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
    }

    pub fn fetch_now(&self) -> JoinHandle<FetchOutcome> {
        self.controller.fetch_now()
    }

    pub fn set_polling(&mut self, enabled: bool, interval: Duration) -> Result<(), PollError> {
        if enabled {
            self.poller.start(interval)
        } else {
            self.poller.stop();
            Ok(())
        }
    }

    pub fn select(&mut self, id: impl Into<EventId>) {
        let id = id.into();
        tracing::debug!(%id, "event selected");
        self.selection.select(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}
