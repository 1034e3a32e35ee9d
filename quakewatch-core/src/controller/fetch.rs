use crate::controller::state::{FeedSnapshot, FetchOutcome, FetchStatus};
use crate::feed::{FeedSource, FetchError, NormalizedFeed, normalize_feed};
use crate::model::EventSet;
use arc_swap::ArcSwap;
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Owns the asynchronous retrieval of the feed and the state around it.
///
/// Readers load the current `FeedSnapshot` lock-free. Writers (issuing a
/// fetch, completing one) are serialized through `writer`, which also holds the
/// latest issued sequence number.
pub struct FetchController {
    source: Arc<dyn FeedSource>,
    snapshot: ArcSwap<FeedSnapshot>,
    writer: Mutex<u64>,
    revision: watch::Sender<u64>,
}

impl FetchController {
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            source,
            snapshot: ArcSwap::from_pointee(FeedSnapshot::default()),
            writer: Mutex::new(0),
            revision,
        }
    }

    pub fn snapshot(&self) -> Arc<FeedSnapshot> {
        self.snapshot.load_full()
    }

    /// Receiver whose value changes every time a new snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn latest_issued(&self) -> u64 {
        *self.lock_writer()
    }

    /// Start a fetch on the runtime and return without waiting for it.
    pub fn fetch_now(self: &Arc<Self>) -> JoinHandle<FetchOutcome> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.fetch().await })
    }

    /// Run one full fetch cycle: issue, request, normalize, publish.
    pub async fn fetch(&self) -> FetchOutcome {
        let seq = self.begin();

        let result = match self.source.fetch_feed().await {
            Ok(body) => normalize_feed(&body),
            Err(e) => Err(e),
        };

        self.complete(seq, result)
    }

    fn begin(&self) -> u64 {
        let mut latest = self.lock_writer();
        *latest += 1;
        let seq = *latest;

        let current = self.snapshot.load_full();
        self.publish(FeedSnapshot {
            status: FetchStatus::Loading,
            ..FeedSnapshot::clone(&current)
        });

        tracing::debug!(seq, source = self.source.describe(), "fetch issued");
        seq
    }

    fn complete(&self, seq: u64, result: Result<NormalizedFeed, FetchError>) -> FetchOutcome {
        let latest = self.lock_writer();

        if seq != *latest {
            tracing::info!(seq, latest = *latest, "discarding superseded feed response");
            return FetchOutcome::Superseded {
                seq,
                latest: *latest,
            };
        }

        let current = self.snapshot.load_full();

        match result {
            Ok(feed) => {
                let events = feed.events.len();
                let rejected = feed.rejected_count();

                if rejected > 0 {
                    tracing::warn!(seq, rejected, "dropped malformed feed records");
                }

                self.publish(FeedSnapshot {
                    events: EventSet::new(feed.events),
                    status: FetchStatus::Success,
                    error: None,
                    last_updated: Some(Utc::now()),
                    rejected,
                    metadata: feed.metadata,
                    applied_seq: seq,
                });

                tracing::info!(
                    seq,
                    old_events = current.events.len(),
                    events,
                    rejected,
                    "event set replaced"
                );

                FetchOutcome::Applied {
                    seq,
                    events,
                    rejected,
                }
            }
            Err(err) => {
                let error = err.to_string();
                tracing::warn!(seq, kind = ?err.kind(), error = %error, "feed fetch failed");

                // Keep the previous events; only the status and message change.
                self.publish(FeedSnapshot {
                    status: FetchStatus::Failure,
                    error: Some(error.clone()),
                    ..FeedSnapshot::clone(&current)
                });

                FetchOutcome::Failed { seq, error }
            }
        }
    }

    /// Atomic swap, then notify subscribers.
    fn publish(&self, next: FeedSnapshot) {
        self.snapshot.store(Arc::new(next));
        self.revision.send_modify(|rev| *rev += 1);
    }

    fn lock_writer(&self) -> MutexGuard<'_, u64> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
