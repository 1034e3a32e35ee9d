use crate::feed::FeedMetadata;
use crate::model::EventSet;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    Loading,
    Success,
    Failure,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FetchStatus::Idle => "idle",
            FetchStatus::Loading => "loading",
            FetchStatus::Success => "success",
            FetchStatus::Failure => "failure",
        };
        f.write_str(s)
    }
}

/// Immutable view of everything the fetch lifecycle owns.
///
/// A new snapshot is published as one unit, so readers never observe new
/// events alongside an old timestamp or error.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub events: EventSet,
    pub status: FetchStatus,

    /// Message of the most recent failure; cleared by the next success.
    pub error: Option<String>,

    /// When the current `events` were fetched.
    pub last_updated: Option<DateTime<Utc>>,

    /// Records dropped while normalizing the current `events`.
    pub rejected: usize,

    pub metadata: Option<FeedMetadata>,

    /// Sequence number of the fetch that produced this snapshot's data.
    pub applied_seq: u64,
}

/// How one fetch cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { seq: u64, events: usize, rejected: usize },
    Failed { seq: u64, error: String },

    /// A newer fetch was issued before this one completed; its result was dropped.
    Superseded { seq: u64, latest: u64 },
}
