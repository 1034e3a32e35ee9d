use crate::feed::{DEFAULT_REQUEST_TIMEOUT, USGS_ALL_DAY_FEED};
use crate::model::FilterCriteria;
use crate::pipeline::SortKey;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub polling: PollingConfig,

    /// Initial filter criteria.
    #[serde(default)]
    pub filter: FilterCriteria,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    #[serde(default = "default_feed_url")]
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PollingConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: default_interval_secs(),
        }
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    #[serde(default)]
    pub sort: SortKey,

    /// Maximum rows rendered in the listing.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            sort: SortKey::default(),
            limit: default_limit(),
        }
    }
}

fn default_feed_url() -> String {
    USGS_ALL_DAY_FEED.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

/// Five minutes.
fn default_interval_secs() -> u64 {
    300
}

fn default_limit() -> usize {
    25
}
