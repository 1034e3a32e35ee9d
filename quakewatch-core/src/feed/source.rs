use crate::feed::error::FetchError;
use async_trait::async_trait;
use std::time::Duration;

/// USGS summary feed: every event of the past day.
pub const USGS_ALL_DAY_FEED: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where raw feed documents come from.
///
/// One call is exactly one outbound request; implementations must not retry.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Human-readable location of the feed, used in logs.
    fn describe(&self) -> &str;

    /// Fetch the raw document body.
    async fn fetch_feed(&self) -> Result<String, FetchError>;
}

/// `FeedSource` backed by an HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: reqwest::Client,
    url: String,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quakewatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::transport(url.clone(), e))?;

        Ok(Self { client, url })
    }

}

#[async_trait]
impl FeedSource for HttpFeedSource {
    fn describe(&self) -> &str {
        &self.url
    }

    async fn fetch_feed(&self) -> Result<String, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::transport(self.url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::transport(self.url.as_str(), e))
    }
}
