//! Feed ingestion
//!
//! A `FeedSource` hands back the raw GeoJSON body; `normalize_feed` turns it
//! into validated `Event`s. A body that cannot be read as a feed at all fails
//! the fetch, while individual bad features are dropped and counted.

mod error;
mod normalize;
mod source;


pub use error::{FetchError, FetchErrorKind, RecordRejection, RejectReason};
pub use normalize::{FeedMetadata, NormalizedFeed, normalize_feature, normalize_feed};
pub use source::{DEFAULT_REQUEST_TIMEOUT, FeedSource, HttpFeedSource, USGS_ALL_DAY_FEED};
