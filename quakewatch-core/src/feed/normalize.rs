use crate::feed::error::{FetchError, RecordRejection, RejectReason};
use crate::model::{Event, EventId};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// `properties` keys consumed by the normalizer. Everything else lands in `Event::extra`.
const CONSUMED_PROPERTIES: &[&str] = &["mag", "place", "time", "url"];

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedMetadata {
    #[serde(default)]
    pub title: Option<String>,

    /// Epoch milliseconds at which the upstream generated the document.
    #[serde(default)]
    pub generated: Option<i64>,

    #[serde(default)]
    pub count: Option<u64>,
}

/// Result of normalizing one feed document.
#[derive(Debug, Clone, Default)]
pub struct NormalizedFeed {
    pub events: Vec<Event>,
    pub rejected: Vec<RecordRejection>,
    pub metadata: Option<FeedMetadata>,
}

impl NormalizedFeed {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Parse a feed body and normalize every feature in it.
///
/// Only a broken top level fails the whole document; bad records are dropped
/// and reported in `NormalizedFeed::rejected`.
pub fn normalize_feed(body: &str) -> Result<NormalizedFeed, FetchError> {
    let document: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::malformed(format!("invalid JSON: {e}")))?;

    let Some(root) = document.as_object() else {
        return Err(FetchError::malformed("top-level value is not an object"));
    };

    let features = root
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::malformed("missing `features` array"))?;

    let metadata = root
        .get("metadata")
        .and_then(|m| serde_json::from_value::<FeedMetadata>(m.clone()).ok());

    let mut seen: HashSet<EventId> = HashSet::with_capacity(features.len());
    let mut events = Vec::with_capacity(features.len());
    let mut rejected = Vec::new();

    for (index, feature) in features.iter().enumerate() {
        match normalize_feature(index, feature) {
            Ok(event) => {
                if seen.insert(event.id.clone()) {
                    events.push(event);
                } else {
                    rejected.push(RecordRejection {
                        index,
                        id: Some(event.id.0),
                        reason: RejectReason::DuplicateId,
                    });
                }
            }
            Err(rejection) => {
                tracing::debug!(
                    index = rejection.index,
                    id = rejection.id.as_deref().unwrap_or("<none>"),
                    reason = %rejection.reason,
                    "feature rejected"
                );
                rejected.push(rejection);
            }
        }
    }

    Ok(NormalizedFeed {
        events,
        rejected,
        metadata,
    })
}

/// Validate one raw GeoJSON feature and shape it into an `Event`.
pub fn normalize_feature(index: usize, feature: &Value) -> Result<Event, RecordRejection> {
    let reject = |id: Option<&str>, reason| RecordRejection {
        index,
        id: id.map(str::to_string),
        reason,
    };

    let Some(feature) = feature.as_object() else {
        return Err(reject(None, RejectReason::NotAnObject));
    };

    let id = feature
        .get("id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| reject(None, RejectReason::MissingId))?;

    let properties = feature
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| reject(Some(id), RejectReason::MissingProperties))?;

    // Explicit null is allowed; an absent key is not.
    let magnitude = match properties.get("mag") {
        Some(Value::Null) => None,
        Some(v) => Some(
            v.as_f64()
                .ok_or_else(|| reject(Some(id), RejectReason::InvalidMagnitude))?,
        ),
        None => return Err(reject(Some(id), RejectReason::InvalidMagnitude)),
    };

    let place = match properties.get("place") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) => String::new(),
        _ => return Err(reject(Some(id), RejectReason::InvalidPlace)),
    };

    let occurred_at_ms = properties
        .get("time")
        .and_then(Value::as_i64)
        .ok_or_else(|| reject(Some(id), RejectReason::InvalidTime))?;

    let detail_url = properties
        .get("url")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let (longitude, latitude, depth_km) =
        coordinates(feature).ok_or_else(|| reject(Some(id), RejectReason::InvalidGeometry))?;

    Ok(Event {
        id: EventId(id.to_string()),
        magnitude,
        place,
        occurred_at_ms,
        longitude,
        latitude,
        depth_km,
        detail_url,
        extra: extra_properties(properties),
    })
}

fn coordinates(feature: &Map<String, Value>) -> Option<(f64, f64, f64)> {
    let coords = feature
        .get("geometry")?
        .get("coordinates")?
        .as_array()?;

    match coords.as_slice() {
        [lon, lat, depth, ..] => Some((lon.as_f64()?, lat.as_f64()?, depth.as_f64()?)),
        _ => None,
    }
}

fn extra_properties(properties: &Map<String, Value>) -> Map<String, Value> {
    properties
        .iter()
        .filter(|(k, _)| !CONSUMED_PROPERTIES.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
