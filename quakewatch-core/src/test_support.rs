//-----------------------------------------------------------------------------
// Test helpers shared by the unit test modules
//-----------------------------------------------------------------------------
use crate::feed::{FeedSource, FetchError};
use crate::model::{Event, EventId};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn event(id: &str, magnitude: f64) -> Event {
    Event {
        id: EventId::from(id),
        magnitude: Some(magnitude),
        place: format!("{id} place"),
        occurred_at_ms: 1_700_000_000_000,
        longitude: -117.6,
        latitude: 35.7,
        depth_km: 10.0,
        detail_url: format!("https://example.test/{id}"),
        extra: Map::new(),
    }
}

pub fn event_at(id: &str, magnitude: f64, occurred_at_ms: i64) -> Event {
    Event {
        occurred_at_ms,
        ..event(id, magnitude)
    }
}

pub fn event_in(id: &str, magnitude: f64, place: &str, depth_km: f64) -> Event {
    Event {
        place: place.to_string(),
        depth_km,
        ..event(id, magnitude)
    }
}

pub fn ids(events: &[Event]) -> Vec<&str> {
    events.iter().map(|e| e.id.as_str()).collect()
}

pub fn feature(id: &str, mag: f64, place: &str) -> Value {
    json!({
        "type": "Feature",
        "id": id,
        "properties": {
            "mag": mag,
            "place": place,
            "time": 1_700_000_000_000i64,
            "url": format!("https://example.test/{id}"),
            "status": "reviewed",
            "tsunami": 0
        },
        "geometry": {
            "type": "Point",
            "coordinates": [-117.6, 35.7, 10.0]
        }
    })
}

pub fn feed_body(features: Vec<Value>) -> String {
    json!({
        "type": "FeatureCollection",
        "metadata": {
            "generated": 1_700_000_100_000i64,
            "title": "USGS All Earthquakes, Past Day",
            "count": features.len()
        },
        "features": features
    })
    .to_string()
}

/// One scripted response for `ScriptedSource`.
pub enum Scripted {
    Body(String),
    Fail(&'static str),
    Delayed(Duration, String),
}

/// In-memory `FeedSource` replaying scripted responses in call order.
pub struct ScriptedSource {
    script: Mutex<VecDeque<Scripted>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for ScriptedSource {
    fn describe(&self) -> &str {
        "scripted"
    }

    async fn fetch_feed(&self) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();

        match next {
            Some(Scripted::Body(body)) => Ok(body),
            Some(Scripted::Fail(reason)) => Err(FetchError::malformed(reason)),
            Some(Scripted::Delayed(delay, body)) => {
                tokio::time::sleep(delay).await;
                Ok(body)
            }
            None => Ok(feed_body(Vec::new())),
        }
    }
}
