use serde_json::{Value, json};

/// One GeoJSON feature the way the USGS summary feed shapes it.
pub fn feature(id: &str, mag: f64, place: &str, depth_km: f64) -> Value {
    json!({
        "type": "Feature",
        "id": id,
        "properties": {
            "mag": mag,
            "place": place,
            "time": 1_700_000_000_000i64,
            "url": format!("https://earthquake.usgs.gov/earthquakes/eventpage/{id}"),
            "tsunami": 0,
            "magType": "ml"
        },
        "geometry": {
            "type": "Point",
            "coordinates": [-122.8, 38.8, depth_km]
        }
    })
}

pub fn feed_body(features: Vec<Value>) -> String {
    json!({
        "type": "FeatureCollection",
        "metadata": {
            "generated": 1_700_000_060_000i64,
            "title": "USGS All Earthquakes, Past Day",
            "count": features.len()
        },
        "features": features
    })
    .to_string()
}

/// Two quakes, one of them significant.
pub fn two_quakes() -> String {
    feed_body(vec![
        feature("nc75000001", 1.2, "10km NW of The Geysers, CA", 2.1),
        feature("us7000abcd", 5.4, "120 km S of Sand Point, Alaska", 35.0),
    ])
}

pub fn three_quakes() -> String {
    feed_body(vec![
        feature("nc75000001", 1.2, "10km NW of The Geysers, CA", 2.1),
        feature("us7000abcd", 5.4, "120 km S of Sand Point, Alaska", 35.0),
        feature("ak0240001", 3.1, "Central Alaska", 90.0),
    ])
}
