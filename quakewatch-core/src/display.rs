//! Presentation helpers shared by renderers: the magnitude scale used for
//! colors and legends, marker sizing, and human-readable formatting.

use chrono::{DateTime, TimeZone, Utc};

const BASE_MARKER_RADIUS: f64 = 5.0;
const MARKER_RADIUS_SCALE: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnitudeClass {
    Major,
    Strong,
    Moderate,
    Light,
    Minor,
    VeryMinor,
    Micro,
    UltraMicro,
}

impl MagnitudeClass {
    /// Strongest first, in legend order.
    pub const ALL: [MagnitudeClass; 8] = [
        MagnitudeClass::Major,
        MagnitudeClass::Strong,
        MagnitudeClass::Moderate,
        MagnitudeClass::Light,
        MagnitudeClass::Minor,
        MagnitudeClass::VeryMinor,
        MagnitudeClass::Micro,
        MagnitudeClass::UltraMicro,
    ];

    pub fn of(magnitude: f64) -> Self {
        match magnitude {
            m if m >= 7.0 => MagnitudeClass::Major,
            m if m >= 6.0 => MagnitudeClass::Strong,
            m if m >= 5.0 => MagnitudeClass::Moderate,
            m if m >= 4.0 => MagnitudeClass::Light,
            m if m >= 3.0 => MagnitudeClass::Minor,
            m if m >= 2.0 => MagnitudeClass::VeryMinor,
            m if m >= 1.0 => MagnitudeClass::Micro,
            _ => MagnitudeClass::UltraMicro,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MagnitudeClass::Major => "Major",
            MagnitudeClass::Strong => "Strong",
            MagnitudeClass::Moderate => "Moderate",
            MagnitudeClass::Light => "Light",
            MagnitudeClass::Minor => "Minor",
            MagnitudeClass::VeryMinor => "Very Minor",
            MagnitudeClass::Micro => "Micro",
            MagnitudeClass::UltraMicro => "Ultra Micro",
        }
    }

    pub fn range_label(self) -> &'static str {
        match self {
            MagnitudeClass::Major => "7.0+",
            MagnitudeClass::Strong => "6.0-6.9",
            MagnitudeClass::Moderate => "5.0-5.9",
            MagnitudeClass::Light => "4.0-4.9",
            MagnitudeClass::Minor => "3.0-3.9",
            MagnitudeClass::VeryMinor => "2.0-2.9",
            MagnitudeClass::Micro => "1.0-1.9",
            MagnitudeClass::UltraMicro => "<1.0",
        }
    }

    /// Hex color.
    pub fn color(self) -> &'static str {
        match self {
            MagnitudeClass::Major => "#b91c1c",
            MagnitudeClass::Strong => "#dc2626",
            MagnitudeClass::Moderate => "#ea580c",
            MagnitudeClass::Light => "#f97316",
            MagnitudeClass::Minor => "#fb923c",
            MagnitudeClass::VeryMinor => "#fbbf24",
            MagnitudeClass::Micro => "#a3e635",
            MagnitudeClass::UltraMicro => "#22c55e",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        let hex = &self.color()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

pub fn marker_radius(magnitude: f64) -> f64 {
    BASE_MARKER_RADIUS + magnitude * MARKER_RADIUS_SCALE
}

pub fn format_magnitude(magnitude: f64) -> String {
    format!("M {magnitude:.1}")
}

/// Absolute depth, one decimal.
pub fn format_depth(depth_km: f64) -> String {
    format!("{:.1} km", depth_km.abs())
}

pub fn format_time(epoch_ms: i64) -> String {
    match Utc.timestamp_millis_opt(epoch_ms).single() {
        Some(t) => t.format("%b %-d, %Y, %H:%M UTC").to_string(),
        None => "unknown time".to_string(),
    }
}

/// "Just now", "5 minutes ago", "1 hour ago", "3 days ago".
pub fn relative_time(epoch_ms: i64, now: DateTime<Utc>) -> String {
    let diff_ms = now.timestamp_millis() - epoch_ms;
    let minutes = diff_ms.div_euclid(60_000);
    let hours = minutes.div_euclid(60);
    let days = hours.div_euclid(24);

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else {
        plural(days, "day")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
