use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use quakewatch_core::controller::FetchStatus;
use quakewatch_core::dashboard::DashboardView;
use quakewatch_core::display::{
    MagnitudeClass, format_depth, format_magnitude, format_time, marker_radius, relative_time,
};
use quakewatch_core::model::Event;
use std::fmt::Write as _;
use std::io::{self, Write};

const PLACE_WIDTH: usize = 44;

/// Clear the terminal and draw `frame` from the top-left corner.
pub fn redraw(frame: &str) {
    let mut out = io::stdout().lock();
    let _ = write!(out, "\x1b[2J\x1b[H{frame}");
    let _ = out.flush();
}

pub fn render_view(view: &DashboardView, limit: usize, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    render_header(&mut out, view, now);
    render_filters(&mut out, view);
    let _ = writeln!(out);

    if view.status == FetchStatus::Failure && view.total_events == 0 {
        render_error(&mut out, view);
        return out;
    }

    render_listing(&mut out, view, limit, now);
    let _ = writeln!(out);
    render_stats(&mut out, view);
    render_focus(&mut out, view);

    if view.status == FetchStatus::Failure {
        let _ = writeln!(out);
        render_error(&mut out, view);
    }

    out
}

fn render_header(out: &mut String, view: &DashboardView, now: DateTime<Utc>) {
    let title = view
        .metadata
        .as_ref()
        .and_then(|m| m.title.as_deref())
        .unwrap_or("Recent Earthquakes");
    let _ = writeln!(out, "{}", title.bold());

    let mut status = format!("Status: {}", view.status);
    if view.is_loading() && !view.is_initial_load() {
        status.push_str(" (refreshing)");
    }
    if let Some(updated) = view.last_updated {
        let _ = write!(
            status,
            " | Last updated: {}",
            relative_time(updated.timestamp_millis(), now)
        );
    }
    if let Some(generated) = view.metadata.as_ref().and_then(|m| m.generated) {
        let _ = write!(status, " | Feed generated: {}", format_time(generated));
    }
    let _ = write!(status, " | {} events", view.total_events);
    if view.rejected > 0 {
        let _ = write!(status, " ({} malformed dropped)", view.rejected);
    }
    let _ = writeln!(out, "{}", status.dimmed());
}

fn render_filters(out: &mut String, view: &DashboardView) {
    let c = &view.criteria;
    let depth = c
        .max_depth_km
        .map(|d| format!("<= {d:.1} km"))
        .unwrap_or_else(|| "any".to_string());
    let search = if c.search_term.is_empty() {
        "-".to_string()
    } else {
        format!("\"{}\"", c.search_term)
    };

    let _ = writeln!(
        out,
        "Filters: M >= {:.1} | depth {depth} | search {search} | sort by {}",
        c.min_magnitude, view.sort_key
    );
}

fn render_listing(out: &mut String, view: &DashboardView, limit: usize, now: DateTime<Utc>) {
    if view.is_initial_load() {
        let _ = writeln!(out, "Loading earthquakes...");
        return;
    }

    if view.events.is_empty() {
        let _ = writeln!(out, "No earthquakes found matching your filters.");
        return;
    }

    for event in view.events.iter().take(limit) {
        let marker = if view.selected.as_ref() == Some(&event.id) {
            ">"
        } else {
            " "
        };
        let _ = writeln!(out, "{marker} {}", render_row(event, now));
    }

    if view.events.len() > limit {
        let _ = writeln!(out, "  ... {} more", view.events.len() - limit);
    }
}

pub fn render_row(event: &Event, now: DateTime<Utc>) -> String {
    let mag = event.magnitude_value();
    let (r, g, b) = MagnitudeClass::of(mag).rgb();
    let place = truncate(&event.place, PLACE_WIDTH);

    format!(
        "{}  {:<16} {:<width$} {:>9}  {}",
        format_magnitude(mag).truecolor(r, g, b).bold(),
        relative_time(event.occurred_at_ms, now),
        place,
        format_depth(event.depth_km),
        event.id.as_str().dimmed(),
        width = PLACE_WIDTH,
    )
}

fn render_stats(out: &mut String, view: &DashboardView) {
    let s = &view.stats;
    let _ = writeln!(
        out,
        "{} Total: {} | Magnitude 4.0+: {} | Strongest: {}",
        "Statistics".bold(),
        s.total,
        s.significant_count,
        format_magnitude(s.strongest)
    );
}

fn render_focus(out: &mut String, view: &DashboardView) {
    let Some(selected) = &view.selected else {
        return;
    };

    let focused = view.focus.as_ref().and_then(|focus| {
        let event = view.events.iter().find(|e| e.id == focus.id)?;
        Some((focus, event))
    });

    let Some((focus, event)) = focused else {
        let _ = writeln!(out, "Selected {selected} is not in the current list");
        return;
    };

    let mag = event.magnitude_value();
    let class = MagnitudeClass::of(mag);
    let (r, g, b) = class.rgb();

    let _ = writeln!(
        out,
        "{} {} at {:.3}, {:.3} (zoom {}, marker {:.1} px)",
        "Focus:".bold(),
        focus.id,
        focus.latitude,
        focus.longitude,
        focus.zoom,
        marker_radius(mag)
    );
    let _ = writeln!(
        out,
        "  {} {} | {} | depth {} | {}",
        format_magnitude(mag).truecolor(r, g, b).bold(),
        class.label(),
        if event.place.is_empty() {
            "Unknown location"
        } else {
            event.place.as_str()
        },
        format_depth(event.depth_km),
        format_time(event.occurred_at_ms)
    );
    if !event.detail_url.is_empty() {
        let _ = writeln!(out, "  View details on USGS: {}", event.detail_url);
    }
}

fn render_error(out: &mut String, view: &DashboardView) {
    let message = view.error.as_deref().unwrap_or("unknown error");
    let _ = writeln!(out, "{} {}", "Error loading data:".red().bold(), message);
    let _ = writeln!(out, "Enter `r` to try again.");
}

pub fn render_legend() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Magnitude Scale".bold());
    for class in MagnitudeClass::ALL {
        let (r, g, b) = class.rgb();
        let _ = writeln!(
            out,
            "  {} {:<8} {}",
            "●".truecolor(r, g, b),
            class.range_label(),
            class.label()
        );
    }
    out
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
