use crate::cli::{ViewArgs, resolve_config, runtime};
use crate::render::{redraw, render_legend, render_view};
use anyhow::Result;
use chrono::Utc;
use quakewatch_core::conf::{DashboardConfig, validate_config};
use quakewatch_core::dashboard::Dashboard;
use quakewatch_core::model::FilterCriteria;
use quakewatch_core::pipeline::SortKey;
use std::io::{self, BufRead};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;

/// Relative times drift even when nothing was fetched.
const CLOCK_REDRAW: Duration = Duration::from_secs(30);

const HELP: &str = "r refresh | t toggle sort | p toggle polling | m <mag> | d [km] | / [text] | s [id] | l legend | q quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Refresh,
    ToggleSort,
    TogglePolling,
    MinMagnitude(f64),
    MaxDepth(Option<f64>),
    Search(String),
    Select(Option<String>),
    ToggleLegend,
    Quit,
}

/// Parse one line typed at the dashboard prompt.
pub fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };

    let input = match cmd {
        "r" => Input::Refresh,
        "t" => Input::ToggleSort,
        "p" => Input::TogglePolling,
        "l" => Input::ToggleLegend,
        "q" => Input::Quit,
        "m" => Input::MinMagnitude(number(arg).filter(|m| m.is_finite())?),
        "d" if arg.is_empty() => Input::MaxDepth(None),
        "d" => Input::MaxDepth(Some(number(arg).filter(|d| d.is_finite() && *d >= 0.0)?)),
        "/" => Input::Search(arg.to_string()),
        "s" if arg.is_empty() => Input::Select(None),
        "s" => Input::Select(Some(arg.to_string())),
        _ => return None,
    };

    Some(input)
}

fn number(arg: &str) -> Option<f64> {
    arg.parse().ok()
}

pub fn run(config: Option<&Path>, poll_secs: Option<u64>, view: &ViewArgs) -> Result<()> {
    let mut cfg = resolve_config(config, view)?;
    if let Some(secs) = poll_secs {
        cfg.polling.enabled = true;
        cfg.polling.interval_secs = secs;
        validate_config(&cfg)?;
    }

    runtime()?.block_on(watch(cfg))
}

struct Screen {
    limit: usize,
    legend: bool,
}

impl Screen {
    fn draw(&self, dashboard: &Dashboard) {
        let mut frame = render_view(&dashboard.view(), self.limit, Utc::now());
        if self.legend {
            frame.push('\n');
            frame.push_str(&render_legend());
        }
        let polling = if dashboard.is_polling() { "on" } else { "off" };
        frame.push_str(&format!("\npolling {polling} | {HELP}\n> "));
        redraw(&frame);
    }
}

async fn watch(cfg: DashboardConfig) -> Result<()> {
    let mut dashboard = Dashboard::from_config(&cfg)?;
    let mut changes = dashboard.subscribe();
    let mut inputs = spawn_stdin_reader();
    let mut stdin_open = true;
    let mut screen = Screen {
        limit: cfg.display.limit,
        legend: false,
    };

    drop(dashboard.start());
    if cfg.polling.enabled {
        dashboard.set_polling(true, cfg.polling.interval())?;
    }

    let mut clock = tokio::time::interval(CLOCK_REDRAW);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = clock.tick() => {}
            input = inputs.recv(), if stdin_open => {
                let Some(input) = input else {
                    // stdin closed; keep watching until Ctrl-C
                    stdin_open = false;
                    continue;
                };
                if !apply_input(&mut dashboard, &mut screen, &cfg, input)? {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("interrupt received");
                break;
            }
        }

        screen.draw(&dashboard);
    }

    dashboard.shutdown();
    println!();

    Ok(())
}

/// Returns false when the user asked to quit.
fn apply_input(
    dashboard: &mut Dashboard,
    screen: &mut Screen,
    cfg: &DashboardConfig,
    input: Input,
) -> Result<bool> {
    match input {
        Input::Refresh => drop(dashboard.fetch_now()),
        Input::ToggleSort => {
            let next = match dashboard.sort_key() {
                SortKey::Time => SortKey::Magnitude,
                SortKey::Magnitude => SortKey::Time,
            };
            dashboard.set_sort_key(next);
        }
        Input::TogglePolling => {
            let enable = !dashboard.is_polling();
            dashboard.set_polling(enable, cfg.polling.interval())?;
        }
        Input::MinMagnitude(min) => {
            let criteria = dashboard.criteria().clone().with_min_magnitude(min);
            apply_criteria(dashboard, criteria);
        }
        Input::MaxDepth(max) => {
            let criteria = dashboard.criteria().clone().with_max_depth_km(max);
            apply_criteria(dashboard, criteria);
        }
        Input::Search(term) => {
            let criteria = dashboard.criteria().clone().with_search_term(term);
            apply_criteria(dashboard, criteria);
        }
        Input::Select(Some(id)) => dashboard.select(id),
        Input::Select(None) => dashboard.clear_selection(),
        Input::ToggleLegend => screen.legend = !screen.legend,
        Input::Quit => return Ok(false),
    }

    Ok(true)
}

/// Unusable thresholds leave the current criteria in place.
fn apply_criteria(dashboard: &mut Dashboard, criteria: FilterCriteria) -> bool {
    let problems = criteria.check();
    if !problems.is_empty() {
        tracing::warn!(?problems, "ignoring filter change");
        return false;
    }

    dashboard.set_filter_criteria(criteria);
    true
}

/// Blocking stdin lines forwarded into the runtime. Unparseable lines are
/// ignored.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<Input> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if let Some(input) = parse_input(&line) {
                if tx.send(input).is_err() {
                    break;
                }
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quakewatch_core::feed::{DEFAULT_REQUEST_TIMEOUT, HttpFeedSource, USGS_ALL_DAY_FEED};
    use std::sync::Arc;

    #[test]
    fn parses_single_letter_commands() {
        assert_eq!(parse_input("r"), Some(Input::Refresh));
        assert_eq!(parse_input(" t "), Some(Input::ToggleSort));
        assert_eq!(parse_input("p"), Some(Input::TogglePolling));
        assert_eq!(parse_input("l"), Some(Input::ToggleLegend));
        assert_eq!(parse_input("q"), Some(Input::Quit));
    }

    #[test]
    fn parses_filter_commands() {
        assert_eq!(parse_input("m 2.5"), Some(Input::MinMagnitude(2.5)));
        assert_eq!(parse_input("d 70"), Some(Input::MaxDepth(Some(70.0))));
        assert_eq!(parse_input("d"), Some(Input::MaxDepth(None)));
        assert_eq!(
            parse_input("/ northern california"),
            Some(Input::Search("northern california".to_string()))
        );
        assert_eq!(parse_input("/"), Some(Input::Search(String::new())));
    }

    #[test]
    fn parses_selection() {
        assert_eq!(
            parse_input("s us7000abcd"),
            Some(Input::Select(Some("us7000abcd".to_string())))
        );
        assert_eq!(parse_input("s"), Some(Input::Select(None)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_input(""), None);
        assert_eq!(parse_input("x"), None);
        assert_eq!(parse_input("m big"), None);
        assert_eq!(parse_input("d deep"), None);
    }

    #[test]
    fn rejects_unusable_thresholds() {
        assert_eq!(parse_input("m NaN"), None);
        assert_eq!(parse_input("m inf"), None);
        assert_eq!(parse_input("d -5"), None);
        assert_eq!(parse_input("d NaN"), None);
        assert_eq!(parse_input("d inf"), None);

        // Negative magnitudes exist in the feed and stay selectable.
        assert_eq!(parse_input("m -1"), Some(Input::MinMagnitude(-1.0)));
        assert_eq!(parse_input("d 0"), Some(Input::MaxDepth(Some(0.0))));
    }

    #[test]
    fn unusable_criteria_leave_dashboard_unchanged() {
        // Arrange
        let source = Arc::new(
            HttpFeedSource::new(USGS_ALL_DAY_FEED, DEFAULT_REQUEST_TIMEOUT).unwrap(),
        );
        let mut dashboard = Dashboard::new(source);
        let good = FilterCriteria::default().with_min_magnitude(2.0);
        let bad = good.clone().with_max_depth_km(Some(-5.0));

        // Act
        let applied_good = apply_criteria(&mut dashboard, good.clone());
        let applied_bad = apply_criteria(&mut dashboard, bad);

        // Assert
        assert!(applied_good);
        assert!(!applied_bad);
        assert_eq!(dashboard.criteria(), &good);
    }
}
