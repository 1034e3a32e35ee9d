use crate::conf::{ConfigError, DashboardConfig};

#[derive(Debug, Clone)]
pub struct RangeConstraint<T> {
    pub min: T,
    pub max: T,
    pub label: &'static str,
    pub units: Option<&'static str>,
}

impl<T: PartialOrd + std::fmt::Display + Copy> RangeConstraint<T> {
    fn check(&self, value: T, issues: &mut Vec<String>) {
        if value < self.min || value > self.max {
            let units = self.units.map(|u| format!(" {u}")).unwrap_or_default();
            issues.push(format!(
                "{} must be between {}{units} and {}{units} (got {value}{units})",
                self.label, self.min, self.max
            ));
        }
    }
}

pub const FEED_TIMEOUT_SECS: RangeConstraint<u64> = RangeConstraint {
    min: 1,
    max: 10 * 60,
    label: "feed.timeout_secs",
    units: Some("s"),
};

pub const POLL_INTERVAL_SECS: RangeConstraint<u64> = RangeConstraint {
    min: 1,
    max: 24 * 60 * 60,
    label: "polling.interval_secs",
    units: Some("s"),
};

pub const DISPLAY_LIMIT: RangeConstraint<usize> = RangeConstraint {
    min: 1,
    max: 10_000,
    label: "display.limit",
    units: None,
};

/// Check every semantic rule, reporting all violations at once.
pub fn validate_config(cfg: &DashboardConfig) -> Result<(), ConfigError> {
    let mut issues = Vec::new();

    if !(cfg.feed.url.starts_with("http://") || cfg.feed.url.starts_with("https://")) {
        issues.push(format!("feed.url must be an http(s) URL (got '{}')", cfg.feed.url));
    }

    FEED_TIMEOUT_SECS.check(cfg.feed.timeout_secs, &mut issues);
    POLL_INTERVAL_SECS.check(cfg.polling.interval_secs, &mut issues);
    DISPLAY_LIMIT.check(cfg.display.limit, &mut issues);

    issues.extend(
        cfg.filter
            .check()
            .into_iter()
            .map(|problem| format!("filter.{problem}")),
    );

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation { issues })
    }
}
