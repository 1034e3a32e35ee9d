pub mod conf;
pub mod once;
pub mod watch;

use anyhow::Result;
use clap::Args;
use quakewatch_core::conf::{DashboardConfig, load_config, validate_config};
use quakewatch_core::pipeline::SortKey;
use std::path::Path;

/// Listing overrides shared by `watch` and `once`.
#[derive(Args, Debug, Default, Clone)]
pub struct ViewArgs {
    /// Sort order: `time` or `magnitude`
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Minimum magnitude
    #[arg(long)]
    pub min_mag: Option<f64>,

    /// Maximum absolute depth in km
    #[arg(long)]
    pub max_depth: Option<f64>,

    /// Case-insensitive place search
    #[arg(long)]
    pub search: Option<String>,

    /// Rows to show
    #[arg(long)]
    pub limit: Option<usize>,
}

impl ViewArgs {
    pub fn apply(&self, cfg: &mut DashboardConfig) {
        if let Some(sort) = self.sort {
            cfg.display.sort = sort;
        }
        if let Some(min) = self.min_mag {
            cfg.filter.min_magnitude = min;
        }
        if let Some(depth) = self.max_depth {
            cfg.filter.max_depth_km = Some(depth);
        }
        if let Some(search) = &self.search {
            cfg.filter.search_term = search.clone();
        }
        if let Some(limit) = self.limit {
            cfg.display.limit = limit;
        }
    }
}

/// Load the config file (or defaults), layer the CLI overrides on top and
/// validate the result.
pub fn resolve_config(path: Option<&Path>, view: &ViewArgs) -> Result<DashboardConfig> {
    let mut cfg = match path {
        Some(path) => load_config(path)?,
        None => DashboardConfig::default(),
    };

    view.apply(&mut cfg);
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn overrides_replace_config_values() {
        // Arrange
        let args = ViewArgs {
            sort: Some(SortKey::Magnitude),
            min_mag: Some(2.5),
            max_depth: Some(70.0),
            search: Some("alaska".to_string()),
            limit: Some(5),
        };

        // Act
        let cfg = resolve_config(None, &args).unwrap();

        // Assert
        assert_eq!(cfg.display.sort, SortKey::Magnitude);
        assert_eq!(cfg.display.limit, 5);
        assert_eq!(cfg.filter.min_magnitude, 2.5);
        assert_eq!(cfg.filter.max_depth_km, Some(70.0));
        assert_eq!(cfg.filter.search_term, "alaska");
    }

    #[test]
    fn no_overrides_keeps_defaults() {
        let cfg = resolve_config(None, &ViewArgs::default()).unwrap();

        assert_eq!(cfg, DashboardConfig::default());
    }

    #[test]
    fn invalid_override_is_rejected() {
        let args = ViewArgs {
            limit: Some(0),
            ..ViewArgs::default()
        };

        assert!(resolve_config(None, &args).is_err());
    }
}
