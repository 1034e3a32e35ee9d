use crate::cli::{ViewArgs, resolve_config, runtime};
use crate::render::render_view;
use anyhow::{Result, bail};
use chrono::Utc;
use quakewatch_core::controller::FetchOutcome;
use quakewatch_core::dashboard::Dashboard;
use std::path::Path;

pub fn run(config: Option<&Path>, view: &ViewArgs) -> Result<()> {
    let cfg = resolve_config(config, view)?;
    let dashboard = Dashboard::from_config(&cfg)?;

    let rt = runtime()?;
    let outcome = rt.block_on(async { dashboard.start().await })?;

    print!(
        "{}",
        render_view(&dashboard.view(), cfg.display.limit, Utc::now())
    );

    if let FetchOutcome::Failed { error, .. } = outcome {
        bail!("feed fetch failed: {error}");
    }

    Ok(())
}
