use crate::harness::{captured_events, init_test_tracing};
use quakewatch_core::conf::DashboardConfig;
use quakewatch_core::dashboard::{Dashboard, DashboardView};
use std::time::Duration;
use tokio::sync::watch;

const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// A dashboard wired to a feed URL, plus a change subscription for waiting
/// on fetch results.
///
/// Must be created inside a tokio runtime; the first fetch is issued
/// immediately.
pub struct TestDashboard {
    dashboard: Dashboard,
    changes: watch::Receiver<u64>,
}

impl TestDashboard {
    pub fn start(feed_url: &str) -> Self {
        init_test_tracing(captured_events());

        let mut cfg = DashboardConfig::default();
        cfg.feed.url = feed_url.to_string();
        cfg.feed.timeout_secs = 2;

        let dashboard = Dashboard::from_config(&cfg).expect("failed to build dashboard");
        let changes = dashboard.subscribe();
        drop(dashboard.start());

        Self { dashboard, changes }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    /// Wait until the view satisfies `pred` (or panic).
    pub async fn wait_for(&mut self, pred: impl Fn(&DashboardView) -> bool) -> DashboardView {
        let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;

        loop {
            let view = self.dashboard.view();
            if pred(&view) {
                return view;
            }

            match tokio::time::timeout_at(deadline, self.changes.changed()).await {
                Ok(Ok(())) => {}
                Ok(Err(_)) => panic!("dashboard controller dropped"),
                Err(_) => panic!(
                    "timed out waiting for dashboard; last status {} error {:?}",
                    view.status, view.error
                ),
            }
        }
    }
}
