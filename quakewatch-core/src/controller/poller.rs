use crate::controller::FetchController;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("polling interval must be greater than zero")]
    ZeroInterval,

    #[error("polling interval of {0:?} is too large")]
    IntervalTooLarge(Duration),
}

struct PollTask {
    interval: Duration,
    handle: JoinHandle<()>,
}

/// Repeating timer that triggers `FetchController::fetch_now`.
///
/// Only the ticker is cancelled on stop; fetches it already started run to
/// completion. Dropping the poller stops it.
pub struct Poller {
    controller: Arc<FetchController>,
    task: Option<PollTask>,
}

impl Poller {
    pub fn new(controller: Arc<FetchController>) -> Self {
        Self {
            controller,
            task: None,
        }
    }

    /// Start ticking every `interval`, replacing any running timer.
    /// The first tick fires one full interval from now. A rejected interval
    /// leaves the running timer alone.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, interval: Duration) -> Result<(), PollError> {
        if interval.is_zero() {
            return Err(PollError::ZeroInterval);
        }
        let first_tick = Instant::now()
            .checked_add(interval)
            .ok_or(PollError::IntervalTooLarge(interval))?;

        self.stop_task();

        let controller = Arc::clone(&self.controller);
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(first_tick, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                tracing::debug!("poll tick");
                // Detached; a stop must not cancel a fetch in flight.
                drop(controller.fetch_now());
            }
        });

        self.task = Some(PollTask { interval, handle });
        tracing::info!(interval_ms = interval.as_millis() as u64, "polling started");

        Ok(())
    }

    /// Returns whether a timer was running.
    pub fn stop(&mut self) -> bool {
        let stopped = self.stop_task();
        if stopped {
            tracing::info!("polling stopped");
        }
        stopped
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn interval(&self) -> Option<Duration> {
        self.task.as_ref().map(|t| t.interval)
    }

    fn stop_task(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                task.handle.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop_task();
    }
}
