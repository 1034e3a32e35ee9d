//! Refresh lifecycle
//!
//! `FetchController` runs fetch cycles and publishes each resulting state as a
//! whole `FeedSnapshot`:
//!
//! ```text
//! Idle -> Loading -> Success | Failure
//!            ^            |
//!            +------------+   (fetch_now / poll tick)
//! ```
//!
//! `Poller` is the optional repeating trigger.

mod fetch;
mod poller;
mod state;

#[cfg(test)]
mod tests;

pub use fetch::FetchController;
pub use poller::{PollError, Poller};
pub use state::{FeedSnapshot, FetchOutcome, FetchStatus};
