//! Pure derivations over an event list.
//!
//! ```text
//! EventSet
//!   filter(criteria)
//!     sort(key)        -> listing
//!     summarize        -> EventStats
//! ```
//!
//! Nothing here owns state; every function can be re-run on every read.

mod filter;
mod sort;
mod stats;

#[cfg(test)]
mod tests;

pub use filter::filter;
pub use sort::{SortKey, sort};
pub use stats::{EventStats, SIGNIFICANT_MAGNITUDE, summarize};
