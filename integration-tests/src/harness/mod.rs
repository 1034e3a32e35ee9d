pub mod dashboard;
pub mod fixtures;
pub mod tracing;
pub mod upstream;

pub use dashboard::TestDashboard;
pub use tracing::{CapturedEvent, EventLog, captured_events, init_test_tracing};
pub use upstream::{CannedResponse, FeedServer};
