mod criteria;
mod event;


pub use criteria::{CriteriaError, FilterCriteria};
pub use event::{Event, EventId, EventSet};
