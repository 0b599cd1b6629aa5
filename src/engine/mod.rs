// Calendar arithmetic and the query service built on it

pub mod calendar;
pub mod clock;
pub mod query;

pub use clock::{Clock, FixedClock, SystemClock};
pub use query::{available_time_zones, query, query_at, resolve_time_zone, ProgressionService};
