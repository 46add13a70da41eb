//! Observability: list events and the sinks that consume them.
//!
//! Sinks are handed to a session explicitly. Nothing here is process-wide.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventRows, ListMetrics};
pub use sink::{ListEvent, ListEventSink, NoopSink};
