//! Event sink boundary.
//!
//! Session logic never formats or stores telemetry itself. Every notable
//! transition is reported as a [`ListEvent`] to the sink the session was
//! given, if any.

use crate::query::{FetchMode, IntentKind};

///
/// ListEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListEvent {
    /// Emitted before a fetch is handed to the collaborator. This is the
    /// loading-started notification the UI uses to show a spinner and gate
    /// further scroll triggers.
    LoadingStarted {
        generation: u64,
        mode: FetchMode,
        intent: IntentKind,
    },
    ResponseApplied {
        generation: u64,
        mode: FetchMode,
        rows: u64,
    },
    StaleResponseDiscarded {
        generation: u64,
        latest: u64,
    },
    FetchFailed {
        generation: u64,
    },
}

///
/// ListEventSink
///

pub trait ListEventSink {
    fn record(&self, event: ListEvent);
}

///
/// NoopSink
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl ListEventSink for NoopSink {
    fn record(&self, _: ListEvent) {}
}
