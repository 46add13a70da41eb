use crate::{
    obs::sink::{ListEvent, ListEventSink},
    query::{FetchMode, IntentKind},
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// EventReport
/// Point-in-time counters for one list session.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
    pub rows: EventRows,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Fetches started, by mode
    pub replace_loads: u64,
    pub append_loads: u64,

    // Fetches started, by group transition
    pub group_opens: u64,
    pub group_closes: u64,

    // Completions
    pub responses_applied: u64,
    pub stale_discarded: u64,
    pub fetch_failures: u64,
}

///
/// EventRows
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventRows {
    pub rows_replaced: u64,
    pub rows_appended: u64,
}

///
/// ListMetrics
///
/// In-memory counting sink. Scoped to whoever owns it; there is no global
/// instance.
///

#[derive(Debug, Default)]
pub struct ListMetrics {
    state: RefCell<EventReport>,
}

impl ListMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn report(&self) -> EventReport {
        self.state.borrow().clone()
    }

    pub fn reset(&self) {
        *self.state.borrow_mut() = EventReport::default();
    }

    fn with_state_mut(&self, f: impl FnOnce(&mut EventReport)) {
        f(&mut self.state.borrow_mut());
    }
}

impl ListEventSink for ListMetrics {
    fn record(&self, event: ListEvent) {
        match event {
            ListEvent::LoadingStarted { mode, intent, .. } => self.with_state_mut(|m| {
                match mode {
                    FetchMode::Replace => m.ops.replace_loads = m.ops.replace_loads.saturating_add(1),
                    FetchMode::Append => m.ops.append_loads = m.ops.append_loads.saturating_add(1),
                }
                match intent {
                    IntentKind::OpenGroup => m.ops.group_opens = m.ops.group_opens.saturating_add(1),
                    IntentKind::CloseGroup => {
                        m.ops.group_closes = m.ops.group_closes.saturating_add(1);
                    }
                    IntentKind::Navigate | IntentKind::ScrollAppend | IntentKind::Reorder => {}
                }
            }),

            ListEvent::ResponseApplied { mode, rows, .. } => self.with_state_mut(|m| {
                m.ops.responses_applied = m.ops.responses_applied.saturating_add(1);
                match mode {
                    FetchMode::Replace => m.rows.rows_replaced = m.rows.rows_replaced.saturating_add(rows),
                    FetchMode::Append => m.rows.rows_appended = m.rows.rows_appended.saturating_add(rows),
                }
            }),

            ListEvent::StaleResponseDiscarded { .. } => self.with_state_mut(|m| {
                m.ops.stale_discarded = m.ops.stale_discarded.saturating_add(1);
            }),

            ListEvent::FetchFailed { .. } => self.with_state_mut(|m| {
                m.ops.fetch_failures = m.ops.fetch_failures.saturating_add(1);
            }),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_loads_and_rows_by_mode() {
        let metrics = ListMetrics::new();

        metrics.record(ListEvent::LoadingStarted {
            generation: 1,
            mode: FetchMode::Replace,
            intent: IntentKind::OpenGroup,
        });
        metrics.record(ListEvent::LoadingStarted {
            generation: 2,
            mode: FetchMode::Append,
            intent: IntentKind::ScrollAppend,
        });
        metrics.record(ListEvent::ResponseApplied {
            generation: 2,
            mode: FetchMode::Append,
            rows: 10,
        });
        metrics.record(ListEvent::StaleResponseDiscarded {
            generation: 1,
            latest: 2,
        });

        let report = metrics.report();
        assert_eq!(report.ops.replace_loads, 1);
        assert_eq!(report.ops.append_loads, 1);
        assert_eq!(report.ops.group_opens, 1);
        assert_eq!(report.ops.responses_applied, 1);
        assert_eq!(report.ops.stale_discarded, 1);
        assert_eq!(report.rows.rows_appended, 10);
        assert_eq!(report.rows.rows_replaced, 0);
    }

    #[test]
    fn reset_clears_counters() {
        let metrics = ListMetrics::new();
        metrics.record(ListEvent::FetchFailed { generation: 1 });
        metrics.reset();

        assert_eq!(metrics.report(), EventReport::default());
    }

    #[test]
    fn report_serializes_to_json() {
        let metrics = ListMetrics::new();
        metrics.record(ListEvent::FetchFailed { generation: 3 });

        let json = serde_json::to_value(metrics.report()).expect("report serializes");
        assert_eq!(json["ops"]["fetch_failures"], 1);
    }
}
