use serde::{Deserialize, Serialize};

use super::{action::Action, trace_store_struct::TraceStore};

///
/// Descriptive statistics of a [`TraceStore`] before any abstraction
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogStatistics {
    /// Number of distinct actions
    pub distinct_actions: usize,
    /// Number of distinct traces
    pub distinct_traces: usize,
    /// Total number of events
    pub total_events: u64,
    /// Total number of traces
    pub total_traces: u64,
    /// Frequency of the most frequent trace(s)
    pub max_frequency: u64,
    /// Action sequences of all traces with [`LogStatistics::max_frequency`], in store order
    pub most_frequent_traces: Vec<Vec<Action>>,
    /// Weighted number of occurrences per distinct action (ascending by action)
    pub action_occurrences: Vec<(Action, u64)>,
}

impl LogStatistics {
    /// Compute [`LogStatistics`] of the given [`TraceStore`]
    pub fn from_trace_store(store: &TraceStore) -> Self {
        let action_occurrences = store.action_occurrence_counts();
        Self {
            distinct_actions: action_occurrences.len(),
            distinct_traces: store.distinct_traces(),
            total_events: store.total_events(),
            total_traces: store.total_traces(),
            max_frequency: store.max_frequency(),
            most_frequent_traces: store
                .most_frequent_traces()
                .into_iter()
                .map(|t| t.actions.clone())
                .collect(),
            action_occurrences,
        }
    }
}

impl From<&TraceStore> for LogStatistics {
    fn from(store: &TraceStore) -> Self {
        Self::from_trace_store(store)
    }
}
