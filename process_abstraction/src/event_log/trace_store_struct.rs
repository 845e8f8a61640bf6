use std::cmp::Ordering;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::action::Action;
use crate::error::{DiscoveryError, Result};

///
/// A distinct sequence of actions together with the number of times it was observed
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// Actions of the trace in execution order
    pub actions: Vec<Action>,
    /// Number of times this exact sequence occurred
    pub frequency: u64,
}

impl Trace {
    /// Create a new [`Trace`] with the given frequency
    pub fn new(actions: Vec<Action>, frequency: u64) -> Self {
        Self { actions, frequency }
    }

    /// Number of events of this trace, weighted by its frequency
    pub fn weighted_len(&self) -> u64 {
        self.actions.len() as u64 * self.frequency
    }
}

///
/// Order in which a [`TraceStore`] keeps its traces
///
/// At the first position where both sequences differ, the sequence with the numerically
/// smaller action comes first. If one sequence is a strict prefix of the other, the longer one
/// comes first.
///
pub fn store_order(a: &[Action], b: &[Action]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.cmp(y) {
            Ordering::Equal => {}
            ord => return ord,
        }
    }
    // Extensions come before their prefixes
    b.len().cmp(&a.len())
}

///
/// Multiset of action sequences, stored as distinct [`Trace`]s with frequencies
///
/// Traces inserted through [`TraceStore::insert`] are kept ordered by [`store_order`]
/// without duplicates.
/// Abstraction steps rewrite the traces in place afterwards, which does not restore that order
/// (see [`TraceStore::resort_and_merge`]).
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStore {
    traces: Vec<Trace>,
    #[serde(skip)]
    max_distinct_traces: Option<usize>,
}

impl TraceStore {
    /// Create a new, empty and unbounded [`TraceStore`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty [`TraceStore`] holding at most `max_distinct_traces` distinct traces
    pub fn with_capacity_limit(max_distinct_traces: usize) -> Self {
        Self {
            traces: Vec::new(),
            max_distinct_traces: Some(max_distinct_traces),
        }
    }

    /// Insert one occurrence of the given sequence
    ///
    /// If the sequence is already present, its frequency is incremented.
    /// Otherwise a new trace with frequency 1 is inserted at its ordered position.
    ///
    /// A store left unordered by abstraction steps is re-sorted and merged first
    /// (see [`TraceStore::resort_and_merge`]).
    pub fn insert(&mut self, actions: Vec<Action>) -> Result<()> {
        self.insert_with_frequency(actions, 1)
    }

    /// Insert `frequency` occurrences of the given sequence
    ///
    /// See also [`TraceStore::insert`].
    pub fn insert_with_frequency(&mut self, actions: Vec<Action>, frequency: u64) -> Result<()> {
        self.resort_and_merge();
        match self
            .traces
            .binary_search_by(|t| store_order(&t.actions, &actions))
        {
            Ok(i) => {
                self.traces[i].frequency += frequency;
            }
            Err(i) => {
                if let Some(capacity) = self.max_distinct_traces {
                    if self.traces.len() >= capacity {
                        return Err(DiscoveryError::CapacityExceeded { capacity });
                    }
                }
                self.traces.try_reserve(1)?;
                self.traces.insert(i, Trace::new(actions, frequency));
            }
        }
        Ok(())
    }

    /// All distinct traces in store order
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub(crate) fn traces_mut(&mut self) -> &mut [Trace] {
        &mut self.traces
    }

    /// Number of distinct traces
    pub fn distinct_traces(&self) -> usize {
        self.traces.len()
    }

    /// Returns `true` if no trace was inserted yet
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Total number of events (sum of trace lengths weighted by frequency)
    pub fn total_events(&self) -> u64 {
        self.traces.iter().map(Trace::weighted_len).sum()
    }

    /// Total number of traces (sum of frequencies)
    pub fn total_traces(&self) -> u64 {
        self.traces.iter().map(|t| t.frequency).sum()
    }

    /// All actions occurring in some trace, ascending and without duplicates
    pub fn distinct_actions(&self) -> Vec<Action> {
        self.traces
            .iter()
            .flat_map(|t| t.actions.iter().copied())
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// Highest frequency of any trace (0 for an empty store)
    pub fn max_frequency(&self) -> u64 {
        self.traces.iter().map(|t| t.frequency).max().unwrap_or(0)
    }

    /// All traces with the highest frequency, in store order
    pub fn most_frequent_traces(&self) -> Vec<&Trace> {
        let max = self.max_frequency();
        self.traces.iter().filter(|t| t.frequency == max).collect()
    }

    /// Number of occurrences of an action, weighted by trace frequencies
    pub fn action_occurrences(&self, action: Action) -> u64 {
        self.traces
            .iter()
            .map(|t| t.actions.iter().filter(|a| **a == action).count() as u64 * t.frequency)
            .sum()
    }

    /// [`TraceStore::action_occurrences`] for each of the [`TraceStore::distinct_actions`]
    pub fn action_occurrence_counts(&self) -> Vec<(Action, u64)> {
        self.distinct_actions()
            .into_iter()
            .map(|a| (a, self.action_occurrences(a)))
            .collect()
    }

    /// Returns `true` if the traces are strictly ordered by [`store_order`]
    /// (and thus free of duplicates)
    pub fn is_strictly_ordered(&self) -> bool {
        self.traces
            .iter()
            .tuple_windows()
            .all(|(a, b)| store_order(&a.actions, &b.actions) == Ordering::Less)
    }

    /// Re-establish the store order and merge traces that became identical
    ///
    /// Frequencies of merged traces are summed up.
    pub fn resort_and_merge(&mut self) {
        if self.is_strictly_ordered() {
            return;
        }
        let mut traces = std::mem::take(&mut self.traces);
        traces.sort_by(|a, b| store_order(&a.actions, &b.actions));
        self.traces = traces
            .into_iter()
            .coalesce(|mut a, b| {
                if a.actions == b.actions {
                    a.frequency += b.frequency;
                    Ok(a)
                } else {
                    Err((a, b))
                }
            })
            .collect();
    }
}
