use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{
    abstraction::abstract_pattern,
    config::{DiscoveryConfig, PostAbstractionOrder},
    model::{AbstractionModel, Node},
    pattern_selection::{select_pattern, select_sequence_pattern, Pattern},
};
use crate::{
    error::Result,
    event_log::{
        action::{Action, SYNTHETIC_ACTION_START},
        statistics::LogStatistics,
        trace_store_struct::TraceStore,
    },
    relations::{RelationMatrices, RelationMatrix},
};

///
/// Phase of the discovery loop
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscoveryPhase {
    /// Stage 1: only sequential patterns between original actions
    Sequential,
    /// Stage 2: sequential, concurrent and choice patterns between all actions
    General,
}

impl DiscoveryPhase {
    /// Number of the stage this phase is reported as
    pub fn stage(&self) -> u8 {
        match self {
            DiscoveryPhase::Sequential => 1,
            DiscoveryPhase::General => 2,
        }
    }
}

impl Display for DiscoveryPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryPhase::Sequential => write!(f, "sequential"),
            DiscoveryPhase::General => write!(f, "general"),
        }
    }
}

///
/// One iteration of the discovery loop that abstracted a [`Pattern`]
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstractionStep {
    /// Phase in which the pattern was found
    pub phase: DiscoveryPhase,
    /// Synthetic action that replaced the pattern
    pub abstraction: Action,
    /// Abstracted pattern
    pub pattern: Pattern,
    /// Support matrix the pattern was selected from
    pub support: RelationMatrix,
    /// Number of events removed from the log (weighted by trace frequency)
    pub events_removed: u64,
    /// Occurrences per distinct action after rewriting the log
    pub action_occurrences: Vec<(Action, u64)>,
}

///
/// Outcome of [`discover`]
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    /// Statistics of the log before any abstraction
    pub initial: LogStatistics,
    /// All abstraction steps in the order they were applied
    pub steps: Vec<AbstractionStep>,
    /// The log after the last abstraction step
    pub final_log: TraceStore,
}

impl DiscoveryResult {
    /// Total number of events removed by all abstraction steps
    pub fn events_removed_total(&self) -> u64 {
        self.steps.iter().map(|s| s.events_removed).sum()
    }

    /// Abstraction steps of one phase
    pub fn steps_in(&self, phase: DiscoveryPhase) -> impl Iterator<Item = &AbstractionStep> + '_ {
        self.steps.iter().filter(move |s| s.phase == phase)
    }

    /// Hierarchy of all discovered abstractions
    pub fn model(&self) -> AbstractionModel {
        AbstractionModel::from_steps(&self.steps)
    }

    /// Trees of the actions remaining in the final log
    pub fn final_trees(&self) -> Vec<Node> {
        let model = self.model();
        self.final_log
            .distinct_actions()
            .into_iter()
            .map(|a| model.tree(a))
            .collect()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

///
/// Discover abstractions of the given log
///
/// First abstracts sequential patterns between original actions until none is left,
/// then abstracts sequential, concurrent and choice patterns until none is left.
/// Synthetic actions are numbered from [`SYNTHETIC_ACTION_START`] across both phases.
///
pub fn discover(store: TraceStore, config: DiscoveryConfig) -> DiscoveryResult {
    discover_with_step_fn(store, config, &mut |_: &AbstractionStep| {})
}

/// Run discovery, calling `on_step` after every abstraction step
///
/// See [`discover`].
pub fn discover_with_step_fn(
    mut store: TraceStore,
    config: DiscoveryConfig,
    on_step: &mut dyn FnMut(&AbstractionStep),
) -> DiscoveryResult {
    let initial = LogStatistics::from_trace_store(&store);
    tracing::info!(
        distinct_actions = initial.distinct_actions,
        distinct_traces = initial.distinct_traces,
        total_events = initial.total_events,
        "started abstraction discovery"
    );
    let mut next_abstraction = SYNTHETIC_ACTION_START;
    let mut steps = Vec::new();
    for phase in [DiscoveryPhase::Sequential, DiscoveryPhase::General] {
        run_phase(
            &mut store,
            phase,
            &mut next_abstraction,
            &config,
            &mut |step: AbstractionStep| {
                on_step(&step);
                steps.push(step);
            },
        );
    }
    tracing::info!(
        steps = steps.len(),
        remaining_events = store.total_events(),
        "finished abstraction discovery"
    );
    DiscoveryResult {
        initial,
        steps,
        final_log: store,
    }
}

/// Abstract patterns of one phase until no pattern qualifies anymore
fn run_phase(
    store: &mut TraceStore,
    phase: DiscoveryPhase,
    next_abstraction: &mut Action,
    config: &DiscoveryConfig,
    emit: &mut dyn FnMut(AbstractionStep),
) {
    tracing::info!(stage = phase.stage(), "starting {} phase", phase);
    loop {
        let matrices = RelationMatrices::from_trace_store(store);
        let pattern = match phase {
            DiscoveryPhase::Sequential => select_sequence_pattern(&matrices, config),
            DiscoveryPhase::General => select_pattern(&matrices, store.total_events(), config),
        };
        let Some(pattern) = pattern else {
            break;
        };
        let abstraction = *next_abstraction;
        *next_abstraction += 1;

        let events_removed = abstract_pattern(store, pattern, abstraction);
        if config.post_abstraction_order == PostAbstractionOrder::ResortAndMerge {
            store.resort_and_merge();
        }
        tracing::info!(
            abstraction,
            %pattern,
            events_removed,
            "abstracted pattern"
        );
        emit(AbstractionStep {
            phase,
            abstraction,
            pattern,
            support: matrices.support,
            events_removed,
            action_occurrences: store.action_occurrence_counts(),
        });
    }
    tracing::debug!(
        stage = phase.stage(),
        distinct_traces = store.distinct_traces(),
        "no further pattern"
    );
}
