use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::config::DiscoveryConfig;
use crate::{
    event_log::action::{action_label, is_original_action, Action},
    relations::{relation_matrices::ordered_pairs, RelationMatrices},
};

///
/// Relation between the two actions of a [`Pattern`]
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// `a` is (mostly) directly followed by `b`
    #[serde(rename = "SEQ")]
    Sequence,
    /// `a` and `b` directly follow each other in both directions
    #[serde(rename = "CON")]
    Concurrency,
    /// `a` and `b` (almost) never directly follow each other
    #[serde(rename = "CHC")]
    Choice,
}

impl RelationKind {
    /// Short name as used in reports (`SEQ`, `CON` or `CHC`)
    pub fn abbreviation(&self) -> &'static str {
        match self {
            RelationKind::Sequence => "SEQ",
            RelationKind::Concurrency => "CON",
            RelationKind::Choice => "CHC",
        }
    }
}

impl Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

///
/// Pair of actions and the relation under which they are abstracted next
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    /// First action of the pair
    pub a: Action,
    /// Second action of the pair
    pub b: Action,
    /// Relation between `a` and `b`
    pub kind: RelationKind,
}

impl Pattern {
    /// Create a new [`Pattern`]
    pub fn new(a: Action, b: Action, kind: RelationKind) -> Self {
        Self { a, b, kind }
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({},{})",
            self.kind,
            action_label(self.a),
            action_label(self.b)
        )
    }
}

/// Keep the first candidate with the strictly highest positive score
fn first_best(candidates: impl Iterator<Item = (Pattern, u64)>) -> Option<Pattern> {
    candidates
        .fold((None, 0), |(best, best_score), (pattern, score)| {
            if score > best_score {
                (Some(pattern), score)
            } else {
                (best, best_score)
            }
        })
        .0
}

///
/// Select the next sequential pattern among original actions only
///
/// Considers ordered pairs of two distinct original actions whose precedence-dominance is above
/// [`DiscoveryConfig::seq_threshold`] and picks the one with the highest weight.
/// Ties are resolved in favor of the pair found first (`x` ascending, then `y` ascending).
///
/// Returns `None` if no pair qualifies.
///
pub fn select_sequence_pattern(
    matrices: &RelationMatrices,
    config: &DiscoveryConfig,
) -> Option<Pattern> {
    let actions = matrices.actions();
    first_best(ordered_pairs(actions).filter_map(|(i, j)| {
        let (x, y) = (actions[i], actions[j]);
        if !is_original_action(x) || !is_original_action(y) {
            return None;
        }
        if matrices.precedence_dominance.at(i, j) <= config.seq_threshold {
            return None;
        }
        Some((
            Pattern::new(x, y, RelationKind::Sequence),
            matrices.weight.at(i, j),
        ))
    }))
}

///
/// Classify the pair at dense indices `(i, j)` and compute its score
///
/// Choice takes precedence over concurrency, which takes precedence over sequence.
///
pub fn classify_pair(
    matrices: &RelationMatrices,
    i: usize,
    j: usize,
    total_events: u64,
    config: &DiscoveryConfig,
) -> Option<(RelationKind, u64)> {
    let actions = matrices.actions();
    let (x, y) = (actions[i], actions[j]);
    let max_support = matrices.support.at(i, j).max(matrices.support.at(j, i));
    let choice_limit = total_events.checked_div(config.choice_divisor).unwrap_or(0);
    if max_support <= choice_limit {
        return Some((RelationKind::Choice, total_events.saturating_mul(100)));
    }
    let pd = matrices.precedence_dominance.at(i, j);
    let kind = if pd < config.con_threshold {
        RelationKind::Concurrency
    } else if pd > config.seq_threshold {
        RelationKind::Sequence
    } else {
        return None;
    };
    let mut score = matrices.weight.at(i, j);
    if is_original_action(x) && is_original_action(y) {
        score = score.saturating_mul(config.original_boost);
    }
    Some((kind, score))
}

///
/// Select the next SEQ, CON or CHC pattern
///
/// Every ordered pair of distinct actions is classified by [`classify_pair`]; the pair with the
/// highest score is chosen, ties are resolved in favor of the pair found first.
///
/// Returns `None` if no pair qualifies.
///
pub fn select_pattern(
    matrices: &RelationMatrices,
    total_events: u64,
    config: &DiscoveryConfig,
) -> Option<Pattern> {
    let actions = matrices.actions();
    first_best(ordered_pairs(actions).filter_map(|(i, j)| {
        classify_pair(matrices, i, j, total_events, config)
            .map(|(kind, score)| (Pattern::new(actions[i], actions[j], kind), score))
    }))
}
