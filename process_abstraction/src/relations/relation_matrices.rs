use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::relation_matrix_struct::RelationMatrix;
use crate::event_log::{action::Action, trace_store_struct::TraceStore};

/// Precedence-dominance of `x -> y` given `support_xy` (`x` directly followed by `y`)
/// and `support_yx`
///
/// Percentage by which `x -> y` dominates `y -> x` (integer division).
/// Only the dominant direction gets a value; if `support_xy <= support_yx` the result is `0`.
pub fn precedence_dominance(support_xy: u64, support_yx: u64) -> u64 {
    if support_xy > support_yx {
        100 * (support_xy - support_yx) / support_xy
    } else {
        0
    }
}

/// Weight of a pair from its precedence-dominance and the support in both directions
///
/// Pairs that are strongly directed (pd near 100) or undirected (pd near 0) get high weights,
/// scaled by how often the two actions directly follow each other.
pub fn pair_weight(pd_xy: u64, support_xy: u64, support_yx: u64) -> u64 {
    50u64.abs_diff(pd_xy) * support_xy.max(support_yx)
}

///
/// Support, precedence-dominance and weight matrices of a [`TraceStore`]
///
/// All three matrices share the same rows/columns: the distinct actions of the store.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationMatrices {
    /// Number of times `y` directly follows `x` (weighted by trace frequency)
    pub support: RelationMatrix,
    /// Precedence-dominance of `x -> y` over `y -> x` in percent
    pub precedence_dominance: RelationMatrix,
    /// Composite weight `|50 - pd| * max(support(x,y), support(y,x))`
    pub weight: RelationMatrix,
}

impl RelationMatrices {
    /// Build all matrices from scratch for the current content of the [`TraceStore`]
    pub fn from_trace_store(store: &TraceStore) -> Self {
        let support = support_matrix(store);
        let n = support.len();
        let mut pd_matrix = RelationMatrix::new(support.actions().to_vec());
        let mut w_matrix = RelationMatrix::new(support.actions().to_vec());
        for i in 0..n {
            for j in 0..n {
                let (s_xy, s_yx) = (support.at(i, j), support.at(j, i));
                let pd = if i == j {
                    0
                } else {
                    precedence_dominance(s_xy, s_yx)
                };
                pd_matrix.set_at(i, j, pd);
                w_matrix.set_at(i, j, pair_weight(pd, s_xy, s_yx));
            }
        }
        tracing::debug!(actions = n, "rebuilt relation matrices");
        Self {
            support,
            precedence_dominance: pd_matrix,
            weight: w_matrix,
        }
    }

    /// Actions indexing the matrices (ascending)
    pub fn actions(&self) -> &[Action] {
        self.support.actions()
    }
}

///
/// Directly-follows support matrix of a [`TraceStore`]
///
pub fn support_matrix(store: &TraceStore) -> RelationMatrix {
    let mut support = RelationMatrix::new(store.distinct_actions());
    for trace in store.traces() {
        let mut prev_index: Option<usize> = None;
        for a in &trace.actions {
            let index = support.index_of(*a);
            if let (Some(i), Some(j)) = (prev_index, index) {
                support.add_at(i, j, trace.frequency);
            }
            prev_index = index;
        }
    }
    support
}

/// All ordered pairs `(x, y)` with `x != y` of the given actions, `x` ascending then `y` ascending
pub(crate) fn ordered_pairs(actions: &[Action]) -> impl Iterator<Item = (usize, usize)> + '_ {
    (0..actions.len())
        .cartesian_product(0..actions.len())
        .filter(|(i, j)| i != j)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::{act, store_from_lines};

    #[test]
    fn formulas() {
        assert_eq!(precedence_dominance(3, 0), 100);
        assert_eq!(precedence_dominance(3, 1), 66);
        assert_eq!(precedence_dominance(4, 1), 75);
        assert_eq!(precedence_dominance(1, 3), 0);
        assert_eq!(precedence_dominance(2, 2), 0);
        assert_eq!(precedence_dominance(0, 0), 0);
        assert_eq!(pair_weight(100, 3, 0), 150);
        assert_eq!(pair_weight(66, 3, 1), 48);
        assert_eq!(pair_weight(0, 1, 3), 150);
        assert_eq!(pair_weight(0, 0, 0), 0);
    }

    #[test]
    fn matrices_of_abc_acb() {
        let store = store_from_lines("a,b,c\na,b,c\na,b,c\na,c,b\n");
        let m = RelationMatrices::from_trace_store(&store);
        let (a, b, c) = (act('a'), act('b'), act('c'));
        assert_eq!(m.actions(), &[a, b, c]);

        assert_eq!(m.support.get(a, b), 3);
        assert_eq!(m.support.get(b, c), 3);
        assert_eq!(m.support.get(a, c), 1);
        assert_eq!(m.support.get(c, b), 1);
        assert_eq!(m.support.get(b, a), 0);
        assert_eq!(m.support.get(c, a), 0);

        assert_eq!(m.precedence_dominance.get(a, b), 100);
        assert_eq!(m.precedence_dominance.get(a, c), 100);
        assert_eq!(m.precedence_dominance.get(b, c), 66);
        assert_eq!(m.precedence_dominance.get(c, b), 0);
        assert_eq!(m.precedence_dominance.get(b, a), 0);

        assert_eq!(m.weight.get(a, b), 150);
        assert_eq!(m.weight.get(a, c), 50);
        assert_eq!(m.weight.get(b, c), 48);
        assert_eq!(m.weight.get(b, a), 150);
        assert_eq!(m.weight.get(c, b), 150);
        assert_eq!(m.weight.get(c, a), 50);
    }

    #[test]
    fn self_loops_count_as_support() {
        let store = store_from_lines("a,a,a,b\n");
        let m = RelationMatrices::from_trace_store(&store);
        assert_eq!(m.support.get(act('a'), act('a')), 2);
        assert_eq!(m.precedence_dominance.get(act('a'), act('a')), 0);
        assert_eq!(m.weight.get(act('a'), act('a')), 100);
    }

    #[test]
    fn ordered_pair_scan_order() {
        let pairs: Vec<(usize, usize)> = ordered_pairs(&[1, 2, 3]).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]);
    }
}
