use serde::{Deserialize, Serialize};

use crate::event_log::action::Action;

///
/// Square matrix of values between pairs of [`Action`]s
///
/// Rows and columns are the given actions in ascending order;
/// each action is mapped to a dense index.
/// Reading an entry for an action that is not part of the matrix yields `0`.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationMatrix {
    actions: Vec<Action>,
    values: Vec<u64>,
}

impl RelationMatrix {
    /// Create a zero-initialized [`RelationMatrix`] over the given actions
    ///
    /// The actions are sorted and de-duplicated.
    pub fn new(mut actions: Vec<Action>) -> Self {
        actions.sort_unstable();
        actions.dedup();
        let n = actions.len();
        Self {
            actions,
            values: vec![0; n * n],
        }
    }

    /// Actions of the rows/columns (ascending)
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of rows (= number of columns)
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if the matrix is over no actions at all
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Dense index of an action
    pub fn index_of(&self, action: Action) -> Option<usize> {
        self.actions.binary_search(&action).ok()
    }

    /// Value for the pair `(x, y)`; `0` if one of the actions is unknown
    pub fn get(&self, x: Action, y: Action) -> u64 {
        match (self.index_of(x), self.index_of(y)) {
            (Some(i), Some(j)) => self.at(i, j),
            _ => 0,
        }
    }

    /// Value at the dense indices `(i, j)`
    pub fn at(&self, i: usize, j: usize) -> u64 {
        self.values[i * self.actions.len() + j]
    }

    pub(crate) fn set_at(&mut self, i: usize, j: usize, value: u64) {
        let n = self.actions.len();
        self.values[i * n + j] = value;
    }

    pub(crate) fn add_at(&mut self, i: usize, j: usize, value: u64) {
        let n = self.actions.len();
        self.values[i * n + j] += value;
    }

    /// Rows of the matrix, each with the action it belongs to
    pub fn rows(&self) -> impl Iterator<Item = (Action, &[u64])> + '_ {
        self.actions
            .iter()
            .copied()
            .zip(self.values.chunks(self.actions.len().max(1)))
    }

    /// All `(x, y, value)` entries with a non-zero value, row by row
    pub fn non_zero_entries(&self) -> impl Iterator<Item = (Action, Action, u64)> + '_ {
        self.rows().flat_map(move |(x, row)| {
            row.iter()
                .zip(self.actions.iter())
                .filter(|(v, _)| **v != 0)
                .map(move |(v, y)| (x, *y, *v))
        })
    }
}
