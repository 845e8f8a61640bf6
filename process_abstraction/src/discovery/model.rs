use std::{
    collections::{BTreeMap, HashSet},
    fmt::Display,
};

use serde::{Deserialize, Serialize};

use super::{
    full::AbstractionStep,
    pattern_selection::{Pattern, RelationKind},
};
use crate::event_log::action::{action_label, Action};

///
/// Node in the tree of an abstraction
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// Action that was not abstracted (any further)
    Action(Action),
    /// Synthetic action abstracting two child nodes
    Relation {
        /// Synthetic action identifier
        id: Action,
        /// Relation between the children
        kind: RelationKind,
        /// The two abstracted nodes (in pattern order)
        children: Vec<Node>,
    },
}

impl Node {
    /// Action represented by this node
    pub fn action(&self) -> Action {
        match self {
            Node::Action(a) => *a,
            Node::Relation { id, .. } => *id,
        }
    }

    /// Original actions below this node (left to right)
    pub fn leaves(&self) -> Vec<Action> {
        let mut result = Vec::new();
        let mut stack: Vec<&Node> = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Action(a) => result.push(*a),
                Node::Relation { children, .. } => stack.extend(children.iter().rev()),
            }
        }
        result
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Action(a) => write!(f, "{}", action_label(*a)),
            Node::Relation { kind, children, .. } => {
                write!(f, "{}(", kind)?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

///
/// Definitions of all synthetic actions introduced during discovery
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstractionModel {
    /// Pattern abstracted by each synthetic action
    pub definitions: BTreeMap<Action, Pattern>,
}

impl AbstractionModel {
    /// Collect the definitions of the given abstraction steps
    pub fn from_steps(steps: &[AbstractionStep]) -> Self {
        Self {
            definitions: steps.iter().map(|s| (s.abstraction, s.pattern)).collect(),
        }
    }

    /// Pattern a synthetic action stands for
    pub fn definition(&self, abstraction: Action) -> Option<&Pattern> {
        self.definitions.get(&abstraction)
    }

    /// Synthetic actions that are not part of another abstraction (ascending)
    pub fn roots(&self) -> Vec<Action> {
        let used: HashSet<Action> = self
            .definitions
            .values()
            .flat_map(|p| [p.a, p.b])
            .collect();
        self.definitions
            .keys()
            .copied()
            .filter(|id| !used.contains(id))
            .collect()
    }

    /// Tree of nodes below an action
    ///
    /// Actions without a definition become [`Node::Action`] leaves.
    pub fn tree(&self, action: Action) -> Node {
        match self.definitions.get(&action) {
            Some(pattern) => Node::Relation {
                id: action,
                kind: pattern.kind,
                children: vec![self.tree(pattern.a), self.tree(pattern.b)],
            },
            None => Node::Action(action),
        }
    }
}
