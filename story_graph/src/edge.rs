//! Edge definitions - the player choices between nodes.

use serde::{Deserialize, Serialize};

use crate::NodeId;

/// A labelled, weighted, directed transition between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,

    /// Choice text shown to the player. Unique within the `from` node.
    pub label: String,

    /// In-fiction minutes that pass when this choice is taken.
    pub time_cost: u32,
}

impl Edge {
    /// Create an edge with no time cost.
    pub fn new(from: impl Into<NodeId>, label: impl Into<String>, to: impl Into<NodeId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: label.into(),
            time_cost: 0,
        }
    }

    /// Set the time cost in minutes.
    pub fn with_time_cost(mut self, minutes: u32) -> Self {
        self.time_cost = minutes;
        self
    }
}
