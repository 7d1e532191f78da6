//! Reachability analysis over a built graph.

use std::collections::{HashSet, VecDeque};

use super::StoryGraph;
use crate::{GraphError, NodeId};

impl StoryGraph {
    /// Ids of every node reachable from `id` by following edges, `id` included.
    pub fn reachable_from(&self, id: &str) -> Result<HashSet<&NodeId>, GraphError> {
        let origin = &self.node(id)?.id;

        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(origin);
        queue.push_back(origin);

        while let Some(current) = queue.pop_front() {
            for edge in self.outgoing_edges(current.as_str())? {
                if seen.insert(&edge.to) {
                    queue.push_back(&edge.to);
                }
            }
        }

        Ok(seen)
    }

    /// Nodes that can never be visited from the start node, in authored order.
    pub fn unreachable_nodes(&self) -> Vec<&NodeId> {
        let Ok(reachable) = self.reachable_from(self.start.as_str()) else {
            return Vec::new();
        };
        self.node_ids()
            .filter(|id| !reachable.contains(id))
            .collect()
    }
}
