//! Tuple form - node contents keyed by id and `[from, label, to]` edge triples.
//!
//! This encoding carries neither terminal flags nor time costs: flags come from
//! [`TerminalRules`] and every edge costs zero minutes.

use serde::{Deserialize, Serialize};

use super::mapping::NodeTable;
use super::{FormatError, TerminalRules};
use crate::{Edge, NodeId, StoryGraph};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TupleDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub start_node: NodeId,
    pub nodes: NodeTable<String>,
    #[serde(default)]
    pub edges: Vec<(NodeId, String, NodeId)>,
}

impl TupleDocument {
    pub fn into_graph(self, rules: &TerminalRules) -> Result<StoryGraph, FormatError> {
        let edges: Vec<Edge> = self
            .edges
            .into_iter()
            .map(|(from, label, to)| Edge::new(from, label, to))
            .collect();
        let nodes = rules.apply(self.nodes.0, &edges);

        let graph = StoryGraph::build(nodes, edges, self.start_node)?;
        Ok(match self.title {
            Some(title) => graph.with_title(title),
            None => graph,
        })
    }
}

/// Parse a JSON tuple document and build the graph.
pub fn parse(input: &str, rules: &TerminalRules) -> Result<StoryGraph, FormatError> {
    let document: TupleDocument = serde_json::from_str(input)?;
    document.into_graph(rules)
}
