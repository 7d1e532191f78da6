//! Mapping form - a structured story document with explicit flags and costs.
//!
//! ```json
//! {
//!   "title": "Day 1",
//!   "start_node": "N1",
//!   "nodes": { "N1": { "content": "...", "is_death": false, "is_end": false } },
//!   "edges": [ { "from": "N1", "to": "N2", "label": "看纸条1", "time_change": 15 } ]
//! }
//! ```
//!
//! The same shape is accepted as TOML (`[nodes.N1]`, `[[edges]]`).

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::marker::PhantomData;

use super::FormatError;
use crate::{Edge, GraphError, Node, NodeId, StoryGraph};

/// A node entry of the document, keyed by id in [`NodeTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub content: String,
    #[serde(default)]
    pub is_death: bool,
    #[serde(default)]
    pub is_end: bool,
}

/// An edge entry of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: NodeId,
    pub to: NodeId,
    pub label: String,
    #[serde(default, alias = "time_cost")]
    pub time_change: u32,
}

/// Node entries in document order, keyed by id.
///
/// Kept as a list rather than a map so that authored order survives and a
/// repeated id reaches graph validation instead of silently overwriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTable<R = NodeRecord>(pub Vec<(NodeId, R)>);

impl<'de, R: Deserialize<'de>> Deserialize<'de> for NodeTable<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor<R>(PhantomData<R>);

        impl<'de, R: Deserialize<'de>> Visitor<'de> for TableVisitor<R> {
            type Value = NodeTable<R>;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a table of nodes keyed by node id")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<NodeTable<R>, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<NodeId, R>()? {
                    entries.push(entry);
                }
                Ok(NodeTable(entries))
            }
        }

        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

impl<R: Serialize> Serialize for NodeTable<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, record) in &self.0 {
            map.serialize_entry(id, record)?;
        }
        map.end()
    }
}

/// The whole story in mapping form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub start_node: NodeId,
    pub nodes: NodeTable,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl StoryDocument {
    pub fn from_json(input: &str) -> Result<Self, FormatError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_toml(input: &str) -> Result<Self, FormatError> {
        Ok(toml::from_str(input)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the document and build the graph.
    pub fn into_graph(self) -> Result<StoryGraph, GraphError> {
        let nodes = self.nodes.0.into_iter().map(|(id, record)| {
            Node::new(id, record.content)
                .with_death(record.is_death)
                .with_end(record.is_end)
        });
        let edges = self.edges.into_iter().map(|record| {
            Edge::new(record.from, record.label, record.to).with_time_cost(record.time_change)
        });

        let graph = StoryGraph::build(nodes, edges, self.start_node)?;
        Ok(match self.title {
            Some(title) => graph.with_title(title),
            None => graph,
        })
    }

    /// Export a graph back into mapping form.
    pub fn from_graph(graph: &StoryGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| {
                let record = NodeRecord {
                    content: node.content.clone(),
                    is_death: node.is_death,
                    is_end: node.is_end,
                };
                (node.id.clone(), record)
            })
            .collect();
        let edges = graph
            .edges()
            .iter()
            .map(|edge| EdgeRecord {
                from: edge.from.clone(),
                to: edge.to.clone(),
                label: edge.label.clone(),
                time_change: edge.time_cost,
            })
            .collect();

        Self {
            title: graph.title().map(str::to_owned),
            start_node: graph.start_node().clone(),
            nodes: NodeTable(nodes),
            edges,
        }
    }
}
