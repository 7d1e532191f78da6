//! Story Graph - the validated, immutable structure a playthrough walks.
//!
//! All invariants are checked once in [`StoryGraph::build`]. After that the
//! graph is never mutated, so it can be shared read-only by any number of
//! sessions (including across threads).

mod reachability;

use std::collections::{HashMap, HashSet};

use crate::{Edge, Endpoint, GraphError, MalformedGraph, Node, NodeId};

/// The directed graph of narrative nodes and labelled choice edges.
#[derive(Debug, Clone)]
pub struct StoryGraph {
    title: Option<String>,

    start: NodeId,

    /// Nodes in authored order.
    nodes: Vec<Node>,

    /// Index: node id -> position in `nodes`.
    index: HashMap<NodeId, usize>,

    /// All edges in authored order.
    edges: Vec<Edge>,

    /// Outgoing edges per node, in presentation order.
    outgoing: HashMap<NodeId, Vec<Edge>>,
}

impl StoryGraph {
    /// Validate nodes and edges and build an immutable graph.
    ///
    /// Checks run in a fixed order and the first violation is returned:
    /// duplicate node ids, nodes that are both death and end, a missing start
    /// node, dangling edges, terminal nodes with exits, duplicate labels within
    /// a node, and non-terminal nodes without exits.
    pub fn build<N, E>(nodes: N, edges: E, start: impl Into<NodeId>) -> Result<Self, GraphError>
    where
        N: IntoIterator<Item = Node>,
        E: IntoIterator<Item = Edge>,
    {
        let start = start.into();

        let mut ordered = Vec::new();
        let mut index = HashMap::new();
        for node in nodes {
            if index.contains_key(&node.id) {
                return Err(MalformedGraph::DuplicateNode(node.id).into());
            }
            if node.is_death && node.is_end {
                return Err(MalformedGraph::ConflictingTerminal(node.id).into());
            }
            index.insert(node.id.clone(), ordered.len());
            ordered.push(node);
        }

        if !index.contains_key(&start) {
            return Err(MalformedGraph::MissingStartNode(start).into());
        }

        let edges: Vec<Edge> = edges.into_iter().collect();
        let mut outgoing: HashMap<NodeId, Vec<Edge>> = HashMap::new();
        for edge in &edges {
            let missing = if !index.contains_key(&edge.from) {
                Some(Endpoint::From)
            } else if !index.contains_key(&edge.to) {
                Some(Endpoint::To)
            } else {
                None
            };
            if let Some(missing) = missing {
                return Err(MalformedGraph::DanglingEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    missing,
                }
                .into());
            }
            outgoing.entry(edge.from.clone()).or_default().push(edge.clone());
        }

        for node in &ordered {
            let exits = outgoing.get(&node.id).map(Vec::as_slice).unwrap_or(&[]);

            if node.is_terminal() && !exits.is_empty() {
                return Err(MalformedGraph::TerminalWithExits(node.id.clone()).into());
            }

            let mut labels = HashSet::new();
            for edge in exits {
                if !labels.insert(edge.label.as_str()) {
                    return Err(MalformedGraph::DuplicateLabel {
                        node: node.id.clone(),
                        label: edge.label.clone(),
                    }
                    .into());
                }
            }

            if !node.is_terminal() && exits.is_empty() {
                return Err(MalformedGraph::DeadEnd(node.id.clone()).into());
            }
        }

        let graph = Self {
            title: None,
            start,
            nodes: ordered,
            index,
            edges,
            outgoing,
        };

        tracing::debug!(
            start = %graph.start,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "story graph built"
        );

        let unreachable = graph.unreachable_nodes();
        if !unreachable.is_empty() {
            let ids: Vec<&str> = unreachable.iter().map(|id| id.as_str()).collect();
            tracing::warn!(nodes = ?ids, "story graph has nodes unreachable from the start node");
        }

        Ok(graph)
    }

    /// Attach a display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Id of the entry node.
    pub fn start_node(&self) -> &NodeId {
        &self.start
    }

    /// The entry node itself.
    pub fn start(&self) -> &Node {
        // The start node is checked in `build`.
        &self.nodes[self.index[&self.start]]
    }

    /// Get a node by id.
    pub fn node(&self, id: &str) -> Result<&Node, GraphError> {
        self.index
            .get(id)
            .map(|&i| &self.nodes[i])
            .ok_or_else(|| GraphError::NodeNotFound(NodeId::from(id)))
    }

    /// Check if a node with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Outgoing edges of a node in authored order. Empty only for terminal nodes.
    pub fn outgoing_edges(&self, id: &str) -> Result<&[Edge], GraphError> {
        let node = self.node(id)?;
        Ok(self
            .outgoing
            .get(&node.id)
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }

    /// Find the outgoing edge of `from` with exactly this label.
    pub fn edge(&self, from: &str, label: &str) -> Option<&Edge> {
        self.outgoing
            .get(from)?
            .iter()
            .find(|edge| edge.label == label)
    }

    /// True iff the node is a death or end node.
    pub fn is_terminal(&self, id: &str) -> Result<bool, GraphError> {
        self.node(id).map(Node::is_terminal)
    }

    /// All nodes in authored order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// All node ids in authored order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter().map(|node| &node.id)
    }

    /// All edges in authored order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Death nodes in authored order.
    pub fn death_nodes(&self) -> Vec<&Node> {
        self.nodes.iter().filter(|node| node.is_death).collect()
    }

    /// End nodes in authored order.
    pub fn end_nodes(&self) -> Vec<&Node> {
        self.nodes.iter().filter(|node| node.is_end).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hallway_nodes() -> Vec<Node> {
        vec![
            Node::new("N1", "bedroom"),
            Node::new("N4", "hallway"),
            Node::new("N11", "corridor"),
            Node::death("DEAD1", "the family greets you"),
            Node::ending("DAY2", "morning"),
        ]
    }

    fn hallway_edges() -> Vec<Edge> {
        vec![
            Edge::new("N1", "直接开门", "N4").with_time_cost(10),
            Edge::new("N4", "打招呼", "DEAD1").with_time_cost(10),
            Edge::new("N4", "回卧室", "N1").with_time_cost(5),
            Edge::new("N4", "继续走", "N11").with_time_cost(20),
            Edge::new("N11", "回卧室休息", "DAY2").with_time_cost(30),
        ]
    }

    fn malformed(result: Result<StoryGraph, GraphError>) -> MalformedGraph {
        match result {
            Err(GraphError::Malformed(err)) => err,
            other => panic!("expected a malformed graph error, got {other:?}"),
        }
    }

    #[test]
    fn test_build_valid_graph() {
        let graph = StoryGraph::build(hallway_nodes(), hallway_edges(), "N1").unwrap();

        assert_eq!(graph.start_node().as_str(), "N1");
        assert_eq!(graph.start().content, "bedroom");
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 5);
        assert!(graph.title().is_none());
    }

    #[test]
    fn test_outgoing_edges_keep_authored_order() {
        let graph = StoryGraph::build(hallway_nodes(), hallway_edges(), "N1").unwrap();

        let labels: Vec<_> = graph
            .outgoing_edges("N4")
            .unwrap()
            .iter()
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(labels, vec!["打招呼", "回卧室", "继续走"]);

        assert!(graph.outgoing_edges("DEAD1").unwrap().is_empty());
    }

    #[test]
    fn test_queries_on_unknown_node() {
        let graph = StoryGraph::build(hallway_nodes(), hallway_edges(), "N1").unwrap();

        assert_eq!(
            graph.node("N99"),
            Err(GraphError::NodeNotFound(NodeId::from("N99")))
        );
        assert!(graph.outgoing_edges("N99").is_err());
        assert!(graph.is_terminal("N99").is_err());
        assert!(!graph.contains("N99"));
    }

    #[test]
    fn test_is_terminal() {
        let graph = StoryGraph::build(hallway_nodes(), hallway_edges(), "N1").unwrap();

        assert_eq!(graph.is_terminal("N1"), Ok(false));
        assert_eq!(graph.is_terminal("DEAD1"), Ok(true));
        assert_eq!(graph.is_terminal("DAY2"), Ok(true));
    }

    #[test]
    fn test_edge_lookup_is_local_to_node() {
        let graph = StoryGraph::build(hallway_nodes(), hallway_edges(), "N1").unwrap();

        assert_eq!(graph.edge("N4", "继续走").map(|e| e.to.as_str()), Some("N11"));
        assert!(graph.edge("N1", "继续走").is_none());
    }

    #[test]
    fn test_terminal_listings() {
        let graph = StoryGraph::build(hallway_nodes(), hallway_edges(), "N1").unwrap();

        let deaths: Vec<_> = graph.death_nodes().iter().map(|n| n.id.as_str()).collect();
        let ends: Vec<_> = graph.end_nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(deaths, vec!["DEAD1"]);
        assert_eq!(ends, vec!["DAY2"]);
    }

    #[test]
    fn test_title() {
        let graph = StoryGraph::build(hallway_nodes(), hallway_edges(), "N1")
            .unwrap()
            .with_title("Day One");
        assert_eq!(graph.title(), Some("Day One"));
    }

    #[test]
    fn test_rejects_duplicate_node() {
        let mut nodes = hallway_nodes();
        nodes.push(Node::new("N4", "another hallway"));

        let err = malformed(StoryGraph::build(nodes, hallway_edges(), "N1"));
        assert_eq!(err, MalformedGraph::DuplicateNode(NodeId::from("N4")));
    }

    #[test]
    fn test_rejects_node_both_death_and_end() {
        let mut nodes = hallway_nodes();
        nodes.push(Node::death("LIMBO", "neither").with_end(true));

        let err = malformed(StoryGraph::build(nodes, hallway_edges(), "N1"));
        assert_eq!(err, MalformedGraph::ConflictingTerminal(NodeId::from("LIMBO")));
    }

    #[test]
    fn test_rejects_missing_start_node() {
        let err = malformed(StoryGraph::build(hallway_nodes(), hallway_edges(), "N0"));
        assert_eq!(err, MalformedGraph::MissingStartNode(NodeId::from("N0")));
    }

    #[test]
    fn test_rejects_unknown_edge_source() {
        let mut edges = hallway_edges();
        edges.push(Edge::new("N40", "sneak", "N1"));

        let err = malformed(StoryGraph::build(hallway_nodes(), edges, "N1"));
        assert!(matches!(
            err,
            MalformedGraph::DanglingEdge { missing: Endpoint::From, ref from, .. } if from.as_str() == "N40"
        ));
    }

    #[test]
    fn test_rejects_unknown_edge_target() {
        let mut edges = hallway_edges();
        edges.push(Edge::new("N1", "look under the bed", "N40"));

        let err = malformed(StoryGraph::build(hallway_nodes(), edges, "N1"));
        assert!(matches!(
            err,
            MalformedGraph::DanglingEdge { missing: Endpoint::To, ref to, .. } if to.as_str() == "N40"
        ));
    }

    #[test]
    fn test_rejects_terminal_with_exits() {
        let mut edges = hallway_edges();
        edges.push(Edge::new("DEAD1", "wake up", "N1"));

        let err = malformed(StoryGraph::build(hallway_nodes(), edges, "N1"));
        assert_eq!(err, MalformedGraph::TerminalWithExits(NodeId::from("DEAD1")));
    }

    #[test]
    fn test_rejects_duplicate_label_within_node() {
        let mut edges = hallway_edges();
        edges.push(Edge::new("N4", "继续走", "DAY2"));

        let err = malformed(StoryGraph::build(hallway_nodes(), edges, "N1"));
        assert_eq!(
            err,
            MalformedGraph::DuplicateLabel {
                node: NodeId::from("N4"),
                label: "继续走".to_string(),
            }
        );
    }

    #[test]
    fn test_same_label_allowed_on_different_nodes() {
        let mut nodes = hallway_nodes();
        nodes.push(Node::new("N7", "pocket"));
        let mut edges = hallway_edges();
        edges.push(Edge::new("N1", "藏进口袋", "N7"));
        edges.push(Edge::new("N7", "直接开门", "N4"));

        assert!(StoryGraph::build(nodes, edges, "N1").is_ok());
    }

    #[test]
    fn test_rejects_dead_end() {
        let mut nodes = hallway_nodes();
        nodes.push(Node::new("N3", "a quiet room"));
        let mut edges = hallway_edges();
        edges.push(Edge::new("N1", "观察房间", "N3"));

        let err = malformed(StoryGraph::build(nodes, edges, "N1"));
        assert_eq!(err, MalformedGraph::DeadEnd(NodeId::from("N3")));
    }

    #[test]
    fn test_graph_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StoryGraph>();
    }
}
