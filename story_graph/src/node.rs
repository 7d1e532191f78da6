//! Node definitions - the narrative states of a story.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Identifier of a node, assigned when the content is authored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A narrative state. The content is never interpreted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,

    /// Opaque narrative payload handed to the renderer.
    pub content: String,

    /// Reaching this node ends the playthrough in failure.
    pub is_death: bool,

    /// Reaching this node ends the playthrough successfully.
    pub is_end: bool,
}

impl Node {
    /// Create an ordinary (non-terminal) node.
    pub fn new(id: impl Into<NodeId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            is_death: false,
            is_end: false,
        }
    }

    /// Create a death node.
    pub fn death(id: impl Into<NodeId>, content: impl Into<String>) -> Self {
        Self::new(id, content).with_death(true)
    }

    /// Create a successful ending node.
    pub fn ending(id: impl Into<NodeId>, content: impl Into<String>) -> Self {
        Self::new(id, content).with_end(true)
    }

    pub fn with_death(mut self, is_death: bool) -> Self {
        self.is_death = is_death;
        self
    }

    pub fn with_end(mut self, is_end: bool) -> Self {
        self.is_end = is_end;
        self
    }

    /// Death and end nodes are terminal: no choice leaves them.
    pub fn is_terminal(&self) -> bool {
        self.is_death || self.is_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_constructors() {
        let plain = Node::new("N1", "You wake up.");
        assert_eq!(plain.id, NodeId::from("N1"));
        assert!(!plain.is_terminal());

        let dead = Node::death("DEAD1", "You died.");
        assert!(dead.is_death);
        assert!(!dead.is_end);
        assert!(dead.is_terminal());

        let end = Node::ending("DAY2", "Morning comes.");
        assert!(end.is_end);
        assert!(end.is_terminal());
    }

    #[test]
    fn test_node_id_borrows_as_str() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(NodeId::from("N4"), 4);

        assert_eq!(map.get("N4"), Some(&4));
        assert_eq!(NodeId::new("N4").to_string(), "N4");
    }

    #[test]
    fn test_node_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&NodeId::from("N7")).unwrap();
        assert_eq!(json, "\"N7\"");
    }
}
