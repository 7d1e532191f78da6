//! Error types for graph construction and queries.

use thiserror::Error;

use crate::NodeId;

/// Which end of an edge failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    From,
    To,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::From => write!(f, "source"),
            Endpoint::To => write!(f, "target"),
        }
    }
}

/// A violated graph invariant. Construction stops at the first one found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedGraph {
    #[error("node `{0}` is defined more than once")]
    DuplicateNode(NodeId),

    #[error("node `{0}` is marked as both death and end")]
    ConflictingTerminal(NodeId),

    #[error("start node `{0}` does not exist")]
    MissingStartNode(NodeId),

    #[error("edge `{from}` -> `{to}` has an unknown {missing} node")]
    DanglingEdge {
        from: NodeId,
        to: NodeId,
        missing: Endpoint,
    },

    #[error("terminal node `{0}` has outgoing edges")]
    TerminalWithExits(NodeId),

    #[error("node `{node}` has more than one choice labelled `{label}`")]
    DuplicateLabel { node: NodeId, label: String },

    #[error("node `{0}` is not terminal but has no outgoing edges")]
    DeadEnd(NodeId),
}

/// Errors produced by [`crate::StoryGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("malformed story graph: {0}")]
    Malformed(#[from] MalformedGraph),

    #[error("node not found: `{0}`")]
    NodeNotFound(NodeId),
}
