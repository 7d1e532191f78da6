//! Errors surfaced by a playthrough.

use story_graph::{GraphError, NodeId};
use thiserror::Error;

use crate::SessionStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No outgoing edge of the current node has this label. Re-prompt.
    #[error("no choice labelled `{label}` at node `{node}`")]
    UnknownChoice { node: NodeId, label: String },

    /// The session is `Dead` or `Completed`. Reset or start a new one.
    #[error("session has already ended ({0})")]
    SessionTerminated(SessionStatus),

    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedSnapshot { found: u32, expected: u32 },

    #[error("snapshot does not match the story: {0}")]
    SnapshotMismatch(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
