//! Session snapshots - the state handed to renderers and save systems.

use serde::{Deserialize, Serialize};
use story_graph::{NodeId, StoryGraph};

use super::{SessionId, SessionStatus, Step, TraversalSession};
use crate::SessionError;

/// Format version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// An immutable copy of a session's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    pub session_id: SessionId,
    pub current_node: NodeId,
    pub elapsed_time: u64,
    pub history: Vec<Step>,
    pub status: SessionStatus,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

impl<'g> TraversalSession<'g> {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            session_id: self.id,
            current_node: self.current.id.clone(),
            elapsed_time: self.elapsed_time,
            history: self.history.clone(),
            status: self.status,
        }
    }

    /// Rebuild a session from a snapshot by replaying its history.
    ///
    /// Every history entry must name the node the replay is actually at, and
    /// the replayed position, time and status must equal the snapshot's.
    pub fn resume(graph: &'g StoryGraph, snapshot: &SessionSnapshot) -> Result<Self, SessionError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SessionError::UnsupportedSnapshot {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let mut session = TraversalSession::new(graph);
        session.id = snapshot.session_id;

        for (index, step) in snapshot.history.iter().enumerate() {
            if session.current.id != step.node {
                return Err(SessionError::SnapshotMismatch(format!(
                    "step {} leaves `{}` but the replay is at `{}`",
                    index + 1,
                    step.node,
                    session.current.id
                )));
            }
            session.advance(&step.label)?;
        }

        let replayed = (&session.current.id, session.elapsed_time, session.status);
        let expected = (&snapshot.current_node, snapshot.elapsed_time, snapshot.status);
        if replayed != expected {
            return Err(SessionError::SnapshotMismatch(format!(
                "replay ends at `{}` after {} minutes ({}), snapshot says `{}` after {} minutes ({})",
                replayed.0, replayed.1, replayed.2, expected.0, expected.1, expected.2
            )));
        }

        tracing::debug!(session = %session.id, steps = session.history.len(), "session resumed");
        Ok(session)
    }
}
