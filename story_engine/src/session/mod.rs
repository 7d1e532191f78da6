//! Traversal Session - one stateful playthrough of a story graph.
//!
//! A session moves through three states:
//! 1. **InProgress**: the initial state, positioned at the start node
//! 2. **Dead**: entered by arriving at a death node
//! 3. **Completed**: entered by arriving at an end node
//!
//! `Dead` and `Completed` are terminal. Once there, `choices` and `advance`
//! fail with [`SessionError::SessionTerminated`] until the session is reset.

mod snapshot;

pub use snapshot::*;

use serde::{Deserialize, Serialize};
use story_graph::{Edge, Node, NodeId, StoryGraph};
use uuid::Uuid;

use crate::{ClockTime, SessionError, StoryClock};

/// Unique identifier for sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a playthrough stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SessionStatus {
    #[default]
    InProgress,
    Dead,
    Completed,
}

impl SessionStatus {
    /// Status after arriving at `node`.
    fn on_arrival(node: &Node) -> Self {
        if node.is_death {
            SessionStatus::Dead
        } else if node.is_end {
            SessionStatus::Completed
        } else {
            SessionStatus::InProgress
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionStatus::InProgress)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::InProgress => write!(f, "in progress"),
            SessionStatus::Dead => write!(f, "dead"),
            SessionStatus::Completed => write!(f, "completed"),
        }
    }
}

/// One entry of the history: the node that was left and the choice taken there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub node: NodeId,
    pub label: String,
}

/// A playthrough bound to a graph it only ever reads.
#[derive(Debug)]
pub struct TraversalSession<'g> {
    id: SessionId,
    graph: &'g StoryGraph,
    current: &'g Node,
    /// Sum of the time costs of every edge taken, in minutes.
    elapsed_time: u64,
    history: Vec<Step>,
    status: SessionStatus,
}

/// A clone branches the playthrough: same position and history, new id.
impl Clone for TraversalSession<'_> {
    fn clone(&self) -> Self {
        Self {
            id: SessionId::new(),
            graph: self.graph,
            current: self.current,
            elapsed_time: self.elapsed_time,
            history: self.history.clone(),
            status: self.status,
        }
    }
}

impl<'g> TraversalSession<'g> {
    /// Start a new playthrough at the graph's start node.
    pub fn new(graph: &'g StoryGraph) -> Self {
        let session = Self {
            id: SessionId::new(),
            graph,
            current: graph.start(),
            elapsed_time: 0,
            history: Vec::new(),
            status: SessionStatus::InProgress,
        };
        tracing::debug!(session = %session.id, start = %session.current.id, "session started");
        session
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn graph(&self) -> &'g StoryGraph {
        self.graph
    }

    /// The node the player currently occupies.
    pub fn current(&self) -> &'g Node {
        self.current
    }

    pub fn current_node(&self) -> &'g NodeId {
        &self.current.id
    }

    pub fn elapsed_time(&self) -> u64 {
        self.elapsed_time
    }

    pub fn history(&self) -> &[Step] {
        &self.history
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn steps_taken(&self) -> usize {
        self.history.len()
    }

    /// In-fiction time of day after the elapsed minutes.
    pub fn clock_time(&self, clock: &StoryClock) -> ClockTime {
        clock.time_at(self.elapsed_time)
    }

    /// How many times the node has been occupied, the current visit included.
    pub fn visit_count(&self, id: &str) -> usize {
        let past = self
            .history
            .iter()
            .filter(|step| step.node.as_str() == id)
            .count();
        past + usize::from(self.current.id.as_str() == id)
    }

    /// Check if the current node was already visited earlier in this playthrough.
    pub fn is_revisit(&self) -> bool {
        self.history.iter().any(|step| step.node == self.current.id)
    }

    fn ensure_in_progress(&self) -> Result<(), SessionError> {
        if self.status.is_terminal() {
            Err(SessionError::SessionTerminated(self.status))
        } else {
            Ok(())
        }
    }

    /// Choices available at the current node, in presentation order.
    pub fn choices(&self) -> Result<&'g [Edge], SessionError> {
        self.ensure_in_progress()?;
        Ok(self.graph.outgoing_edges(self.current.id.as_str())?)
    }

    /// Take the choice with exactly this label.
    ///
    /// On error the session is left untouched.
    pub fn advance(&mut self, label: &str) -> Result<&'g Node, SessionError> {
        self.ensure_in_progress()?;

        let edge = self
            .graph
            .edge(self.current.id.as_str(), label)
            .ok_or_else(|| SessionError::UnknownChoice {
                node: self.current.id.clone(),
                label: label.to_string(),
            })?;
        let next = self.graph.node(edge.to.as_str())?;

        self.history.push(Step {
            node: self.current.id.clone(),
            label: edge.label.clone(),
        });
        self.elapsed_time += u64::from(edge.time_cost);
        self.current = next;
        self.status = SessionStatus::on_arrival(next);

        tracing::debug!(
            session = %self.id,
            from = %edge.from,
            to = %edge.to,
            label = %edge.label,
            elapsed = self.elapsed_time,
            "advanced"
        );
        if self.status.is_terminal() {
            tracing::info!(
                session = %self.id,
                node = %next.id,
                status = %self.status,
                elapsed = self.elapsed_time,
                steps = self.history.len(),
                "session ended"
            );
        }

        Ok(next)
    }

    /// Return to the start node with no elapsed time and an empty history.
    pub fn reset(&mut self) {
        self.current = self.graph.start();
        self.elapsed_time = 0;
        self.history.clear();
        self.status = SessionStatus::InProgress;
        tracing::debug!(session = %self.id, "session reset");
    }
}
