//! # Story Engine
//!
//! Drives playthroughs of a [`StoryGraph`]. A caller builds the graph once
//! (directly or through `story_graph::formats`) and then opens any number of
//! independent [`TraversalSession`]s against it.
//!
//! ## Core Components
//!
//! - **session**: the playthrough state machine, snapshots and resume
//! - **clock**: in-fiction time of day derived from elapsed minutes
//! - **config**: TOML play configuration
//!
//! ## Design Philosophy
//!
//! - **Read-only content**: sessions borrow the graph and never mutate it
//! - **Fail fast**: every rejected operation returns a distinct [`SessionError`]
//!   and leaves the session as it was
//! - **No I/O in the core**: persistence and rendering consume snapshots

pub mod clock;
pub mod config;
mod error;
pub mod session;

pub use clock::*;
pub use config::*;
pub use error::*;
pub use session::*;

pub use story_graph::{Edge, GraphError, MalformedGraph, Node, NodeId, StoryGraph};
