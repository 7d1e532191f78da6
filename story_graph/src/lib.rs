//! # Story Graph
//!
//! The content side of the engine: narrative nodes, the labelled choice edges
//! between them, and the validated [`StoryGraph`] that ties them together.
//! This crate knows nothing about playthroughs; see `story_engine` for that.
//!
//! ## Modules
//!
//! - **node** / **edge**: the data model
//! - **graph**: construction-time validation and read-only queries
//! - **formats**: adapters from external encodings (mapping, tuples, markup)

pub mod edge;
mod error;
pub mod formats;
pub mod graph;
pub mod node;

pub use edge::*;
pub use error::*;
pub use graph::*;
pub use node::*;
