//! Content adapters - turn external story encodings into a [`StoryGraph`].
//!
//! Every adapter normalises its input into [`Node`] and [`Edge`] values and
//! hands them to [`StoryGraph::build`]; there is a single in-memory model.
//!
//! - **mapping**: structured document with explicit flags and time costs (JSON or TOML)
//! - **tuples**: node contents plus `[from, label, to]` edge triples (JSON)
//! - **markup**: flowchart text with `ID["content"]` and `A -->|"label"| B` lines

pub mod mapping;
pub mod markup;
pub mod tuples;

pub use mapping::StoryDocument;
pub use markup::MarkupOptions;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::{Edge, GraphError, Node, NodeId, StoryGraph};

/// Errors raised while reading story content.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid JSON story content: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML story content: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("markup line {line}: {message}")]
    Markup { line: usize, message: String },

    #[error("markup content defines no nodes")]
    EmptyMarkup,

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// How terminal flags are derived for encodings that do not carry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalRules {
    /// Content starting with this marker makes a death node.
    pub death_marker: String,

    /// A non-death node with no outgoing edges becomes an end node.
    pub infer_end_nodes: bool,
}

impl Default for TerminalRules {
    fn default() -> Self {
        Self {
            death_marker: "你死了".to_string(),
            infer_end_nodes: true,
        }
    }
}

impl TerminalRules {
    /// Build flagged nodes from `(id, content)` pairs and the edges that leave them.
    pub fn apply(&self, contents: Vec<(NodeId, String)>, edges: &[Edge]) -> Vec<Node> {
        let sources: HashSet<&NodeId> = edges.iter().map(|edge| &edge.from).collect();

        contents
            .into_iter()
            .map(|(id, content)| {
                let is_death =
                    !self.death_marker.is_empty() && content.starts_with(&self.death_marker);
                let is_end = !is_death && self.infer_end_nodes && !sources.contains(&id);
                Node::new(id, content).with_death(is_death).with_end(is_end)
            })
            .collect()
    }
}

/// Supported content encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Json,
    Toml,
    Tuples,
    Markup,
}

impl ContentFormat {
    /// Guess the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(ContentFormat::Json),
            "toml" => Some(ContentFormat::Toml),
            "mmd" | "mermaid" | "txt" => Some(ContentFormat::Markup),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ContentFormat::Json => "json",
            ContentFormat::Toml => "toml",
            ContentFormat::Tuples => "tuples",
            ContentFormat::Markup => "markup",
        };
        write!(f, "{}", name)
    }
}

/// Parse story content in the given format and build the graph.
///
/// `options.start_node` is honoured for markup only; the other formats name
/// their own start node.
pub fn load(
    input: &str,
    format: ContentFormat,
    options: &MarkupOptions,
) -> Result<StoryGraph, FormatError> {
    if options.start_node.is_some() && format != ContentFormat::Markup {
        tracing::warn!(
            %format,
            "start node override only applies to markup content; using the document's start node"
        );
    }

    let graph = match format {
        ContentFormat::Json => StoryDocument::from_json(input)?.into_graph()?,
        ContentFormat::Toml => StoryDocument::from_toml(input)?.into_graph()?,
        ContentFormat::Tuples => tuples::parse(input, &options.terminals)?,
        ContentFormat::Markup => markup::parse(input, options)?,
    };
    tracing::debug!(%format, nodes = graph.node_count(), "story content loaded");
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_rules_infer_flags() {
        let edges = vec![Edge::new("N4", "打招呼", "DEAD1"), Edge::new("N4", "继续走", "DAY2")];
        let nodes = TerminalRules::default().apply(
            vec![
                (NodeId::from("N4"), "hallway".to_string()),
                (NodeId::from("DEAD1"), "你死了：they turn around".to_string()),
                (NodeId::from("DAY2"), "you made it".to_string()),
            ],
            &edges,
        );

        assert!(!nodes[0].is_terminal());
        assert!(nodes[1].is_death && !nodes[1].is_end);
        assert!(nodes[2].is_end && !nodes[2].is_death);
    }

    #[test]
    fn test_terminal_rules_without_end_inference() {
        let rules = TerminalRules {
            infer_end_nodes: false,
            ..TerminalRules::default()
        };
        let nodes = rules.apply(vec![(NodeId::from("SINK"), "quiet".to_string())], &[]);
        assert!(!nodes[0].is_terminal());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ContentFormat::from_extension("JSON"), Some(ContentFormat::Json));
        assert_eq!(ContentFormat::from_extension("toml"), Some(ContentFormat::Toml));
        assert_eq!(ContentFormat::from_extension("mmd"), Some(ContentFormat::Markup));
        assert_eq!(ContentFormat::from_extension("py"), None);
    }

    #[test]
    fn test_load_surfaces_graph_errors() {
        let input = r#"{"start_node": "N1", "nodes": {}, "edges": []}"#;
        let err = load(input, ContentFormat::Json, &MarkupOptions::default()).unwrap_err();
        assert!(matches!(err, FormatError::Graph(GraphError::Malformed(_))));
    }

    #[test]
    fn test_start_override_ignored_outside_markup() {
        let input = r#"{
            "start_node": "N1",
            "nodes": {"N1": "卧室", "DAY2": "天亮了。"},
            "edges": [["N1", "睡觉", "DAY2"]]
        }"#;
        let options = MarkupOptions {
            start_node: Some(NodeId::from("DAY2")),
            ..MarkupOptions::default()
        };

        let graph = load(input, ContentFormat::Tuples, &options).unwrap();
        assert_eq!(graph.start_node().as_str(), "N1");
    }
}
