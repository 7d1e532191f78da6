//! Markup form - flowchart text.
//!
//! ```text
//! flowchart TD
//! %% Day 1
//! N1["You wake up in the bedroom."]
//! N1 -->|"直接开门"| N4
//! N4 --> N11
//! ```
//!
//! The first `%%` comment is taken as the title, the first defined node is the
//! start node, and an edge without a label gets [`MarkupOptions::default_label`].

use serde::{Deserialize, Serialize};

use super::{FormatError, TerminalRules};
use crate::{Edge, NodeId, StoryGraph};

/// Parsing options for markup content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupOptions {
    pub terminals: TerminalRules,

    /// Label given to `A --> B` edges.
    pub default_label: String,

    /// Overrides the first defined node as the entry point.
    pub start_node: Option<NodeId>,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            terminals: TerminalRules::default(),
            default_label: "默认".to_string(),
            start_node: None,
        }
    }
}

/// One meaningful line of markup.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Header,
    Comment(&'a str),
    Node { id: &'a str, content: &'a str },
    Edge { from: &'a str, label: Option<&'a str>, to: &'a str },
}

fn is_node_id(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn node_id(s: &str) -> Result<&str, String> {
    let s = s.trim();
    if is_node_id(s) {
        Ok(s)
    } else {
        Err(format!("`{}` is not a valid node id", s))
    }
}

/// The target of an edge: a node id, optionally followed by a statement `;`.
fn edge_target(s: &str) -> Result<&str, String> {
    let s = s.trim();
    node_id(s.strip_suffix(';').unwrap_or(s))
}

fn parse_line(line: &str) -> Result<Option<Line<'_>>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if let Some(comment) = line.strip_prefix("%%") {
        return Ok(Some(Line::Comment(comment.trim())));
    }
    if line == "flowchart" || line.starts_with("flowchart ") || line.starts_with("graph ") {
        return Ok(Some(Line::Header));
    }

    // Node definitions first: their content may itself contain `-->`.
    if let Some((id, rest)) = line.split_once("[\"") {
        if is_node_id(id.trim()) {
            let content = rest
                .strip_suffix("\"]")
                .ok_or_else(|| "node content must end with `\"]`".to_string())?;
            return Ok(Some(Line::Node {
                id: id.trim(),
                content,
            }));
        }
    }

    if let Some((from, rest)) = line.split_once("-->") {
        let from = node_id(from)?;
        let rest = rest.trim_start();

        let (label, to) = match rest.strip_prefix('|') {
            // A quoted label runs to the closing `"|` and may contain `|` itself.
            Some(labelled) if labelled.starts_with('"') => {
                let (label, to) = labelled[1..]
                    .split_once("\"|")
                    .ok_or_else(|| "unterminated edge label".to_string())?;
                (Some(label), to)
            }
            Some(labelled) => {
                let (label, to) = labelled
                    .split_once('|')
                    .ok_or_else(|| "unterminated edge label".to_string())?;
                (Some(label.trim()), to)
            }
            None => (None, rest),
        };

        return Ok(Some(Line::Edge {
            from,
            label,
            to: edge_target(to)?,
        }));
    }

    Err(format!("unrecognised line `{}`", line))
}

/// Parse markup content and build the graph.
pub fn parse(input: &str, options: &MarkupOptions) -> Result<StoryGraph, FormatError> {
    let mut title = None;
    let mut contents = Vec::new();
    let mut edges = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let parsed = parse_line(raw).map_err(|message| FormatError::Markup {
            line: index + 1,
            message,
        })?;

        match parsed {
            None | Some(Line::Header) => {}
            Some(Line::Comment(text)) => {
                if title.is_none() && !text.is_empty() {
                    title = Some(text.to_string());
                }
            }
            Some(Line::Node { id, content }) => {
                contents.push((NodeId::from(id), content.to_string()));
            }
            Some(Line::Edge { from, label, to }) => {
                let label = label.unwrap_or(options.default_label.as_str());
                edges.push(Edge::new(from, label, to));
            }
        }
    }

    let start = match (&options.start_node, contents.first()) {
        (Some(start), _) => start.clone(),
        (None, Some((first, _))) => first.clone(),
        (None, None) => return Err(FormatError::EmptyMarkup),
    };

    let nodes = options.terminals.apply(contents, &edges);
    let graph = StoryGraph::build(nodes, edges, start)?;
    Ok(match title {
        Some(title) => graph.with_title(title),
        None => graph,
    })
}
