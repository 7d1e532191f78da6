//! Command handlers and the arguments they share.

pub mod check;
pub mod play;
pub mod replay;

use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};
use story_engine::PlayConfig;
use story_graph::formats::{self, ContentFormat};
use story_graph::StoryGraph;

use crate::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Mapping document in JSON
    Json,
    /// Mapping document in TOML
    Toml,
    /// Node contents plus [from, label, to] edges, in JSON
    Tuples,
    /// Flowchart markup
    Markup,
}

impl From<FormatArg> for ContentFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ContentFormat::Json,
            FormatArg::Toml => ContentFormat::Toml,
            FormatArg::Tuples => ContentFormat::Tuples,
            FormatArg::Markup => ContentFormat::Markup,
        }
    }
}

/// Where the story comes from.
#[derive(Debug, Args)]
pub struct StoryArgs {
    /// Story content file
    pub file: PathBuf,

    /// Content format; inferred from the file extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Play configuration (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl StoryArgs {
    pub fn content_format(&self) -> Result<ContentFormat, CliError> {
        resolve_format(&self.file, self.format)
    }

    pub fn play_config(&self) -> Result<PlayConfig, CliError> {
        match &self.config {
            Some(path) => Ok(PlayConfig::load(path)?),
            None => Ok(PlayConfig::default()),
        }
    }

    /// Read and build the story graph together with the config used for it.
    pub fn load(&self) -> Result<(StoryGraph, PlayConfig), CliError> {
        let config = self.play_config()?;
        let format = self.content_format()?;
        let input = std::fs::read_to_string(&self.file).map_err(|source| CliError::Read {
            path: self.file.clone(),
            source,
        })?;

        let graph = formats::load(&input, format, &config.content.markup_options())?;
        tracing::info!(
            file = %self.file.display(),
            %format,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "story loaded"
        );
        Ok((graph, config))
    }
}

fn resolve_format(path: &Path, explicit: Option<FormatArg>) -> Result<ContentFormat, CliError> {
    if let Some(arg) = explicit {
        return Ok(arg.into());
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(ContentFormat::from_extension)
        .ok_or_else(|| CliError::UnknownFormat(path.to_path_buf()))
}
