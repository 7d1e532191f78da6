//! CLI errors and exit codes.
//!
//! Exit codes:
//! - 0: success
//! - 1: I/O, usage or session failure
//! - 2: the story content itself is invalid

use std::path::PathBuf;
use story_engine::{ConfigError, SessionError};
use story_graph::formats::FormatError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    Success = 0,
    Failure = 1,
    InvalidContent = 2,
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot infer the format of {0}; pass --format")]
    UnknownFormat(PathBuf),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("cannot encode snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),
}

impl From<&CliError> for CliExitCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::Format(_) => CliExitCode::InvalidContent,
            CliError::Read { .. }
            | CliError::UnknownFormat(_)
            | CliError::Config(_)
            | CliError::Session(_)
            | CliError::Snapshot(_)
            | CliError::Terminal(_) => CliExitCode::Failure,
        }
    }
}
