//! `story replay` - follow a fixed list of choices.

use clap::Args;
use story_engine::{SessionSnapshot, TraversalSession};
use story_graph::StoryGraph;

use super::StoryArgs;
use crate::CliError;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub story: StoryArgs,

    /// Choice label to take, in order (repeatable)
    #[arg(long = "choice", value_name = "LABEL")]
    pub choices: Vec<String>,
}

pub fn run(args: ReplayArgs) -> Result<(), CliError> {
    let (graph, _) = args.story.load()?;
    let snapshot = replay(&graph, &args.choices)?;
    println!("{}", snapshot.to_json()?);
    Ok(())
}

fn replay(graph: &StoryGraph, choices: &[String]) -> Result<SessionSnapshot, CliError> {
    let mut session = TraversalSession::new(graph);
    for label in choices {
        session.advance(label)?;
    }
    Ok(session.snapshot())
}
