//! `story check` - validate content and summarise the graph.

use clap::Args;
use std::io::Write;
use story_graph::StoryGraph;

use super::StoryArgs;
use crate::CliError;

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub story: StoryArgs,
}

pub fn run(args: CheckArgs) -> Result<(), CliError> {
    let (graph, _) = args.story.load()?;
    let stdout = std::io::stdout();
    report(&graph, &mut stdout.lock())?;
    Ok(())
}

fn report(graph: &StoryGraph, out: &mut impl Write) -> std::io::Result<()> {
    if let Some(title) = graph.title() {
        writeln!(out, "{}", title)?;
    }
    writeln!(out, "start:       {}", graph.start_node())?;
    writeln!(out, "nodes:       {}", graph.node_count())?;
    writeln!(out, "edges:       {}", graph.edge_count())?;
    writeln!(out, "death nodes: {}", graph.death_nodes().len())?;
    writeln!(out, "end nodes:   {}", graph.end_nodes().len())?;

    let unreachable = graph.unreachable_nodes();
    if unreachable.is_empty() {
        writeln!(out, "all nodes reachable")?;
    } else {
        let ids: Vec<&str> = unreachable.iter().map(|id| id.as_str()).collect();
        writeln!(out, "unreachable: {}", ids.join(", "))?;
    }
    Ok(())
}
