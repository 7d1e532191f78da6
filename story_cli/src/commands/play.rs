//! `story play` - interactive playthrough on stdin.
//!
//! Each turn shows the current node, the story clock and the numbered choices.
//! A choice is taken by number or by its exact label; `reset` returns to the
//! start node and `quit` leaves.

use clap::Args;
use std::io::{BufRead, Write};
use story_engine::{SessionError, SessionStatus, StoryClock, TraversalSession};
use story_graph::StoryGraph;

use super::StoryArgs;
use crate::CliError;

#[derive(Debug, Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub story: StoryArgs,
}

pub fn run(args: PlayArgs) -> Result<(), CliError> {
    let (graph, config) = args.story.load()?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    play(&graph, &config.clock, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

/// Run the interactive loop until `quit` or end of input.
fn play<R: BufRead, W: Write>(
    graph: &StoryGraph,
    clock: &StoryClock,
    input: &mut R,
    out: &mut W,
) -> Result<(), CliError> {
    let mut session = TraversalSession::new(graph);
    tracing::info!(session = %session.id(), start = %graph.start_node(), "playthrough started");

    if let Some(title) = graph.title() {
        writeln!(out, "== {} ==", title)?;
    }
    show(&session, clock, out)?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let entry = line.trim();
        if entry.is_empty() {
            continue;
        }

        let label = match entry {
            "quit" | "exit" => break,
            "reset" => {
                session.reset();
                writeln!(out, "-- back to the start --")?;
                show(&session, clock, out)?;
                continue;
            }
            _ => resolve_choice(&session, entry),
        };

        match session.advance(&label) {
            Ok(_) => show(&session, clock, out)?,
            Err(SessionError::UnknownChoice { .. }) => {
                writeln!(out, "no such choice: {}", entry)?;
            }
            Err(SessionError::SessionTerminated(status)) => {
                writeln!(out, "the story has ended ({}); type `reset` or `quit`", status)?;
            }
            Err(err) => return Err(err.into()),
        }
    }

    tracing::info!(
        session = %session.id(),
        steps = session.steps_taken(),
        status = %session.status(),
        "playthrough finished"
    );
    Ok(())
}

/// An exact label wins; otherwise a 1-based choice number is mapped to its label.
fn resolve_choice(session: &TraversalSession<'_>, entry: &str) -> String {
    let graph = session.graph();
    if graph.edge(session.current_node().as_str(), entry).is_some() {
        return entry.to_string();
    }

    let numbered = entry
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| session.choices().ok()?.get(index));

    match numbered {
        Some(edge) => edge.label.clone(),
        None => entry.to_string(),
    }
}

fn show<W: Write>(
    session: &TraversalSession<'_>,
    clock: &StoryClock,
    out: &mut W,
) -> std::io::Result<()> {
    let node = session.current();
    writeln!(out)?;
    writeln!(out, "[{}] {}", session.clock_time(clock), node.id)?;
    writeln!(out, "{}", node.content)?;

    match session.status() {
        SessionStatus::Dead => {
            writeln!(out, "*** you died after {} minutes ***", session.elapsed_time())?;
        }
        SessionStatus::Completed => {
            writeln!(
                out,
                "*** you survived the night in {} minutes ***",
                session.elapsed_time()
            )?;
        }
        SessionStatus::InProgress => {
            if session.is_revisit() {
                writeln!(out, "(you have been here before)")?;
            }
            let choices = session.choices().unwrap_or_default();
            for (index, edge) in choices.iter().enumerate() {
                writeln!(out, "  {}. {}", index + 1, edge.label)?;
            }
        }
    }
    Ok(())
}
