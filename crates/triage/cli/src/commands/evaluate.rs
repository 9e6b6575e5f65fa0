//! `triage evaluate`: run passes over the seed list or a ticket file.

use std::path::{Path, PathBuf};

use clap::Args;
use triage_core::{Ticket, TriageConfig, TriageSession};

use crate::error::CliResult;
use crate::output::{self, OutputFormat};

/// Upper bound for `--passes`.
pub const MAX_PASSES: u32 = 1000;

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// JSON file holding an array of tickets (defaults to the seed list)
    #[arg(short, long)]
    pub tickets: Option<PathBuf>,

    /// Number of passes to run over the same list
    #[arg(
        short,
        long,
        default_value = "1",
        value_parser = clap::value_parser!(u32).range(1..=MAX_PASSES as i64)
    )]
    pub passes: u32,
}

/// Read and validate a ticket file.
pub fn read_tickets(path: &Path) -> CliResult<Vec<Ticket>> {
    let raw = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    Ok(Ticket::list_from_json(&value)?)
}

pub fn execute(args: EvaluateArgs, config: TriageConfig, format: OutputFormat) -> CliResult<()> {
    let mut session = match &args.tickets {
        Some(path) => TriageSession::with_tickets(config, read_tickets(path)?)?,
        None => TriageSession::new(config)?,
    };

    let mut evaluations = Vec::new();
    for _ in 0..args.passes {
        evaluations.push(session.refresh()?);
    }

    match format {
        OutputFormat::Table => {
            output::heading("Incoming Signals (Support Tickets)");
            output::print_tickets(session.tickets());
            for (i, evaluation) in evaluations.iter().enumerate() {
                output::heading(&format!("Agent Reasoning (pass {})", i + 1));
                output::print_evaluation(evaluation);
            }
            output::heading("Agent Memory");
            output::print_memory(session.memory());
            println!();
        }
        _ => {
            let report = serde_json::json!({
                "session": session.id(),
                "tickets": session.tickets(),
                "passes": evaluations,
                "memory": output::memory_view(session.memory()),
            });
            output::emit(&report, format)?;
        }
    }

    Ok(())
}
