//! `triage demo`: replay a dashboard session.
//!
//! Starts from the seed list, then injects each scenario in turn with a
//! refresh after every interaction, and finishes with the memory view.

use triage_core::{ScenarioKind, TriageConfig, TriageSession};

use crate::error::CliResult;
use crate::output::{self, OutputFormat};

pub fn execute(config: TriageConfig, format: OutputFormat) -> CliResult<()> {
    let mut session = TriageSession::new(config)?;
    let mut steps = Vec::new();

    let initial = session.refresh()?;
    if let OutputFormat::Table = format {
        output::heading(&format!("Session {}", session.id()));
        output::print_tickets(session.tickets());
        output::heading("Initial pass");
        output::print_evaluation(&initial);
    }
    steps.push(serde_json::json!({ "interaction": "initial", "evaluation": initial }));

    for kind in ScenarioKind::ALL {
        let added = session.inject(kind)?;
        let evaluation = session.refresh()?;
        if let OutputFormat::Table = format {
            output::heading(&format!("Injected {} ({} ticket(s))", kind, added.len()));
            output::print_tickets(&added);
            output::print_evaluation(&evaluation);
        }
        steps.push(serde_json::json!({
            "interaction": kind.to_string(),
            "added": added,
            "evaluation": evaluation,
        }));
    }

    match format {
        OutputFormat::Table => {
            output::heading("Agent Memory");
            output::print_memory(session.memory());
            println!();
        }
        _ => {
            let report = serde_json::json!({
                "session": session.id(),
                "steps": steps,
                "memory": output::memory_view(session.memory()),
            });
            output::emit(&report, format)?;
        }
    }
    Ok(())
}
