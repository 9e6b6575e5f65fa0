//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use triage_core::{ActionGate, Evaluation, IncidentMemory, Ticket};

use crate::error::CliResult;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Print a serializable value as JSON or YAML.
pub fn emit<T: Serialize>(value: &T, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(value)?),
        _ => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// Memory entries as plain records, most recent first.
pub fn memory_view(memory: &IncidentMemory) -> Vec<serde_json::Value> {
    memory
        .entries_by_recency()
        .into_iter()
        .map(|(signature, entry)| {
            serde_json::json!({
                "signature": signature,
                "error": entry.error,
                "times_seen": entry.times_seen,
                "last_seen": entry.last_seen_display(),
            })
        })
        .collect()
}

pub fn heading(title: &str) {
    println!();
    println!("{}", title.bold().cyan());
    println!("{}", "=".repeat(60));
}

pub fn print_tickets(tickets: &[Ticket]) {
    let header = format!("{:<10} {:<18} {:<9} {}", "MERCHANT", "ERROR", "MIGRATED", "STAGE");
    println!("  {}", header.bold());
    for t in tickets {
        println!(
            "  {:<10} {:<18} {:<9} {}",
            t.merchant, t.error, t.migrated, t.stage
        );
    }
}

pub fn print_evaluation(evaluation: &Evaluation) {
    if evaluation.groups.is_empty() {
        println!("  {}", "No tickets to triage".dimmed());
        return;
    }

    for group in &evaluation.groups {
        println!();
        println!(
            "  {} {}  {}",
            "Error pattern:".bold(),
            group.error.yellow(),
            format!("[{}]", group.signature).dimmed()
        );
        println!(
            "      tickets={} merchants={} stages={} migrated={}",
            group.ticket_count,
            group.merchants.join(","),
            group.stages.join(","),
            group.migrated_count
        );
        if group.seen_before {
            println!("      {} {}", "!".yellow().bold(), group.insight().yellow());
        } else {
            println!("      {} {}", "+".blue().bold(), group.insight().blue());
        }

        if group.hypotheses.is_empty() {
            println!("      {}", "No hypothesis fired".dimmed());
        }
        for h in &group.hypotheses {
            let verdict = match h.gate {
                ActionGate::Autonomous => h.gate.label().green(),
                ActionGate::HumanApproval => h.gate.label().red(),
            };
            println!("      {} {:<26} {:.2}  {}", "●".cyan(), h.kind.label(), h.confidence, verdict);
            match &h.focus {
                Some(focus) => println!("          action: {} ({})", h.action, focus),
                None => println!("          action: {}", h.action),
            }
        }
    }
}

pub fn print_memory(memory: &IncidentMemory) {
    if memory.is_empty() {
        println!("  {}", "Memory is empty".dimmed());
        return;
    }
    for (signature, entry) in memory.entries_by_recency() {
        println!(
            "  {} {} seen {} time(s), last {}  {}",
            "●".green(),
            format!("{:<18}", entry.error).bold(),
            entry.times_seen,
            entry.last_seen_display(),
            format!("[{}]", signature).dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::{evaluate, seed_tickets};

    #[test]
    fn memory_view_lists_every_entry() {
        let mut memory = IncidentMemory::new();
        evaluate(&seed_tickets(), &mut memory).unwrap();

        let view = memory_view(&memory);
        assert_eq!(view.len(), 3);
        for row in &view {
            assert_eq!(row["times_seen"], 1);
            assert_eq!(row["signature"].as_str().unwrap().len(), 64);
        }
    }
}
