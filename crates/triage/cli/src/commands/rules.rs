//! `triage rules`: describe the rule battery.

use colored::Colorize;
use triage_core::{ActionGate, TriageConfig, TriageEngine};

use crate::error::CliResult;
use crate::output::{self, OutputFormat};

pub fn execute(config: TriageConfig, format: OutputFormat) -> CliResult<()> {
    let engine = TriageEngine::new(config)?;
    let config = engine.config();

    let rows: Vec<_> = engine
        .rules()
        .iter()
        .enumerate()
        .map(|(i, rule)| {
            let kind = rule.kind();
            serde_json::json!({
                "order": i + 1,
                "type": kind,
                "name": kind.label(),
                "fires_when": rule.trigger(),
                "base_confidence": kind.base_confidence(),
                "action": kind.action(),
            })
        })
        .collect();

    match format {
        OutputFormat::Table => {
            output::heading("Hypothesis Rules");
            for rule in engine.rules() {
                let kind = rule.kind();
                let gate = ActionGate::classify(kind.base_confidence(), config.autonomy_threshold);
                println!(
                    "  {} {:<26} {:.2}  {}",
                    "●".cyan(),
                    kind.label(),
                    kind.base_confidence(),
                    rule.trigger().dimmed()
                );
                println!("      action: {}  ({} on first sight)", kind.action(), gate);
            }
            println!();
            println!(
                "{}: recurring signatures add {:.2}, capped at {:.2}; gate at {:.2}",
                "Note".bold(),
                config.recurrence_bonus,
                config.confidence_ceiling,
                config.autonomy_threshold
            );
        }
        _ => {
            let report = serde_json::json!({
                "rules": rows,
                "recurrence_bonus": config.recurrence_bonus,
                "confidence_ceiling": config.confidence_ceiling,
                "autonomy_threshold": config.autonomy_threshold,
            });
            output::emit(&report, format)?;
        }
    }
    Ok(())
}
