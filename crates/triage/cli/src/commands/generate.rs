//! `triage generate`: print a generated scenario batch.

use clap::{Args, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use triage_core::{generate_sample_tickets, generate_sample_tickets_with, ScenarioKind};

use crate::error::CliResult;
use crate::output::{self, OutputFormat};

/// Scenario to generate
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScenarioArg {
    PlatformRegression,
    MerchantMisconfiguration,
    DocumentationGap,
    MigrationStepMismatch,
}

impl From<ScenarioArg> for ScenarioKind {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::PlatformRegression => ScenarioKind::PlatformRegression,
            ScenarioArg::MerchantMisconfiguration => ScenarioKind::MerchantMisconfiguration,
            ScenarioArg::DocumentationGap => ScenarioKind::DocumentationGap,
            ScenarioArg::MigrationStepMismatch => ScenarioKind::MigrationStepMismatch,
        }
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Scenario to reproduce
    #[arg(value_enum)]
    pub kind: ScenarioArg,

    /// Seed for reproducible merchant ids
    #[arg(short, long)]
    pub seed: Option<u64>,
}

pub fn execute(args: GenerateArgs, format: OutputFormat) -> CliResult<()> {
    let kind = ScenarioKind::from(args.kind);
    let tickets = match args.seed {
        Some(seed) => generate_sample_tickets_with(kind, &mut StdRng::seed_from_u64(seed)),
        None => generate_sample_tickets(kind),
    };

    match format {
        OutputFormat::Table => {
            output::heading(&format!("Generated tickets: {}", kind));
            output::print_tickets(&tickets);
            println!();
        }
        _ => output::emit(&tickets, format)?,
    }
    Ok(())
}
