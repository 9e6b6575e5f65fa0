//! Triage sessions.
//!
//! A session owns an append-only ticket list and its own incident memory.
//! Every interaction ends in [`TriageSession::refresh`], which re-evaluates
//! the whole list from scratch. Sessions never share memory.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::TriageConfig;
use crate::engine::{Evaluation, TriageEngine};
use crate::error::TriageResult;
use crate::memory::IncidentMemory;
use crate::sample::{generate_sample_tickets, seed_tickets, ScenarioKind};
use crate::types::{SessionId, Ticket};

pub struct TriageSession {
    id: SessionId,
    engine: TriageEngine,
    tickets: Vec<Ticket>,
    memory: IncidentMemory,
    passes: u64,
}

impl TriageSession {
    /// Start a session preloaded with the seed ticket list.
    pub fn new(config: TriageConfig) -> TriageResult<Self> {
        Self::with_tickets(config, seed_tickets())
    }

    /// Start a session with no tickets.
    pub fn empty(config: TriageConfig) -> TriageResult<Self> {
        Self::with_tickets(config, Vec::new())
    }

    /// Start a session with a caller-supplied initial list.
    pub fn with_tickets(config: TriageConfig, tickets: Vec<Ticket>) -> TriageResult<Self> {
        for (i, ticket) in tickets.iter().enumerate() {
            ticket.validate().map_err(|e| e.at_index(i))?;
        }
        let engine = TriageEngine::new(config)?;
        let id = SessionId::new();
        info!(session = %id, tickets = tickets.len(), "Started triage session");
        Ok(Self {
            id,
            engine,
            tickets,
            memory: IncidentMemory::new(),
            passes: 0,
        })
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn memory(&self) -> &IncidentMemory {
        &self.memory
    }

    pub fn engine(&self) -> &TriageEngine {
        &self.engine
    }

    /// Number of passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Append tickets. The whole batch is rejected if any ticket is invalid.
    pub fn add_tickets(&mut self, tickets: Vec<Ticket>) -> TriageResult<()> {
        for (offset, ticket) in tickets.iter().enumerate() {
            ticket
                .validate()
                .map_err(|e| e.at_index(self.tickets.len() + offset))?;
        }
        self.tickets.extend(tickets);
        Ok(())
    }

    /// Append a generated scenario batch and return what was added.
    pub fn inject(&mut self, kind: ScenarioKind) -> TriageResult<Vec<Ticket>> {
        let generated = generate_sample_tickets(kind);
        info!(session = %self.id, scenario = %kind, count = generated.len(), "Injected scenario");
        self.add_tickets(generated.clone())?;
        Ok(generated)
    }

    /// Run one pass over the full ticket list.
    pub fn refresh(&mut self) -> TriageResult<Evaluation> {
        self.refresh_at(Utc::now())
    }

    /// Run one pass stamped with `now`.
    pub fn refresh_at(&mut self, now: DateTime<Utc>) -> TriageResult<Evaluation> {
        let evaluation = self.engine.evaluate_at(&self.tickets, &mut self.memory, now)?;
        self.passes += 1;
        Ok(evaluation)
    }
}
