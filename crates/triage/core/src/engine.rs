//! Central triage engine.
//!
//! One call to [`TriageEngine::evaluate`] is one pass:
//! validate tickets → group by error → fingerprint groups → run the rule
//! battery → apply the recurrence bonus → update the incident memory.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::TriageConfig;
use crate::error::TriageResult;
use crate::group::{group_by_error, ErrorGroup};
use crate::memory::IncidentMemory;
use crate::rules::{default_rules, HypothesisRule, RuleMatch};
use crate::signature::IncidentSignature;
use crate::types::{round2, ActionGate, Hypothesis, Ticket};

// ── Results ─────────────────────────────────────────────────────────────

/// Outcome of one pass for one error group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupAssessment {
    /// Shared error code.
    pub error: String,
    /// Tickets in the group.
    pub ticket_count: usize,
    /// Distinct merchants, sorted.
    pub merchants: Vec<String>,
    /// Distinct stages, sorted.
    pub stages: Vec<String>,
    /// Tickets from migrated merchants.
    pub migrated_count: usize,
    /// Fingerprint of the group composition.
    pub signature: IncidentSignature,
    /// Whether the signature was in memory when the pass began.
    pub seen_before: bool,
    /// Memory count after this pass.
    pub times_seen: u64,
    /// Fired hypotheses in rule order.
    pub hypotheses: Vec<Hypothesis>,
}

impl GroupAssessment {
    /// One-line recurrence note for presenters.
    pub fn insight(&self) -> &'static str {
        if self.seen_before {
            "This issue has occurred before; previous mitigation likely applies"
        } else {
            "New issue detected"
        }
    }
}

/// Outcome of one full pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Timestamp written to memory for this pass.
    pub evaluated_at: DateTime<Utc>,
    /// One assessment per error code, by first appearance.
    pub groups: Vec<GroupAssessment>,
}

impl Evaluation {
    /// Hypotheses for one error code.
    pub fn hypotheses_for(&self, error: &str) -> Option<&[Hypothesis]> {
        self.groups
            .iter()
            .find(|g| g.error == error)
            .map(|g| g.hypotheses.as_slice())
    }

    pub fn group(&self, error: &str) -> Option<&GroupAssessment> {
        self.groups.iter().find(|g| g.error == error)
    }

    /// Error code → hypotheses.
    pub fn by_error(&self) -> BTreeMap<&str, &[Hypothesis]> {
        self.groups
            .iter()
            .map(|g| (g.error.as_str(), g.hypotheses.as_slice()))
            .collect()
    }

    pub fn hypothesis_count(&self) -> usize {
        self.groups.iter().map(|g| g.hypotheses.len()).sum()
    }

    /// Hypotheses cleared for autonomous action.
    pub fn autonomous(&self) -> impl Iterator<Item = (&str, &Hypothesis)> {
        self.groups.iter().flat_map(|g| {
            g.hypotheses
                .iter()
                .filter(|h| h.is_autonomous())
                .map(move |h| (g.error.as_str(), h))
        })
    }
}

// ── Engine ──────────────────────────────────────────────────────────────

/// Runs the rule battery over ticket lists.
///
/// The engine itself is stateless; recurrence state lives in the
/// [`IncidentMemory`] passed to each call.
pub struct TriageEngine {
    rules: Vec<Box<dyn HypothesisRule>>,
    config: TriageConfig,
}

impl TriageEngine {
    /// Create an engine with the four default rules.
    pub fn new(config: TriageConfig) -> TriageResult<Self> {
        Self::with_rules(config, default_rules())
    }

    /// Create an engine with custom rules.
    pub fn with_rules(
        config: TriageConfig,
        rules: Vec<Box<dyn HypothesisRule>>,
    ) -> TriageResult<Self> {
        config.validate()?;
        Ok(Self { rules, config })
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    pub fn rules(&self) -> &[Box<dyn HypothesisRule>] {
        &self.rules
    }

    /// Run one pass stamped with the current time.
    pub fn evaluate(
        &self,
        tickets: &[Ticket],
        memory: &mut IncidentMemory,
    ) -> TriageResult<Evaluation> {
        self.evaluate_at(tickets, memory, Utc::now())
    }

    /// Run one pass stamped with `now`.
    ///
    /// Every ticket is validated before anything is computed, so a rejected
    /// list leaves `memory` untouched.
    pub fn evaluate_at(
        &self,
        tickets: &[Ticket],
        memory: &mut IncidentMemory,
        now: DateTime<Utc>,
    ) -> TriageResult<Evaluation> {
        for (index, ticket) in tickets.iter().enumerate() {
            if let Err(e) = ticket.validate() {
                let e = e.at_index(index);
                warn!(error = %e, "Rejected ticket list");
                return Err(e);
            }
        }

        let groups = group_by_error(tickets);

        // Recurrence is judged against memory as it stood when the pass began.
        let fingerprints: Vec<(IncidentSignature, bool)> = groups
            .iter()
            .map(|g| {
                let signature = IncidentSignature::of_group(g);
                (signature, memory.contains(&signature))
            })
            .collect();

        let mut assessments = Vec::with_capacity(groups.len());
        for (group, (signature, seen_before)) in groups.iter().zip(fingerprints) {
            let hypotheses = self.assess_group(group, seen_before);
            let times_seen = memory.record(signature, group.error, now).times_seen;

            assessments.push(GroupAssessment {
                error: group.error.to_string(),
                ticket_count: group.len(),
                merchants: group.distinct_merchants().into_iter().map(String::from).collect(),
                stages: group.distinct_stages().into_iter().map(String::from).collect(),
                migrated_count: group.migrated_count(),
                signature,
                seen_before,
                times_seen,
                hypotheses,
            });
        }

        let evaluation = Evaluation {
            evaluated_at: now,
            groups: assessments,
        };
        info!(
            tickets = tickets.len(),
            groups = evaluation.groups.len(),
            hypotheses = evaluation.hypothesis_count(),
            memory_entries = memory.len(),
            "Triage pass complete"
        );
        Ok(evaluation)
    }

    /// Run every rule over one group and adjust what fires.
    pub fn assess_group(&self, group: &ErrorGroup<'_>, seen_before: bool) -> Vec<Hypothesis> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let matched = rule.evaluate(group);
                debug!(
                    rule = rule.name(),
                    error = group.error,
                    fired = matched.is_some(),
                    "Evaluated rule"
                );
                matched
            })
            .map(|m| self.finalize(m, seen_before))
            .collect()
    }

    /// Apply the recurrence bonus, clamp, round, then gate.
    fn finalize(&self, matched: RuleMatch, seen_before: bool) -> Hypothesis {
        let bonus = if seen_before {
            self.config.recurrence_bonus
        } else {
            0.0
        };
        let confidence = self.adjust_confidence(matched.base_confidence, bonus);
        Hypothesis {
            kind: matched.kind,
            confidence,
            action: matched.action,
            gate: ActionGate::classify(confidence, self.config.autonomy_threshold),
            focus: matched.focus,
        }
    }

    fn adjust_confidence(&self, base: f64, bonus: f64) -> f64 {
        round2((base + bonus).min(self.config.confidence_ceiling).max(0.0))
    }
}

/// Run one pass with the default engine.
pub fn evaluate(tickets: &[Ticket], memory: &mut IncidentMemory) -> TriageResult<Evaluation> {
    TriageEngine::new(TriageConfig::default())?.evaluate(tickets, memory)
}
