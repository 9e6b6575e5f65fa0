//! Core type definitions for the triage engine.
//!
//! Tickets are the only input. Hypotheses are recomputed on every pass and
//! never stored; the recurrence memory lives in [`crate::memory`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{TriageError, TriageResult};

// ── Identifier Types ────────────────────────────────────────────────────

/// Unique identifier for a triage session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new unique session ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session:{}", self.0)
    }
}

// ── Ticket ──────────────────────────────────────────────────────────────

/// One reported support incident.
///
/// Tickets are immutable once created. Construct them through
/// [`Ticket::new`] or [`Ticket::from_json`] so they are validated; there is
/// no serde decoding path that skips validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ticket {
    /// Merchant identifier (not unique across tickets).
    pub merchant: String,
    /// Error code; the grouping key.
    pub error: String,
    /// Whether the merchant completed the hosted → headless migration.
    pub migrated: bool,
    /// Migration step where the failure occurred.
    pub stage: String,
}

impl Ticket {
    /// Create a validated ticket.
    pub fn new(
        merchant: impl Into<String>,
        error: impl Into<String>,
        migrated: bool,
        stage: impl Into<String>,
    ) -> TriageResult<Self> {
        let ticket = Self {
            merchant: merchant.into(),
            error: error.into(),
            migrated,
            stage: stage.into(),
        };
        ticket.validate()?;
        Ok(ticket)
    }

    /// Check that every identifier field is present.
    ///
    /// Reports the ticket at index 0; callers validating a list re-tag the
    /// error with [`TriageError::at_index`].
    pub fn validate(&self) -> TriageResult<()> {
        for (field, value) in [
            ("merchant", &self.merchant),
            ("error", &self.error),
            ("stage", &self.stage),
        ] {
            if value.trim().is_empty() {
                return Err(TriageError::InvalidTicket {
                    index: 0,
                    field,
                    reason: "must not be empty".into(),
                });
            }
        }
        Ok(())
    }

    /// Decode a ticket from a loosely-typed JSON object.
    ///
    /// Missing fields and wrong JSON types are reported as
    /// [`TriageError::InvalidTicket`] naming the field, instead of a generic
    /// decoding error.
    pub fn from_json(value: &Value) -> TriageResult<Self> {
        let object = value.as_object().ok_or_else(|| TriageError::InvalidTicket {
            index: 0,
            field: "ticket",
            reason: format!("expected an object, got {}", json_kind(value)),
        })?;

        let text = |field: &'static str| -> TriageResult<String> {
            match object.get(field) {
                None | Some(Value::Null) => Err(missing(field)),
                Some(Value::String(s)) => Ok(s.clone()),
                Some(other) => Err(wrong_type(field, "a string", other)),
            }
        };

        let migrated = match object.get("migrated") {
            None | Some(Value::Null) => return Err(missing("migrated")),
            Some(Value::Bool(b)) => *b,
            Some(other) => return Err(wrong_type("migrated", "a boolean", other)),
        };

        Self::new(text("merchant")?, text("error")?, migrated, text("stage")?)
    }

    /// Decode a JSON array of tickets, reporting the failing position.
    pub fn list_from_json(value: &Value) -> TriageResult<Vec<Self>> {
        let items = value.as_array().ok_or_else(|| TriageError::InvalidTicket {
            index: 0,
            field: "tickets",
            reason: format!("expected an array, got {}", json_kind(value)),
        })?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| Self::from_json(item).map_err(|e| e.at_index(i)))
            .collect()
    }
}

fn missing(field: &'static str) -> TriageError {
    TriageError::InvalidTicket {
        index: 0,
        field,
        reason: "is missing".into(),
    }
}

fn wrong_type(field: &'static str, expected: &str, got: &Value) -> TriageError {
    TriageError::InvalidTicket {
        index: 0,
        field,
        reason: format!("must be {}, got {}", expected, json_kind(got)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Hypotheses ──────────────────────────────────────────────────────────

/// Root-cause categories the rule battery can propose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HypothesisKind {
    /// One merchant is failing on its own.
    MerchantMisconfiguration,
    /// Several merchants fail the same way.
    PlatformRegression,
    /// Migrated merchants are missing guidance.
    DocumentationGap,
    /// Failures concentrate on one migration step.
    MigrationStepMismatch,
}

impl HypothesisKind {
    /// All kinds in rule evaluation order.
    pub const ALL: [HypothesisKind; 4] = [
        Self::MerchantMisconfiguration,
        Self::PlatformRegression,
        Self::DocumentationGap,
        Self::MigrationStepMismatch,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MerchantMisconfiguration => "Merchant Misconfiguration",
            Self::PlatformRegression => "Platform Regression",
            Self::DocumentationGap => "Documentation Gap",
            Self::MigrationStepMismatch => "Migration Step Mismatch",
        }
    }

    /// Confidence before any recurrence adjustment.
    pub fn base_confidence(&self) -> f64 {
        match self {
            Self::MerchantMisconfiguration => 0.85,
            Self::PlatformRegression => 0.80,
            Self::DocumentationGap => 0.75,
            Self::MigrationStepMismatch => 0.70,
        }
    }

    /// Recommended remediation.
    pub fn action(&self) -> &'static str {
        match self {
            Self::MerchantMisconfiguration => "Guide merchant to fix configuration",
            Self::PlatformRegression => "Escalate to engineering immediately",
            Self::DocumentationGap => "Update docs and notify merchants",
            Self::MigrationStepMismatch => "Pause migration at that step",
        }
    }
}

impl std::fmt::Display for HypothesisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a hypothesis may be acted on without a human.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionGate {
    /// Safe to act autonomously.
    Autonomous,
    /// Requires human approval.
    HumanApproval,
}

impl ActionGate {
    /// Classify a final (adjusted, rounded) confidence against a threshold.
    pub fn classify(confidence: f64, threshold: f64) -> Self {
        if confidence >= threshold {
            Self::Autonomous
        } else {
            Self::HumanApproval
        }
    }

    /// Human-readable verdict.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Autonomous => "Safe to act autonomously",
            Self::HumanApproval => "Requires human approval",
        }
    }
}

impl std::fmt::Display for ActionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A candidate root-cause explanation for one error group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    /// Category of the proposed root cause.
    #[serde(rename = "type")]
    pub kind: HypothesisKind,
    /// Final confidence in [0, 0.95], two decimals.
    pub confidence: f64,
    /// Recommended remediation.
    pub action: String,
    /// Autonomy verdict for `confidence`.
    pub gate: ActionGate,
    /// What the action targets, when the rule pins it down (e.g. the stage
    /// to pause).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}

impl Hypothesis {
    /// Whether this hypothesis may be acted on without a human.
    pub fn is_autonomous(&self) -> bool {
        self.gate == ActionGate::Autonomous
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ticket_new_rejects_empty_fields() {
        let err = Ticket::new("", "CHECKOUT_500", true, "checkout").unwrap_err();
        assert!(matches!(err, TriageError::InvalidTicket { field: "merchant", .. }));

        let err = Ticket::new("M1", "  ", true, "checkout").unwrap_err();
        assert!(matches!(err, TriageError::InvalidTicket { field: "error", .. }));

        let err = Ticket::new("M1", "CHECKOUT_500", true, "").unwrap_err();
        assert!(matches!(err, TriageError::InvalidTicket { field: "stage", .. }));
    }

    #[test]
    fn ticket_from_json_accepts_well_formed() {
        let ticket = Ticket::from_json(&json!({
            "merchant": "M4",
            "error": "API_KEY_INVALID",
            "migrated": false,
            "stage": "api"
        }))
        .unwrap();
        assert_eq!(ticket.merchant, "M4");
        assert!(!ticket.migrated);
    }

    #[test]
    fn ticket_from_json_rejects_blank_identifiers() {
        let err = Ticket::from_json(&json!({
            "merchant": "",
            "error": "API_KEY_INVALID",
            "migrated": false,
            "stage": "api"
        }))
        .unwrap_err();
        assert!(matches!(err, TriageError::InvalidTicket { field: "merchant", .. }));

        let err = Ticket::list_from_json(&json!([
            {"merchant": "M1", "error": "E", "migrated": true, "stage": "s"},
            {"merchant": "M2", "error": "E", "migrated": true, "stage": "   "}
        ]))
        .unwrap_err();
        assert!(matches!(err, TriageError::InvalidTicket { index: 1, field: "stage", .. }));
    }

    #[test]
    fn ticket_from_json_reports_missing_field() {
        let err = Ticket::from_json(&json!({
            "merchant": "M4",
            "error": "API_KEY_INVALID",
            "stage": "api"
        }))
        .unwrap_err();
        assert!(matches!(err, TriageError::InvalidTicket { field: "migrated", .. }));
    }

    #[test]
    fn ticket_from_json_reports_wrong_type() {
        let err = Ticket::from_json(&json!({
            "merchant": 4,
            "error": "API_KEY_INVALID",
            "migrated": false,
            "stage": "api"
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid ticket #0: field `merchant` must be a string, got a number"
        );

        let err = Ticket::from_json(&json!({
            "merchant": "M4",
            "error": "API_KEY_INVALID",
            "migrated": "yes",
            "stage": "api"
        }))
        .unwrap_err();
        assert!(matches!(err, TriageError::InvalidTicket { field: "migrated", .. }));
    }

    #[test]
    fn ticket_list_reports_failing_index() {
        let err = Ticket::list_from_json(&json!([
            {"merchant": "M1", "error": "E", "migrated": true, "stage": "s"},
            {"merchant": "M2", "error": "E", "migrated": true}
        ]))
        .unwrap_err();
        assert!(matches!(err, TriageError::InvalidTicket { index: 1, field: "stage", .. }));
    }

    #[test]
    fn gate_threshold_is_inclusive() {
        assert_eq!(ActionGate::classify(0.80, 0.80), ActionGate::Autonomous);
        assert_eq!(ActionGate::classify(0.79, 0.80), ActionGate::HumanApproval);
    }

    #[test]
    fn kinds_carry_fixed_table() {
        assert_eq!(HypothesisKind::ALL.len(), 4);
        assert_eq!(HypothesisKind::PlatformRegression.base_confidence(), 0.80);
        assert_eq!(
            HypothesisKind::MigrationStepMismatch.action(),
            "Pause migration at that step"
        );
        assert_eq!(
            HypothesisKind::DocumentationGap.to_string(),
            "Documentation Gap"
        );
    }

    #[test]
    fn round2_fixes_float_drift() {
        assert_eq!(round2(0.7 + 0.1), 0.8);
        assert_eq!(round2(0.75 + 0.1), 0.85);
    }

    #[test]
    fn hypothesis_serializes_type_field() {
        let h = Hypothesis {
            kind: HypothesisKind::PlatformRegression,
            confidence: 0.8,
            action: HypothesisKind::PlatformRegression.action().into(),
            gate: ActionGate::Autonomous,
            focus: None,
        };
        let value = serde_json::to_value(&h).unwrap();
        assert_eq!(value["type"], "platform_regression");
        assert_eq!(value["gate"], "autonomous");
        assert!(value.get("focus").is_none());
    }
}
