//! Hypothesis rules.
//!
//! Each rule is an independent predicate over an error group. Rules never
//! look at each other's results, so any number may fire for one group.

pub mod battery;

pub use battery::{
    default_rules, DocumentationGapRule, MerchantMisconfigurationRule,
    MigrationStepMismatchRule, PlatformRegressionRule,
};

use crate::group::ErrorGroup;
use crate::types::HypothesisKind;

/// A rule that fired for a group, before recurrence adjustment.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleMatch {
    /// Category proposed by the rule.
    pub kind: HypothesisKind,
    /// Unadjusted confidence.
    pub base_confidence: f64,
    /// Recommended remediation.
    pub action: String,
    /// What the action targets, if the rule pins it down.
    pub focus: Option<String>,
}

impl RuleMatch {
    /// A match carrying the kind's fixed confidence and action.
    pub fn of(kind: HypothesisKind) -> Self {
        Self {
            kind,
            base_confidence: kind.base_confidence(),
            action: kind.action().to_string(),
            focus: None,
        }
    }

    pub fn with_focus(mut self, focus: impl Into<String>) -> Self {
        self.focus = Some(focus.into());
        self
    }
}

/// Trait for hypothesis rules.
pub trait HypothesisRule: Send + Sync {
    /// Rule category.
    fn kind(&self) -> HypothesisKind;

    /// Short description of when the rule fires.
    fn trigger(&self) -> &'static str;

    /// Evaluate the rule; `None` when it does not fire.
    fn evaluate(&self, group: &ErrorGroup<'_>) -> Option<RuleMatch>;

    /// Rule name for logs.
    fn name(&self) -> &'static str {
        self.kind().label()
    }
}
