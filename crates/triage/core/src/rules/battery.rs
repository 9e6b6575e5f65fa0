//! The built-in rule battery, in evaluation order:
//! 1. **MerchantMisconfiguration** — exactly one merchant affected
//! 2. **PlatformRegression** — three or more merchants affected
//! 3. **DocumentationGap** — two or more migrated tickets
//! 4. **MigrationStepMismatch** — every ticket failed at the same stage

use crate::group::ErrorGroup;
use crate::types::HypothesisKind;

use super::{HypothesisRule, RuleMatch};

/// Merchants at or above which a failure is treated as platform-wide.
pub const PLATFORM_MERCHANT_THRESHOLD: usize = 3;

/// Migrated tickets at or above which the docs are suspected.
pub const DOCUMENTATION_MIGRATED_THRESHOLD: usize = 2;

/// The four default rules in fixed order.
pub fn default_rules() -> Vec<Box<dyn HypothesisRule>> {
    vec![
        Box::new(MerchantMisconfigurationRule),
        Box::new(PlatformRegressionRule),
        Box::new(DocumentationGapRule),
        Box::new(MigrationStepMismatchRule),
    ]
}

// ── 1. Merchant Misconfiguration ────────────────────────────────────────

pub struct MerchantMisconfigurationRule;

impl HypothesisRule for MerchantMisconfigurationRule {
    fn kind(&self) -> HypothesisKind {
        HypothesisKind::MerchantMisconfiguration
    }

    fn trigger(&self) -> &'static str {
        "exactly 1 distinct merchant"
    }

    fn evaluate(&self, group: &ErrorGroup<'_>) -> Option<RuleMatch> {
        let merchants = group.distinct_merchants();
        if merchants.len() != 1 {
            return None;
        }
        let merchant = merchants.into_iter().next()?;
        Some(RuleMatch::of(self.kind()).with_focus(merchant))
    }
}

// ── 2. Platform Regression ──────────────────────────────────────────────

pub struct PlatformRegressionRule;

impl HypothesisRule for PlatformRegressionRule {
    fn kind(&self) -> HypothesisKind {
        HypothesisKind::PlatformRegression
    }

    fn trigger(&self) -> &'static str {
        ">= 3 distinct merchants"
    }

    fn evaluate(&self, group: &ErrorGroup<'_>) -> Option<RuleMatch> {
        (group.distinct_merchants().len() >= PLATFORM_MERCHANT_THRESHOLD)
            .then(|| RuleMatch::of(self.kind()))
    }
}

// ── 3. Documentation Gap ────────────────────────────────────────────────

pub struct DocumentationGapRule;

impl HypothesisRule for DocumentationGapRule {
    fn kind(&self) -> HypothesisKind {
        HypothesisKind::DocumentationGap
    }

    fn trigger(&self) -> &'static str {
        ">= 2 migrated tickets"
    }

    fn evaluate(&self, group: &ErrorGroup<'_>) -> Option<RuleMatch> {
        (group.migrated_count() >= DOCUMENTATION_MIGRATED_THRESHOLD)
            .then(|| RuleMatch::of(self.kind()))
    }
}

// ── 4. Migration Step Mismatch ──────────────────────────────────────────

pub struct MigrationStepMismatchRule;

impl HypothesisRule for MigrationStepMismatchRule {
    fn kind(&self) -> HypothesisKind {
        HypothesisKind::MigrationStepMismatch
    }

    fn trigger(&self) -> &'static str {
        "exactly 1 distinct stage"
    }

    fn evaluate(&self, group: &ErrorGroup<'_>) -> Option<RuleMatch> {
        let stages = group.distinct_stages();
        if stages.len() != 1 {
            return None;
        }
        let stage = stages.into_iter().next()?;
        Some(RuleMatch::of(self.kind()).with_focus(stage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_by_error;
    use crate::types::Ticket;

    fn t(merchant: &str, migrated: bool, stage: &str) -> Ticket {
        Ticket::new(merchant, "E", migrated, stage).unwrap()
    }

    fn fired(tickets: &[Ticket]) -> Vec<HypothesisKind> {
        let group = &group_by_error(tickets)[0];
        default_rules()
            .iter()
            .filter_map(|r| r.evaluate(group))
            .map(|m| m.kind)
            .collect()
    }

    #[test]
    fn battery_is_in_fixed_order() {
        let kinds: Vec<HypothesisKind> = default_rules().iter().map(|r| r.kind()).collect();
        assert_eq!(kinds, HypothesisKind::ALL.to_vec());
    }

    #[test]
    fn single_merchant_fires_misconfiguration_with_focus() {
        let tickets = [t("M7", false, "api")];
        let group = &group_by_error(&tickets)[0];
        let m = MerchantMisconfigurationRule.evaluate(group).unwrap();
        assert_eq!(m.base_confidence, 0.85);
        assert_eq!(m.focus.as_deref(), Some("M7"));
    }

    #[test]
    fn two_merchants_fire_neither_merchant_rule() {
        let kinds = fired(&[t("M1", false, "a"), t("M2", false, "b")]);
        assert!(kinds.is_empty());
    }

    #[test]
    fn three_merchants_fire_platform_regression() {
        let kinds = fired(&[t("M1", false, "a"), t("M2", false, "b"), t("M3", false, "c")]);
        assert_eq!(kinds, vec![HypothesisKind::PlatformRegression]);
    }

    #[test]
    fn documentation_gap_needs_two_migrated() {
        let one = fired(&[t("M1", true, "a"), t("M2", false, "b")]);
        assert!(!one.contains(&HypothesisKind::DocumentationGap));

        let two = fired(&[t("M1", true, "a"), t("M2", true, "b")]);
        assert_eq!(two, vec![HypothesisKind::DocumentationGap]);
    }

    #[test]
    fn step_mismatch_focuses_on_stage() {
        let tickets = [t("M1", false, "webhook"), t("M2", false, "webhook")];
        let group = &group_by_error(&tickets)[0];
        let m = MigrationStepMismatchRule.evaluate(group).unwrap();
        assert_eq!(m.focus.as_deref(), Some("webhook"));
        assert_eq!(m.action, "Pause migration at that step");
    }

    #[test]
    fn rules_are_independent() {
        let kinds = fired(&[t("M1", true, "checkout"), t("M1", true, "checkout")]);
        assert_eq!(
            kinds,
            vec![
                HypothesisKind::MerchantMisconfiguration,
                HypothesisKind::DocumentationGap,
                HypothesisKind::MigrationStepMismatch,
            ]
        );
    }
}
