//! Demo ticket generation and the seed dataset.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::Ticket;

/// Merchant ids are drawn from `M1..=M{MERCHANT_POOL_SIZE}`.
pub const MERCHANT_POOL_SIZE: u32 = 20;

/// Scenario a batch of generated tickets reproduces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    PlatformRegression,
    MerchantMisconfiguration,
    DocumentationGap,
    MigrationStepMismatch,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 4] = [
        Self::PlatformRegression,
        Self::MerchantMisconfiguration,
        Self::DocumentationGap,
        Self::MigrationStepMismatch,
    ];

    /// `(count, error, stage, migrated)` for the scenario.
    fn template(&self) -> (usize, &'static str, &'static str, bool) {
        match self {
            Self::PlatformRegression => (3, "CHECKOUT_500", "checkout", true),
            Self::MerchantMisconfiguration => (1, "API_KEY_INVALID", "api", false),
            Self::DocumentationGap => (2, "WEBHOOK_MISSING", "webhook", true),
            Self::MigrationStepMismatch => (2, "SCHEMA_MISMATCH", "checkout", true),
        }
    }
}

impl std::fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlatformRegression => write!(f, "platform-regression"),
            Self::MerchantMisconfiguration => write!(f, "merchant-misconfiguration"),
            Self::DocumentationGap => write!(f, "documentation-gap"),
            Self::MigrationStepMismatch => write!(f, "migration-step-mismatch"),
        }
    }
}

/// Generate scenario tickets with the thread-local RNG.
pub fn generate_sample_tickets(kind: ScenarioKind) -> Vec<Ticket> {
    generate_sample_tickets_with(kind, &mut rand::thread_rng())
}

/// Generate scenario tickets with a caller-supplied RNG.
///
/// Each ticket draws its merchant independently, with replacement.
pub fn generate_sample_tickets_with<R: Rng>(kind: ScenarioKind, rng: &mut R) -> Vec<Ticket> {
    let (count, error, stage, migrated) = kind.template();
    (0..count)
        .map(|_| Ticket {
            merchant: format!("M{}", rng.gen_range(1..=MERCHANT_POOL_SIZE)),
            error: error.to_string(),
            migrated,
            stage: stage.to_string(),
        })
        .collect()
}

/// The dataset every new session starts with.
pub fn seed_tickets() -> Vec<Ticket> {
    [
        ("M1", "CHECKOUT_500", true, "checkout"),
        ("M2", "CHECKOUT_500", true, "checkout"),
        ("M3", "CHECKOUT_500", true, "checkout"),
        ("M4", "API_KEY_INVALID", false, "api"),
        ("M5", "WEBHOOK_MISSING", true, "webhook"),
    ]
    .into_iter()
    .map(|(merchant, error, migrated, stage)| Ticket {
        merchant: merchant.to_string(),
        error: error.to_string(),
        migrated,
        stage: stage.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn platform_regression_shape() {
        let tickets = generate_sample_tickets(ScenarioKind::PlatformRegression);
        assert_eq!(tickets.len(), 3);
        assert!(tickets
            .iter()
            .all(|t| t.error == "CHECKOUT_500" && t.stage == "checkout" && t.migrated));
    }

    #[test]
    fn every_scenario_matches_its_template() {
        let expected = [
            (ScenarioKind::PlatformRegression, 3, "CHECKOUT_500", "checkout", true),
            (ScenarioKind::MerchantMisconfiguration, 1, "API_KEY_INVALID", "api", false),
            (ScenarioKind::DocumentationGap, 2, "WEBHOOK_MISSING", "webhook", true),
            (ScenarioKind::MigrationStepMismatch, 2, "SCHEMA_MISMATCH", "checkout", true),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        for (kind, count, error, stage, migrated) in expected {
            let tickets = generate_sample_tickets_with(kind, &mut rng);
            assert_eq!(tickets.len(), count, "{kind}");
            for t in &tickets {
                assert_eq!(t.error, error);
                assert_eq!(t.stage, stage);
                assert_eq!(t.migrated, migrated);
                assert!(t.validate().is_ok());
            }
        }
    }

    #[test]
    fn merchants_come_from_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            for t in generate_sample_tickets_with(ScenarioKind::PlatformRegression, &mut rng) {
                let n: u32 = t.merchant.trim_start_matches('M').parse().unwrap();
                assert!((1..=MERCHANT_POOL_SIZE).contains(&n), "{}", t.merchant);
            }
        }
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let a = generate_sample_tickets_with(
            ScenarioKind::PlatformRegression,
            &mut StdRng::seed_from_u64(99),
        );
        let b = generate_sample_tickets_with(
            ScenarioKind::PlatformRegression,
            &mut StdRng::seed_from_u64(99),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn seed_dataset_is_valid() {
        let tickets = seed_tickets();
        assert_eq!(tickets.len(), 5);
        assert!(tickets.iter().all(|t| t.validate().is_ok()));
    }
}
