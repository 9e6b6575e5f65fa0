//! # triage-core
//!
//! Support-incident triage for the hosted → headless migration.
//!
//! Tickets are grouped by error code, each group is fingerprinted, and a
//! fixed battery of independent rules proposes root-cause hypotheses. Groups
//! whose fingerprint was already seen in the session get a recurrence bonus.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────┐
//!   │  Ticket list        │  ← validated at ingestion
//!   └──────────┬──────────┘
//!              ▼
//!   ┌─────────────────────┐
//!   │  Error groups       │  ← one per error code, first-appearance order
//!   └──────────┬──────────┘
//!              ▼
//!   ┌─────────────────────┐     ┌──────────────────────┐
//!   │  Incident signature │ ──► │  Incident memory     │  ← seen before?
//!   └──────────┬──────────┘     └──────────▲───────────┘
//!              ▼                            │
//!   ┌─────────────────────┐                 │
//!   │  Rule battery       │  ← 4 rules, non-exclusive
//!   └──────────┬──────────┘                 │
//!              ▼                            │
//!   ┌─────────────────────┐                 │
//!   │  Bonus, clamp, gate │ ────────────────┘ record pass
//!   └─────────────────────┘
//! ```
//!
//! ## Key Principles
//!
//! - **One pass per interaction**: every refresh re-evaluates the full list.
//! - **Explicit state**: the only state between passes is the
//!   [`IncidentMemory`], owned by the caller or a [`TriageSession`].
//! - **Independent evidence**: rules are not a decision tree; several may fire.
//! - **Bounded confidence**: nothing exceeds 0.95, and the autonomy gate is
//!   judged on the final value.

#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;
pub mod group;
pub mod memory;
pub mod rules;
pub mod sample;
pub mod session;
pub mod signature;
pub mod types;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use config::{TriageConfig, MAX_CONFIDENCE};
pub use engine::{evaluate, Evaluation, GroupAssessment, TriageEngine};
pub use error::{TriageError, TriageResult};
pub use group::{group_by_error, ErrorGroup};
pub use memory::{IncidentMemory, IncidentMemoryEntry, LAST_SEEN_FORMAT};
pub use rules::{
    default_rules, DocumentationGapRule, HypothesisRule, MerchantMisconfigurationRule,
    MigrationStepMismatchRule, PlatformRegressionRule, RuleMatch,
};
pub use sample::{
    generate_sample_tickets, generate_sample_tickets_with, seed_tickets, ScenarioKind,
    MERCHANT_POOL_SIZE,
};
pub use session::TriageSession;
pub use signature::{IncidentSignature, SignatureError};
pub use types::{ActionGate, Hypothesis, HypothesisKind, SessionId, Ticket};
