//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{TriageError, TriageResult};

/// Highest confidence any hypothesis may carry.
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Tunables for the triage engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Added to every fired rule when the group's signature recurs.
    #[serde(default = "default_recurrence_bonus")]
    pub recurrence_bonus: f64,

    /// Hard ceiling applied after the bonus. At most [`MAX_CONFIDENCE`].
    #[serde(default = "default_confidence_ceiling")]
    pub confidence_ceiling: f64,

    /// Confidence at or above which a hypothesis is autonomous-safe.
    #[serde(default = "default_autonomy_threshold")]
    pub autonomy_threshold: f64,
}

fn default_recurrence_bonus() -> f64 {
    0.10
}

fn default_confidence_ceiling() -> f64 {
    MAX_CONFIDENCE
}

fn default_autonomy_threshold() -> f64 {
    0.80
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            recurrence_bonus: default_recurrence_bonus(),
            confidence_ceiling: default_confidence_ceiling(),
            autonomy_threshold: default_autonomy_threshold(),
        }
    }
}

impl TriageConfig {
    /// Reject values outside their meaningful ranges.
    pub fn validate(&self) -> TriageResult<()> {
        if !(0.0..=1.0).contains(&self.recurrence_bonus) {
            return Err(TriageError::Configuration(format!(
                "recurrence_bonus must be within [0, 1], got {}",
                self.recurrence_bonus
            )));
        }
        if !(0.0..=MAX_CONFIDENCE).contains(&self.confidence_ceiling) {
            return Err(TriageError::Configuration(format!(
                "confidence_ceiling must be within [0, {}], got {}",
                MAX_CONFIDENCE, self.confidence_ceiling
            )));
        }
        if !(0.0..=1.0).contains(&self.autonomy_threshold) {
            return Err(TriageError::Configuration(format!(
                "autonomy_threshold must be within [0, 1], got {}",
                self.autonomy_threshold
            )));
        }
        Ok(())
    }
}
