//! Session-scoped incident memory keyed by signature.
//!
//! Entries are created on first observation and updated in place afterwards.
//! Nothing is ever removed; the store is dropped with its owning session.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::signature::IncidentSignature;

/// Display format for `last_seen` in memory views.
pub const LAST_SEEN_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Recurrence record for one incident signature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncidentMemoryEntry {
    /// Error code the signature summarizes.
    pub error: String,
    /// Number of passes in which the signature appeared.
    pub times_seen: u64,
    /// When the signature was first recorded.
    pub first_seen: DateTime<Utc>,
    /// Most recent pass in which the signature appeared.
    pub last_seen: DateTime<Utc>,
}

impl IncidentMemoryEntry {
    /// `last_seen` rendered for humans, in UTC with the zone spelled out.
    pub fn last_seen_display(&self) -> String {
        self.last_seen.format(LAST_SEEN_FORMAT).to_string()
    }
}

/// Recurrence memory for one session.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IncidentMemory {
    entries: HashMap<IncidentSignature, IncidentMemoryEntry>,
}

impl IncidentMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a signature has been recorded before.
    pub fn contains(&self, signature: &IncidentSignature) -> bool {
        self.entries.contains_key(signature)
    }

    pub fn get(&self, signature: &IncidentSignature) -> Option<&IncidentMemoryEntry> {
        self.entries.get(signature)
    }

    /// Record one observation of `signature` at `now`.
    ///
    /// Creates the entry with `times_seen = 1` or bumps it by exactly one.
    /// `last_seen` is always overwritten.
    pub fn record(
        &mut self,
        signature: IncidentSignature,
        error: &str,
        now: DateTime<Utc>,
    ) -> &IncidentMemoryEntry {
        let entry = self
            .entries
            .entry(signature)
            .and_modify(|e| {
                e.times_seen += 1;
                e.last_seen = now;
            })
            .or_insert_with(|| IncidentMemoryEntry {
                error: error.to_string(),
                times_seen: 1,
                first_seen: now,
                last_seen: now,
            });
        debug!(
            signature = %signature,
            error = %entry.error,
            times_seen = entry.times_seen,
            "Recorded incident"
        );
        entry
    }

    /// Entries ordered most recent first, ties broken by error code.
    pub fn entries_by_recency(&self) -> Vec<(&IncidentSignature, &IncidentMemoryEntry)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|(sa, a), (sb, b)| {
            b.last_seen
                .cmp(&a.last_seen)
                .then_with(|| a.error.cmp(&b.error))
                .then_with(|| sa.cmp(sb))
        });
        entries
    }

    /// Total observations across all signatures.
    pub fn total_observations(&self) -> u64 {
        self.entries.values().map(|e| e.times_seen).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
