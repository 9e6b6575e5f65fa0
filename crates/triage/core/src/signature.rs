//! Incident signatures.
//!
//! A signature fingerprints an error group by its error code, its distinct
//! merchants and its distinct stages. Sets are sorted before hashing so the
//! result does not depend on ticket order or duplicates.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::group::ErrorGroup;

/// BLAKE3 fingerprint of an error group's composition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IncidentSignature(pub [u8; 32]);

impl IncidentSignature {
    /// Fingerprint an error group.
    pub fn of_group(group: &ErrorGroup<'_>) -> Self {
        Self::compute(
            group.error,
            &group.distinct_merchants(),
            &group.distinct_stages(),
        )
    }

    /// Fingerprint an error code with its merchant and stage sets.
    pub fn compute(error: &str, merchants: &BTreeSet<&str>, stages: &BTreeSet<&str>) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(canonical_form(error, merchants, stages).as_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encode for display.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, SignatureError> {
        if hex.len() != 64 {
            return Err(SignatureError::InvalidLength(hex.len()));
        }
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = hex
                .get(i * 2..i * 2 + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or(SignatureError::InvalidHex)?;
        }
        Ok(Self(bytes))
    }
}

/// Length-prefixed `error|merchants|stages` text, so distinct compositions
/// never collide before hashing.
fn canonical_form(error: &str, merchants: &BTreeSet<&str>, stages: &BTreeSet<&str>) -> String {
    fn push(out: &mut String, item: &str) {
        out.push_str(&item.len().to_string());
        out.push(':');
        out.push_str(item);
    }

    let mut out = String::new();
    push(&mut out, error);
    for (tag, set) in [("m", merchants), ("s", stages)] {
        out.push('|');
        out.push_str(tag);
        out.push_str(&set.len().to_string());
        for item in set {
            out.push(',');
            push(&mut out, item);
        }
    }
    out
}

impl fmt::Debug for IncidentSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IncidentSignature({})", &self.to_hex()[..12])
    }
}

impl fmt::Display for IncidentSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..12])
    }
}

impl Serialize for IncidentSignature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for IncidentSignature {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        IncidentSignature::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("invalid hex length: {0} (expected 64)")]
    InvalidLength(usize),
    #[error("invalid hex character")]
    InvalidHex,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_by_error;
    use crate::types::Ticket;

    fn t(merchant: &str, stage: &str) -> Ticket {
        Ticket::new(merchant, "CHECKOUT_500", true, stage).unwrap()
    }

    fn signature_of(tickets: &[Ticket]) -> IncidentSignature {
        IncidentSignature::of_group(&group_by_error(tickets)[0])
    }

    #[test]
    fn order_and_duplicates_do_not_matter() {
        let a = signature_of(&[t("M1", "checkout"), t("M2", "checkout")]);
        let b = signature_of(&[t("M2", "checkout"), t("M1", "checkout"), t("M2", "checkout")]);
        assert_eq!(a, b);
    }

    #[test]
    fn merchant_or_stage_change_alters_signature() {
        let base = signature_of(&[t("M1", "checkout"), t("M2", "checkout")]);
        let more_merchants = signature_of(&[t("M1", "checkout"), t("M3", "checkout")]);
        let other_stage = signature_of(&[t("M1", "checkout"), t("M2", "api")]);
        assert_ne!(base, more_merchants);
        assert_ne!(base, other_stage);
    }

    #[test]
    fn error_code_is_part_of_signature() {
        let a = IncidentSignature::compute("A", &["M1"].into(), &["s"].into());
        let b = IncidentSignature::compute("B", &["M1"].into(), &["s"].into());
        assert_ne!(a, b);
    }

    #[test]
    fn canonical_form_separates_ambiguous_joins() {
        let a = IncidentSignature::compute("E", &["M1,M2"].into(), &["s"].into());
        let b = IncidentSignature::compute("E", &["M1", "M2"].into(), &["s"].into());
        assert_ne!(a, b);
    }

    #[test]
    fn hex_round_trips_through_serde() {
        let sig = signature_of(&[t("M1", "checkout")]);
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json.len(), 66);
        let back: IncidentSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
        assert_eq!(sig.to_string().len(), 12);
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(matches!(
            IncidentSignature::from_hex("abc"),
            Err(SignatureError::InvalidLength(3))
        ));
        let bad = "zz".repeat(32);
        assert!(matches!(
            IncidentSignature::from_hex(&bad),
            Err(SignatureError::InvalidHex)
        ));
    }
}
