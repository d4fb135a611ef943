//! Audit Log Entry
//!
//! Tamper-evident ledger entries. Each entry carries the SHA-256 of its own
//! canonical JSON serialization, computed once at creation with the hash
//! field nulled, and never recomputed except during integrity verification.

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::governance::Role;

/// Governance event recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    SystemInitialized,
    VoteCast,
    PrMerged,
    VetoCast,
    OverrideAction,
    PolicyChanged,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventType::SystemInitialized => "SYSTEM_INITIALIZED",
            EventType::VoteCast => "VOTE_CAST",
            EventType::PrMerged => "PR_MERGED",
            EventType::VetoCast => "VETO_CAST",
            EventType::OverrideAction => "OVERRIDE_ACTION",
            EventType::PolicyChanged => "POLICY_CHANGED",
        };
        f.write_str(name)
    }
}

/// One immutable ledger entry.
///
/// `details` and `metadata` are JSON objects; serde_json maps keep their
/// keys sorted, so serialization is deterministic and the stored hash stays
/// verifiable across save/load cycles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: EventType,
    pub actor: String,
    pub actor_role: Option<Role>,
    pub action: String,
    pub details: Value,
    pub metadata: Value,
    pub hash: Option<String>,
}

impl AuditEntry {
    /// Build an entry and seal it with its content hash.
    pub fn new(
        id_prefix: &str,
        event_type: EventType,
        actor: impl Into<String>,
        actor_role: Option<Role>,
        action: impl Into<String>,
        details: Value,
        metadata: Value,
    ) -> Self {
        let mut entry = Self {
            id: entry_id(id_prefix),
            timestamp: Utc::now(),
            event_type,
            actor: actor.into(),
            actor_role,
            action: action.into(),
            details,
            metadata,
            hash: None,
        };

        entry.hash = Some(entry.compute_hash());
        entry
    }

    /// SHA-256 over the canonical JSON of this entry with `hash` nulled.
    pub fn compute_hash(&self) -> String {
        let mut unsealed = self.clone();
        unsealed.hash = None;

        let canonical = serde_json::to_vec(&unsealed)
            .unwrap_or_else(|_| format!("{:?}", unsealed).into_bytes());

        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        hex::encode(hasher.finalize())
    }

    /// Check the stored hash against a recomputation.
    pub fn verify_hash(&self) -> bool {
        match &self.hash {
            Some(stored) => *stored == self.compute_hash(),
            None => false,
        }
    }

    /// Human-readable one-liner.
    pub fn summary(&self) -> String {
        format!("{}: {} by {}", self.event_type, self.id, self.actor)
    }
}

/// The ledger's first entry. It is created before any hashable history
/// exists and carries a null hash; integrity verification skips it.
pub fn bootstrap_entry() -> AuditEntry {
    AuditEntry {
        id: "GOVERNANCE_AUDIT_INIT_001".to_string(),
        timestamp: Utc::now(),
        event_type: EventType::SystemInitialized,
        actor: "system".to_string(),
        actor_role: None,
        action: "Governance Audit System initialized".to_string(),
        details: json!({
            "version": "1.0.0",
            "system": "GitForge Enterprise Governance"
        }),
        metadata: json!({}),
        hash: None,
    }
}

fn entry_id(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> AuditEntry {
        AuditEntry::new(
            "GOVERNANCE_VOTE",
            EventType::VoteCast,
            "alice-maintainer",
            Some(Role::Lead),
            "Voted approve on PR #42",
            json!({
                "pr_number": 42,
                "vote": "approve",
                "vote_weight": 75.0
            }),
            json!({"repository": "gitforge/gitforge"}),
        )
    }

    #[test]
    fn test_entry_is_sealed_at_creation() {
        let entry = entry();
        assert!(entry.hash.is_some());
        assert!(entry.verify_hash());
        assert!(entry.id.starts_with("GOVERNANCE_VOTE_"));
    }

    #[test]
    fn test_hash_is_deterministic() {
        let entry = entry();
        assert_eq!(entry.compute_hash(), entry.compute_hash());
        assert_eq!(entry.compute_hash().len(), 64);
    }

    #[test]
    fn test_hash_survives_serde_round_trip() {
        let entry = entry();
        let json = serde_json::to_string_pretty(&entry).unwrap();
        let reloaded: AuditEntry = serde_json::from_str(&json).unwrap();
        assert!(reloaded.verify_hash());
        assert_eq!(reloaded.hash, entry.hash);
    }

    #[test]
    fn test_tampered_field_fails_verification() {
        let mut entry = entry();
        entry.action = "Voted approve on PR #999".to_string();
        assert!(!entry.verify_hash());
    }

    #[test]
    fn test_tampered_details_fail_verification() {
        let mut entry = entry();
        entry.details["vote_weight"] = json!(500.0);
        assert!(!entry.verify_hash());
    }

    #[test]
    fn test_bootstrap_entry_has_null_hash() {
        let genesis = bootstrap_entry();
        assert_eq!(genesis.id, "GOVERNANCE_AUDIT_INIT_001");
        assert_eq!(genesis.event_type, EventType::SystemInitialized);
        assert!(genesis.hash.is_none());
    }

    #[test]
    fn test_event_type_serde_names() {
        assert_eq!(
            serde_json::to_string(&EventType::VoteCast).unwrap(),
            "\"VOTE_CAST\""
        );
        assert_eq!(
            serde_json::to_string(&EventType::PrMerged).unwrap(),
            "\"PR_MERGED\""
        );

        let parsed: EventType = serde_json::from_str("\"POLICY_CHANGED\"").unwrap();
        assert_eq!(parsed, EventType::PolicyChanged);
    }
}
