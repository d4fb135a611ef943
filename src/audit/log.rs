//! Audit Log Document
//!
//! The persisted ledger: a growing entry list with summary counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entry::{bootstrap_entry, AuditEntry, EventType};

pub const AUDIT_LOG_VERSION: &str = "1.0.0";

/// Counters maintained alongside the entry list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditSummary {
    pub total_entries: usize,
    pub total_votes: usize,
    pub total_merges: usize,
    pub total_vetoes: usize,
    pub total_overrides: usize,
    pub total_policy_changes: usize,
}

/// The persisted ledger. `entries` only grows; `last_updated` and `summary`
/// are refreshed on every append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub version: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub entries: Vec<AuditEntry>,
    pub summary: AuditSummary,
}

impl AuditLog {
    /// Fresh ledger holding only the exempt bootstrap entry.
    pub fn bootstrap() -> Self {
        let now = Utc::now();
        Self {
            version: AUDIT_LOG_VERSION.to_string(),
            description: "Immutable audit log for all governance actions. This file is \
                          append-only and serves as the single source of truth for \
                          governance compliance."
                .to_string(),
            created_at: now,
            last_updated: now,
            entries: vec![bootstrap_entry()],
            summary: AuditSummary {
                total_entries: 1,
                ..Default::default()
            },
        }
    }

    /// Append an entry and refresh the summary counters and `last_updated`.
    /// Entries are never mutated or removed after this point.
    pub fn append(&mut self, entry: AuditEntry) {
        match entry.event_type {
            EventType::VoteCast => self.summary.total_votes += 1,
            EventType::PrMerged => self.summary.total_merges += 1,
            EventType::VetoCast => self.summary.total_vetoes += 1,
            EventType::OverrideAction => self.summary.total_overrides += 1,
            EventType::PolicyChanged => self.summary.total_policy_changes += 1,
            EventType::SystemInitialized => {}
        }

        self.entries.push(entry);
        self.summary.total_entries = self.entries.len();
        self.last_updated = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governance::Role;
    use serde_json::json;

    #[test]
    fn test_bootstrap_log() {
        let log = AuditLog::bootstrap();
        assert_eq!(log.version, AUDIT_LOG_VERSION);
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.summary.total_entries, 1);
        assert_eq!(log.summary.total_votes, 0);
    }

    #[test]
    fn test_append_updates_counters() {
        let mut log = AuditLog::bootstrap();
        let before = log.last_updated;

        log.append(AuditEntry::new(
            "GOVERNANCE_VOTE",
            EventType::VoteCast,
            "alice-maintainer",
            Some(Role::Lead),
            "Voted approve on PR #1",
            json!({"pr_number": 1}),
            json!({}),
        ));
        log.append(AuditEntry::new(
            "GOVERNANCE_VETO",
            EventType::VetoCast,
            "asymcrypto",
            Some(Role::Founder),
            "Vetoed PR #2",
            json!({"pr_number": 2}),
            json!({}),
        ));

        assert_eq!(log.entries.len(), 3);
        assert_eq!(log.summary.total_entries, 3);
        assert_eq!(log.summary.total_votes, 1);
        assert_eq!(log.summary.total_vetoes, 1);
        assert!(log.last_updated >= before);
    }
}
