//! Governance Audit Logger
//!
//! Wraps the append-only ledger with typed event constructors and the
//! query/compliance surfaces. Every append is persisted through the
//! injected store before returning; there is no batching and no silent
//! drop of an entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::error::GovernanceError;
use crate::storage::Store;

use super::entry::{AuditEntry, EventType};
use super::events::{MergeEvent, OverrideEvent, PolicyChangeEvent, VetoEvent, VoteEvent};
use super::log::{AuditLog, AuditSummary};
use super::verify::{verify_log, IntegrityReport};

/// Read-only projection of a date range for compliance reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub report_period: ReportPeriod,
    pub summary: ComplianceSummary,
    pub entries: Vec<AuditEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub total_entries: usize,
    pub votes: usize,
    pub merges: usize,
    pub vetoes: usize,
    pub overrides: usize,
    pub policy_changes: usize,
}

#[derive(Debug)]
pub struct GovernanceAuditLogger<S: Store<AuditLog>> {
    log: AuditLog,
    store: S,
}

impl<S: Store<AuditLog>> GovernanceAuditLogger<S> {
    /// Open the ledger. An absent document bootstraps (and persists) a
    /// fresh log; a document that exists but cannot be parsed is fatal —
    /// prior entries are never silently discarded.
    pub fn new(mut store: S) -> Result<Self, GovernanceError> {
        let log = match store.load()? {
            Some(log) => {
                debug!("Audit log loaded: {} entries", log.entries.len());
                log
            }
            None => {
                let log = AuditLog::bootstrap();
                store.save(&log)?;
                info!("Audit log bootstrapped");
                log
            }
        };

        Ok(Self { log, store })
    }

    pub fn log(&self) -> &AuditLog {
        &self.log
    }

    pub fn summary(&self) -> &AuditSummary {
        &self.log.summary
    }

    fn append(&mut self, entry: AuditEntry) -> Result<AuditEntry, GovernanceError> {
        self.log.append(entry.clone());
        self.store.save(&self.log)?;
        info!("Audit entry recorded: {}", entry.summary());
        Ok(entry)
    }

    /// Record a cast vote.
    pub fn log_vote(&mut self, event: VoteEvent) -> Result<AuditEntry, GovernanceError> {
        let entry = AuditEntry::new(
            "GOVERNANCE_VOTE",
            EventType::VoteCast,
            event.voter.clone(),
            Some(event.voter_role),
            format!("Voted {} on PR #{}", event.vote, event.pr_number),
            json!({
                "pr_number": event.pr_number,
                "vote": event.vote,
                "vote_weight": event.vote_weight,
                "comment": event.comment,
                "pr_type": event.pr_type
            }),
            json!({
                "repository": event.repository.unwrap_or_else(unknown),
                "workflow_run_id": event.workflow_run_id.unwrap_or_else(unknown)
            }),
        );
        self.append(entry)
    }

    /// Record a PR merge.
    pub fn log_merge(&mut self, event: MergeEvent) -> Result<AuditEntry, GovernanceError> {
        let entry = AuditEntry::new(
            "GOVERNANCE_MERGE",
            EventType::PrMerged,
            event.merger.clone(),
            Some(event.merger_role),
            format!("Merged PR #{}: {}", event.pr_number, event.pr_title),
            json!({
                "pr_number": event.pr_number,
                "pr_title": event.pr_title,
                "pr_author": event.pr_author,
                "pr_type": event.pr_type,
                "merge_commit": event.merge_commit.unwrap_or_else(unknown),
                "weighted_vote_score": event.weighted_vote_score
            }),
            json!({
                "repository": event.repository.unwrap_or_else(unknown),
                "workflow_run_id": event.workflow_run_id.unwrap_or_else(unknown)
            }),
        );
        self.append(entry)
    }

    /// Record a veto.
    pub fn log_veto(&mut self, event: VetoEvent) -> Result<AuditEntry, GovernanceError> {
        let entry = AuditEntry::new(
            "GOVERNANCE_VETO",
            EventType::VetoCast,
            event.vetoer.clone(),
            Some(event.vetoer_role),
            format!("Vetoed PR #{}", event.pr_number),
            json!({
                "pr_number": event.pr_number,
                "pr_title": event.pr_title,
                "reason": event.reason,
                "veto_weight": event.veto_weight
            }),
            json!({
                "repository": event.repository.unwrap_or_else(unknown)
            }),
        );
        self.append(entry)
    }

    /// Record an override action.
    pub fn log_override(&mut self, event: OverrideEvent) -> Result<AuditEntry, GovernanceError> {
        let entry = AuditEntry::new(
            "GOVERNANCE_OVERRIDE",
            EventType::OverrideAction,
            event.overrider.clone(),
            Some(event.overrider_role),
            format!("Override action on PR #{}", event.pr_number),
            json!({
                "pr_number": event.pr_number,
                "override_type": event.override_type,
                "reason": event.reason,
                "original_decision": event.original_decision
            }),
            json!({
                "repository": event.repository.unwrap_or_else(unknown)
            }),
        );
        self.append(entry)
    }

    /// Record a governance policy change.
    pub fn log_policy_change(
        &mut self,
        event: PolicyChangeEvent,
    ) -> Result<AuditEntry, GovernanceError> {
        let entry = AuditEntry::new(
            "GOVERNANCE_POLICY",
            EventType::PolicyChanged,
            event.actor.clone(),
            Some(event.actor_role),
            format!("Policy changed: {}", event.policy_name),
            json!({
                "policy_name": event.policy_name,
                "old_value": event.old_value,
                "new_value": event.new_value,
                "reason": event.reason
            }),
            json!({
                "repository": event.repository.unwrap_or_else(unknown)
            }),
        );
        self.append(entry)
    }

    /// Entries whose details reference a PR number.
    pub fn entries_for_pr(&self, pr_number: u64) -> Vec<&AuditEntry> {
        self.log
            .entries
            .iter()
            .filter(|e| e.details.get("pr_number").and_then(|v| v.as_u64()) == Some(pr_number))
            .collect()
    }

    pub fn entries_by_actor(&self, actor: &str) -> Vec<&AuditEntry> {
        self.log.entries.iter().filter(|e| e.actor == actor).collect()
    }

    pub fn entries_by_event_type(&self, event_type: EventType) -> Vec<&AuditEntry> {
        self.log
            .entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    pub fn entries_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<&AuditEntry> {
        self.log
            .entries
            .iter()
            .filter(|e| e.timestamp >= start && e.timestamp <= end)
            .collect()
    }

    /// Recompute every entry hash (bootstrap entry exempt) and report
    /// mismatches.
    pub fn verify_integrity(&self) -> IntegrityReport {
        verify_log(&self.log)
    }

    /// Read-only compliance projection for a date range.
    pub fn export_compliance_report(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ComplianceReport {
        let entries: Vec<AuditEntry> = self
            .entries_in_range(start, end)
            .into_iter()
            .cloned()
            .collect();

        let count =
            |t: EventType| entries.iter().filter(|e| e.event_type == t).count();

        ComplianceReport {
            report_period: ReportPeriod { start, end },
            summary: ComplianceSummary {
                total_entries: entries.len(),
                votes: count(EventType::VoteCast),
                merges: count(EventType::PrMerged),
                vetoes: count(EventType::VetoCast),
                overrides: count(EventType::OverrideAction),
                policy_changes: count(EventType::PolicyChanged),
            },
            entries,
        }
    }
}

fn unknown() -> String {
    "unknown".to_string()
}
