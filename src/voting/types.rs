//! Rendered Decision Types
//!
//! JSON-emitted outputs of a merge evaluation. None of these are persisted;
//! decisions are a pure function of the accumulated votes.

use serde::{Deserialize, Serialize};

use super::classify::PrType;
use super::score::VoteScore;

/// Per-gate outcome flags carried on a decision. Gates that were never
/// reached are omitted from the serialized output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeChecks {
    pub ci_pass: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_vote: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veto_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founder_approval: Option<bool>,
}

/// The merge eligibility verdict for a PR. Exactly one reason string per
/// evaluation; the first failing gate is terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeDecision {
    pub can_merge: bool,
    pub reason: String,
    pub pr_number: u64,
    pub pr_type: PrType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_score: Option<VoteScore>,
    pub checks: MergeChecks,
}

/// Point-in-time snapshot of the governance state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceSummary {
    pub total_maintainers: usize,
    pub active_maintainers: usize,
    pub total_votes_cast: usize,
    pub total_overrides: usize,
    pub governance_model: String,
    pub merge_approval_threshold: f64,
}
