//! Typed Audit Event Payloads
//!
//! Inputs to the five audit constructors. Each fixes the `details` shape the
//! ledger records for its event type.

use serde_json::Value;

use crate::governance::{Role, Vote, VoteKind};
use crate::voting::PrType;

/// A cast vote to be recorded.
#[derive(Debug, Clone)]
pub struct VoteEvent {
    pub pr_number: u64,
    pub voter: String,
    pub voter_role: Role,
    pub vote: VoteKind,
    pub vote_weight: f64,
    pub comment: String,
    pub pr_type: PrType,
    pub repository: Option<String>,
    pub workflow_run_id: Option<String>,
}

impl VoteEvent {
    /// Build from a registered vote record.
    pub fn from_vote(vote: &Vote, pr_type: PrType) -> Self {
        Self {
            pr_number: vote.pr_number,
            voter: vote.voter.clone(),
            voter_role: vote.voter_role,
            vote: vote.vote,
            vote_weight: vote.vote_weight,
            comment: vote.comment.clone(),
            pr_type,
            repository: Some(vote.metadata.repository.clone()),
            workflow_run_id: Some(vote.metadata.workflow_run_id.clone()),
        }
    }
}

/// A completed merge.
#[derive(Debug, Clone)]
pub struct MergeEvent {
    pub pr_number: u64,
    pub pr_title: String,
    pub pr_author: String,
    pub pr_type: PrType,
    pub merger: String,
    pub merger_role: Role,
    pub merge_commit: Option<String>,
    pub weighted_vote_score: f64,
    pub repository: Option<String>,
    pub workflow_run_id: Option<String>,
}

/// A veto.
#[derive(Debug, Clone)]
pub struct VetoEvent {
    pub pr_number: u64,
    pub pr_title: String,
    pub vetoer: String,
    pub vetoer_role: Role,
    pub reason: String,
    pub veto_weight: f64,
    pub repository: Option<String>,
}

/// A forced merge override.
#[derive(Debug, Clone)]
pub struct OverrideEvent {
    pub pr_number: u64,
    pub overrider: String,
    pub overrider_role: Role,
    pub override_type: String,
    pub reason: String,
    pub original_decision: String,
    pub repository: Option<String>,
}

/// A governance policy change.
#[derive(Debug, Clone)]
pub struct PolicyChangeEvent {
    pub actor: String,
    pub actor_role: Role,
    pub policy_name: String,
    pub old_value: Value,
    pub new_value: Value,
    pub reason: String,
    pub repository: Option<String>,
}
