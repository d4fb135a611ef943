//! Weighted Vote Engine
//!
//! Evaluates merge eligibility from the governance document behind an
//! injected store. Decisions are pure computations over the loaded state;
//! every mutation (vote, override) is persisted before returning.

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::GovernanceError;
use crate::governance::{
    GovernanceConfig, HistoryRecord, Maintainer, OverrideMetadata, OverrideRecord, Role, Vote,
    VoteKind, VoteMetadata,
};
use crate::storage::Store;

use super::classify::{classify_pr, PrType};
use super::policy::{merge_policy, MergePolicy};
use super::score::{compute_score, VoteScore};
use super::types::{GovernanceSummary, MergeChecks, MergeDecision};

/// PR descriptor consumed by the merge check.
#[derive(Debug, Clone, Default)]
pub struct PrDescriptor {
    pub pr_number: u64,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    pub ci_pass: bool,
}

/// A vote submission, before the roster lookup fills in role and weight.
#[derive(Debug, Clone)]
pub struct VoteRequest {
    pub pr_number: u64,
    pub voter: String,
    pub vote: VoteKind,
    pub comment: Option<String>,
    pub repository: Option<String>,
    pub workflow_run_id: Option<String>,
}

/// An override submission.
#[derive(Debug, Clone)]
pub struct OverrideRequest {
    pub pr_number: u64,
    pub overrider: String,
    pub reason: String,
    pub repository: Option<String>,
}

#[derive(Debug)]
pub struct WeightedVoteEngine<S: Store<GovernanceConfig>> {
    config: GovernanceConfig,
    store: S,
}

impl<S: Store<GovernanceConfig>> WeightedVoteEngine<S> {
    /// Load the governance document from the store. An absent document is
    /// fatal; a malformed one surfaces as `MalformedStorage` from the store.
    pub fn new(store: S) -> Result<Self, GovernanceError> {
        let config = store.load()?.ok_or_else(|| {
            GovernanceError::ConfigNotFound(
                "governance document has not been provisioned".to_string(),
            )
        })?;

        debug!(
            "Governance config loaded: {} maintainers, threshold {}%",
            config.maintainers.len(),
            config.voting_rules.merge_approval_threshold
        );
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Roster lookup by GitHub username.
    pub fn maintainer(&self, username: &str) -> Option<&Maintainer> {
        self.config.maintainer(username)
    }

    /// Register a vote. The voter must be on the maintainer roster; role and
    /// weight are snapshotted from the roster at registration time. The
    /// updated history is persisted before returning.
    pub fn register_vote(&mut self, request: VoteRequest) -> Result<Vote, GovernanceError> {
        let maintainer = self
            .config
            .maintainer(&request.voter)
            .ok_or_else(|| GovernanceError::UnknownVoter(request.voter.clone()))?;

        let vote = Vote {
            id: record_id("VOTE"),
            timestamp: Utc::now(),
            pr_number: request.pr_number,
            voter: request.voter,
            voter_role: maintainer.role,
            vote_weight: maintainer.vote_weight,
            vote: request.vote,
            comment: request.comment.unwrap_or_default(),
            metadata: VoteMetadata {
                repository: request.repository.unwrap_or_else(|| "unknown".to_string()),
                workflow_run_id: request
                    .workflow_run_id
                    .unwrap_or_else(|| "unknown".to_string()),
            },
        };

        info!(
            "Vote {} on PR #{} by {} ({}, weight {})",
            vote.vote, vote.pr_number, vote.voter, vote.voter_role, vote.vote_weight
        );

        self.config
            .voting_history
            .push(HistoryRecord::Vote(vote.clone()));
        self.store.save(&self.config)?;

        Ok(vote)
    }

    /// All votes cast for a PR, in registration order. Repeat votes by the
    /// same voter are all included.
    pub fn votes_for_pr(&self, pr_number: u64) -> Vec<Vote> {
        self.config
            .voting_history
            .iter()
            .filter_map(HistoryRecord::as_vote)
            .filter(|v| v.pr_number == pr_number)
            .cloned()
            .collect()
    }

    pub fn compute_vote_score(&self, pr_number: u64) -> VoteScore {
        compute_score(pr_number, self.votes_for_pr(pr_number))
    }

    pub fn policy_for(&self, pr_type: PrType) -> MergePolicy {
        merge_policy(&self.config, pr_type)
    }

    /// Evaluate merge eligibility as an ordered gate sequence: CI, veto,
    /// weighted threshold, founder approval. The first failing gate is the
    /// decision; a veto can never be outvoted.
    pub fn can_merge(&self, pr: &PrDescriptor) -> MergeDecision {
        let pr_type = classify_pr(&pr.labels, &pr.title, &pr.body);
        let policy = merge_policy(&self.config, pr_type);
        let threshold = policy.weighted_vote_threshold;

        debug!(
            "Checking merge eligibility for PR #{} ({})",
            pr.pr_number, pr_type
        );

        if self.config.merge_policies.require_ci_pass && !pr.ci_pass {
            info!("PR #{} blocked: CI/CD checks failed", pr.pr_number);
            return MergeDecision {
                can_merge: false,
                reason: "CI/CD checks failed".to_string(),
                pr_number: pr.pr_number,
                pr_type,
                vote_score: None,
                checks: MergeChecks {
                    ci_pass: false,
                    ..Default::default()
                },
            };
        }

        let score = self.compute_vote_score(pr.pr_number);

        if score.veto_count > 0 {
            info!(
                "PR #{} blocked by {} veto(s)",
                pr.pr_number, score.veto_count
            );
            return MergeDecision {
                can_merge: false,
                reason: format!("Merge blocked by {} veto(s)", score.veto_count),
                pr_number: pr.pr_number,
                pr_type,
                vote_score: None,
                checks: MergeChecks {
                    ci_pass: true,
                    weighted_vote: Some(false),
                    veto_count: Some(score.veto_count),
                    ..Default::default()
                },
            };
        }

        debug!(
            "PR #{}: weighted vote {}% (threshold {}%)",
            pr.pr_number, score.approve_percentage, threshold
        );

        if score.approve_percentage < threshold {
            info!(
                "PR #{} blocked: {}% below threshold {}%",
                pr.pr_number, score.approve_percentage, threshold
            );
            return MergeDecision {
                can_merge: false,
                reason: format!(
                    "Weighted vote score ({}%) below threshold ({}%)",
                    score.approve_percentage, threshold
                ),
                pr_number: pr.pr_number,
                pr_type,
                vote_score: Some(score),
                checks: MergeChecks {
                    ci_pass: true,
                    weighted_vote: Some(false),
                    ..Default::default()
                },
            };
        }

        if policy.require_founder_approval {
            let founder_approved = score
                .votes
                .iter()
                .any(|v| v.voter_role == Role::Founder && v.vote == VoteKind::Approve);

            if !founder_approved {
                info!("PR #{} blocked: founder approval required", pr.pr_number);
                return MergeDecision {
                    can_merge: false,
                    reason: "Founder approval required for this PR type".to_string(),
                    pr_number: pr.pr_number,
                    pr_type,
                    vote_score: None,
                    checks: MergeChecks {
                        ci_pass: true,
                        weighted_vote: Some(true),
                        founder_approval: Some(false),
                        ..Default::default()
                    },
                };
            }
        }

        info!("PR #{} eligible for merge", pr.pr_number);
        MergeDecision {
            can_merge: true,
            reason: "All merge requirements met".to_string(),
            pr_number: pr.pr_number,
            pr_type,
            vote_score: Some(score),
            checks: MergeChecks {
                ci_pass: true,
                weighted_vote: Some(true),
                founder_approval: Some(true),
                ..Default::default()
            },
        }
    }

    /// Force-merge override. The overrider must be an active maintainer
    /// whose permissions include override capability. The record joins the
    /// voting history; the caller also records it in the audit ledger.
    pub fn override_merge_decision(
        &mut self,
        request: OverrideRequest,
    ) -> Result<OverrideRecord, GovernanceError> {
        let role = match self.config.maintainer(&request.overrider) {
            Some(m) if m.active && m.permissions.can_override => m.role,
            _ => {
                warn!(
                    "Override on PR #{} denied for {}",
                    request.pr_number, request.overrider
                );
                return Err(GovernanceError::PermissionDenied(request.overrider));
            }
        };

        let record = OverrideRecord {
            id: record_id("OVERRIDE"),
            timestamp: Utc::now(),
            pr_number: request.pr_number,
            overrider: request.overrider,
            overrider_role: role,
            reason: request.reason,
            action: "FORCE_MERGE".to_string(),
            metadata: OverrideMetadata {
                repository: request.repository.unwrap_or_else(|| "unknown".to_string()),
            },
        };

        warn!(
            "Override decision recorded for PR #{}: {}",
            record.pr_number, record.id
        );

        self.config
            .voting_history
            .push(HistoryRecord::Override(record.clone()));
        self.store.save(&self.config)?;

        Ok(record)
    }

    /// Governance state snapshot.
    pub fn summary(&self) -> GovernanceSummary {
        let total_votes_cast = self
            .config
            .voting_history
            .iter()
            .filter(|r| matches!(r, HistoryRecord::Vote(_)))
            .count();
        let total_overrides = self
            .config
            .voting_history
            .iter()
            .filter(|r| matches!(r, HistoryRecord::Override(_)))
            .count();
        let active_maintainers = self
            .config
            .maintainers
            .iter()
            .filter(|m| m.active)
            .count();

        GovernanceSummary {
            total_maintainers: self.config.maintainers.len(),
            active_maintainers,
            total_votes_cast,
            total_overrides,
            governance_model: self.config.governance_model.clone(),
            merge_approval_threshold: self.config.voting_rules.merge_approval_threshold,
        }
    }
}

fn record_id(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), suffix)
}
