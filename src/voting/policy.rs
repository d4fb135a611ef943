//! Merge Policy Resolution

use serde::{Deserialize, Serialize};

use crate::governance::{GovernanceConfig, SpecialRule};

use super::classify::PrType;

/// The resolved policy for a PR: the applicable approval threshold and any
/// extra approvals the PR type requires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergePolicy {
    pub weighted_vote_threshold: f64,
    pub require_founder_approval: bool,
    pub require_additional_review: bool,
}

impl From<&SpecialRule> for MergePolicy {
    fn from(rule: &SpecialRule) -> Self {
        Self {
            weighted_vote_threshold: rule.weighted_vote_threshold,
            require_founder_approval: rule.require_founder_approval,
            require_additional_review: rule.require_additional_review,
        }
    }
}

/// Resolve the merge policy for a PR type. Bounty, security, and governance
/// PRs carry their special rules; normal PRs fall back to the global
/// approval threshold with no extra requirements.
pub fn merge_policy(config: &GovernanceConfig, pr_type: PrType) -> MergePolicy {
    match pr_type {
        PrType::Bounty => MergePolicy::from(&config.special_rules.bounty_prs),
        PrType::Security => MergePolicy::from(&config.special_rules.security_prs),
        PrType::Governance => MergePolicy::from(&config.special_rules.governance_prs),
        PrType::Normal => MergePolicy {
            weighted_vote_threshold: config.voting_rules.merge_approval_threshold,
            require_founder_approval: false,
            require_additional_review: false,
        },
    }
}
