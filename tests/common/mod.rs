use std::collections::HashMap;

use gitforge_governance::governance::{
    GovernanceConfig, Maintainer, MergePolicies, Permissions, Role, RoleConfig, SpecialRule,
    SpecialRules, VotingRules,
};
use gitforge_governance::voting::{PrDescriptor, VoteRequest};

/// Roster used across the suites: founder weight 100, lead 75, reviewer 25,
/// plus an inactive lead for permission tests. Normal threshold is 50%.
pub fn test_config() -> GovernanceConfig {
    let maintainers = vec![
        maintainer("asymcrypto", Role::Founder, 100.0, true, true),
        maintainer("alice-maintainer", Role::Lead, 75.0, true, false),
        maintainer("bob-reviewer", Role::Reviewer, 25.0, true, false),
        maintainer("carol-retired", Role::Lead, 75.0, false, true),
    ];

    let mut maintainer_roles = HashMap::new();
    maintainer_roles.insert(Role::Founder, role_config(100.0, "Project founder"));
    maintainer_roles.insert(Role::Lead, role_config(75.0, "Lead maintainer"));
    maintainer_roles.insert(Role::Reviewer, role_config(25.0, "Code reviewer"));

    GovernanceConfig {
        maintainers,
        maintainer_roles,
        voting_rules: VotingRules {
            merge_approval_threshold: 50.0,
        },
        merge_policies: MergePolicies::default(),
        special_rules: SpecialRules {
            bounty_prs: SpecialRule {
                weighted_vote_threshold: 60.0,
                require_founder_approval: false,
                require_additional_review: true,
            },
            security_prs: SpecialRule {
                weighted_vote_threshold: 75.0,
                require_founder_approval: true,
                require_additional_review: true,
            },
            governance_prs: SpecialRule {
                weighted_vote_threshold: 80.0,
                require_founder_approval: true,
                require_additional_review: false,
            },
        },
        voting_history: Vec::new(),
        governance_model: "weighted_voting".to_string(),
    }
}

fn maintainer(
    username: &str,
    role: Role,
    weight: f64,
    active: bool,
    can_override: bool,
) -> Maintainer {
    Maintainer {
        github_username: username.to_string(),
        role,
        vote_weight: weight,
        active,
        permissions: Permissions {
            can_override,
            can_veto: true,
            can_merge: true,
        },
    }
}

fn role_config(weight: f64, description: &str) -> RoleConfig {
    RoleConfig {
        weight,
        description: description.to_string(),
    }
}

pub fn vote(pr_number: u64, voter: &str, vote: gitforge_governance::governance::VoteKind) -> VoteRequest {
    VoteRequest {
        pr_number,
        voter: voter.to_string(),
        vote,
        comment: None,
        repository: None,
        workflow_run_id: None,
    }
}

pub fn pr(pr_number: u64, title: &str, labels: &[&str]) -> PrDescriptor {
    PrDescriptor {
        pr_number,
        title: title.to_string(),
        body: String::new(),
        labels: labels.iter().map(|s| s.to_string()).collect(),
        ci_pass: true,
    }
}
