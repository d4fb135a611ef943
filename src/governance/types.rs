use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Maintainer role. A closed set so policy checks (e.g. founder approval)
/// are exhaustive matches rather than string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Founder,
    Lead,
    Maintainer,
    Reviewer,
    Contributor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Founder => "founder",
            Role::Lead => "lead",
            Role::Maintainer => "maintainer",
            Role::Reviewer => "reviewer",
            Role::Contributor => "contributor",
        };
        f.write_str(name)
    }
}

/// Per-maintainer capabilities beyond plain voting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default)]
    pub can_override: bool,
    #[serde(default)]
    pub can_veto: bool,
    #[serde(default)]
    pub can_merge: bool,
}

/// Roster entry. Vote weight is the maintainer's voting power; edits happen
/// through the governance configuration file, not through the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maintainer {
    pub github_username: String,
    pub role: Role,
    pub vote_weight: f64,
    pub active: bool,
    #[serde(default)]
    pub permissions: Permissions,
}

/// Static reference data for a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleConfig {
    pub weight: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotingRules {
    /// Global default approval percentage (0-100).
    pub merge_approval_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergePolicies {
    #[serde(default = "default_true")]
    pub require_ci_pass: bool,
}

impl Default for MergePolicies {
    fn default() -> Self {
        Self {
            require_ci_pass: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Per-PR-type policy overriding the global voting rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialRule {
    pub weighted_vote_threshold: f64,
    #[serde(default)]
    pub require_founder_approval: bool,
    #[serde(default)]
    pub require_additional_review: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialRules {
    pub bounty_prs: SpecialRule,
    pub security_prs: SpecialRule,
    pub governance_prs: SpecialRule,
}

/// How a maintainer voted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteKind {
    Approve,
    RequestChanges,
    Abstain,
    Veto,
}

impl fmt::Display for VoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VoteKind::Approve => "approve",
            VoteKind::RequestChanges => "request_changes",
            VoteKind::Abstain => "abstain",
            VoteKind::Veto => "veto",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteMetadata {
    #[serde(default = "unknown")]
    pub repository: String,
    #[serde(default = "unknown")]
    pub workflow_run_id: String,
}

impl Default for VoteMetadata {
    fn default() -> Self {
        Self {
            repository: unknown(),
            workflow_run_id: unknown(),
        }
    }
}

/// A cast vote. Immutable once appended to the history; role and weight are
/// snapshots taken from the roster at registration time, so later role
/// changes do not retroactively alter past votes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub pr_number: u64,
    pub voter: String,
    pub voter_role: Role,
    pub vote_weight: f64,
    pub vote: VoteKind,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub metadata: VoteMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideMetadata {
    #[serde(default = "unknown")]
    pub repository: String,
}

impl Default for OverrideMetadata {
    fn default() -> Self {
        Self {
            repository: unknown(),
        }
    }
}

/// A forced-merge override, recorded alongside votes in the history. The
/// caller is responsible for also recording it in the immutable audit ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub pr_number: u64,
    pub overrider: String,
    pub overrider_role: Role,
    pub reason: String,
    pub action: String,
    #[serde(default)]
    pub metadata: OverrideMetadata,
}

/// Voting history element: votes and overrides share one append-only list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryRecord {
    Vote(Vote),
    Override(OverrideRecord),
}

impl HistoryRecord {
    pub fn as_vote(&self) -> Option<&Vote> {
        match self {
            HistoryRecord::Vote(vote) => Some(vote),
            HistoryRecord::Override(_) => None,
        }
    }

    pub fn as_override(&self) -> Option<&OverrideRecord> {
        match self {
            HistoryRecord::Vote(_) => None,
            HistoryRecord::Override(record) => Some(record),
        }
    }
}

/// The persisted governance document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceConfig {
    pub maintainers: Vec<Maintainer>,
    #[serde(default)]
    pub maintainer_roles: HashMap<Role, RoleConfig>,
    pub voting_rules: VotingRules,
    #[serde(default)]
    pub merge_policies: MergePolicies,
    pub special_rules: SpecialRules,
    #[serde(default)]
    pub voting_history: Vec<HistoryRecord>,
    #[serde(default = "default_governance_model")]
    pub governance_model: String,
}

fn default_governance_model() -> String {
    "weighted_voting".to_string()
}

fn unknown() -> String {
    "unknown".to_string()
}

impl GovernanceConfig {
    /// Roster lookup by GitHub username.
    pub fn maintainer(&self, username: &str) -> Option<&Maintainer> {
        self.maintainers
            .iter()
            .find(|m| m.github_username == username)
    }

    pub fn role_config(&self, role: Role) -> Option<&RoleConfig> {
        self.maintainer_roles.get(&role)
    }
}
