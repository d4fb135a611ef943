//! Weighted Voting Engine
//!
//! Classifies pull requests, registers maintainer votes, computes weighted
//! approval scores, and renders merge decisions with veto, threshold, and
//! founder-approval gates.

pub mod classify;
pub mod engine;
pub mod policy;
pub mod score;
pub mod types;

pub use classify::{classify_pr, PrType};
pub use engine::{OverrideRequest, PrDescriptor, VoteRequest, WeightedVoteEngine};
pub use policy::{merge_policy, MergePolicy};
pub use score::{compute_score, VoteScore};
pub use types::{GovernanceSummary, MergeChecks, MergeDecision};
