//! Weighted Vote Scoring

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::governance::{Vote, VoteKind};

/// Aggregated weighted tally for one PR. Derived data: recomputed from the
/// voting history on every evaluation, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteScore {
    pub pr_number: u64,
    pub total_votes: usize,
    pub total_weight: f64,
    pub approve_weight: f64,
    pub reject_weight: f64,
    pub veto_count: usize,
    pub approve_percentage: f64,
    pub reject_percentage: f64,
    pub votes: Vec<Vote>,
}

/// Compute the weighted score over all votes cast for a PR.
///
/// A veto counts its weight double against the tally, on top of
/// independently blocking the merge; abstentions contribute to the total
/// weight only. Repeat votes by the same voter all count.
pub fn compute_score(pr_number: u64, votes: Vec<Vote>) -> VoteScore {
    let mut approve_weight = 0.0;
    let mut reject_weight = 0.0;
    let mut veto_count = 0;
    let mut total_weight = 0.0;

    for vote in &votes {
        let weight = vote.vote_weight;
        total_weight += weight;

        match vote.vote {
            VoteKind::Approve => approve_weight += weight,
            VoteKind::RequestChanges => reject_weight += weight,
            VoteKind::Veto => {
                veto_count += 1;
                reject_weight += weight * 2.0;
            }
            VoteKind::Abstain => {}
        }
    }

    let approve_percentage = percentage(approve_weight, total_weight);
    let reject_percentage = percentage(reject_weight, total_weight);

    debug!(
        "PR #{}: {} vote(s), approve {}%, reject {}%, {} veto(s)",
        pr_number,
        votes.len(),
        approve_percentage,
        reject_percentage,
        veto_count
    );

    VoteScore {
        pr_number,
        total_votes: votes.len(),
        total_weight,
        approve_weight,
        reject_weight,
        veto_count,
        approve_percentage,
        reject_percentage,
        votes,
    }
}

fn percentage(weight: f64, total: f64) -> f64 {
    if total > 0.0 {
        round2(weight / total * 100.0)
    } else {
        0.0
    }
}

/// Round to 2 decimal places, matching the reported percentages.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
