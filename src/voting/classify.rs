//! PR Classification
//!
//! Maps a pull request's labels, title, and body onto the governance PR type
//! that selects its merge policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// PR classification driving which threshold/approval policy applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrType {
    Bounty,
    Security,
    Governance,
    Normal,
}

impl fmt::Display for PrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrType::Bounty => "bounty",
            PrType::Security => "security",
            PrType::Governance => "governance",
            PrType::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// Classify a PR from its labels, title, and body.
///
/// Rules are checked in fixed priority order and the first match wins: a PR
/// labeled both "bounty" and "security" is a bounty PR. Label matching is a
/// case-insensitive substring check; security and governance additionally
/// match on the concatenated lowercased title and body.
pub fn classify_pr(labels: &[String], title: &str, body: &str) -> PrType {
    let all_text = format!("{} {}", title, body).to_lowercase();
    let label_contains =
        |needle: &str| labels.iter().any(|l| l.to_lowercase().contains(needle));

    let pr_type = if label_contains("bounty") {
        PrType::Bounty
    } else if label_contains("security") || all_text.contains("security") {
        PrType::Security
    } else if label_contains("governance") || all_text.contains("governance") {
        PrType::Governance
    } else {
        PrType::Normal
    };

    debug!("Classified PR as {}", pr_type);
    pr_type
}
