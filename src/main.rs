use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitforge_governance::config::AppConfig;
use gitforge_governance::storage::JsonFileStore;
use gitforge_governance::voting::{PrDescriptor, WeightedVoteEngine};

/// Weighted voting merge check, called from the CI workflow. The check
/// reports eligibility into a result file and always exits 0; only fatal
/// errors (missing or malformed governance state) fail the process.
#[derive(Debug, Parser)]
#[command(
    name = "check-weighted-voting",
    about = "Check whether a PR meets the weighted voting requirements for merge"
)]
struct Args {
    /// Pull request number
    #[arg(long)]
    pr_number: u64,

    /// Pull request title
    #[arg(long, default_value = "")]
    pr_title: String,

    /// Pull request body
    #[arg(long, default_value = "")]
    pr_body: String,

    /// Pull request labels as a JSON array
    #[arg(long, default_value = "[]")]
    pr_labels: String,

    /// Whether CI/CD checks passed
    #[arg(long, action = clap::ArgAction::Set, default_value_t = false)]
    ci_pass: bool,

    /// Where to write the decision JSON
    #[arg(long)]
    result_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gitforge_governance=info,check_weighted_voting=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = AppConfig::load();

    let labels: Vec<String> = serde_json::from_str(&args.pr_labels).unwrap_or_else(|_| {
        warn!("Could not parse PR labels, treating as empty");
        Vec::new()
    });

    info!("Weighted voting check for PR #{}", args.pr_number);

    let store = JsonFileStore::new(&config.governance_config_path);
    let engine = WeightedVoteEngine::new(store).with_context(|| {
        format!(
            "failed to load governance config from {}",
            config.governance_config_path
        )
    })?;

    let pr = PrDescriptor {
        pr_number: args.pr_number,
        title: args.pr_title,
        body: args.pr_body,
        labels,
        ci_pass: args.ci_pass,
    };

    let decision = engine.can_merge(&pr);
    let threshold = engine.policy_for(decision.pr_type).weighted_vote_threshold;

    info!(
        "PR #{}: can_merge={} ({})",
        decision.pr_number, decision.can_merge, decision.reason
    );
    if let Some(score) = &decision.vote_score {
        info!(
            "PR #{}: {} vote(s), approve {}%, reject {}%",
            decision.pr_number,
            score.total_votes,
            score.approve_percentage,
            score.reject_percentage
        );
    }

    let result_path = args
        .result_file
        .unwrap_or_else(|| PathBuf::from("voting-result.json"));
    let output = serde_json::json!({
        "can_merge": decision.can_merge,
        "reason": decision.reason,
        "pr_number": decision.pr_number,
        "pr_type": decision.pr_type,
        "vote_score": decision.vote_score,
        "checks": decision.checks,
        "threshold": threshold,
    });

    std::fs::write(&result_path, serde_json::to_string_pretty(&output)?)
        .with_context(|| format!("failed to write {}", result_path.display()))?;

    info!("Decision written to {}", result_path.display());

    // This is a check, not a blocker: the workflow reads the result file,
    // so an ineligible PR still exits 0.
    Ok(())
}
