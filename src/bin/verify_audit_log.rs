use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::Path;

use gitforge_governance::audit::{AuditLog, GovernanceAuditLogger};
use gitforge_governance::storage::JsonFileStore;

/// Verify the integrity of a governance audit log and optionally export a
/// compliance report for a date range.
#[derive(Debug, Parser)]
#[command(
    name = "verify-audit-log",
    about = "Verify GitForge governance audit log integrity"
)]
struct Args {
    /// Path to the audit log document
    #[arg(short = 'l', long)]
    log_path: String,

    /// Start of a compliance report period (RFC 3339)
    #[arg(long, requires = "to")]
    from: Option<DateTime<Utc>>,

    /// End of a compliance report period (RFC 3339)
    #[arg(long, requires = "from")]
    to: Option<DateTime<Utc>>,

    /// Print every entry while verifying
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    if !Path::new(&args.log_path).exists() {
        return Err(anyhow!("Audit log file not found: {}", args.log_path));
    }

    let store: JsonFileStore<AuditLog> = JsonFileStore::new(&args.log_path);
    let logger = GovernanceAuditLogger::new(store)
        .with_context(|| format!("failed to load audit log from {}", args.log_path))?;

    if args.verbose {
        for entry in &logger.log().entries {
            println!(
                "{}  {}  {}",
                entry.timestamp.to_rfc3339(),
                entry.id,
                entry.action
            );
        }
    }

    let report = logger.verify_integrity();
    println!("{}", report.summary());
    for issue in &report.issues {
        println!("  - {}", issue);
    }

    if let (Some(from), Some(to)) = (args.from, args.to) {
        let compliance = logger.export_compliance_report(from, to);
        println!("{}", serde_json::to_string_pretty(&compliance)?);
    }

    if !report.integrity_ok {
        std::process::exit(1);
    }

    Ok(())
}
