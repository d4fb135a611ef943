//! Audit Log Integrity Verification

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::log::AuditLog;

/// Outcome of an integrity pass over the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub integrity_ok: bool,
    pub total_entries: usize,
    pub issues: Vec<String>,
}

impl IntegrityReport {
    /// Human-readable summary line.
    pub fn summary(&self) -> String {
        if self.integrity_ok {
            format!(
                "Audit log integrity verified ({} entries)",
                self.total_entries
            )
        } else {
            format!(
                "Audit log integrity issues detected ({} entries, {} issue(s))",
                self.total_entries,
                self.issues.len()
            )
        }
    }
}

/// Recompute every entry hash and compare against the stored value.
///
/// The bootstrap entry carries a null hash and is exempt; all later entries
/// must verify. This detects edited entries only — deletion or reordering is
/// outside this check because entries are not chained to each other.
pub fn verify_log(log: &AuditLog) -> IntegrityReport {
    let mut issues = Vec::new();

    for entry in log.entries.iter().skip(1) {
        if !entry.verify_hash() {
            warn!("Tampered audit entry: {}", entry.id);
            issues.push(format!("Entry {} has been tampered with", entry.id));
        }
    }

    let report = IntegrityReport {
        integrity_ok: issues.is_empty(),
        total_entries: log.entries.len(),
        issues,
    };

    debug!("{}", report.summary());
    report
}
