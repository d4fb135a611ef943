use chrono::{Duration, Utc};
use tempfile::tempdir;

use gitforge_governance::audit::{
    verify_log, AuditLog, EventType, GovernanceAuditLogger, MergeEvent, OverrideEvent,
    PolicyChangeEvent, VetoEvent, VoteEvent,
};
use gitforge_governance::governance::{Role, VoteKind};
use gitforge_governance::storage::{JsonFileStore, MemoryStore, Store};
use gitforge_governance::voting::PrType;
use gitforge_governance::GovernanceError;
use serde_json::json;

fn vote_event(pr_number: u64, voter: &str, role: Role) -> VoteEvent {
    VoteEvent {
        pr_number,
        voter: voter.to_string(),
        voter_role: role,
        vote: VoteKind::Approve,
        vote_weight: 75.0,
        comment: "Looks good".to_string(),
        pr_type: PrType::Normal,
        repository: Some("gitforge/gitforge".to_string()),
        workflow_run_id: Some("12345".to_string()),
    }
}

fn merge_event(pr_number: u64) -> MergeEvent {
    MergeEvent {
        pr_number,
        pr_title: "Add payout ledger".to_string(),
        pr_author: "dev-drift".to_string(),
        pr_type: PrType::Normal,
        merger: "asymcrypto".to_string(),
        merger_role: Role::Founder,
        merge_commit: Some("abc123def456".to_string()),
        weighted_vote_score: 87.5,
        repository: Some("gitforge/gitforge".to_string()),
        workflow_run_id: None,
    }
}

#[test]
fn test_all_event_types_append_and_verify() {
    let mut logger = GovernanceAuditLogger::new(MemoryStore::empty()).unwrap();

    logger
        .log_vote(vote_event(1, "alice-maintainer", Role::Lead))
        .unwrap();
    logger.log_merge(merge_event(1)).unwrap();
    logger
        .log_veto(VetoEvent {
            pr_number: 2,
            pr_title: "Controversial change".to_string(),
            vetoer: "asymcrypto".to_string(),
            vetoer_role: Role::Founder,
            reason: "Breaks the architecture".to_string(),
            veto_weight: 100.0,
            repository: None,
        })
        .unwrap();
    logger
        .log_override(OverrideEvent {
            pr_number: 2,
            overrider: "asymcrypto".to_string(),
            overrider_role: Role::Founder,
            override_type: "FORCE_MERGE".to_string(),
            reason: "Release blocker".to_string(),
            original_decision: "blocked".to_string(),
            repository: None,
        })
        .unwrap();
    logger
        .log_policy_change(PolicyChangeEvent {
            actor: "asymcrypto".to_string(),
            actor_role: Role::Founder,
            policy_name: "merge_approval_threshold".to_string(),
            old_value: json!(50.0),
            new_value: json!(60.0),
            reason: "Tighten review".to_string(),
            repository: None,
        })
        .unwrap();

    let summary = logger.summary();
    assert_eq!(summary.total_entries, 6);
    assert_eq!(summary.total_votes, 1);
    assert_eq!(summary.total_merges, 1);
    assert_eq!(summary.total_vetoes, 1);
    assert_eq!(summary.total_overrides, 1);
    assert_eq!(summary.total_policy_changes, 1);

    let report = logger.verify_integrity();
    assert!(report.integrity_ok);
    assert!(report.issues.is_empty());
}

#[test]
fn test_tampering_names_exactly_the_edited_entry() {
    let mut logger = GovernanceAuditLogger::new(MemoryStore::empty()).unwrap();
    logger
        .log_vote(vote_event(1, "alice-maintainer", Role::Lead))
        .unwrap();
    let target = logger
        .log_vote(vote_event(2, "bob-reviewer", Role::Reviewer))
        .unwrap();
    logger
        .log_vote(vote_event(3, "asymcrypto", Role::Founder))
        .unwrap();

    let mut log = logger.log().clone();
    log.entries[2].details["vote_weight"] = json!(9000.0);

    let report = verify_log(&log);
    assert!(!report.integrity_ok);
    assert_eq!(
        report.issues,
        vec![format!("Entry {} has been tampered with", target.id)]
    );
}

#[test]
fn test_entries_survive_reload_with_hashes_intact() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("GOVERNANCE_AUDIT.json");

    {
        let mut logger =
            GovernanceAuditLogger::new(JsonFileStore::<AuditLog>::new(&path)).unwrap();
        logger
            .log_vote(vote_event(7, "alice-maintainer", Role::Lead))
            .unwrap();
        logger.log_merge(merge_event(7)).unwrap();
    }

    let logger = GovernanceAuditLogger::new(JsonFileStore::<AuditLog>::new(&path)).unwrap();
    assert_eq!(logger.summary().total_entries, 3);

    let report = logger.verify_integrity();
    assert!(report.integrity_ok, "issues: {:?}", report.issues);
}

#[test]
fn test_malformed_log_file_is_fatal_not_reinitialized() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("GOVERNANCE_AUDIT.json");
    std::fs::write(&path, "{\"entries\": [truncated").unwrap();

    let err = GovernanceAuditLogger::new(JsonFileStore::<AuditLog>::new(&path)).unwrap_err();
    assert!(matches!(err, GovernanceError::MalformedStorage(_)));

    // The broken file must be left untouched for inspection.
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "{\"entries\": [truncated");
}

#[test]
fn test_absent_log_bootstraps_and_persists() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("GOVERNANCE_AUDIT.json");

    let logger = GovernanceAuditLogger::new(JsonFileStore::<AuditLog>::new(&path)).unwrap();
    assert_eq!(logger.summary().total_entries, 1);
    assert!(path.exists());

    let store: JsonFileStore<AuditLog> = JsonFileStore::new(&path);
    let log = store.load().unwrap().unwrap();
    assert_eq!(log.entries[0].id, "GOVERNANCE_AUDIT_INIT_001");
    assert!(log.entries[0].hash.is_none());
}

#[test]
fn test_queries_by_pr_actor_and_type() {
    let mut logger = GovernanceAuditLogger::new(MemoryStore::empty()).unwrap();
    logger
        .log_vote(vote_event(10, "alice-maintainer", Role::Lead))
        .unwrap();
    logger
        .log_vote(vote_event(11, "alice-maintainer", Role::Lead))
        .unwrap();
    logger.log_merge(merge_event(10)).unwrap();

    assert_eq!(logger.entries_for_pr(10).len(), 2);
    assert_eq!(logger.entries_for_pr(11).len(), 1);
    assert_eq!(logger.entries_by_actor("alice-maintainer").len(), 2);
    assert_eq!(logger.entries_by_event_type(EventType::PrMerged).len(), 1);
    assert_eq!(
        logger
            .entries_by_event_type(EventType::SystemInitialized)
            .len(),
        1
    );
}

#[test]
fn test_compliance_report_partitions_by_event_type() {
    let mut logger = GovernanceAuditLogger::new(MemoryStore::empty()).unwrap();
    logger
        .log_vote(vote_event(1, "alice-maintainer", Role::Lead))
        .unwrap();
    logger
        .log_vote(vote_event(2, "bob-reviewer", Role::Reviewer))
        .unwrap();
    logger.log_merge(merge_event(1)).unwrap();

    let now = Utc::now();
    let report =
        logger.export_compliance_report(now - Duration::hours(1), now + Duration::hours(1));

    assert_eq!(report.summary.total_entries, 4);
    assert_eq!(report.summary.votes, 2);
    assert_eq!(report.summary.merges, 1);
    assert_eq!(report.summary.vetoes, 0);
    assert_eq!(report.entries.len(), 4);

    // Out-of-range query returns an empty projection.
    let empty = logger.export_compliance_report(
        now - Duration::days(30),
        now - Duration::days(29),
    );
    assert_eq!(empty.summary.total_entries, 0);
    assert!(empty.entries.is_empty());
}

#[test]
fn test_appends_never_mutate_prior_entries() {
    let mut logger = GovernanceAuditLogger::new(MemoryStore::empty()).unwrap();
    let first = logger
        .log_vote(vote_event(1, "alice-maintainer", Role::Lead))
        .unwrap();

    logger.log_merge(merge_event(1)).unwrap();
    logger
        .log_vote(vote_event(2, "bob-reviewer", Role::Reviewer))
        .unwrap();

    let stored = &logger.log().entries[1];
    assert_eq!(stored.id, first.id);
    assert_eq!(stored.hash, first.hash);
    assert!(stored.verify_hash());
}
