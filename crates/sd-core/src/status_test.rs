use super::*;
use chrono::NaiveDate;

fn m(name: &str) -> Migration {
    Migration::new(name, format!("CREATE TABLE {name} (id INT)"))
}

fn installed(rank: i64, migration: &Migration) -> SchemaHistory {
    let time = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap();
    SchemaHistory::new(migration.clone(), rank, time)
}

fn statuses(entries: &[StatusEntry]) -> Vec<MigrateStatus> {
    entries.iter().map(|e| e.status).collect()
}

#[test]
fn test_installed_and_ready() {
    let migrations = vec![m("a"), m("b"), m("c")];
    let history = vec![installed(1, &migrations[0]), installed(2, &migrations[1])];

    let entries = classify(&migrations, &history);
    assert_eq!(
        statuses(&entries),
        vec![
            MigrateStatus::Installed,
            MigrateStatus::Installed,
            MigrateStatus::ReadyToInstall
        ]
    );
    assert_eq!(entries[2].rank, 3);
    assert!(entries[2].history.is_none());
    assert_eq!(entries[2].migration.as_ref().unwrap().name(), "c");
}

#[test]
fn test_empty_inputs() {
    assert!(classify(&[], &[]).is_empty());
}

#[test]
fn test_nothing_installed() {
    let migrations = vec![m("a"), m("b")];
    let entries = classify(&migrations, &[]);
    assert_eq!(
        statuses(&entries),
        vec![MigrateStatus::ReadyToInstall, MigrateStatus::ReadyToInstall]
    );
}

#[test]
fn test_modified_entry() {
    let migrations = vec![m("a"), m("b")];
    let drifted = Migration::new("a", "CREATE TABLE a (id BIGINT)");
    let history = vec![installed(1, &drifted)];

    let entries = classify(&migrations, &history);
    assert_eq!(
        statuses(&entries),
        vec![
            MigrateStatus::MigrationModified,
            MigrateStatus::ReadyToInstall
        ]
    );
    assert_eq!(entries[0].history.as_ref().unwrap().content(), drifted.content());
}

#[test]
fn test_hole_in_history_is_broken() {
    let migrations = vec![m("a"), m("b"), m("c"), m("d")];
    let history = vec![installed(1, &migrations[0]), installed(3, &migrations[2])];

    let entries = classify(&migrations, &history);
    assert_eq!(
        statuses(&entries),
        vec![
            MigrateStatus::Installed,
            MigrateStatus::BrokenSchemaHistory,
            MigrateStatus::Installed,
            MigrateStatus::ReadyToInstall
        ]
    );
}

#[test]
fn test_more_installed_than_declared() {
    let migrations = vec![m("a"), m("b"), m("c")];
    let history = vec![
        installed(1, &migrations[0]),
        installed(2, &migrations[1]),
        installed(3, &migrations[2]),
    ];

    let entries = classify(&migrations[..1], &history);
    assert_eq!(entries.len(), 3);
    assert_eq!(
        statuses(&entries),
        vec![
            MigrateStatus::Installed,
            MigrateStatus::MigrationMissing,
            MigrateStatus::MigrationMissing
        ]
    );
    assert!(entries[1].migration.is_none());
    assert_eq!(entries[1].history.as_ref().unwrap().name(), "b");
}

#[test]
fn test_range_extends_to_highest_rank() {
    let migrations = vec![m("a")];
    let history = vec![installed(1, &migrations[0]), installed(4, &m("z"))];

    let entries = classify(&migrations, &history);
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[1].status, MigrateStatus::MigrationMissing);
    assert!(entries[1].history.is_none());
    assert_eq!(entries[3].status, MigrateStatus::MigrationMissing);
    assert_eq!(entries[3].history.as_ref().unwrap().rank(), 4);
}

#[test]
fn test_far_outlier_rank_gets_single_row() {
    let migrations = vec![m("a"), m("b")];
    let history = vec![
        installed(1, &migrations[0]),
        installed(1_000_000_000_000, &m("corrupt")),
    ];

    let entries = classify(&migrations, &history);
    assert_eq!(
        entries.iter().map(|e| e.rank).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 1_000_000_000_000]
    );
    assert_eq!(
        statuses(&entries),
        vec![
            MigrateStatus::Installed,
            MigrateStatus::BrokenSchemaHistory,
            MigrateStatus::MigrationMissing,
            MigrateStatus::MigrationMissing,
            MigrateStatus::MigrationMissing
        ]
    );
    assert_eq!(entries[4].history.as_ref().unwrap().name(), "corrupt");
}

#[test]
fn test_summary_counts() {
    let migrations = vec![m("a"), m("b"), m("c")];
    let history = vec![installed(1, &migrations[0])];
    let summary = StatusSummary::from_entries(&classify(&migrations, &history));

    assert_eq!(summary.installed, 1);
    assert_eq!(summary.ready_to_install, 2);
    assert!(summary.is_healthy());
}

#[test]
fn test_summary_unhealthy_on_broken() {
    let migrations = vec![m("a"), m("b")];
    let history = vec![installed(2, &migrations[1])];
    let summary = StatusSummary::from_entries(&classify(&migrations, &history));

    assert_eq!(summary.broken, 1);
    assert!(!summary.is_healthy());
}

#[test]
fn test_labels() {
    assert_eq!(MigrateStatus::ReadyToInstall.to_string(), "READY TO INSTALL");
    assert_eq!(MigrateStatus::BrokenSchemaHistory.label(), "SCHEMA BROKEN");
    assert!(MigrateStatus::MigrationMissing.is_fault());
    assert!(!MigrateStatus::Installed.is_fault());
}
