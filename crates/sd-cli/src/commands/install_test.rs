use super::*;
use crate::commands::common::test_global;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_migration(project: &Path, name: &str, sql: &str) {
    let dir = project.join("migrations");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), sql).unwrap();
}

async fn installed_names(global: &GlobalArgs) -> Vec<String> {
    let project = load_project(global).unwrap();
    project
        .history_migrator()
        .history()
        .await
        .unwrap()
        .iter()
        .map(|h| h.name().to_string())
        .collect()
}

#[tokio::test]
async fn test_install_applies_in_version_order() {
    let dir = tempdir().unwrap();
    write_migration(dir.path(), "V10__late.sql", "CREATE TABLE late (id INTEGER);");
    write_migration(dir.path(), "V2__early.sql", "CREATE TABLE early (id INTEGER);");
    write_migration(dir.path(), "V2_1__middle.sql", "CREATE TABLE middle (id INTEGER);");
    let global = test_global(dir.path());

    execute(&InstallArgs { dry_run: false }, &global)
        .await
        .unwrap();

    assert_eq!(
        installed_names(&global).await,
        vec!["V2__early.sql", "V2_1__middle.sql", "V10__late.sql"]
    );
}

#[tokio::test]
async fn test_install_dry_run_changes_nothing() {
    let dir = tempdir().unwrap();
    write_migration(dir.path(), "V1__a.sql", "CREATE TABLE a (id INTEGER);");
    let global = test_global(dir.path());

    execute(&InstallArgs { dry_run: true }, &global)
        .await
        .unwrap();

    assert!(installed_names(&global).await.is_empty());
}

#[tokio::test]
async fn test_install_rerun_is_noop() {
    let dir = tempdir().unwrap();
    write_migration(dir.path(), "V1__a.sql", "CREATE TABLE a (id INTEGER);");
    let global = test_global(dir.path());

    execute(&InstallArgs { dry_run: false }, &global)
        .await
        .unwrap();
    execute(&InstallArgs { dry_run: false }, &global)
        .await
        .unwrap();

    assert_eq!(installed_names(&global).await, vec!["V1__a.sql"]);
}

#[tokio::test]
async fn test_install_rejects_malformed_version() {
    let dir = tempdir().unwrap();
    write_migration(dir.path(), "V1__a.sql", "CREATE TABLE a (id INTEGER);");
    write_migration(
        dir.path(),
        "V99999999999999999999999__b.sql",
        "CREATE TABLE b (id INTEGER);",
    );

    let err = execute(&InstallArgs { dry_run: false }, &test_global(dir.path()))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("[E004]"));
}
