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

#[tokio::test]
async fn test_check_passes_on_fresh_database() {
    let dir = tempdir().unwrap();
    write_migration(dir.path(), "V1__users.sql", "CREATE TABLE users (id INTEGER);");

    execute(&test_global(dir.path())).await.unwrap();
}

#[tokio::test]
async fn test_check_fails_without_migrations_dir() {
    let dir = tempdir().unwrap();
    let err = execute(&test_global(dir.path())).await.unwrap_err();
    assert!(format!("{err:#}").contains("[E005]"));
}

#[tokio::test]
async fn test_check_reports_modified_migration() {
    let dir = tempdir().unwrap();
    let global = test_global(dir.path());
    write_migration(dir.path(), "V1__users.sql", "CREATE TABLE users (id INTEGER);");
    {
        let project = load_project(&global).unwrap();
        project.migrator().unwrap().install().await.unwrap();
    }

    write_migration(dir.path(), "V1__users.sql", "CREATE TABLE users (id BIGINT);");
    let err = execute(&global).await.unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("[E009]"), "{message}");
}

#[tokio::test]
async fn test_check_reports_duplicate_names() {
    let dir = tempdir().unwrap();
    write_migration(dir.path(), "V1__users.sql", "SELECT 1;");
    fs::create_dir_all(dir.path().join("migrations/nested")).unwrap();
    fs::write(
        dir.path().join("migrations/nested/V1__users.sql"),
        "SELECT 2;",
    )
    .unwrap();

    let err = execute(&test_global(dir.path())).await.unwrap_err();
    assert!(format!("{err:#}").contains("V1__users.sql"));
}
