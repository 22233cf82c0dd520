use super::*;

fn sortable(version: &str, name: &str) -> SortableMigration {
    SortableMigration::new(
        Migration::new(name, format!("-- {name}")),
        Version::parse(version).unwrap(),
    )
}

#[test]
fn test_accessors() {
    let m = Migration::new("V1__init.sql", "CREATE TABLE t (id INT)");
    assert_eq!(m.name(), "V1__init.sql");
    assert_eq!(m.content(), "CREATE TABLE t (id INT)");
}

#[test]
fn test_content_hash_is_deterministic() {
    let a = Migration::new("a", "SELECT 1");
    let b = Migration::new("b", "SELECT 1");
    let c = Migration::new("a", "SELECT 2");
    assert_eq!(a.content_hash(), b.content_hash());
    assert_ne!(a.content_hash(), c.content_hash());
    assert_eq!(a.content_hash().len(), 64);
}

#[test]
fn test_content_hash_known_value() {
    let m = Migration::new("empty", "");
    assert_eq!(
        m.content_hash(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_matches_compares_name_and_content() {
    let a = Migration::new("a", "SELECT 1");
    assert!(a.matches(&Migration::new("a", "SELECT 1")));
    assert!(!a.matches(&Migration::new("a", "SELECT 2")));
    assert!(!a.matches(&Migration::new("b", "SELECT 1")));
}

#[test]
fn test_sort_by_version() {
    let batch = vec![
        sortable("2", "V2__c.sql"),
        sortable("1.10", "V1.10__e.sql"),
        sortable("1", "V1__a.sql"),
        sortable("1_2", "V1_2__d.sql"),
        sortable("1.1", "V1.1__b.sql"),
    ];

    let names: Vec<String> = sort_migrations(batch)
        .iter()
        .map(|m| m.name().to_string())
        .collect();

    assert_eq!(
        names,
        vec![
            "V1__a.sql",
            "V1.1__b.sql",
            "V1_2__d.sql",
            "V1.10__e.sql",
            "V2__c.sql"
        ]
    );
}

#[test]
fn test_sorted_sequence_never_decreases() {
    let versions = ["3", "1.1", "10", "2.0.1", "1", "2", "1.1.1", "2.0", "0_9"];
    let batch: Vec<SortableMigration> = versions
        .iter()
        .map(|v| sortable(v, &format!("V{v}__x.sql")))
        .collect();

    let sorted = sort_migrations(batch);
    let parsed: Vec<Version> = sorted
        .iter()
        .map(|m| {
            let raw = m.name().trim_start_matches('V').split("__").next().unwrap();
            Version::parse(raw).unwrap()
        })
        .collect();

    for pair in parsed.windows(2) {
        assert!(pair[0] <= pair[1], "{} then {}", pair[0], pair[1]);
    }
}

#[test]
fn test_sort_is_stable_for_equal_versions() {
    let batch = vec![sortable("1", "V1__b.sql"), sortable("1", "v1__a.sql")];
    let sorted = sort_migrations(batch);
    assert_eq!(sorted[0].name(), "V1__b.sql");
    assert_eq!(sorted[1].name(), "v1__a.sql");
}
