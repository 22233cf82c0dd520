//! Migration discovery from a directory or an embedded file collection.
//!
//! A file is a migration when its name matches `[v]<version>__<description>.sql`
//! (case-insensitive `v`, ASCII digit segments separated by `.` or `_`). Other
//! files are ignored. Results are sorted by version.

use crate::error::{CoreError, CoreResult};
use crate::migration::{sort_migrations, Migration, SortableMigration};
use crate::version::Version;
use regex::Regex;
use rust_embed::RustEmbed;
use std::path::Path;
use std::sync::OnceLock;

static MIGRATION_FILENAME_RE: OnceLock<Regex> = OnceLock::new();

fn migration_filename_re() -> &'static Regex {
    MIGRATION_FILENAME_RE.get_or_init(|| {
        Regex::new(r"(?i)^v?([0-9]+(?:[._][0-9]+)*)__(.+)\.sql$").expect("valid regex literal")
    })
}

/// Extract the raw version string from a migration filename.
///
/// Returns `None` for files that are not migrations.
pub fn match_migration_filename(filename: &str) -> Option<&str> {
    migration_filename_re()
        .captures(filename)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Build a sortable migration if `filename` follows the naming convention.
fn sortable_from_file(filename: &str, content: String) -> CoreResult<Option<SortableMigration>> {
    let Some(raw_version) = match_migration_filename(filename) else {
        return Ok(None);
    };
    let version = Version::parse(raw_version)?;
    Ok(Some(SortableMigration::new(
        Migration::new(filename, content),
        version,
    )))
}

/// Discover migrations under `dir`, walking subdirectories.
///
/// `Migration::name` is the bare filename, so two files with the same name in
/// different subdirectories surface later as a duplicated-name fault.
pub fn migrations_from_dir(dir: &Path) -> CoreResult<Vec<Migration>> {
    if !dir.is_dir() {
        return Err(CoreError::MigrationSourceNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut batch = Vec::new();
    collect_dir(dir, &mut batch)?;
    log::debug!(
        "Discovered {} migrations in {}",
        batch.len(),
        dir.display()
    );
    Ok(sort_migrations(batch))
}

fn collect_dir(dir: &Path, batch: &mut Vec<SortableMigration>) -> CoreResult<()> {
    let io_err = |e| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    };

    let mut entries = std::fs::read_dir(dir)
        .map_err(io_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        // file_type does not follow symlinks, so linked directories are skipped
        if entry.file_type().map_err(io_err)?.is_dir() {
            collect_dir(&path, batch)?;
            continue;
        }

        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if match_migration_filename(filename).is_none() {
            continue;
        }

        let content = std::fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        if let Some(sortable) = sortable_from_file(filename, content)? {
            batch.push(sortable);
        }
    }
    Ok(())
}

/// Discover migrations that are direct children of `sub_path` in an embedded
/// collection.
///
/// An empty `sub_path` (or `.`) means the collection root.
pub fn migrations_from_embedded<E: RustEmbed>(sub_path: &str) -> CoreResult<Vec<Migration>> {
    let prefix = sub_path.trim_matches('/');
    let prefix = if prefix == "." { "" } else { prefix };

    let mut found_dir = prefix.is_empty();
    let mut files: Vec<String> = Vec::new();

    for entry in E::iter() {
        let path: &str = &entry;
        let (parent, filename) = path.rsplit_once('/').unwrap_or(("", path));
        if !prefix.is_empty() && path.starts_with(&format!("{prefix}/")) {
            found_dir = true;
        }
        if parent == prefix && match_migration_filename(filename).is_some() {
            files.push(path.to_string());
        }
    }

    if !found_dir {
        return Err(CoreError::MigrationSourceNotFound {
            path: prefix.to_string(),
        });
    }
    files.sort();

    let mut batch = Vec::with_capacity(files.len());
    for path in files {
        let Some(file) = E::get(&path) else {
            continue;
        };
        let content =
            String::from_utf8(file.data.into_owned()).map_err(|e| CoreError::IoWithPath {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            })?;
        let filename = path.rsplit('/').next().unwrap_or(path.as_str());
        if let Some(sortable) = sortable_from_file(filename, content)? {
            batch.push(sortable);
        }
    }

    log::debug!(
        "Discovered {} embedded migrations under '{}'",
        batch.len(),
        prefix
    );
    Ok(sort_migrations(batch))
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
