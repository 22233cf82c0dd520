//! Validated name of the schema history table.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Default schema history table name.
pub const DEFAULT_SCHEMA_HISTORY_TABLE: &str = "sediment_schema_history";

/// Schema history table name, optionally schema-qualified (`schema.table`).
///
/// Each part must match `[A-Za-z_][A-Za-z0-9_]*`, which keeps the name safe to
/// splice into DDL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HistoryTableName(String);

impl HistoryTableName {
    pub fn try_new(name: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        let invalid = |reason: &str| CoreError::InvalidTableName {
            name: name.clone(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        let parts: Vec<&str> = name.split('.').collect();
        if parts.len() > 2 {
            return Err(invalid("expected 'table' or 'schema.table'"));
        }
        if !parts.iter().all(|part| is_identifier(part)) {
            return Err(invalid(
                "each part must start with a letter or underscore and contain only letters, digits and underscores",
            ));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Schema part, if qualified.
    pub fn schema(&self) -> Option<&str> {
        self.0.split_once('.').map(|(schema, _)| schema)
    }

    /// Double-quoted form for use in SQL, e.g. `"ops"."history"`.
    pub fn quoted(&self) -> String {
        self.0
            .split('.')
            .map(|part| format!("\"{part}\""))
            .collect::<Vec<_>>()
            .join(".")
    }
}

fn is_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Default for HistoryTableName {
    fn default() -> Self {
        Self(DEFAULT_SCHEMA_HISTORY_TABLE.to_string())
    }
}

impl fmt::Display for HistoryTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HistoryTableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for HistoryTableName {
    type Error = CoreError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

impl<'de> Deserialize<'de> for HistoryTableName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        HistoryTableName::try_new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_name() {
        assert_eq!(
            HistoryTableName::default().as_str(),
            DEFAULT_SCHEMA_HISTORY_TABLE
        );
    }

    #[test]
    fn test_plain_and_qualified() {
        let plain = HistoryTableName::try_new("history").unwrap();
        assert_eq!(plain.quoted(), "\"history\"");
        assert_eq!(plain.schema(), None);

        let qualified = HistoryTableName::try_new("ops._history2").unwrap();
        assert_eq!(qualified.quoted(), "\"ops\".\"_history2\"");
        assert_eq!(qualified.schema(), Some("ops"));
    }

    #[test]
    fn test_rejects_invalid_names() {
        for bad in [
            "",
            "a.b.c",
            "1table",
            "table-name",
            "t; DROP TABLE x",
            "\"quoted\"",
            ".table",
        ] {
            assert!(
                matches!(
                    HistoryTableName::try_new(bad),
                    Err(CoreError::InvalidTableName { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_display() {
        let name = HistoryTableName::try_new("ops.history").unwrap();
        assert_eq!(name.to_string(), "ops.history");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: HistoryTableName = serde_json::from_str(r#""history""#).unwrap();
        assert_eq!(ok.as_str(), "history");
        assert!(serde_json::from_str::<HistoryTableName>(r#""bad name""#).is_err());
    }
}
