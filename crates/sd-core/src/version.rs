//! Numeric migration versions such as `1`, `1.2` or `2_0_1`.

use crate::error::{CoreError, CoreResult};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Ordered sequence of non-negative integer segments.
///
/// Ordering is lexicographic over the shared prefix, and a strict prefix sorts
/// first, so `1 < 1.1 < 1.2 < 2`. `1` and `1.0` are distinct versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version(Vec<u64>);

impl Version {
    /// Parse a version string, splitting on `.` and `_`.
    pub fn parse(version: &str) -> CoreResult<Self> {
        if version.is_empty() {
            return Err(invalid(version, "version string is empty"));
        }

        let segments = version
            .split(['.', '_'])
            .map(|segment| parse_segment(version, segment))
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Self(segments))
    }

    /// Return the parsed segments.
    pub fn segments(&self) -> &[u64] {
        &self.0
    }
}

fn parse_segment(version: &str, segment: &str) -> CoreResult<u64> {
    // u64::from_str tolerates a leading '+'
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(
            version,
            &format!("segment '{segment}' is not a non-negative integer"),
        ));
    }
    segment
        .parse::<u64>()
        .map_err(|e| invalid(version, &format!("segment '{segment}': {e}")))
}

fn invalid(version: &str, reason: &str) -> CoreError {
    CoreError::InvalidVersion {
        version: version.to_string(),
        reason: reason.to_string(),
    }
}

impl FromStr for Version {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
