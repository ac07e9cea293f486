// SPDX-License-Identifier: Apache-2.0

//! Severity scale and threshold parsing.
//!
//! The scale is a fixed, totally ordered set of levels. All threshold
//! comparisons ("any issue at or above high") reduce to `Ord` on [`Severity`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity level of a scan finding.
///
/// Variant order defines the total order used for threshold comparisons:
/// `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Low severity issue or informational finding.
    Low,
    /// Medium severity issue.
    Medium,
    /// High severity issue that should be addressed soon.
    High,
    /// Critical vulnerability requiring immediate attention.
    Critical,
}

/// All recognized severity levels, ascending.
///
/// The scale never changes at runtime, so it lives in a constant table rather
/// than any form of registry.
pub const SEVERITY_LEVELS: [Severity; 4] = [
    Severity::Low,
    Severity::Medium,
    Severity::High,
    Severity::Critical,
];

impl Severity {
    /// Parses a severity name (case-insensitive).
    ///
    /// Returns `None` for unrecognized names; callers that need fail-open
    /// semantics should go through [`Threshold::parse`].
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }

    /// Lowercase name of the level, matching the wire format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum severity that should trip the gate.
///
/// `Disabled` is an explicit variant, not an error: a threshold string that
/// does not name a known severity turns the check off entirely (fail-open).
/// This mirrors the product behavior for misconfigured inputs and must not be
/// tightened to fail-closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    /// Trip when any issue at or above this level is present.
    Level(Severity),
    /// Never trip.
    Disabled,
}

impl Threshold {
    /// Parses a configured threshold string.
    ///
    /// Any value that is not a recognized severity name (including the empty
    /// string) yields [`Threshold::Disabled`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match Severity::parse(value) {
            Some(level) => Threshold::Level(level),
            None => Threshold::Disabled,
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Level(level) => level.fmt(f),
            Threshold::Disabled => f.write_str("disabled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_total_order() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_severity_levels_ascending() {
        let mut sorted = SEVERITY_LEVELS;
        sorted.sort();
        assert_eq!(sorted, SEVERITY_LEVELS);
    }

    #[test]
    fn test_severity_parse_case_insensitive() {
        assert_eq!(Severity::parse("HIGH"), Some(Severity::High));
        assert_eq!(Severity::parse("Critical"), Some(Severity::Critical));
        assert_eq!(Severity::parse("low"), Some(Severity::Low));
    }

    #[test]
    fn test_severity_parse_unknown() {
        assert_eq!(Severity::parse("severe"), None);
        assert_eq!(Severity::parse(""), None);
    }

    #[test]
    fn test_severity_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            "\"critical\""
        );
        let parsed: Severity = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, Severity::Medium);
    }

    #[test]
    fn test_threshold_parse_known_level() {
        assert_eq!(Threshold::parse("high"), Threshold::Level(Severity::High));
        assert_eq!(Threshold::parse("LOW"), Threshold::Level(Severity::Low));
    }

    #[test]
    fn test_threshold_parse_unknown_is_disabled() {
        assert_eq!(Threshold::parse("any"), Threshold::Disabled);
        assert_eq!(Threshold::parse(""), Threshold::Disabled);
        assert_eq!(Threshold::parse("off"), Threshold::Disabled);
    }

    #[test]
    fn test_threshold_display() {
        assert_eq!(Threshold::Level(Severity::High).to_string(), "high");
        assert_eq!(Threshold::Disabled.to_string(), "disabled");
    }
}
