// SPDX-License-Identifier: Apache-2.0

//! Issue counters and the severity-threshold predicate.
//!
//! The scan API reports one counter per severity level. Counters missing from
//! a payload deserialize to zero, so partial payloads never fail the gate by
//! accident.

use serde::{Deserialize, Serialize};

use crate::severity::{SEVERITY_LEVELS, Severity, Threshold};

/// Issue counters bucketed by severity, as reported by the scan API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueCounts {
    /// Number of low severity issues found so far.
    pub number_of_low_severity_issues: u64,
    /// Number of medium severity issues found so far.
    pub number_of_medium_severity_issues: u64,
    /// Number of high severity issues found so far.
    pub number_of_high_severity_issues: u64,
    /// Number of critical severity issues found so far.
    pub number_of_critical_severity_issues: u64,
}

impl IssueCounts {
    /// Returns the counter for a single severity level.
    #[must_use]
    pub fn count_for(&self, severity: Severity) -> u64 {
        match severity {
            Severity::Low => self.number_of_low_severity_issues,
            Severity::Medium => self.number_of_medium_severity_issues,
            Severity::High => self.number_of_high_severity_issues,
            Severity::Critical => self.number_of_critical_severity_issues,
        }
    }

    /// Total number of issues across all severities.
    #[must_use]
    pub fn total(&self) -> u64 {
        SEVERITY_LEVELS
            .iter()
            .map(|severity| self.count_for(*severity))
            .sum()
    }
}

impl Threshold {
    /// Returns `true` iff any issue at or above the threshold is present.
    ///
    /// [`Threshold::Disabled`] never trips, regardless of the counts.
    #[must_use]
    pub fn is_satisfied(&self, counts: &IssueCounts) -> bool {
        match self {
            Threshold::Disabled => false,
            Threshold::Level(minimum) => SEVERITY_LEVELS
                .iter()
                .filter(|severity| **severity >= *minimum)
                .any(|severity| counts.count_for(*severity) > 0),
        }
    }
}

/// Breaks counters down per severity level for reporting.
///
/// The output order is severity-ascending and identical across calls, so
/// repeated runs over the same payload log identical lines.
#[must_use]
pub fn categorize(counts: &IssueCounts) -> Vec<(Severity, u64)> {
    SEVERITY_LEVELS
        .iter()
        .map(|severity| (*severity, counts.count_for(*severity)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(low: u64, medium: u64, high: u64, critical: u64) -> IssueCounts {
        IssueCounts {
            number_of_low_severity_issues: low,
            number_of_medium_severity_issues: medium,
            number_of_high_severity_issues: high,
            number_of_critical_severity_issues: critical,
        }
    }

    #[test]
    fn test_disabled_threshold_never_trips() {
        let threshold = Threshold::Disabled;
        assert!(!threshold.is_satisfied(&counts(0, 0, 0, 0)));
        assert!(!threshold.is_satisfied(&counts(u64::MAX, u64::MAX, u64::MAX, u64::MAX)));
    }

    #[test]
    fn test_threshold_trips_on_exact_level() {
        let threshold = Threshold::Level(Severity::High);
        assert!(threshold.is_satisfied(&counts(0, 0, 3, 0)));
    }

    #[test]
    fn test_threshold_trips_on_higher_level() {
        // high threshold, zero high issues, one critical: critical qualifies
        let threshold = Threshold::Level(Severity::High);
        assert!(threshold.is_satisfied(&counts(5, 2, 0, 1)));
    }

    #[test]
    fn test_threshold_ignores_lower_levels() {
        let threshold = Threshold::Level(Severity::Critical);
        assert!(!threshold.is_satisfied(&counts(100, 50, 10, 0)));
    }

    #[test]
    fn test_threshold_low_trips_on_any_issue() {
        let threshold = Threshold::Level(Severity::Low);
        assert!(threshold.is_satisfied(&counts(1, 0, 0, 0)));
        assert!(!threshold.is_satisfied(&counts(0, 0, 0, 0)));
    }

    #[test]
    fn test_categorize_order_stable() {
        let sample = counts(5, 0, 2, 1);
        let first = categorize(&sample);
        let second = categorize(&sample);
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                (Severity::Low, 5),
                (Severity::Medium, 0),
                (Severity::High, 2),
                (Severity::Critical, 1),
            ]
        );
    }

    #[test]
    fn test_total() {
        assert_eq!(counts(1, 2, 3, 4).total(), 10);
        assert_eq!(IssueCounts::default().total(), 0);
    }

    #[test]
    fn test_deserialize_missing_counters_default_to_zero() {
        let parsed: IssueCounts =
            serde_json::from_str(r#"{"numberOfHighSeverityIssues": 7}"#).unwrap();
        assert_eq!(parsed.number_of_high_severity_issues, 7);
        assert_eq!(parsed.number_of_low_severity_issues, 0);
        assert_eq!(parsed.number_of_critical_severity_issues, 0);
    }

    #[test]
    fn test_count_for_matches_fields() {
        let sample = counts(1, 2, 3, 4);
        assert_eq!(sample.count_for(Severity::Low), 1);
        assert_eq!(sample.count_for(Severity::Medium), 2);
        assert_eq!(sample.count_for(Severity::High), 3);
        assert_eq!(sample.count_for(Severity::Critical), 4);
    }
}
