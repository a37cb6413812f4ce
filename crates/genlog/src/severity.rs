//! Mapping verbosity levels onto severities.
//!
//! Level 0 is the neutral baseline (info). Positive levels are more verbose,
//! negative levels more severe; anything past either end is clamped.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity used by backends with a fixed set of levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error conditions
    Error,
    /// Warning conditions
    Warn,
    /// General information
    Info,
    /// Debugging information
    Debug,
    /// Most verbose, detailed debugging information
    Trace,
}

impl Severity {
    /// Maps a verbosity level: `<= -2` error, `-1` warn, `0` info, `1` debug,
    /// `>= 2` trace.
    #[must_use]
    pub const fn from_level(level: i32) -> Self {
        match level {
            i32::MIN..=-2 => Self::Error,
            -1 => Self::Warn,
            0 => Self::Info,
            1 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Returns the string representation of this severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, Severity::Info ; "baseline")]
    #[test_case(1, Severity::Debug ; "debug")]
    #[test_case(2, Severity::Trace ; "trace")]
    #[test_case(3, Severity::Trace ; "clamped trace")]
    #[test_case(-1, Severity::Warn ; "warn")]
    #[test_case(-2, Severity::Error ; "error")]
    #[test_case(-3, Severity::Error ; "clamped error")]
    #[test_case(i32::MIN, Severity::Error ; "minimum")]
    #[test_case(i32::MAX, Severity::Trace ; "maximum")]
    fn from_level(level: i32, expected: Severity) {
        assert_eq!(Severity::from_level(level), expected);
    }

    #[test]
    fn ordering_most_severe_first() {
        assert!(Severity::Error < Severity::Warn);
        assert!(Severity::Info < Severity::Debug);
        assert!(Severity::Debug < Severity::Trace);
    }

    #[test]
    fn display_and_serde_agree() {
        for severity in [
            Severity::Error,
            Severity::Warn,
            Severity::Info,
            Severity::Debug,
            Severity::Trace,
        ] {
            let json = serde_json::to_string(&severity).ok();
            assert_eq!(json, Some(format!("\"{severity}\"")));
        }
    }
}
