//! Structured diagnostic reports
//!
//! Machine-readable output for tooling: JSON reports mirroring the
//! human-readable diagnostics.
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::utils::Error;

/// A structured diagnostic report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Severity of the diagnostic
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// Location information, absent for end-of-input conditions
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Report {
    /// Build a report from a front-end error
    pub fn from_error(error: &Error) -> Self {
        Self {
            severity: Severity::Error,
            message: error.to_string(),
            location: error.span().map(|span| Location {
                line: span.line,
                column: span.column,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_carries_location() {
        let error = Error::Syntax {
            kind: "';'".into(),
            value: ";".into(),
            line: 3,
            column: 7,
        };
        let report = Report::from_error(&error);

        assert_eq!(report.message, "Syntax error at line 3, column 7: ';' ';'");
        let location = report.location.unwrap();
        assert_eq!((location.line, location.column), (3, 7));
    }

    #[test]
    fn test_eof_report_has_no_location() {
        let report = Report::from_error(&Error::UnexpectedEof);
        assert_eq!(report.message, "Unexpected end of input");
        assert!(report.location.is_none());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = Report::from_error(&Error::UnexpectedEof);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"Unexpected end of input\""));
    }
}
