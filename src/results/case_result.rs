use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::ExceptionInfo;

/// Outcome category of a finished case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CaseStatus {
    Passed,
    Failed,
    Skipped,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Passed => "Passed",
            CaseStatus::Failed => "Failed",
            CaseStatus::Skipped => "Skipped",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable record of one case's outcome.
///
/// `exception_summary` is present exactly when the case failed and
/// `skip_reason` exactly when it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseResult {
    name: String,
    status: CaseStatus,
    duration: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    exception_summary: Option<ExceptionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_reason: Option<String>,
}

impl CaseResult {
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self::new(name.into(), CaseStatus::Passed, duration)
    }

    pub fn failed(
        name: impl Into<String>,
        duration: Duration,
        exception_summary: ExceptionInfo,
    ) -> Self {
        Self {
            exception_summary: Some(exception_summary),
            ..Self::new(name.into(), CaseStatus::Failed, duration)
        }
    }

    pub fn skipped(name: impl Into<String>, skip_reason: impl Into<String>) -> Self {
        Self {
            skip_reason: Some(skip_reason.into()),
            ..Self::new(name.into(), CaseStatus::Skipped, Duration::ZERO)
        }
    }

    fn new(name: String, status: CaseStatus, duration: Duration) -> Self {
        Self {
            name,
            status,
            duration,
            exception_summary: None,
            skip_reason: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> CaseStatus {
        self.status
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn exception_summary(&self) -> Option<&ExceptionInfo> {
        self.exception_summary.as_ref()
    }

    pub fn skip_reason(&self) -> Option<&str> {
        self.skip_reason.as_deref()
    }

    /// JSON rendering for report writers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
