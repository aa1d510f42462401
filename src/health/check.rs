//! Core health check trait and types

use std::time::Duration;

use colored::Colorize;

/// Status of a system check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckStatus {
    Pass,
    /// Usable, but something looked off
    Warn,
    Fail,
}

impl CheckStatus {
    /// Returns true if the check passed (Pass or Warn)
    pub fn is_ok(&self) -> bool {
        !self.is_fail()
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, CheckStatus::Fail)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Warn => "WARN",
            CheckStatus::Fail => "FAIL",
        }
    }

    /// Returns the status as a colored string
    pub fn as_colored_str(&self) -> String {
        match self {
            CheckStatus::Pass => self.label().green().to_string(),
            CheckStatus::Warn => self.label().yellow().to_string(),
            CheckStatus::Fail => self.label().red().to_string(),
        }
    }
}

/// Result of a system check
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub status: CheckStatus,
    /// One-line summary shown in the report table
    pub message: String,
    /// Step-by-step findings printed below the table
    pub details: Vec<String>,
    pub duration: Duration,
}

impl CheckResult {
    fn with_status(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Pass, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Warn, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Fail, message)
    }

    /// Attaches the findings collected while checking
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Collects findings while a check runs and folds them into a result
///
/// The worst recorded status wins.
#[derive(Debug, Default)]
pub struct CheckLog {
    lines: Vec<String>,
    worst: Option<CheckStatus>,
}

impl CheckLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, status: CheckStatus, mark: &str, line: String) {
        self.lines.push(format!("  {} {}", mark, line));
        self.worst = self.worst.max(Some(status));
    }

    pub fn ok(&mut self, line: impl Into<String>) {
        self.record(CheckStatus::Pass, "✓", line.into());
    }

    pub fn warn(&mut self, line: impl Into<String>) {
        self.record(CheckStatus::Warn, "⚠", line.into());
    }

    pub fn fail(&mut self, line: impl Into<String>) {
        self.record(CheckStatus::Fail, "✗", line.into());
    }

    /// Records `line` as passing when `condition` holds, failing otherwise
    pub fn verify(&mut self, condition: bool, line: impl Into<String>) -> bool {
        if condition {
            self.ok(line);
        } else {
            self.fail(line);
        }
        condition
    }

    pub fn has_failures(&self) -> bool {
        self.worst == Some(CheckStatus::Fail)
    }

    /// Builds the result, picking the message that matches the worst status
    pub fn finish(self, pass: impl Into<String>, warn: &str, fail: &str) -> CheckResult {
        let result = match self.worst.unwrap_or(CheckStatus::Pass) {
            CheckStatus::Pass => CheckResult::pass(pass),
            CheckStatus::Warn => CheckResult::warn(warn),
            CheckStatus::Fail => CheckResult::fail(fail),
        };
        result.with_details(self.lines)
    }
}

/// Trait for system health checks
pub trait SystemCheck {
    /// Name of the system being checked
    fn name(&self) -> &'static str;

    fn check(&self) -> CheckResult;

    /// Optional description of what this check validates
    fn description(&self) -> Option<&'static str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_worst_status_wins() {
        let mut log = CheckLog::new();
        log.ok("first");
        log.warn("second");
        log.ok("third");
        let result = log.finish("fine", "meh", "broken");
        assert_eq!(result.status, CheckStatus::Warn);
        assert_eq!(result.message, "meh");
        assert_eq!(result.details.len(), 3);

        let mut log = CheckLog::new();
        log.warn("soft");
        assert!(!log.verify(false, "hard"));
        assert!(log.has_failures());
        assert_eq!(log.finish("fine", "meh", "broken").status, CheckStatus::Fail);
    }

    #[test]
    fn test_empty_log_passes() {
        let result = CheckLog::new().finish("nothing to see", "meh", "broken");
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(result.details.is_empty());
    }
}
