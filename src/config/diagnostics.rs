//! Collector for issues recovered during a load.

use tracing::warn;

use crate::error::ConfigIssue;

/// Logs each recovered [`ConfigIssue`] and keeps it for the caller.
#[derive(Debug, Default)]
pub struct Diagnostics {
    issues: Vec<ConfigIssue>,
}

impl Diagnostics {
    /// Log `issue` at warn level and record it.
    pub fn report(&mut self, issue: ConfigIssue) {
        warn!(issue = ?issue, "{}", issue);
        self.issues.push(issue);
    }

    /// Issues recorded so far, in report order.
    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }

    /// `true` if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Consume the collector and return the recorded issues.
    pub fn into_issues(self) -> Vec<ConfigIssue> {
        self.issues
    }
}
