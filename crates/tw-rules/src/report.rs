//! The reporting channel: where player-visible outcomes go.

use tracing::debug;

/// Receives the single outcome message of an action attempt.
pub trait Reporter {
    /// The action succeeded.
    fn ok(&mut self, message: &str);

    /// The action was refused.
    fn fail(&mut self, message: &str);
}

/// One reported outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Success text.
    Ok(String),
    /// Failure text.
    Fail(String),
}

impl Report {
    /// The message text regardless of outcome.
    pub fn message(&self) -> &str {
        match self {
            Self::Ok(m) | Self::Fail(m) => m,
        }
    }

    /// Whether this is a success report.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

/// A reporter that keeps every message in order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<Report>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports so far.
    pub fn entries(&self) -> &[Report] {
        &self.entries
    }

    /// The most recent report.
    pub fn last(&self) -> Option<&Report> {
        self.entries.last()
    }

    /// Number of reports recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take every report, leaving the transcript empty.
    pub fn drain(&mut self) -> Vec<Report> {
        std::mem::take(&mut self.entries)
    }
}

impl Reporter for Transcript {
    fn ok(&mut self, message: &str) {
        debug!(message, "ok");
        self.entries.push(Report::Ok(message.to_string()));
    }

    fn fail(&mut self, message: &str) {
        debug!(message, "fail");
        self.entries.push(Report::Fail(message.to_string()));
    }
}
