//! Reporting of narrative tables that could not be parsed.
//!
//! Table failures never reach the caller. They are handed to a
//! [`DiagnosticSink`] and extraction continues with an empty result.

use std::sync::Mutex;

use tracing::error;

use crate::markup::MarkupError;

/// Placeholder logged instead of table content when content logging is off.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// A table fragment that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub markup: String,
    pub error: MarkupError,
}

pub trait DiagnosticSink {
    fn report(&self, failure: &ParseFailure);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn report(&self, failure: &ParseFailure) {
        (**self).report(failure);
    }
}

/// Emits parse failures as `tracing` errors.
///
/// Table markup is patient data, so it is redacted unless content logging
/// was explicitly enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    log_content: bool,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_log_content(mut self, enable: bool) -> Self {
        self.log_content = enable;
        self
    }

    fn redact<'a>(&self, value: &'a str) -> &'a str {
        if self.log_content {
            value
        } else {
            REDACTED_VALUE
        }
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&self, failure: &ParseFailure) {
        error!(
            error = %failure.error,
            markup = %self.redact(&failure.markup),
            "could not parse CCD narrative table"
        );
    }
}

/// Keeps every reported failure in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    failures: Mutex<Vec<ParseFailure>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<ParseFailure> {
        match self.failures.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.failures.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, failure: &ParseFailure) {
        let mut guard = match self.failures.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(failure.clone());
    }
}
