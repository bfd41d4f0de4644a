//! # Notifications and the Error Channel
//!
//! The view queues notifications as it works; the host drains them after a
//! flush. Errors found while flushing go through an [`ErrorChannel`], whose
//! default policy is to raise them to whoever called `flush`.

use crate::errors::{EditorError, EditorResult, ErrorKind};
use scrivener_document::Selection;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The logical model changed; `deltas` were replayed onto the surface
    Change { version: u64, deltas: usize },

    /// The selection restored by a flush differs from the previous one
    SelectionChange { selection: Selection },

    Error { kind: ErrorKind, message: String },
}

impl Notification {
    pub fn error(err: &EditorError) -> Self {
        Notification::Error {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// What the error channel does with a flush failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorPolicy {
    /// Return the error from `flush`
    #[default]
    Raise,

    /// Log it and carry on
    Log,
}

pub type ErrorReporter = Box<dyn FnMut(&EditorError)>;

/// Single configurable sink for asynchronous (flush-time) errors
pub struct ErrorChannel {
    policy: ErrorPolicy,
    reporter: Option<ErrorReporter>,
}

impl ErrorChannel {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            reporter: None,
        }
    }

    /// Replace the channel's behavior with a custom reporter
    pub fn with_reporter(reporter: impl FnMut(&EditorError) + 'static) -> Self {
        Self {
            policy: ErrorPolicy::Log,
            reporter: Some(Box::new(reporter)),
        }
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn report(&mut self, err: EditorError) -> EditorResult<()> {
        if let Some(reporter) = self.reporter.as_mut() {
            reporter(&err);
            return Ok(());
        }
        match self.policy {
            ErrorPolicy::Raise => Err(err),
            ErrorPolicy::Log => {
                error!(kind = ?err.kind(), error = %err, "Flush failed");
                Ok(())
            }
        }
    }
}

impl Default for ErrorChannel {
    fn default() -> Self {
        Self::new(ErrorPolicy::Raise)
    }
}

impl fmt::Debug for ErrorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorChannel")
            .field("policy", &self.policy)
            .field("reporter", &self.reporter.is_some())
            .finish()
    }
}
