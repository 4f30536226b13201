//! Error types surfaced past the prompt loops.
//!
//! Everything an operator can fix by typing again (bad format, out of range,
//! a missing line, a rejected or failing validator) is retried inside the loops
//! and never shows up here. A [`PromptError`] only escapes when a
//! [`RetryPolicy`](crate::retry::RetryPolicy) gives up or the console itself
//! stops accepting output.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Terminal failure of an acquisition.
#[derive(Error, Debug)]
pub enum PromptError {
    /// The retry policy ran out of attempts.
    #[error("gave up on `{label}` after {attempts} failed attempt(s)")]
    Exhausted { label: String, attempts: u32 },

    /// The retry policy ran out of time.
    #[error("gave up on `{label}` after {elapsed:?} ({attempts} failed attempt(s))")]
    TimedOut {
        label: String,
        attempts: u32,
        elapsed: Duration,
    },

    /// Writing the prompt or a diagnostic failed.
    #[error("console output failed: {0}")]
    Io(#[from] io::Error),
}

impl PromptError {
    /// Number of failed attempts recorded before giving up, if the policy gave up.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            Self::Exhausted { attempts, .. } | Self::TimedOut { attempts, .. } => Some(*attempts),
            Self::Io(_) => None,
        }
    }
}

/// Failure while creating a directory tree with
/// [`create_new_directory`](crate::utils::fs::create_new_directory).
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("base path {0} is not a directory")]
    BaseNotDirectory(String),

    #[error("could not create directory {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: io::Error,
    },
}
