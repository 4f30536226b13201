//! # Retry Policy
//!
//! Interactive prompts retry forever: a human is at the keyboard and will
//! eventually type something acceptable. Scripted runs and tests need a way
//! out, so every loop in this crate takes a [`RetryPolicy`].
//!
//! - [`RetryPolicy::forever`] (the default) never gives up.
//! - [`RetryPolicy::max_attempts`] gives up after `n` failed attempts. Zero
//!   is treated as one: the first failure ends the loop.
//! - [`RetryPolicy::timeout`] gives up once a failed attempt lands after the deadline.
//!
//! Limits compose: `RetryPolicy::forever().with_max_attempts(5).with_timeout(d)`
//! stops on whichever is hit first. A blocking read is never interrupted;
//! the deadline is only evaluated after an attempt fails.
use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PromptError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RetryPolicy {
    pub max_attempts: Option<u32>,
    pub timeout: Option<Duration>,
}

impl RetryPolicy {
    pub fn forever() -> Self {
        Self::default()
    }

    pub fn max_attempts(n: u32) -> Self {
        Self::forever().with_max_attempts(n)
    }

    pub fn timeout(limit: Duration) -> Self {
        Self::forever().with_timeout(limit)
    }

    /// At least one attempt is always made, so `0` is stored as `1`.
    pub fn with_max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = Some(n.max(1));
        self
    }

    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn is_forever(&self) -> bool {
        self.max_attempts.is_none() && self.timeout.is_none()
    }

    /// Starts counting attempts for one acquisition.
    pub(crate) fn start(&self, label: &str) -> Attempts {
        self.start_at(label, Instant::now())
    }

    /// Like [`RetryPolicy::start`], but the deadline runs from `started`.
    pub(crate) fn start_at(&self, label: &str, started: Instant) -> Attempts {
        Attempts {
            policy: *self,
            label: label.to_string(),
            started,
            failures: 0,
        }
    }
}

/// Failure bookkeeping for a single acquisition.
#[derive(Debug)]
pub(crate) struct Attempts {
    policy: RetryPolicy,
    label: String,
    started: Instant,
    failures: u32,
}

impl Attempts {
    /// Records a failed attempt and decides whether another one is allowed.
    pub(crate) fn fail(&mut self) -> Result<(), PromptError> {
        self.failures = self.failures.saturating_add(1);

        // Deserialized policies may still carry a zero.
        if let Some(max) = self.policy.max_attempts {
            if self.failures >= max.max(1) {
                tracing::warn!(label = %self.label, attempts = self.failures, "retry budget exhausted");
                return Err(PromptError::Exhausted {
                    label: self.label.clone(),
                    attempts: self.failures,
                });
            }
        }

        if let Some(limit) = self.policy.timeout {
            let elapsed = self.started.elapsed();
            if elapsed >= limit {
                tracing::warn!(label = %self.label, attempts = self.failures, ?elapsed, "retry deadline passed");
                return Err(PromptError::TimedOut {
                    label: self.label.clone(),
                    attempts: self.failures,
                    elapsed,
                });
            }
        }

        Ok(())
    }

    pub(crate) fn failures(&self) -> u32 {
        self.failures
    }

    pub(crate) fn started(&self) -> Instant {
        self.started
    }
}
