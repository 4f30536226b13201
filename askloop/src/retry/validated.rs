//! # Validated Retry Loop
//!
//! Asks for a string, hands it to a caller-supplied validator, and repeats
//! until the validator accepts. The validator decides the result type: its
//! [`Validation::Accept`] carries the value that [`ValidatedRetryLoop::run`]
//! returns, so nothing has to be smuggled out through captured variables.
//!
//! A validator has three ways to answer:
//! - `Ok(Validation::Accept(value))`: the loop ends and returns `value`.
//! - `Ok(Validation::Reject(message))`: `message` is printed and the loop asks again.
//! - `Err(error)`: `Error:\n <error>.\n Please try again.` is printed and the loop asks again.
//!
//! Errors never escape the loop; only the [`RetryPolicy`] can end it early.
//!
//! ## Example
//! ```rust,no_run
//! use askloop::retry::{ValidatedRetryLoop, Validation};
//! use askloop::utils::Terminal;
//!
//! let mut terminal = Terminal::stdio();
//! let lines: Vec<String> = ValidatedRetryLoop::new("notes file")
//!     .run(&mut terminal, |path| {
//!         let text = std::fs::read_to_string(path)?;
//!         let lines: Vec<String> = text.lines().map(str::to_string).collect();
//!         if lines.is_empty() {
//!             return Ok::<_, std::io::Error>(Validation::reject("The file is empty. Can not proceed."));
//!         }
//!         Ok(Validation::Accept(lines))
//!     })
//!     .unwrap();
//! ```
use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::error::PromptError;
use crate::retry::RetryPolicy;
use crate::utils::{PromptSpec, Terminal};

/// A validator's verdict on one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation<T> {
    Accept(T),
    /// The message is printed by the loop; an empty message prints nothing.
    Reject(String),
}

impl<T> Validation<T> {
    pub fn reject(message: impl Into<String>) -> Self {
        Self::Reject(message.into())
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validation<U> {
        match self {
            Self::Accept(value) => Validation::Accept(f(value)),
            Self::Reject(message) => Validation::Reject(message),
        }
    }
}

/// Repeats "prompt, then validate" until the validator accepts.
#[derive(Debug, Clone)]
pub struct ValidatedRetryLoop {
    name: String,
    message: Option<String>,
    success_message: bool,
    policy: RetryPolicy,
}

impl ValidatedRetryLoop {
    /// A loop prompting for `<name> path`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: None,
            success_message: true,
            policy: RetryPolicy::forever(),
        }
    }

    /// Replaces the derived `<name> path` prompt label.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether `Successfully imported from <name>.` is printed on acceptance.
    pub fn success_message(mut self, enabled: bool) -> Self {
        self.success_message = enabled;
        self
    }

    pub fn policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The label shown in the prompt.
    pub fn label(&self) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None => format!("{} path", self.name),
        }
    }

    /// Runs the loop on `terminal` until `validator` accepts.
    ///
    /// Each iteration acquires a fresh trimmed string (no default, no range)
    /// and discards everything from the previous one. Rejections and
    /// validator errors count as failed attempts for the loop's policy.
    /// The inner prompt shares the loop's deadline, so a timeout reports the
    /// time spent in the whole loop.
    ///
    /// # Errors
    /// Only [`PromptError`]s: the policy gave up, or the console stopped
    /// accepting output. Validator errors are printed, never returned.
    pub fn run<R, W, T, E, F>(
        &self,
        terminal: &mut Terminal<R, W>,
        mut validator: F,
    ) -> Result<T, PromptError>
    where
        R: BufRead,
        W: Write,
        E: Display,
        F: FnMut(&str) -> Result<Validation<T>, E>,
    {
        let label = self.label();
        let candidate_spec = PromptSpec::string(label.as_str()).policy(self.policy);
        let mut attempts = self.policy.start(&label);

        loop {
            let candidate = terminal
                .acquire_since(&candidate_spec, attempts.started())?
                .into_string();

            match validator(&candidate) {
                Ok(Validation::Accept(value)) => {
                    tracing::debug!(name = %self.name, %candidate, "candidate accepted");
                    if self.success_message {
                        terminal.say(format_args!("Successfully imported from {}.", self.name))?;
                    }
                    return Ok(value);
                }
                Ok(Validation::Reject(message)) => {
                    tracing::debug!(name = %self.name, %candidate, %message, "candidate rejected");
                    if !message.is_empty() {
                        terminal.say(message)?;
                    }
                }
                Err(e) => {
                    tracing::debug!(name = %self.name, %candidate, error = %e, "validator failed");
                    terminal.say(format_args!("Error:\n {}.\n Please try again.", e))?;
                }
            }

            attempts.fail()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::io::Cursor;
    use std::thread;
    use std::time::{Duration, Instant};

    fn terminal(script: &str) -> Terminal<Cursor<Vec<u8>>, Vec<u8>> {
        Terminal::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn printed(terminal: &Terminal<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(terminal.output()).into_owned()
    }

    #[test]
    fn test_label_defaults_to_name_path() {
        assert_eq!(ValidatedRetryLoop::new("XYZ file").label(), "XYZ file path");
        assert_eq!(
            ValidatedRetryLoop::new("XYZ file").message("Where?").label(),
            "Where?"
        );
    }

    #[test]
    fn test_accept_returns_the_validator_value() {
        let mut t = terminal("  42 \n");
        let value = ValidatedRetryLoop::new("answer")
            .run(&mut t, |c| Ok::<_, anyhow::Error>(Validation::Accept(c.len())))
            .unwrap();

        assert_eq!(value, 2);
        assert_eq!(
            printed(&t),
            "Please enter answer path: Successfully imported from answer.\n"
        );
    }

    #[test]
    fn test_rejects_m_times_then_accepts() {
        let m = 4;
        let mut t = terminal("a\nb\nc\nd\ne\n");
        let mut calls = 0;

        let accepted = ValidatedRetryLoop::new("letter")
            .success_message(false)
            .run(&mut t, |c| {
                calls += 1;
                if calls <= m {
                    Ok::<_, anyhow::Error>(Validation::reject(""))
                } else {
                    Ok(Validation::Accept(c.to_string()))
                }
            })
            .unwrap();

        assert_eq!(accepted, "e");
        assert_eq!(calls, m + 1);
        assert_eq!(printed(&t).matches("Please enter letter path").count(), m + 1);
    }

    #[test]
    fn test_failures_are_reported_and_retried() {
        let k = 3;
        let mut t = terminal("x\nx\nx\nx\n");
        let mut calls = 0;

        ValidatedRetryLoop::new("thing")
            .run(&mut t, |_| {
                calls += 1;
                if calls <= k {
                    Err(anyhow!("disk on fire"))
                } else {
                    Ok(Validation::Accept(()))
                }
            })
            .unwrap();

        assert_eq!(calls, k + 1);
        let out = printed(&t);
        assert_eq!(
            out.matches("Error:\n disk on fire.\n Please try again.\n").count(),
            k
        );
        assert_eq!(out.matches("Successfully imported from thing.").count(), 1);
    }

    #[test]
    fn test_always_failing_validator_is_bounded_only_by_policy() {
        let mut t = terminal(&"x\n".repeat(50));

        let err = ValidatedRetryLoop::new("thing")
            .policy(RetryPolicy::max_attempts(25))
            .run(&mut t, |_| Err::<Validation<()>, _>(anyhow!("nope")))
            .unwrap_err();

        assert!(matches!(err, PromptError::Exhausted { attempts: 25, .. }));
        assert!(!printed(&t).contains("Successfully"));
    }

    #[test]
    fn test_mixed_outcomes_scenario() {
        let mut t = terminal("/bad\n/empty\n/ok\n");

        let accepted = ValidatedRetryLoop::new("data file")
            .run(&mut t, |c| match c {
                "/bad" => Err(anyhow!("No such file or directory")),
                "/empty" => Ok(Validation::reject("No entries in file. Can not proceed.")),
                ok => Ok(Validation::Accept(ok.to_string())),
            })
            .unwrap();

        assert_eq!(accepted, "/ok");
        let out = printed(&t);
        assert!(out.contains("Error:\n No such file or directory.\n Please try again.\n"));
        assert!(out.contains("No entries in file. Can not proceed.\n"));
        assert_eq!(out.matches("Please enter data file path").count(), 3);
    }

    #[test]
    fn test_timeout_counts_time_spent_in_the_validator() {
        // One slow rejection, then the stream closes.
        let mut t = terminal("x\n");
        let began = Instant::now();

        let err = ValidatedRetryLoop::new("slow")
            .policy(RetryPolicy::timeout(Duration::from_millis(150)))
            .run(&mut t, |_| {
                thread::sleep(Duration::from_millis(100));
                Ok::<_, anyhow::Error>(Validation::<()>::reject(""))
            })
            .unwrap_err();
        let total = began.elapsed();

        match err {
            PromptError::TimedOut { elapsed, .. } => {
                assert!(elapsed >= Duration::from_millis(150));
                assert!(total - elapsed < Duration::from_millis(50));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_map() {
        assert_eq!(Validation::Accept(2).map(|n| n * 2), Validation::Accept(4));
        let rejected: Validation<i32> = Validation::reject("no");
        assert!(!rejected.map(|n| n + 1).is_accept());
    }
}
