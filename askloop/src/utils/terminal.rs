//! # Terminal Input Helper
//!
//! This module asks the operator for one typed value and keeps asking
//! until the answer is acceptable. What "acceptable" means is described by
//! a [`PromptSpec`]: a label, a [`DesiredType`], an optional default and
//! optional [`Bounds`].
//!
//! ## Behaviour
//! - The prompt is written without a trailing newline, then one line is read.
//! - An empty line with a default configured returns the default as-is,
//!   without coercion or range checks.
//! - Anything else goes through [`sanitize`]; on failure the reason is
//!   printed and the prompt repeats.
//! - The end of the input stream is reported and re-prompted, like any
//!   other failure.
//! - The loop only stops on success, or when the prompt's [`RetryPolicy`]
//!   gives up (never, by default).
//!
//! ## Example
//! ```rust,no_run
//! use askloop::utils::{PromptSpec, Terminal};
//!
//! let mut terminal = Terminal::stdio();
//! let count = terminal
//!     .acquire(&PromptSpec::int("count").default(10).int_range(1..=100).echo(true))
//!     .unwrap();
//!
//! println!("{}", count.as_int().unwrap_or_default());
//! ```
use std::fmt::Display;
use std::io::{self, BufRead, Stdout, StdinLock, Write};
use std::ops::RangeInclusive;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PromptError;
use crate::retry::RetryPolicy;
use crate::utils::format::welcome_banner;
use crate::utils::sanitize::{Bounds, DesiredType, Rejection, ScalarValue, sanitize};

cfg_if::cfg_if! {
    if #[cfg(debug_assertions)] {
        const SHOW_BANNER: bool = false;
    } else {
        const SHOW_BANNER: bool = true;
    }
}

/// Declarative description of one scalar acquisition.
///
/// Bounds are only honoured when their variant matches `desired`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PromptSpec {
    pub label: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub desired: DesiredType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default: Option<ScalarValue>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bounds: Option<Bounds>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub echo: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub policy: RetryPolicy,
}

impl PromptSpec {
    pub fn new(label: impl Into<String>, desired: DesiredType) -> Self {
        Self {
            label: label.into(),
            desired,
            default: None,
            bounds: None,
            echo: false,
            policy: RetryPolicy::forever(),
        }
    }

    pub fn string(label: impl Into<String>) -> Self {
        Self::new(label, DesiredType::String)
    }

    pub fn int(label: impl Into<String>) -> Self {
        Self::new(label, DesiredType::Int)
    }

    pub fn double(label: impl Into<String>) -> Self {
        Self::new(label, DesiredType::Double)
    }

    /// Value returned when the operator submits an empty line.
    ///
    /// The default is trusted: it is neither coerced nor range checked.
    pub fn default(mut self, value: impl Into<ScalarValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn int_range(mut self, range: RangeInclusive<i64>) -> Self {
        self.bounds = Some(Bounds::Int(range));
        self
    }

    pub fn double_range(mut self, range: RangeInclusive<f64>) -> Self {
        self.bounds = Some(Bounds::Double(range));
        self
    }

    /// Prints `<label> is set as <value>.` once a value is accepted.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The text shown before reading a line.
    pub fn prompt_text(&self) -> String {
        match &self.default {
            Some(default) => format!("Please enter {} [{} by default]: ", self.label, default),
            None => format!("Please enter {}: ", self.label),
        }
    }

    /// Evaluates one raw line against this spec.
    pub fn evaluate(&self, line: &str) -> Result<ScalarValue, Rejection> {
        if let Some(default) = &self.default {
            if line.trim().is_empty() {
                return Ok(default.clone());
            }
        }

        sanitize(line, &self.desired, self.bounds.as_ref())
    }
}

/// A console: one line-oriented reader and one writer.
///
/// [`Terminal::stdio`] binds the process console. Any `BufRead`/`Write` pair
/// works, which is how the loops are driven in tests.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl Terminal<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Terminal::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints the prompt for `spec` and loops until a valid answer is received.
    ///
    /// # Errors
    /// [`PromptError::Exhausted`] / [`PromptError::TimedOut`] when the prompt's policy
    /// gives up, [`PromptError::Io`] when the prompt cannot be written.
    pub fn acquire(&mut self, spec: &PromptSpec) -> Result<ScalarValue, PromptError> {
        self.acquire_since(spec, Instant::now())
    }

    /// [`Terminal::acquire`] with the policy's deadline running from `started`.
    pub(crate) fn acquire_since(
        &mut self,
        spec: &PromptSpec,
        started: Instant,
    ) -> Result<ScalarValue, PromptError> {
        let mut attempts = spec.policy.start_at(&spec.label, started);
        let prompt = spec.prompt_text();

        let value = loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            match self.read_response().and_then(|line| spec.evaluate(&line)) {
                Ok(value) => break value,
                Err(rejection) => {
                    tracing::debug!(
                        label = %spec.label,
                        attempt = attempts.failures() + 1,
                        reason = ?rejection,
                        "input rejected"
                    );
                    self.say(&rejection)?;
                    attempts.fail()?;
                }
            }
        };

        tracing::trace!(label = %spec.label, %value, "input accepted");
        if spec.echo {
            self.say(format_args!("{} is set as {}.", spec.label, value))?;
        }

        Ok(value)
    }

    /// Reads one line. The end of the stream is a [`Rejection::NoResponse`],
    /// distinct from an empty line.
    fn read_response(&mut self) -> Result<String, Rejection> {
        let mut line = String::new();

        match self.input.read_line(&mut line) {
            Ok(0) => Err(Rejection::NoResponse),
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Ok(line)
            }
            Err(e) => Err(Rejection::Unreadable(e.to_string())),
        }
    }

    /// Writes one line to the console.
    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()
    }

    /// Rewrites the current console line (carriage return, no newline).
    pub fn status_line(&mut self, message: impl Display) -> io::Result<()> {
        write!(self.output, "{}\r", message)?;
        self.output.flush()
    }

    /// Prints the welcome banner for `name`. Debug builds stay quiet.
    pub fn welcome_banner(&mut self, name: &str) -> io::Result<()> {
        if SHOW_BANNER {
            self.say(welcome_banner(name))?;
        }
        Ok(())
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn terminal(script: &str) -> Terminal<Cursor<Vec<u8>>, Vec<u8>> {
        Terminal::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn printed(terminal: &Terminal<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(terminal.output()).into_owned()
    }

    #[test]
    fn test_acquire_empty_line_returns_default() {
        let spec = PromptSpec::int("count").default(10).int_range(1..=100);
        let mut t = terminal("\n");

        assert_eq!(t.acquire(&spec).unwrap(), ScalarValue::Int(10));
        assert_eq!(printed(&t), "Please enter count [10 by default]: ");
    }

    #[test]
    fn test_acquire_default_is_not_range_checked() {
        let spec = PromptSpec::int("count").default(500).int_range(1..=100);
        let mut t = terminal("   \n");

        assert_eq!(t.acquire(&spec).unwrap(), ScalarValue::Int(500));
    }

    #[test]
    fn test_acquire_default_is_not_coerced() {
        let spec = PromptSpec::int("count").default("auto");
        let mut t = terminal("\n");

        assert_eq!(t.acquire(&spec).unwrap(), ScalarValue::from("auto"));
    }

    #[test]
    fn test_acquire_retries_until_valid() {
        let spec = PromptSpec::int("count").default(10).int_range(1..=100);
        let mut t = terminal("abc\n200\n-5\n42\n");

        assert_eq!(t.acquire(&spec).unwrap(), ScalarValue::Int(42));

        let out = printed(&t);
        assert_eq!(out.matches("Please enter count").count(), 4);
        assert_eq!(out.matches("Wrong format. Please try again.").count(), 1);
        assert_eq!(out.matches("Out of range. Please try again.").count(), 2);
    }

    #[test]
    fn test_acquire_padded_number_is_wrong_format() {
        let mut t = terminal(" 42\n42\n");

        assert_eq!(t.acquire(&PromptSpec::int("count")).unwrap(), ScalarValue::Int(42));
        assert_eq!(printed(&t).matches("Wrong format. Please try again.").count(), 1);
    }

    #[test]
    fn test_acquire_whole_double_default_keeps_decimal_point() {
        let spec = PromptSpec::double("weight").default(1.0).echo(true);
        let mut t = terminal("\n");

        assert_eq!(t.acquire(&spec).unwrap(), ScalarValue::Double(1.0));
        assert_eq!(
            printed(&t),
            "Please enter weight [1.0 by default]: weight is set as 1.0.\n"
        );
    }

    #[test]
    fn test_acquire_empty_line_without_default_is_a_string() {
        let mut t = terminal("\n");
        assert_eq!(
            t.acquire(&PromptSpec::string("name")).unwrap(),
            ScalarValue::from("")
        );
    }

    #[test]
    fn test_acquire_end_of_stream_is_reported_and_retried() {
        let spec = PromptSpec::double("ratio").policy(RetryPolicy::max_attempts(2));
        let mut t = terminal("");

        let err = t.acquire(&spec).unwrap_err();
        assert!(matches!(err, PromptError::Exhausted { attempts: 2, .. }));
        assert_eq!(printed(&t).matches("Error: got nil response.").count(), 2);
    }

    #[test]
    fn test_acquire_invalid_utf8_is_recoverable() {
        let mut bytes = vec![0xff, 0xfe, b'\n'];
        bytes.extend_from_slice(b"0.5\n");
        let mut t = Terminal::new(Cursor::new(bytes), Vec::new());

        let value = t.acquire(&PromptSpec::double("ratio")).unwrap();
        assert_eq!(value, ScalarValue::Double(0.5));
        assert!(String::from_utf8_lossy(t.output()).contains("Error: could not read line"));
    }

    #[test]
    fn test_acquire_echo() {
        let spec = PromptSpec::string("name").echo(true);
        let mut t = terminal("  Ada \r\n");

        assert_eq!(t.acquire(&spec).unwrap(), ScalarValue::from("Ada"));
        assert!(printed(&t).ends_with("name is set as Ada.\n"));
    }

    #[test]
    fn test_status_line_uses_carriage_return() {
        let mut t = terminal("");
        t.status_line("3 of 10").unwrap();
        assert_eq!(printed(&t), "3 of 10\r");
    }

    #[test]
    fn test_welcome_banner_is_silent_in_debug_builds() {
        let mut t = terminal("");
        t.welcome_banner("demo").unwrap();
        if cfg!(debug_assertions) {
            assert!(printed(&t).is_empty());
        } else {
            assert!(printed(&t).contains("demo"));
        }
    }
}
