//! # askloop
//!
//! Interactive terminal input validation for command-line tools: ask the
//! operator for a typed value, or for a path, and keep asking until the
//! answer is usable.
//!
//! ## Features
//!
//! - **Typed prompts** - `String`, `Int` and `Double` answers with optional
//!   defaults and inclusive ranges ([`utils::Terminal::acquire`])
//! - **Validated retry loops** - re-prompt until a caller-supplied validator
//!   accepts; validator errors are printed, never propagated
//!   ([`retry::ValidatedRetryLoop`])
//! - **File & directory selection** - import a file through a loader, or pick an
//!   export directory ([`retry::file_input`], [`retry::exporting_path_input`])
//! - **Retry policies** - forever by default; bounded by attempts or time for
//!   scripted runs and tests ([`retry::RetryPolicy`])
//! - **Status output helpers** - padding, rounding, timestamps, directories
//!   ([`utils::format`], [`utils::fs`])
//!
//! ("serde" feature)
//! - **Questionnaires** - prompt lists loaded from JSON (`questionnaire`)
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! askloop = "0.1"
//! askloop = { version = "0.1", features = ["serde"] }
//! ```
//!
//! ### Typed input with a default and a range
//!
//! ```rust,no_run
//! use askloop::utils::{PromptSpec, Terminal};
//!
//! let mut terminal = Terminal::stdio();
//! let threads = terminal
//!     .acquire(&PromptSpec::int("threads").default(4).int_range(1..=16).echo(true))
//!     .unwrap();
//! println!("Threads: {}", threads);
//! ```
//!
//! ### Retry until a validator accepts
//!
//! ```rust,no_run
//! use askloop::retry::{ValidatedRetryLoop, Validation};
//! use askloop::utils::Terminal;
//!
//! let mut terminal = Terminal::stdio();
//! let port: u16 = ValidatedRetryLoop::new("port")
//!     .message("port to listen on")
//!     .success_message(false)
//!     .run(&mut terminal, |candidate| {
//!         let port: u16 = candidate.parse()?;
//!         if port < 1024 {
//!             return Ok::<_, std::num::ParseIntError>(Validation::reject("Privileged port, pick another."));
//!         }
//!         Ok(Validation::Accept(port))
//!     })
//!     .unwrap();
//! ```
//!
//! ## Error Handling
//!
//! Bad input never surfaces as an error: it is reported on the console and
//! asked again. A [`PromptError`] is only returned when a non-default
//! [`retry::RetryPolicy`] gives up or the console cannot be written to.
//!
//! ## Logging
//!
//! Attempts, rejections and validator failures are emitted as `tracing`
//! events (`debug` level, `warn` when a policy gives up). Operator-facing
//! messages are always written to the terminal, not to the log.

pub mod error;
pub use error::{DirectoryError, PromptError};

pub mod retry;

pub mod utils;

cfg_if::cfg_if! {
    if #[cfg(feature = "serde")] {
        pub mod questionnaire;
        pub use questionnaire::{Answer, Questionnaire};
    }
}
