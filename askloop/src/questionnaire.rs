//! # Questionnaires
//!
//! A list of [`PromptSpec`]s loaded from JSON and asked in order. The
//! questions come from a file; the answers still come from the operator.
//!
//! ```json
//! {
//!   "title": "Sampling",
//!   "prompts": [
//!     { "label": "count", "type": "int", "default": 10,
//!       "bounds": { "int": { "start": 1, "end": 100 } }, "echo": true },
//!     { "label": "ratio", "type": "double",
//!       "bounds": { "double": { "start": 0.0, "end": 1.0 } } },
//!     { "label": "operator", "type": "string" }
//!   ]
//! }
//! ```
use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::error::PromptError;
use crate::retry::RetryPolicy;
use crate::utils::{PromptSpec, ScalarValue, Terminal};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    #[serde(default)]
    pub title: Option<String>,
    pub prompts: Vec<PromptSpec>,
}

/// One accepted answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub label: String,
    pub value: ScalarValue,
}

impl Questionnaire {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Uses `policy` for every prompt.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        for prompt in &mut self.prompts {
            prompt.policy = policy;
        }
        self
    }

    /// Asks every prompt in order. Stops at the first prompt whose policy gives up.
    pub fn ask<R: BufRead, W: Write>(
        &self,
        terminal: &mut Terminal<R, W>,
    ) -> Result<Vec<Answer>, PromptError> {
        if let Some(title) = &self.title {
            terminal.say(title)?;
        }

        self.prompts
            .iter()
            .map(|spec| {
                terminal.acquire(spec).map(|value| Answer {
                    label: spec.label.clone(),
                    value,
                })
            })
            .collect()
    }
}

/// Renders answers as a JSON object keyed by label.
pub fn answers_to_json(answers: &[Answer]) -> serde_json::Value {
    let map = answers
        .iter()
        .map(|a| {
            let value = match &a.value {
                ScalarValue::String(s) => serde_json::Value::from(s.as_str()),
                ScalarValue::Int(n) => serde_json::Value::from(*n),
                ScalarValue::Double(x) => serde_json::Value::from(*x),
            };
            (a.label.clone(), value)
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(map)
}
