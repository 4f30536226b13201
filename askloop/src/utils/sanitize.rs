//! # Input Coercion & Range Checking
//!
//! This module turns one raw console line into a typed [`ScalarValue`].
//! It knows three declared types ([`DesiredType`]) and optional closed
//! ranges ([`Bounds`]). Every failure is a [`Rejection`]: a recoverable,
//! human-readable reason the prompt loop prints before asking again.
//!
//! ## Rules
//! - String answers are trimmed of surrounding whitespace.
//! - Numbers must parse exactly: `"4x"` and `" 42"` are not numbers.
//! - A range only applies when its variant matches the declared type;
//!   a `String` prompt ignores ranges altogether.
//! - Both bounds of a range are inclusive.
//!
//! ## Example
//! ```rust
//! use askloop::utils::{Bounds, DesiredType, ScalarValue, sanitize};
//!
//! let bounds = Bounds::Int(1..=100);
//! assert_eq!(
//!     sanitize("42", &DesiredType::Int, Some(&bounds)).unwrap(),
//!     ScalarValue::Int(42)
//! );
//! assert!(sanitize("200", &DesiredType::Int, Some(&bounds)).is_err());
//! ```
use std::fmt::Display;
use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The primitive type a prompt coerces its answer into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DesiredType {
    String,
    Int,
    Double,
}

impl Display for DesiredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Int => write!(f, "int"),
            Self::Double => write!(f, "double"),
        }
    }
}

/// A closed interval an accepted number must fall into.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Bounds {
    Int(RangeInclusive<i64>),
    Double(RangeInclusive<f64>),
}

impl Bounds {
    /// Whether these bounds constrain values of `desired`.
    pub fn applies_to(&self, desired: &DesiredType) -> bool {
        matches!(
            (self, desired),
            (Bounds::Int(_), DesiredType::Int) | (Bounds::Double(_), DesiredType::Double)
        )
    }

    /// Checks membership. Values of another type pass untouched.
    pub fn check(&self, value: &ScalarValue) -> Result<(), Rejection> {
        let inside = match (self, value) {
            (Bounds::Int(range), ScalarValue::Int(n)) => range.contains(n),
            (Bounds::Double(range), ScalarValue::Double(x)) => range.contains(x),
            _ => true,
        };

        if inside {
            Ok(())
        } else {
            Err(Rejection::OutOfRange(self.clone()))
        }
    }
}

impl Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(r) => write!(f, "[{}, {}]", r.start(), r.end()),
            Self::Double(r) => write!(f, "[{}, {}]", r.start(), r.end()),
        }
    }
}

/// An accepted answer, tagged with its type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ScalarValue {
    Int(i64),
    Double(f64),
    String(String),
}

impl ScalarValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Integers widen to `f64`.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(x) => Some(*x),
            Self::Int(n) => Some(*n as f64),
            Self::String(_) => None,
        }
    }

    /// The string itself, or the rendered number.
    pub fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
            other => other.to_string(),
        }
    }

    pub fn desired_type(&self) -> DesiredType {
        match self {
            Self::String(_) => DesiredType::String,
            Self::Int(_) => DesiredType::Int,
            Self::Double(_) => DesiredType::Double,
        }
    }
}

impl Display for ScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", s),
            Self::Int(n) => write!(f, "{}", n),
            Self::Double(x) => write!(f, "{:?}", x),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

/// Why one attempt was not accepted.
///
/// Every variant is recoverable: the prompt loop prints it and asks again.
/// - [`WrongFormat`](Rejection::WrongFormat): the line does not parse as the declared type.
/// - [`OutOfRange`](Rejection::OutOfRange): the number parsed but falls outside the bounds.
/// - [`NoResponse`](Rejection::NoResponse): the input stream ended.
/// - [`Unreadable`](Rejection::Unreadable): the line could not be read (e.g. invalid UTF-8).
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    WrongFormat(DesiredType),
    OutOfRange(Bounds),
    NoResponse,
    Unreadable(String),
}

impl Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongFormat(_) => write!(f, "Wrong format. Please try again."),
            Self::OutOfRange(_) => write!(f, "Out of range. Please try again."),
            Self::NoResponse => write!(f, "Error: got nil response."),
            Self::Unreadable(reason) => write!(f, "Error: could not read line ({}).", reason),
        }
    }
}

impl std::error::Error for Rejection {}

/// Parses `$input` into `$t` and wraps it with `$variant`, or returns
/// [`Rejection::WrongFormat`] for `$desired`.
///
/// # Example
/// ```rust,ignore
/// let value = coerce_as!("42", i64, ScalarValue::Int, DesiredType::Int)?;
/// ```
macro_rules! coerce_as {
    ($input:expr, $t:ty, $variant:path, $desired:expr) => {
        match $input.parse::<$t>() {
            Ok(v) => Ok($variant(v)),
            Err(_) => Err(Rejection::WrongFormat($desired)),
        }
    };
}

impl DesiredType {
    /// Coerces one line (terminator already removed) into a [`ScalarValue`] of this type.
    ///
    /// Strings are trimmed; numbers are parsed from the line as typed.
    pub fn coerce(&self, input: &str) -> Result<ScalarValue, Rejection> {
        match self {
            DesiredType::String => Ok(ScalarValue::String(input.trim().to_string())),
            DesiredType::Int => coerce_as!(input, i64, ScalarValue::Int, DesiredType::Int),
            DesiredType::Double => {
                coerce_as!(input, f64, ScalarValue::Double, DesiredType::Double)
            }
        }
    }
}

/// Coerces `answer` to `desired` and checks `bounds` when they apply.
///
/// Stops at the first failure.
pub fn sanitize(
    answer: &str,
    desired: &DesiredType,
    bounds: Option<&Bounds>,
) -> Result<ScalarValue, Rejection> {
    let value = desired.coerce(answer)?;

    if let Some(bounds) = bounds.filter(|b| b.applies_to(desired)) {
        bounds.check(&value)?;
    }

    Ok(value)
}
