//! Display helpers for status output: column padding, rounded numbers,
//! timestamps and the welcome banner.
//!
//! None of these touch the console; callers hand the strings to
//! [`Terminal::say`](crate::utils::Terminal::say) or their own writer.
use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

/// Which side of the text receives the padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    #[default]
    Trailing,
    Leading,
}

/// Pads `s` with spaces up to `total_space` characters.
///
/// Strings that are already wider are returned unchanged.
pub fn string_with_space(s: &str, total_space: usize, padding: Padding) -> String {
    let width = s.chars().count();
    if width >= total_space {
        return s.to_string();
    }

    let fill = " ".repeat(total_space - width);
    match padding {
        Padding::Trailing => format!("{}{}", s, fill),
        Padding::Leading => format!("{}{}", fill, s),
    }
}

/// [`string_with_space`] for anything printable.
pub fn display_with_space(item: impl Display, total_space: usize, padding: Padding) -> String {
    string_with_space(&item.to_string(), total_space, padding)
}

/// Method form of [`string_with_space`].
pub trait WithSpace {
    fn with_space(&self, total_space: usize, padding: Padding) -> String;
}

impl WithSpace for str {
    fn with_space(&self, total_space: usize, padding: Padding) -> String {
        string_with_space(self, total_space, padding)
    }
}

/// Notation used by [`srounded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundStyle {
    /// `3.14`
    #[default]
    Fixed,
    /// `3.14e0`
    Exponent,
}

/// Renders `value` with `digits` digits after the decimal point.
pub fn srounded(value: f64, digits: usize, style: RoundStyle) -> String {
    match style {
        RoundStyle::Fixed => format!("{:.*}", digits, value),
        RoundStyle::Exponent => format!("{:.*e}", digits, value),
    }
}

pub fn srounded_all(values: &[f64], digits: usize, style: RoundStyle) -> Vec<String> {
    values.iter().map(|v| srounded(*v, digits, style)).collect()
}

/// Renders the values as a bracketed list, e.g. `[1.00, 2.50]`.
pub fn srounded_string(values: &[f64], digits: usize, style: RoundStyle) -> String {
    format!("[{}]", srounded_all(values, digits, style).join(", "))
}

/// Appends the unix time of `time` (whole seconds) to `s`.
///
/// `appended_unix_time("run", &t, "_")` gives `run_1700000000`.
pub fn appended_unix_time<Tz: TimeZone>(s: &str, time: &DateTime<Tz>, separator: &str) -> String {
    format!("{}{}{}", s, separator, time.timestamp())
}

/// Long, human-readable form of `time`, e.g. `October 19, 2026 at 3:04:05 PM +02:00`.
pub fn display_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    time.format("%B %-d, %Y at %-I:%M:%S %p %Z").to_string()
}

pub fn time_now() -> String {
    display_time(&Local::now())
}

/// Framed banner naming the running tool.
pub fn welcome_banner(name: &str) -> String {
    let version = format!("askloop v{}", env!("CARGO_PKG_VERSION"));
    let width = name.chars().count().max(version.len()) + 4;
    let rule = "-".repeat(width);

    format!(
        "{rule}\n  {}\n  {}\n{rule}",
        name,
        version,
        rule = rule
    )
}
