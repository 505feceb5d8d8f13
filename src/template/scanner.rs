//! Placeholder scanning.
//!
//! A placeholder is a brace-delimited token in slide text. The default rule
//! is the greedy `\{(.*)\}` pattern: `.` stops only at `\n`, so one match runs
//! from the first `{` of a line to its last `}` and swallows any braces in
//! between. `Hello {name}, welcome to {event}!` therefore yields the single
//! field `name}, welcome to {event`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static GREEDY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)\{(.*)\}").expect("greedy placeholder pattern is valid"));

static PER_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}\r\n]*)\}").expect("per-pair placeholder pattern is valid"));

/// Which placeholder pattern to scan with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaceholderRule {
    /// `\{(.*)\}`: one match from the first `{` to the last `}` of each line
    #[default]
    Greedy,

    /// `\{([^{}\r\n]*)\}`: one match per innermost `{...}` pair
    PerPair,
}

impl PlaceholderRule {
    fn regex(self) -> &'static Regex {
        match self {
            PlaceholderRule::Greedy => &GREEDY,
            PlaceholderRule::PerPair => &PER_PAIR,
        }
    }
}

impl fmt::Display for PlaceholderRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaceholderRule::Greedy => "greedy",
            PlaceholderRule::PerPair => "per-pair",
        })
    }
}

impl FromStr for PlaceholderRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(PlaceholderRule::Greedy),
            "per-pair" | "perpair" | "per_pair" => Ok(PlaceholderRule::PerPair),
            other => Err(format!(
                "unknown placeholder rule '{}', expected 'greedy' or 'per-pair'",
                other
            )),
        }
    }
}

/// One placeholder found in a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderMatch<'t> {
    /// The matched text, braces included
    pub full_token: &'t str,

    /// The text between the outer braces
    pub field_name: &'t str,
}

/// Finds placeholders in text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderScanner {
    rule: PlaceholderRule,
}

impl PlaceholderScanner {
    pub fn new(rule: PlaceholderRule) -> Self {
        Self { rule }
    }

    /// Cheap pre-check: can `text` contain a placeholder at all?
    #[inline]
    pub fn may_contain_placeholder(text: &str) -> bool {
        memchr::memchr(b'{', text.as_bytes()).is_some()
    }

    /// All placeholders in `text`, left to right.
    ///
    /// # Examples
    ///
    /// ```
    /// use deckfill::template::{PlaceholderRule, PlaceholderScanner};
    ///
    /// let greedy = PlaceholderScanner::new(PlaceholderRule::Greedy);
    /// let found = greedy.scan("Hello {name}, welcome to {event}!");
    /// assert_eq!(found.len(), 1);
    /// assert_eq!(found[0].field_name, "name}, welcome to {event");
    ///
    /// let per_pair = PlaceholderScanner::new(PlaceholderRule::PerPair);
    /// let names: Vec<_> = per_pair
    ///     .scan("Hello {name}, welcome to {event}!")
    ///     .iter()
    ///     .map(|m| m.field_name)
    ///     .collect();
    /// assert_eq!(names, ["name", "event"]);
    /// ```
    pub fn scan<'t>(&self, text: &'t str) -> Vec<PlaceholderMatch<'t>> {
        self.rule
            .regex()
            .captures_iter(text)
            .filter_map(|caps| {
                let full = caps.get(0)?;
                let field = caps.get(1)?;
                Some(PlaceholderMatch {
                    full_token: full.as_str(),
                    field_name: field.as_str(),
                })
            })
            .collect()
    }
}
