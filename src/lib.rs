//! quickpat classifies short "quick open" queries and matches candidate names against them.
//!
//! A query like `>Conf*` or `NPE` carries its own matching rule: anchors force prefix or suffix
//! alignment, wildcards turn it into a glob, a leading capital asks for camel-case matching.
//! quickpat infers that rule, decides whether candidates match, and reports which characters of a
//! candidate caused the match so that a list widget can highlight them.
//!
//! # Examples
//!
//! ```
//! use quickpat::prelude::*;
//!
//! let pattern = SearchPattern::default();
//! pattern.set_pattern("TT");
//!
//! assert_eq!(pattern.match_rule(), MatchRule::CamelCase);
//! assert!(pattern.matches(Some("ThisTest.txt")));
//! assert_eq!(
//!     pattern.matching_regions(Some("ThisTest.txt")),
//!     vec![MatchRange::new(0, 1), MatchRange::new(4, 1)]
//! );
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

pub use crate::classify::{Classification, classify};
pub use crate::filter::{FilterControl, FilterMatch, IncrementalFilter};
pub use crate::options::{SearchOptions, SearchOptionsBuilder};
pub use crate::pattern::CompiledPattern;
pub use crate::search_pattern::SearchPattern;
pub use crate::subpattern::is_sub_pattern;

pub mod classify;
mod engine;
pub mod filter;
pub mod highlight;
pub mod options;
pub mod pattern;
pub mod prelude;
mod search_pattern;
mod subpattern;

//==============================================================================
// Match rules

/// The matching rule inferred from a raw query
#[derive(Eq, PartialEq, Hash, Debug, Copy, Clone, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "cli", clap(rename_all = "snake_case"))]
pub enum MatchRule {
    /// Empty query, matches everything
    #[default]
    Blank,
    /// Whole candidate equals the query
    Exact,
    /// Candidate starts with the query
    Prefix,
    /// Query is a glob using `*` and `?`
    Pattern,
    /// Query initials are matched against camel-case humps
    CamelCase,
    /// Candidate contains the query anywhere
    Substring,
}

impl MatchRule {
    /// Every rule, in classification priority order
    pub const ALL: [MatchRule; 6] = [
        MatchRule::Blank,
        MatchRule::Pattern,
        MatchRule::CamelCase,
        MatchRule::Exact,
        MatchRule::Substring,
        MatchRule::Prefix,
    ];

    /// The name used on the command line and in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchRule::Blank => "blank",
            MatchRule::Exact => "exact",
            MatchRule::Prefix => "prefix",
            MatchRule::Pattern => "pattern",
            MatchRule::CamelCase => "camel_case",
            MatchRule::Substring => "substring",
        }
    }
}

impl Display for MatchRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing match rules and case folding modes
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The string does not name a match rule
    #[error("Unknown match rule {0:?}")]
    UnknownRule(String),
    /// The string does not name a case folding mode
    #[error("Unknown case folding {0:?}, expected `unicode` or `ascii`")]
    UnknownCaseFolding(String),
}

impl TryFrom<&str> for MatchRule {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "blank" => Ok(Self::Blank),
            "exact" => Ok(Self::Exact),
            "prefix" => Ok(Self::Prefix),
            "pattern" | "glob" => Ok(Self::Pattern),
            "camel_case" | "camelcase" | "camel" => Ok(Self::CamelCase),
            "substring" => Ok(Self::Substring),
            _ => Err(ParseError::UnknownRule(value.to_string())),
        }
    }
}

impl FromStr for MatchRule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

//------------------------------------------------------------------------------
// Case folding

/// How characters are folded before comparison
///
/// Folding never depends on the process locale, so a pattern matches the same way everywhere.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum CaseFolding {
    /// Simple Unicode case mapping (`Ä` == `ä`)
    #[default]
    Unicode,
    /// Only ASCII letters are folded
    Ascii,
}

impl CaseFolding {
    /// Returns true if both characters are equal under this folding
    #[inline]
    pub fn eq_char(self, a: char, b: char) -> bool {
        if a == b {
            return true;
        }
        match self {
            CaseFolding::Ascii => a.eq_ignore_ascii_case(&b),
            CaseFolding::Unicode => a.to_lowercase().eq(b.to_lowercase()),
        }
    }

    /// Folds a whole string
    pub fn fold(self, s: &str) -> String {
        match self {
            CaseFolding::Ascii => s.to_ascii_lowercase(),
            CaseFolding::Unicode => s.to_lowercase(),
        }
    }
}

impl TryFrom<&str> for CaseFolding {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "unicode" => Ok(Self::Unicode),
            "ascii" => Ok(Self::Ascii),
            _ => Err(ParseError::UnknownCaseFolding(value.to_string())),
        }
    }
}

impl FromStr for CaseFolding {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl Display for CaseFolding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseFolding::Unicode => f.write_str("unicode"),
            CaseFolding::Ascii => f.write_str("ascii"),
        }
    }
}

//==============================================================================
// A match engine decides whether a candidate matches and where

/// A highlighted part of a candidate, in character offsets
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub struct MatchRange {
    /// Offset of the first highlighted character
    pub offset: usize,
    /// Number of highlighted characters
    pub len: usize,
}

impl MatchRange {
    /// Creates a range starting at `offset` covering `len` characters
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Offset one past the last highlighted character
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }
}

impl From<(usize, usize)> for MatchRange {
    fn from((offset, len): (usize, usize)) -> Self {
        Self::new(offset, len)
    }
}

/// A matching engine for one compiled query
pub trait MatchEngine: Sync + Send + Display {
    /// Returns true if the candidate matches the query
    fn matches(&self, text: &str) -> bool;

    /// Returns the highlighted ranges of a matching candidate, `None` if it does not match
    fn matching_regions(&self, text: &str) -> Option<Vec<MatchRange>>;
}
