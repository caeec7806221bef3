//! Configuration options for search patterns.
//!
//! This module provides the `SearchOptions` struct and its builder, controlling which match rules
//! a query may be classified into and how characters are case folded.

use derive_builder::Builder;

use crate::{CaseFolding, MatchRule, ParseError};

/// The rules a query may be classified into unless configured otherwise.
///
/// Substring matching is opt-in: without it, a plain query is a prefix match.
pub const DEFAULT_RULES: [MatchRule; 5] = [
    MatchRule::Blank,
    MatchRule::Exact,
    MatchRule::Prefix,
    MatchRule::Pattern,
    MatchRule::CamelCase,
];

/// Options shared by every pattern compiled from a `SearchPattern`
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(build_fn(name = "final_build"))]
#[builder(default)]
pub struct SearchOptions {
    /// Rules the classifier may infer; `Blank` and `Prefix` are always available
    pub allowed_rules: Vec<MatchRule>,
    /// How characters are folded before comparison
    pub case_folding: CaseFolding,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            allowed_rules: DEFAULT_RULES.to_vec(),
            case_folding: CaseFolding::default(),
        }
    }
}

impl SearchOptions {
    /// Returns true if the classifier may infer `rule`
    pub fn allows(&self, rule: MatchRule) -> bool {
        matches!(rule, MatchRule::Blank | MatchRule::Prefix) || self.allowed_rules.contains(&rule)
    }
}

impl SearchOptionsBuilder {
    /// Builds the options, always allowing `Blank` and `Prefix`
    pub fn build(&mut self) -> Result<SearchOptions, SearchOptionsBuilderError> {
        let mut options = self.final_build()?;
        for rule in [MatchRule::Blank, MatchRule::Prefix] {
            if !options.allowed_rules.contains(&rule) {
                options.allowed_rules.push(rule);
            }
        }
        Ok(options)
    }

    /// Adds substring matching to the allowed rules
    pub fn substring(&mut self, enabled: bool) -> &mut Self {
        let mut rules = self.allowed_rules.clone().unwrap_or_else(|| DEFAULT_RULES.to_vec());
        rules.retain(|r| *r != MatchRule::Substring);
        if enabled {
            rules.push(MatchRule::Substring);
        }
        self.allowed_rules(rules)
    }
}

/// Parses a comma separated list of rule names, e.g. `prefix,camel_case`
pub fn parse_rules(value: &str) -> Result<Vec<MatchRule>, ParseError> {
    value
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(MatchRule::try_from)
        .collect()
}
