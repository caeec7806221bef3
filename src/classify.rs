//! Infers the matching rule a raw query asks for.
//!
//! The query mini-language:
//!
//! | Input form            | Effect                                    |
//! |-----------------------|-------------------------------------------|
//! | `""`                  | blank, matches everything                 |
//! | `>text`               | forced prefix anchor                      |
//! | `text<` / `text `     | forced suffix anchor                      |
//! | contains `*` or `?`   | glob pattern                              |
//! | starts with uppercase | camel case, with literal fallback         |
//! | anything else         | prefix (substring when enabled)           |
//!
//! A query made of a lone `<` or `>` is taken literally.

use crate::MatchRule;

const START_SYMBOL: char = '>';
const END_SYMBOL: char = '<';
const BLANK: char = ' ';
const ANY_STRING: char = '*';
const ANY_CHAR: char = '?';

/// The outcome of classifying a raw query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The inferred rule
    pub rule: MatchRule,
    /// The query with its anchors stripped
    pub text: String,
    /// The query started with `>`
    pub force_prefix: bool,
    /// The query ended with `<` or a space
    pub force_suffix: bool,
}

impl Classification {
    fn blank() -> Self {
        Self {
            rule: MatchRule::Blank,
            text: String::new(),
            force_prefix: false,
            force_suffix: false,
        }
    }
}

/// Returns true if the text uses glob wildcards
pub fn has_wildcards(text: &str) -> bool {
    text.contains([ANY_STRING, ANY_CHAR])
}

/// Returns true if the raw query is a lone anchor character
pub fn is_lone_anchor(raw: &str) -> bool {
    raw.len() == 1 && raw.starts_with([START_SYMBOL, END_SYMBOL])
}

/// Classifies `raw`, only inferring rules present in `allowed`
///
/// `Blank` and `Prefix` are always available: a rule missing from `allowed` degrades to the next
/// rule that applies, and ultimately to `Prefix`.
pub fn classify(raw: &str, allowed: &[MatchRule]) -> Classification {
    let is_allowed = |rule: MatchRule| allowed.contains(&rule);

    if raw.is_empty() {
        return Classification::blank();
    }

    if is_lone_anchor(raw) {
        return Classification {
            rule: MatchRule::Prefix,
            text: raw.to_string(),
            force_prefix: false,
            force_suffix: false,
        };
    }

    let mut text = raw;
    let force_prefix = match text.strip_prefix(START_SYMBOL) {
        Some(rest) => {
            text = rest;
            true
        }
        None => false,
    };
    let force_suffix = match text.strip_suffix([END_SYMBOL, BLANK]) {
        // a lone space is searched for literally
        Some(rest) if raw.chars().count() > 1 => {
            text = rest;
            true
        }
        _ => false,
    };

    if text.is_empty() {
        trace!("query {raw:?} is only anchors, treated as blank");
        return Classification::blank();
    }

    let rule = if has_wildcards(text) && is_allowed(MatchRule::Pattern) {
        MatchRule::Pattern
    } else if text.chars().next().is_some_and(char::is_uppercase) && is_allowed(MatchRule::CamelCase) {
        MatchRule::CamelCase
    } else if force_suffix && is_allowed(MatchRule::Exact) {
        MatchRule::Exact
    } else if !force_prefix && is_allowed(MatchRule::Substring) {
        MatchRule::Substring
    } else {
        MatchRule::Prefix
    };

    trace!("classified {raw:?} as {rule} ({text:?}, prefix: {force_prefix}, suffix: {force_suffix})");

    Classification {
        rule,
        text: text.to_string(),
        force_prefix,
        force_suffix,
    }
}
