use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::subpattern::is_sub_pattern;
use crate::{CompiledPattern, MatchRange, MatchRule, SearchOptions};

/// A mutable search pattern, as held by a quick-open style list
///
/// The current query can be replaced from one thread while others keep matching candidates:
/// every read observes either the old or the new compiled pattern, never a mix of both.
pub struct SearchPattern {
    options: SearchOptions,
    current: ArcSwap<CompiledPattern>,
}

impl SearchPattern {
    /// Creates an empty (blank) pattern with the given options
    pub fn new(options: SearchOptions) -> Self {
        let current = ArcSwap::from_pointee(CompiledPattern::new("", &options));
        Self { options, current }
    }

    /// The options patterns are compiled with
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Replaces the query
    pub fn set_pattern(&self, raw: &str) {
        let compiled = CompiledPattern::new(raw, &self.options);
        debug!("set pattern: {compiled}");
        self.current.store(Arc::new(compiled));
    }

    /// The query with its anchors stripped
    pub fn pattern(&self) -> String {
        self.current.load().text().to_string()
    }

    /// The query as typed
    pub fn raw_pattern(&self) -> String {
        self.current.load().raw().to_string()
    }

    /// The rule inferred from the current query
    pub fn match_rule(&self) -> MatchRule {
        self.current.load().rule()
    }

    /// Returns true if the candidate matches, false for a missing candidate
    pub fn matches(&self, candidate: Option<&str>) -> bool {
        candidate.is_some_and(|c| self.current.load().matches(c))
    }

    /// Returns the highlight ranges of the candidate, empty when it does not match
    pub fn matching_regions(&self, candidate: Option<&str>) -> Vec<MatchRange> {
        candidate
            .and_then(|c| self.current.load().matching_regions(c))
            .unwrap_or_default()
    }

    /// Returns true if `other` only narrows the result set of this pattern
    pub fn is_sub_pattern(&self, other: &SearchPattern) -> bool {
        is_sub_pattern(&self.current.load(), &other.current.load())
    }

    /// Returns true if both patterns have the same raw query and rule
    pub fn equals_pattern(&self, other: &SearchPattern) -> bool {
        let (this, other) = (self.current.load(), other.current.load());
        this.raw() == other.raw() && this.rule() == other.rule()
    }

    /// The current compiled pattern, for matching without further synchronisation
    pub fn snapshot(&self) -> Arc<CompiledPattern> {
        self.current.load_full()
    }
}

impl Default for SearchPattern {
    fn default() -> Self {
        Self::new(SearchOptions::default())
    }
}

impl Debug for SearchPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchPattern")
            .field("options", &self.options)
            .field("current", &self.current.load_full())
            .finish()
    }
}
