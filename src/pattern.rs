//! Compiled search patterns.

use std::fmt::{Debug, Display, Formatter};

use crate::classify::{classify, is_lone_anchor};
use crate::engine::factory::RuleEngineFactory;
use crate::{CaseFolding, Classification, MatchEngine, MatchRange, MatchRule, SearchOptions};

/// An immutable, ready-to-match query
///
/// Built once per query and never mutated afterwards, so one compiled pattern can be shared by
/// any number of threads filtering candidates at the same time.
pub struct CompiledPattern {
    raw: String,
    classification: Classification,
    case: CaseFolding,
    engine: Box<dyn MatchEngine>,
}

impl CompiledPattern {
    /// Classifies and compiles `raw` with the given options
    pub fn new(raw: &str, options: &SearchOptions) -> Self {
        let allowed: Vec<MatchRule> = MatchRule::ALL.into_iter().filter(|r| options.allows(*r)).collect();
        let classification = classify(raw, &allowed);
        let engine = RuleEngineFactory::builder()
            .case(options.case_folding)
            .build()
            .create_engine(&classification);
        Self {
            raw: raw.to_string(),
            classification,
            case: options.case_folding,
            engine,
        }
    }

    /// The query as typed
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The query with its anchors stripped
    pub fn text(&self) -> &str {
        &self.classification.text
    }

    /// The inferred rule
    pub fn rule(&self) -> MatchRule {
        self.classification.rule
    }

    /// The full classification
    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// The case folding the pattern was compiled with
    pub fn case_folding(&self) -> CaseFolding {
        self.case
    }

    /// Returns true if the raw query is a lone `<` or `>`
    pub fn is_lone_anchor(&self) -> bool {
        is_lone_anchor(&self.raw)
    }

    /// Returns true if the candidate matches
    pub fn matches(&self, candidate: &str) -> bool {
        self.engine.matches(candidate)
    }

    /// Returns the highlight ranges of a matching candidate, `None` otherwise
    pub fn matching_regions(&self, candidate: &str) -> Option<Vec<MatchRange>> {
        self.engine.matching_regions(candidate)
    }
}

impl Default for CompiledPattern {
    fn default() -> Self {
        Self::new("", &SearchOptions::default())
    }
}

impl Display for CompiledPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} => {}", self.raw, self.engine)
    }
}

impl Debug for CompiledPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("raw", &self.raw)
            .field("classification", &self.classification)
            .field("case", &self.case)
            .finish_non_exhaustive()
    }
}
