use std::fmt::{Display, Error, Formatter};

use regex::{Regex, escape};

use crate::engine::util::{byte_ranges_to_char_ranges, folded_candidate, folded_query, regex_flags};
use crate::{CaseFolding, MatchEngine, MatchRange};

const ANY_STRING: char = '*';
const ANY_CHAR: char = '?';

#[derive(Debug, PartialEq, Eq)]
enum GlobToken<'a> {
    AnyString,
    AnyChar,
    Literal(&'a str),
}

/// Splits a glob into tokens, collapsing runs of `*`
fn tokenize(glob: &str) -> Vec<GlobToken<'_>> {
    let mut tokens = Vec::new();
    let mut literal_start = None;

    for (i, ch) in glob.char_indices() {
        let token = match ch {
            ANY_STRING => GlobToken::AnyString,
            ANY_CHAR => GlobToken::AnyChar,
            _ => {
                literal_start.get_or_insert(i);
                continue;
            }
        };
        if let Some(start) = literal_start.take() {
            tokens.push(GlobToken::Literal(&glob[start..i]));
        }
        if token == GlobToken::AnyString && tokens.last() == Some(&GlobToken::AnyString) {
            continue;
        }
        tokens.push(token);
    }
    if let Some(start) = literal_start {
        tokens.push(GlobToken::Literal(&glob[start..]));
    }
    tokens
}

//------------------------------------------------------------------------------
// Glob engine
//
// `*` matches any run of characters, `?` exactly one, everything else is literal. Unless anchored,
// the glob may start and end anywhere in the candidate.
#[derive(Debug)]
pub struct GlobEngine {
    glob: String,
    query_regex: Option<Regex>,
    case: CaseFolding,
}

impl GlobEngine {
    pub fn builder(glob: &str, anchor_start: bool, anchor_end: bool, case: CaseFolding) -> Self {
        let mut tokens = tokenize(glob);
        if !anchor_start && tokens.first() != Some(&GlobToken::AnyString) {
            tokens.insert(0, GlobToken::AnyString);
        }
        if !anchor_end && tokens.last() != Some(&GlobToken::AnyString) {
            tokens.push(GlobToken::AnyString);
        }

        let mut query_builder = String::from(regex_flags(case));
        query_builder.push('^');
        for token in &tokens {
            match token {
                // lazy, so that literal runs land on their leftmost feasible position
                GlobToken::AnyString => query_builder.push_str(".*?"),
                GlobToken::AnyChar => query_builder.push('.'),
                GlobToken::Literal(run) => {
                    query_builder.push('(');
                    query_builder.push_str(&escape(&folded_query(run, case)));
                    query_builder.push(')');
                }
            }
        }
        query_builder.push('$');

        let query_regex = Regex::new(&query_builder)
            .inspect_err(|e| warn!("could not compile glob {glob:?}: {e}"))
            .ok();

        GlobEngine {
            glob: glob.to_string(),
            query_regex,
            case,
        }
    }

    pub fn build(self) -> Self {
        self
    }
}

impl MatchEngine for GlobEngine {
    fn matches(&self, text: &str) -> bool {
        self.query_regex
            .as_ref()
            .is_some_and(|re| re.is_match(&folded_candidate(text, self.case)))
    }

    fn matching_regions(&self, text: &str) -> Option<Vec<MatchRange>> {
        let re = self.query_regex.as_ref()?;
        let candidate = folded_candidate(text, self.case);
        let captures = re.captures(&candidate)?;
        let byte_ranges: Vec<(usize, usize)> = captures
            .iter()
            .skip(1)
            .flatten()
            .map(|m| (m.start(), m.end()))
            .collect();
        trace!("glob {} matched {text:?} at {byte_ranges:?}", self.glob);
        Some(byte_ranges_to_char_ranges(text, &byte_ranges))
    }
}

impl Display for GlobEngine {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(
            f,
            "(Glob: {})",
            self.query_regex
                .as_ref()
                .map_or("".to_string(), |re| re.as_str().to_string())
        )
    }
}
