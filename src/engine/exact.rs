use crate::engine::util::{byte_ranges_to_char_ranges, folded_candidate, folded_query, regex_flags, regex_match};
use crate::{CaseFolding, MatchEngine, MatchRange};
use regex::{Regex, escape};
use std::fmt::{Display, Error, Formatter};

//------------------------------------------------------------------------------
// Exact engine, literal text optionally anchored at either end
//
// prefix + postfix: Exact, prefix: Prefix, postfix: suffix, neither: Substring
#[derive(Debug, Copy, Clone, Default)]
pub struct ExactMatchingParam {
    pub prefix: bool,
    pub postfix: bool,
    pub case: CaseFolding,
}

#[derive(Debug)]
pub struct ExactEngine {
    query: String,
    query_regex: Option<Regex>,
    case: CaseFolding,
}

impl ExactEngine {
    pub fn builder(query: &str, param: ExactMatchingParam) -> Self {
        let mut query_builder = String::from(regex_flags(param.case));

        if param.prefix {
            query_builder.push('^');
        }

        query_builder.push_str(&escape(&folded_query(query, param.case)));

        if param.postfix {
            query_builder.push('$');
        }

        let query_regex = if query.is_empty() {
            None
        } else {
            Regex::new(&query_builder)
                .inspect_err(|e| warn!("could not compile literal query {query:?}: {e}"))
                .ok()
        };

        ExactEngine {
            query: query.to_string(),
            query_regex,
            case: param.case,
        }
    }

    pub fn build(self) -> Self {
        self
    }

    fn find(&self, text: &str) -> Option<(usize, usize)> {
        if self.query.is_empty() {
            return Some((0, 0));
        }
        regex_match(&folded_candidate(text, self.case), &self.query_regex)
    }
}

impl MatchEngine for ExactEngine {
    fn matches(&self, text: &str) -> bool {
        match &self.query_regex {
            Some(re) => re.is_match(&folded_candidate(text, self.case)),
            None => self.query.is_empty(),
        }
    }

    fn matching_regions(&self, text: &str) -> Option<Vec<MatchRange>> {
        let (begin, end) = self.find(text)?;
        Some(byte_ranges_to_char_ranges(text, &[(begin, end)]))
    }
}

impl Display for ExactEngine {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(
            f,
            "(Exact: {})",
            self.query_regex.as_ref().map(|x| x.as_str()).unwrap_or("")
        )
    }
}
