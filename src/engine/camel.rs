//! Camel-case matching.
//!
//! A pattern such as `NuPoEx` is read as a sequence of humps (`Nu`, `Po`, `Ex`), each starting at
//! an upper-case letter or a digit. A candidate matches when every hump lines up with the start of
//! a candidate segment, in order:
//!
//! ```text
//!    pattern = "NPE"
//!    name    = "NullPointerException"  => true
//!    name    = "NoPermissionException" => true
//!    name    = "NewPerfData"           => false, `D` cannot be skipped to reach an `E`
//! ```
//!
//! Segments start at index 0, at every upper-case letter, at a digit following a non-digit and at
//! a letter following a digit. Between humps, anything that is not an upper-case letter may be
//! skipped; digits included. A run of digits in the pattern is a single hump, like in the name.
//!
//! When the strict match fails the engine falls back to a literal match of the whole pattern.

use std::cell::RefCell;
use std::fmt::{Display, Error, Formatter};

use thread_local::ThreadLocal;

use crate::engine::exact::{ExactEngine, ExactMatchingParam};
use crate::highlight::indices_to_ranges;
use crate::{CaseFolding, MatchEngine, MatchRange};

#[inline]
fn is_hump_head(ch: char) -> bool {
    ch.is_uppercase() || ch.is_ascii_digit()
}

#[inline]
fn is_segment_start(name: &[char], idx: usize) -> bool {
    if idx == 0 {
        return true;
    }
    let (prev, ch) = (name[idx - 1], name[idx]);
    ch.is_uppercase()
        || (ch.is_ascii_digit() && !prev.is_ascii_digit())
        || (ch.is_alphabetic() && prev.is_ascii_digit())
}

/// Strict camel-case match of `pattern` against `name`.
///
/// When `positions` is given it receives the matched character indices of `name`, in order.
pub fn camel_case_match(
    pattern: &[char],
    name: &[char],
    force_suffix: bool,
    case: CaseFolding,
    mut positions: Option<&mut Vec<usize>>,
) -> bool {
    let mut record = |idx: usize| {
        if let Some(pos) = positions.as_deref_mut() {
            pos.push(idx);
        }
    };

    if pattern.is_empty() {
        return !force_suffix || name.is_empty();
    }
    if name.is_empty() || !case.eq_char(pattern[0], name[0]) {
        return false;
    }
    record(0);

    let mut i_pattern = 0;
    let mut i_name = 0;
    loop {
        i_pattern += 1;
        i_name += 1;

        if i_pattern == pattern.len() {
            break;
        }
        if i_name == name.len() {
            return false;
        }

        let pattern_char = pattern[i_pattern];
        let head = is_hump_head(pattern_char)
            && !(pattern_char.is_ascii_digit() && pattern[i_pattern - 1].is_ascii_digit());

        // keep going while the current hump continues
        if case.eq_char(pattern_char, name[i_name]) && (!head || is_segment_start(name, i_name)) {
            record(i_name);
            continue;
        }

        // a lower-case pattern character must continue the hump it belongs to
        if !head {
            return false;
        }

        // find the segment where the next hump starts
        loop {
            if i_name == name.len() {
                return false;
            }
            let name_char = name[i_name];
            if is_segment_start(name, i_name) && case.eq_char(pattern_char, name_char) {
                break;
            }
            if name_char.is_uppercase() {
                return false;
            }
            i_name += 1;
        }
        record(i_name);
    }

    !force_suffix || (i_name..name.len()).all(|idx| !is_segment_start(name, idx))
}

//------------------------------------------------------------------------------
// Camel case engine
pub struct CamelCaseEngine {
    query: String,
    pattern: Vec<char>,
    force_suffix: bool,
    case: CaseFolding,
    fallback: ExactEngine,
    name_cache: ThreadLocal<RefCell<Vec<char>>>,
}

impl CamelCaseEngine {
    pub fn builder(query: &str, force_prefix: bool, force_suffix: bool, case: CaseFolding) -> Self {
        let fallback = ExactEngine::builder(
            query,
            ExactMatchingParam {
                prefix: force_prefix,
                postfix: force_suffix,
                case,
            },
        )
        .build();

        Self {
            query: query.to_string(),
            pattern: query.chars().collect(),
            force_suffix,
            case,
            fallback,
            name_cache: ThreadLocal::new(),
        }
    }

    pub fn build(self) -> Self {
        self
    }

    fn strict_match(&self, text: &str, positions: Option<&mut Vec<usize>>) -> bool {
        let mut name = self.name_cache.get_or(|| RefCell::new(Vec::new())).borrow_mut();
        name.clear();
        name.extend(text.chars());
        camel_case_match(&self.pattern, &name, self.force_suffix, self.case, positions)
    }
}

impl MatchEngine for CamelCaseEngine {
    fn matches(&self, text: &str) -> bool {
        self.strict_match(text, None) || self.fallback.matches(text)
    }

    fn matching_regions(&self, text: &str) -> Option<Vec<MatchRange>> {
        let mut positions = Vec::with_capacity(self.pattern.len());
        if self.strict_match(text, Some(&mut positions)) {
            trace!("camel case {} matched {text:?} at {positions:?}", self.query);
            return Some(indices_to_ranges(&positions));
        }
        self.fallback.matching_regions(text)
    }
}

impl Display for CamelCaseEngine {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "(CamelCase: {} | {})", self.query, self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict(pattern: &str, name: &str) -> Option<Vec<usize>> {
        let pattern: Vec<char> = pattern.chars().collect();
        let name: Vec<char> = name.chars().collect();
        let mut positions = Vec::new();
        camel_case_match(&pattern, &name, false, CaseFolding::Unicode, Some(&mut positions)).then_some(positions)
    }

    fn engine(query: &str) -> CamelCaseEngine {
        CamelCaseEngine::builder(query, false, false, CaseFolding::Unicode).build()
    }

    #[test]
    fn initials_match_humps() {
        assert_eq!(strict("NPE", "NullPointerException"), Some(vec![0, 4, 11]));
        assert_eq!(strict("NPE", "NoPermissionException"), Some(vec![0, 2, 12]));
        assert_eq!(strict("NPE", "NewPerfData"), None);
    }

    #[test]
    fn hump_tails_must_follow_their_head() {
        assert!(strict("NuPoEx", "NullPointerException").is_some());
        assert!(strict("NuPoEx", "NoPermissionException").is_none());
    }

    #[test]
    fn consecutive_capitals() {
        assert_eq!(strict("NPE", "NPException"), Some(vec![0, 1, 2]));
    }

    #[test]
    fn first_character_must_match() {
        assert!(strict("CD", "MyConfigDialog").is_none());
        assert!(strict("CD", "ConfigDialog").is_some());
    }

    #[test]
    fn digits_can_be_skipped() {
        assert_eq!(strict("ThT", "This3Test.txt"), Some(vec![0, 1, 5]));
    }

    #[test]
    fn digits_in_pattern_start_a_hump() {
        assert_eq!(strict("Th3T", "This3Test.txt"), Some(vec![0, 1, 4, 5]));
        assert!(strict("Th4T", "This3Test.txt").is_none());
    }

    #[test]
    fn digit_runs_form_one_hump() {
        assert_eq!(strict("Th33T", "This33Test"), Some(vec![0, 1, 4, 5, 6]));
        assert_eq!(strict("Th3T", "This33Test"), Some(vec![0, 1, 4, 6]));
        assert_eq!(strict("Th33T", "This3Test"), None);
    }

    #[test]
    fn force_suffix_rejects_trailing_segments() {
        let pattern: Vec<char> = "TT".chars().collect();
        let this_test: Vec<char> = "ThisTest".chars().collect();
        let this_test_case: Vec<char> = "ThisTestCase".chars().collect();
        assert!(camel_case_match(&pattern, &this_test, true, CaseFolding::Unicode, None));
        assert!(!camel_case_match(&pattern, &this_test_case, true, CaseFolding::Unicode, None));
    }

    #[test]
    fn engine_highlights_humps() {
        let e = engine("TT");
        assert_eq!(
            e.matching_regions("ThisTest.txt"),
            Some(vec![MatchRange::new(0, 1), MatchRange::new(4, 1)])
        );

        let e = engine("ThTe");
        assert_eq!(
            e.matching_regions("ThisTest.txt"),
            Some(vec![MatchRange::new(0, 2), MatchRange::new(4, 2)])
        );
    }

    #[test]
    fn engine_falls_back_to_substring() {
        let e = engine("CD");
        assert!(e.matches("ConfigDialog"));
        assert!(e.matches("abcd"));
        assert!(!e.matches("abc"));
        assert_eq!(e.matching_regions("abcd"), Some(vec![MatchRange::new(2, 2)]));
    }

    #[test]
    fn engine_fallback_respects_anchors() {
        let e = CamelCaseEngine::builder("CD", true, false, CaseFolding::Unicode);
        assert!(e.matches("cdrom"));
        assert!(!e.matches("abcd"));
    }
}
