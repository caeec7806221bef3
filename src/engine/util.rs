use std::borrow::Cow;

use regex::Regex;

use crate::{CaseFolding, MatchRange};

/// Returns the text to run a compiled regex against.
///
/// Unicode folding is done by the regex itself with `(?i)`. ASCII folding lowercases the candidate,
/// which keeps every byte offset in place.
pub fn folded_candidate(text: &str, case: CaseFolding) -> Cow<'_, str> {
    match case {
        CaseFolding::Unicode => Cow::Borrowed(text),
        CaseFolding::Ascii if text.bytes().any(|b| b.is_ascii_uppercase()) => Cow::Owned(text.to_ascii_lowercase()),
        CaseFolding::Ascii => Cow::Borrowed(text),
    }
}

/// Prepares a literal query fragment for a regex built with the given folding
pub fn folded_query(query: &str, case: CaseFolding) -> Cow<'_, str> {
    match case {
        CaseFolding::Unicode => Cow::Borrowed(query),
        CaseFolding::Ascii => Cow::Owned(query.to_ascii_lowercase()),
    }
}

/// The inline flags every query regex starts with
pub fn regex_flags(case: CaseFolding) -> &'static str {
    match case {
        CaseFolding::Unicode => "(?si)",
        CaseFolding::Ascii => "(?s)",
    }
}

pub fn regex_match(choice: &str, pattern: &Option<Regex>) -> Option<(usize, usize)> {
    match *pattern {
        Some(ref pat) => {
            let mat = pat.find(choice)?;
            Some((mat.start(), mat.end()))
        }
        None => None,
    }
}

/// Converts sorted, non-overlapping byte ranges of `text` to character ranges.
///
/// Walks the text once, so the cost does not grow with the number of ranges.
pub fn byte_ranges_to_char_ranges(text: &str, byte_ranges: &[(usize, usize)]) -> Vec<MatchRange> {
    let mut ranges = Vec::with_capacity(byte_ranges.len());
    let mut chars = text.char_indices().map(|(byte, _)| byte).enumerate().peekable();

    let mut char_of = |byte: usize| -> usize {
        while let Some(&(char_idx, b)) = chars.peek() {
            if b >= byte {
                return char_idx;
            }
            chars.next();
        }
        // past the last character
        text.chars().count()
    };

    for &(start, end) in byte_ranges {
        let first = char_of(start);
        let last = char_of(end);
        if last > first {
            ranges.push(MatchRange::new(first, last - first));
        }
    }
    ranges
}
