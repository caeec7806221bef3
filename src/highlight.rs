//! Highlight ranges for matched candidates.
//!
//! Engines report which characters of a candidate caused a match as [`MatchRange`]s: character
//! offsets, non-overlapping and strictly increasing. Only the candidate itself is covered; a
//! caller displaying a path or location after the name appends its own range for it.

use crate::{CompiledPattern, MatchRange};

/// Computes the highlight ranges of `candidate` for a compiled pattern.
///
/// Returns an empty list when the candidate does not match.
pub fn highlight(candidate: &str, pattern: &CompiledPattern) -> Vec<MatchRange> {
    pattern.matching_regions(candidate).unwrap_or_default()
}

/// Coalesces sorted character indices into ranges.
///
/// Adjacent indices merge, so a run of matched characters yields one range rather than many.
///
/// ```
/// use quickpat::MatchRange;
/// use quickpat::highlight::indices_to_ranges;
///
/// assert_eq!(
///     indices_to_ranges(&[0, 1, 4, 5, 9]),
///     vec![MatchRange::new(0, 2), MatchRange::new(4, 2), MatchRange::new(9, 1)]
/// );
/// ```
pub fn indices_to_ranges(indices: &[usize]) -> Vec<MatchRange> {
    let mut ranges: Vec<MatchRange> = Vec::new();
    for &idx in indices {
        match ranges.last_mut() {
            Some(last) if last.end() == idx => last.len += 1,
            Some(last) if last.end() > idx => {}
            _ => ranges.push(MatchRange::new(idx, 1)),
        }
    }
    ranges
}

/// Wraps every highlighted range of `text` in `[` `]`
///
/// ```
/// use quickpat::MatchRange;
/// use quickpat::highlight::wrap_matches;
///
/// let ranges = [MatchRange::new(0, 2), MatchRange::new(4, 2)];
/// assert_eq!(wrap_matches("ThisTest.txt", &ranges), "[Th]is[Te]st.txt");
/// ```
pub fn wrap_matches(text: &str, ranges: &[MatchRange]) -> String {
    wrap_matches_with(text, ranges, "[", "]")
}

/// Like [`wrap_matches`], with custom opening and closing markers
pub fn wrap_matches_with(text: &str, ranges: &[MatchRange], open: &str, close: &str) -> String {
    let mut ret = String::with_capacity(text.len() + ranges.len() * (open.len() + close.len()));
    let mut ranges = ranges.iter().peekable();
    let mut inside = false;

    for (idx, ch) in text.chars().enumerate() {
        if inside && ranges.peek().is_some_and(|r| r.end() == idx) {
            ret.push_str(close);
            ranges.next();
            inside = false;
        }
        // skip empty ranges so that the next one can open
        while ranges.peek().is_some_and(|r| r.len == 0) {
            ranges.next();
        }
        if !inside && ranges.peek().is_some_and(|r| r.offset == idx) {
            ret.push_str(open);
            inside = true;
        }
        ret.push(ch);
    }
    if inside {
        ret.push_str(close);
    }
    ret
}
