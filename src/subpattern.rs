use crate::{CompiledPattern, MatchRule};

/// Returns true if every candidate matched by `next` is also matched by `previous`
///
/// Filtering for `next` may then start from the results of `previous` instead of the whole list.
/// The relation is conservative: `false` only means the narrowing cannot be proven.
pub fn is_sub_pattern(previous: &CompiledPattern, next: &CompiledPattern) -> bool {
    if previous.is_lone_anchor() {
        return false;
    }
    if previous.rule() == MatchRule::Blank {
        return true;
    }
    if previous.rule() != next.rule() || previous.case_folding() != next.case_folding() {
        return false;
    }

    let prev = previous.classification();
    let cur = next.classification();
    let case = previous.case_folding();

    // anchors may be added but never dropped
    if (prev.force_prefix && !cur.force_prefix) || (prev.force_suffix && !cur.force_suffix) {
        return false;
    }
    if prev.force_suffix || cur.force_suffix || prev.force_prefix != cur.force_prefix {
        return case.fold(&prev.text) == case.fold(&cur.text);
    }

    match prev.rule {
        MatchRule::Blank => true,
        MatchRule::Exact => case.fold(&prev.text) == case.fold(&cur.text),
        MatchRule::Prefix | MatchRule::Substring => case.fold(&cur.text).starts_with(&case.fold(&prev.text)),
        MatchRule::CamelCase | MatchRule::Pattern => cur.text.starts_with(&prev.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CaseFolding, SearchOptions, SearchOptionsBuilder};

    fn compile(raw: &str) -> CompiledPattern {
        CompiledPattern::new(raw, &SearchOptions::default())
    }

    fn sub(previous: &str, next: &str) -> bool {
        is_sub_pattern(&compile(previous), &compile(next))
    }

    #[test]
    fn longer_prefix_narrows() {
        assert!(sub("a", "ab"));
        assert!(!sub("ab", "a"));
        assert!(!sub("ab", "ac"));
    }

    #[test]
    fn lone_anchor_never_narrows() {
        assert!(!sub(">", ">a"));
        assert!(!sub("<", "<a"));
    }

    #[test]
    fn blank_narrows_to_anything() {
        assert!(sub("", "a"));
        assert!(sub("", "*x"));
        assert!(sub("", "NPE"));
        assert!(sub("><", "a"));
    }

    #[test]
    fn different_rules() {
        assert!(!sub("a", "a*"));
        assert!(!sub("ab", "Ab"));
    }

    #[test]
    fn anchors_require_equal_text() {
        assert!(sub("ab<", "aB<"));
        assert!(!sub("ab<", "abc<"));
        assert!(sub("ab", ">ab"));
        assert!(!sub("ab", ">abc"));
        assert!(sub(">ab", ">abc"));
    }

    #[test]
    fn dropping_an_anchor_widens() {
        assert!(sub("Ab<", ">Ab<"));
        assert!(!sub(">Ab<", "Ab<"));
        assert!(!sub(">a*b", "a*b"));
        assert!(!sub("a*b<", "a*b"));
    }

    #[test]
    fn camel_case_compares_exactly() {
        assert!(sub("N", "NP"));
        assert!(sub("NP", "NPE"));
        assert!(!sub("Np", "NPE"));
    }

    #[test]
    fn pattern_extends() {
        assert!(sub("*a", "*ab"));
        assert!(!sub("*ab", "*a"));
    }

    #[test]
    fn different_case_folding_never_narrows() {
        let ascii = SearchOptionsBuilder::default()
            .case_folding(CaseFolding::Ascii)
            .build()
            .unwrap();
        let prev = CompiledPattern::new("ä", &ascii);
        let next = compile("äb");
        assert!(next.matches("Äb"));
        assert!(!prev.matches("Äb"));
        assert!(!is_sub_pattern(&prev, &next));
        assert!(is_sub_pattern(&prev, &CompiledPattern::new("äb", &ascii)));
    }

    #[test]
    fn substring_extends() {
        let options = SearchOptionsBuilder::default().substring(true).build().unwrap();
        let prev = CompiledPattern::new("ab", &options);
        let next = CompiledPattern::new("abc", &options);
        assert!(is_sub_pattern(&prev, &next));
        assert!(!is_sub_pattern(&next, &prev));
    }
}
