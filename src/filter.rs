//! Incremental filtering of a candidate list.
//!
//! While a query is being typed, each keystroke usually narrows the previous one. The filter keeps
//! the last completed run and, when the new pattern is a sub-pattern of it, only re-checks the
//! candidates that matched before.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::subpattern::is_sub_pattern;
use crate::{CompiledPattern, MatchRange};

//==============================================================================
/// Control handle for a filter run.
///
/// Clones share their state, so a handle given to another thread can stop a run in flight.
#[derive(Clone, Default)]
pub struct FilterControl {
    interrupt: Arc<AtomicBool>,
    processed: Arc<AtomicUsize>,
    matched: Arc<AtomicUsize>,
}

impl FilterControl {
    /// Creates a fresh handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of candidates checked so far.
    pub fn get_num_processed(&self) -> usize {
        self.processed.load(Ordering::Relaxed)
    }

    /// Returns the number of candidates that matched so far.
    pub fn get_num_matched(&self) -> usize {
        self.matched.load(Ordering::Relaxed)
    }

    /// Signals the run to stop.
    pub fn kill(&self) {
        self.interrupt.store(true, Ordering::Relaxed);
    }

    /// Returns true if the run was asked to stop.
    pub fn killed(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }

    fn reset_counters(&self) {
        self.processed.store(0, Ordering::Relaxed);
        self.matched.store(0, Ordering::Relaxed);
    }
}

//==============================================================================
/// A matching candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterMatch {
    /// Position of the candidate in the filtered list
    pub index: usize,
    /// Highlighted ranges of the candidate
    pub ranges: Vec<MatchRange>,
}

struct Completed {
    pattern: Arc<CompiledPattern>,
    universe: Universe,
    matches: Vec<FilterMatch>,
}

/// Address and length of the filtered list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Universe(usize, usize);

impl Universe {
    fn of<S>(candidates: &[S]) -> Self {
        Self(candidates.as_ptr() as usize, candidates.len())
    }
}

/// Filters a candidate list, reusing the previous run when the query only got narrower
#[derive(Default)]
pub struct IncrementalFilter {
    last: Option<Completed>,
}

impl IncrementalFilter {
    /// Creates a filter without history
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the last completed run
    ///
    /// A different slice is detected on its own; call this after editing the same list in place.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// The pattern of the last completed run
    pub fn last_pattern(&self) -> Option<&Arc<CompiledPattern>> {
        self.last.as_ref().map(|last| &last.pattern)
    }

    /// Runs `pattern` over `candidates` to completion
    pub fn filter<S>(&mut self, pattern: Arc<CompiledPattern>, candidates: &[S]) -> Vec<FilterMatch>
    where
        S: AsRef<str> + Sync,
    {
        self.run(pattern, candidates, &FilterControl::new()).unwrap_or_default()
    }

    /// Runs `pattern` over `candidates`, returning `None` if `control` was killed
    ///
    /// Matches keep the order of `candidates`. An interrupted run leaves the history untouched.
    pub fn run<S>(
        &mut self,
        pattern: Arc<CompiledPattern>,
        candidates: &[S],
        control: &FilterControl,
    ) -> Option<Vec<FilterMatch>>
    where
        S: AsRef<str> + Sync,
    {
        control.reset_counters();

        let reusable = self
            .last
            .as_ref()
            .filter(|last| last.universe == Universe::of(candidates));

        let matches = match reusable {
            Some(last) if same_pattern(&last.pattern, &pattern) => {
                debug!("filter: same pattern {:?}, reusing {} matches", pattern.raw(), last.matches.len());
                last.matches.clone()
            }
            Some(last) if is_sub_pattern(&last.pattern, &pattern) => {
                debug!(
                    "filter: {:?} narrows {:?}, checking {} of {} candidates",
                    pattern.raw(),
                    last.pattern.raw(),
                    last.matches.len(),
                    candidates.len()
                );
                let indices: Vec<usize> = last.matches.iter().map(|m| m.index).collect();
                match_indices(&pattern, candidates, indices.into_par_iter(), control)?
            }
            _ => {
                debug!("filter: full scan of {} candidates for {:?}", candidates.len(), pattern.raw());
                match_indices(&pattern, candidates, (0..candidates.len()).into_par_iter(), control)?
            }
        };

        trace!("filter stop, total matched: {}", matches.len());
        self.last = Some(Completed {
            pattern,
            universe: Universe::of(candidates),
            matches: matches.clone(),
        });
        Some(matches)
    }
}

fn same_pattern(a: &CompiledPattern, b: &CompiledPattern) -> bool {
    a.raw() == b.raw() && a.classification() == b.classification() && a.case_folding() == b.case_folding()
}

fn match_indices<S, I>(
    pattern: &CompiledPattern,
    candidates: &[S],
    indices: I,
    control: &FilterControl,
) -> Option<Vec<FilterMatch>>
where
    S: AsRef<str> + Sync,
    I: IndexedParallelIterator<Item = usize>,
{
    let result: Result<Vec<_>, _> = indices
        .filter_map(|index| {
            control.processed.fetch_add(1, Ordering::Relaxed);
            if control.killed() {
                Some(Err("filter killed"))
            } else {
                pattern.matching_regions(candidates[index].as_ref()).map(|ranges| {
                    control.matched.fetch_add(1, Ordering::Relaxed);
                    Ok(FilterMatch { index, ranges })
                })
            }
        })
        .collect();

    result
        .inspect_err(|e| debug!("{e} after {} candidates", control.get_num_processed()))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchOptions;

    static NAMES: [&str; 8] = [
        "ThisTest.txt",
        "test.txt",
        "This3Test.txt",
        "testing",
        "Tester",
        "abcd",
        "ConfigDialog",
        "tea",
    ];

    fn compile(raw: &str) -> Arc<CompiledPattern> {
        Arc::new(CompiledPattern::new(raw, &SearchOptions::default()))
    }

    fn indices(matches: &[FilterMatch]) -> Vec<usize> {
        matches.iter().map(|m| m.index).collect()
    }

    #[test]
    fn full_scan_keeps_input_order() {
        let mut filter = IncrementalFilter::new();
        let matches = filter.filter(compile("te"), &NAMES);
        assert_eq!(indices(&matches), vec![1, 3, 4, 7]);
        assert_eq!(matches[0].ranges, vec![MatchRange::new(0, 2)]);
    }

    #[test]
    fn narrowing_matches_full_scan() {
        let mut incremental = IncrementalFilter::new();
        for raw in ["t", "te", "tes", "test", "test.", "test.txt<"] {
            let narrowed = incremental.filter(compile(raw), &NAMES);
            let full = IncrementalFilter::new().filter(compile(raw), &NAMES);
            assert_eq!(narrowed, full, "query {raw:?}");
        }
    }

    #[test]
    fn widening_rescans() {
        let mut filter = IncrementalFilter::new();
        assert_eq!(indices(&filter.filter(compile("tes"), &NAMES)), vec![1, 3, 4]);
        assert_eq!(indices(&filter.filter(compile("te"), &NAMES)), vec![1, 3, 4, 7]);
    }

    #[test]
    fn changed_universe_rescans() {
        let mut filter = IncrementalFilter::new();
        filter.filter(compile("te"), &NAMES[..2]);
        assert_eq!(indices(&filter.filter(compile("tes"), &NAMES)), vec![1, 3, 4]);
    }

    #[test]
    fn other_list_of_same_length_rescans() {
        let first = vec!["apple", "zebra"];
        let second = vec!["zoo", "apricot"];
        let mut filter = IncrementalFilter::new();
        assert_eq!(indices(&filter.filter(compile("a"), &first)), vec![0]);
        assert_eq!(
            filter.filter(compile("ap"), &second),
            vec![FilterMatch {
                index: 1,
                ranges: vec![MatchRange::new(0, 2)],
            }]
        );
    }

    #[test]
    fn same_list_narrows() {
        let mut filter = IncrementalFilter::new();
        filter.filter(compile("te"), &NAMES);
        let control = FilterControl::new();
        filter.run(compile("tes"), &NAMES, &control);
        assert_eq!(control.get_num_processed(), 4);
    }

    #[test]
    fn killed_run_returns_none_and_keeps_history() {
        let mut filter = IncrementalFilter::new();
        filter.filter(compile("t"), &NAMES);

        let control = FilterControl::new();
        control.kill();
        assert_eq!(filter.run(compile("te"), &NAMES, &control), None);
        assert_eq!(filter.last_pattern().map(|p| p.raw()), Some("t"));
    }

    #[test]
    fn counters() {
        let mut filter = IncrementalFilter::new();
        let control = FilterControl::new();
        filter.run(compile("T"), &NAMES, &control);
        assert_eq!(control.get_num_processed(), NAMES.len());
        assert_eq!(control.get_num_matched(), 6);
    }
}
