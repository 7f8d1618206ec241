//! A module for running a candidate through every base in the range.
//!
//! A candidate is tested in the largest base first. The first base that
//! rejects it moves it forward to the next number that could pass in that
//! base, and the whole range is tried again from the top against the new
//! value. Lower bases are never tested against a value that is about to be
//! replaced.
//!
//! A jump produced by a base always passes that same base, so the retry right
//! after a jump skips it. That is the only state carried between passes.

use crate::base_range::BaseRange;
use crate::digit_test::{DigitScratch, advance_in_place};
use crate::{SearchConfig, SearchResults};
use log::{debug, info, trace};
use malachite::base::num::logic::traits::SignificantBits;
use malachite::natural::Natural;
use std::time::Instant;

/// The result of one pass over the range of bases.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Every base accepted the candidate unchanged.
    Accepted,
    /// This base rejected the candidate and moved it forward.
    Rejected { base: u32 },
}

/// How a run of filter passes over one candidate ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The candidate is written in zeros and ones in every base.
    Accepted,
    /// The candidate grew to the bit limit before anything was accepted.
    Exhausted,
    /// The caller asked to stop.
    Cancelled,
}

/// Run one pass of `candidate` through `bases`, largest base first.
///
/// `skip` is the base that produced the current value on the previous pass,
/// if any. It is known to pass and is not tested again.
pub fn filter_candidate(
    candidate: &mut Natural,
    bases: BaseRange,
    skip: Option<u32>,
    scratch: &mut DigitScratch,
) -> FilterOutcome {
    debug_assert!(
        skip.is_none_or(|base| bases.contains(base)),
        "Skipped base {skip:?} is outside {bases}"
    );
    for base in bases.descending() {
        if skip == Some(base) {
            continue;
        }
        if !advance_in_place(candidate, base, scratch) {
            return FilterOutcome::Rejected { base };
        }
    }
    FilterOutcome::Accepted
}

/// Keep filtering `candidate` until every base accepts it.
///
/// Stops early with [`Advance::Exhausted`] once the candidate has
/// `bit_limit` bits or more, or with [`Advance::Cancelled`] when `cancelled`
/// returns true for the current value. Every filter pass is added to
/// `checked`.
pub fn advance_candidate<F>(
    candidate: &mut Natural,
    bases: BaseRange,
    bit_limit: Option<u64>,
    scratch: &mut DigitScratch,
    checked: &mut u64,
    mut cancelled: F,
) -> Advance
where
    F: FnMut(&Natural) -> bool,
{
    let mut skip = None;
    loop {
        if bit_limit.is_some_and(|limit| candidate.significant_bits() >= limit) {
            return Advance::Exhausted;
        }
        if cancelled(candidate) {
            return Advance::Cancelled;
        }
        *checked += 1;
        match filter_candidate(candidate, bases, skip, scratch) {
            FilterOutcome::Accepted => return Advance::Accepted,
            FilterOutcome::Rejected { base } => {
                trace!("Base {base} moved candidate to {candidate}");
                skip = Some(base);
            }
        }
    }
}

/// Search upwards from 10^`start_log10` on the current thread.
#[must_use]
pub fn search_sequential(config: &SearchConfig) -> SearchResults {
    search_sequential_from(config.start_number(), config.bases, config.max_bits)
}

/// Search upwards from `start` on the current thread, stopping after
/// candidates with `max_bits` bits if a bound is given.
#[must_use]
pub fn search_sequential_from(
    start: Natural,
    bases: BaseRange,
    max_bits: Option<u64>,
) -> SearchResults {
    let start_time = Instant::now();
    let mut scratch = DigitScratch::default();
    let mut candidate = start;
    let mut candidates_checked = 0u64;

    debug!("Sequential search over bases {bases} starting at {candidate}");
    let outcome = advance_candidate(
        &mut candidate,
        bases,
        max_bits.map(|bits| bits + 1),
        &mut scratch,
        &mut candidates_checked,
        |_| false,
    );

    let answer = match outcome {
        Advance::Accepted => {
            info!("Found {candidate} after checking {candidates_checked} candidates");
            Some(candidate)
        }
        Advance::Exhausted | Advance::Cancelled => {
            info!("No answer below the bit limit after checking {candidates_checked} candidates");
            None
        }
    };

    SearchResults {
        answer,
        candidates_checked,
        ranges_claimed: 0,
        elapsed_secs: start_time.elapsed().as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digit_test::is_zero_one_in_base;

    fn bases(min_base: u32, max_base: u32) -> BaseRange {
        BaseRange::new(min_base, max_base).unwrap()
    }

    #[test_log::test]
    fn test_filter_accepts_82000() {
        let mut scratch = DigitScratch::default();
        let mut candidate = Natural::from(82000u32);
        assert_eq!(
            filter_candidate(&mut candidate, bases(3, 5), None, &mut scratch),
            FilterOutcome::Accepted
        );
        assert_eq!(candidate, Natural::from(82000u32));
    }

    #[test_log::test]
    fn test_filter_stops_at_first_rejection() {
        let mut scratch = DigitScratch::default();
        // 81998 fails base 5 first and jumps to 82000, base 4 and 3 are not tried
        let mut candidate = Natural::from(81998u32);
        assert_eq!(
            filter_candidate(&mut candidate, bases(3, 5), None, &mut scratch),
            FilterOutcome::Rejected { base: 5 }
        );
        assert_eq!(candidate, Natural::from(82000u32));
    }

    #[test_log::test]
    fn test_filter_skips_the_base_that_jumped() {
        let mut scratch = DigitScratch::default();
        // 256 is 2011 in base 5, but base 5 is skipped so only 4 and 3 run
        let mut candidate = Natural::from(256u32);
        assert_eq!(
            filter_candidate(&mut candidate, bases(3, 5), Some(5), &mut scratch),
            FilterOutcome::Accepted
        );
        assert_eq!(candidate, Natural::from(256u32));
    }

    #[test_log::test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside")]
    fn test_filter_rejects_skip_outside_range() {
        let mut scratch = DigitScratch::default();
        let mut candidate = Natural::from(256u32);
        let _ = filter_candidate(&mut candidate, bases(3, 5), Some(7), &mut scratch);
    }

    #[test_log::test]
    fn test_advance_finds_82000() {
        let mut scratch = DigitScratch::default();
        let mut candidate = Natural::from(10u32);
        let mut checked = 0;
        let outcome = advance_candidate(
            &mut candidate,
            bases(3, 5),
            None,
            &mut scratch,
            &mut checked,
            |_| false,
        );
        assert_eq!(outcome, Advance::Accepted);
        assert_eq!(candidate, Natural::from(82000u32));
        assert!(checked > 1);
    }

    #[test_log::test]
    fn test_advance_is_strictly_increasing_and_never_skips() {
        let range = bases(3, 5);
        let mut scratch = DigitScratch::default();
        let mut candidate = Natural::from(10u32);
        let mut previous = candidate.clone();
        let mut skip = None;
        loop {
            match filter_candidate(&mut candidate, range, skip, &mut scratch) {
                FilterOutcome::Accepted => break,
                FilterOutcome::Rejected { base } => {
                    assert!(candidate > previous);
                    assert!(candidate <= 82000u32);
                    previous = candidate.clone();
                    skip = Some(base);
                }
            }
        }
        assert_eq!(candidate, Natural::from(82000u32));
    }

    #[test_log::test]
    fn test_advance_respects_bit_limit() {
        let mut scratch = DigitScratch::default();
        let mut candidate = Natural::from(10u32);
        let mut checked = 0;
        // 82000 has 17 bits, so a 16 bit limit stops short of it
        let outcome = advance_candidate(
            &mut candidate,
            bases(3, 5),
            Some(16),
            &mut scratch,
            &mut checked,
            |_| false,
        );
        assert_eq!(outcome, Advance::Exhausted);
        assert!(candidate.significant_bits() >= 16);
    }

    #[test_log::test]
    fn test_advance_can_be_cancelled() {
        let mut scratch = DigitScratch::default();
        let mut candidate = Natural::from(10u32);
        let mut checked = 0;
        let outcome = advance_candidate(
            &mut candidate,
            bases(3, 5),
            None,
            &mut scratch,
            &mut checked,
            |c| *c > 1000u32,
        );
        assert_eq!(outcome, Advance::Cancelled);
        assert!(candidate > 1000u32);
        assert!(candidate < 82000u32);
    }

    #[test_log::test]
    fn test_sequential_search() {
        let config = SearchConfig {
            threads: 1,
            ..SearchConfig::default()
        };
        let results = search_sequential(&config);
        assert_eq!(results.answer, Some(Natural::from(82000u32)));
        assert_eq!(results.ranges_claimed, 0);
        assert!(results.candidates_checked > 0);
    }

    #[test_log::test]
    fn test_sequential_search_bounded() {
        let results = search_sequential_from(Natural::from(10u32), bases(3, 5), Some(16));
        assert_eq!(results.answer, None);
    }

    #[test_log::test]
    fn test_sequential_matches_brute_force() {
        // Brute force the smallest number above 1 in zeros and ones for bases 2..=4
        let brute = (2u32..)
            .find(|&v| (2..=4).all(|b| is_zero_one_in_base(&Natural::from(v), b)))
            .unwrap();
        let results = search_sequential_from(Natural::from(2u32), bases(2, 4), None);
        assert_eq!(results.answer, Some(Natural::from(brute)));
    }
}
