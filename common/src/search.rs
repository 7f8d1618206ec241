//! The range-partitioned parallel search.
//!
//! The search space is cut up by bit-length. A shared cursor holds the next
//! unclaimed bit-length, and each worker repeatedly claims the next
//! `bit_window` bit-lengths, starting its candidate at the smallest number
//! with that many bits and filtering until the candidate outgrows its range.
//! The very first range shares its bit-length with the configured start, so
//! it begins at the start itself rather than below it.
//! Ranges are contiguous and claimed in increasing order, so nothing is
//! searched twice and nothing is missed.
//!
//! Shared state, each piece behind its own lock, never two at once:
//!  1. the bit cursor, taken for each claim,
//!  2. the best answer so far, taken when a worker finds something,
//!  3. the console, inside [`ProgressReporter`].
//!
//! Cancellation is cooperative. Once any answer is recorded, no more ranges
//! are handed out. A worker already inside an earlier range keeps going until
//! its candidate passes the recorded answer, since it may still find a smaller
//! one. The final answer is always the minimum of everything reported, so the
//! thread count never changes the result.

use crate::candidate_filter::{Advance, advance_candidate};
use crate::digit_test::DigitScratch;
use crate::natural_ops::smallest_with_bits;
use crate::progress::ProgressReporter;
use crate::{SearchConfig, SearchResults};
use anyhow::{Context, Result};
use log::{debug, info, trace};
use malachite::base::num::logic::traits::SignificantBits;
use malachite::natural::Natural;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// A block of bit-lengths claimed by one worker: `start_bits..end_bits`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RangeClaim {
    pub start_bits: u64,
    pub end_bits: u64,
}

impl RangeClaim {
    /// The smallest number in the range that is not below `search_start`.
    #[must_use]
    pub fn first_candidate(&self, search_start: &Natural) -> Natural {
        let smallest = smallest_with_bits(self.start_bits);
        if smallest < *search_start {
            search_start.clone()
        } else {
            smallest
        }
    }
}

/// State shared by every worker in one search run.
#[derive(Debug)]
pub struct SearchState {
    start: Natural,
    cursor: Mutex<u64>,
    answer: Mutex<Option<Natural>>,
    found: AtomicBool,
    ranges_claimed: AtomicU64,
    candidates_checked: AtomicU64,
}

impl SearchState {
    /// Fresh state for a search that begins at `start`.
    #[must_use]
    pub fn new(start: Natural) -> Self {
        let start_bits = start.significant_bits();
        Self {
            start,
            cursor: Mutex::new(start_bits),
            answer: Mutex::new(None),
            found: AtomicBool::new(false),
            ranges_claimed: AtomicU64::new(0),
            candidates_checked: AtomicU64::new(0),
        }
    }

    /// Claim the next `bit_window` bit-lengths.
    ///
    /// Returns None once an answer has been recorded, or once the cursor
    /// passes `max_bits` (candidates with more bits are never searched).
    pub fn claim_range(&self, bit_window: u64, max_bits: Option<u64>) -> Option<RangeClaim> {
        if self.is_found() {
            return None;
        }
        let mut cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        // Checked again under the lock, since every range after a success is larger than it
        if self.is_found() {
            return None;
        }
        let start_bits = *cursor;
        let mut end_bits = start_bits + bit_window;
        if let Some(max_bits) = max_bits {
            if start_bits > max_bits {
                return None;
            }
            end_bits = end_bits.min(max_bits + 1);
        }
        *cursor = end_bits;
        drop(cursor);

        self.ranges_claimed.fetch_add(1, Ordering::Relaxed);
        Some(RangeClaim {
            start_bits,
            end_bits,
        })
    }

    /// Record an accepted candidate, keeping whichever answer is smaller.
    pub fn report_success(&self, candidate: &Natural) {
        let mut answer = self.answer.lock().unwrap_or_else(PoisonError::into_inner);
        match answer.as_ref() {
            Some(existing) if existing <= candidate => {
                debug!("Keeping existing answer {existing} over {candidate}");
            }
            _ => {
                *answer = Some(candidate.clone());
                self.found.store(true, Ordering::Release);
            }
        }
    }

    /// The first number this search considers.
    #[must_use]
    pub fn start(&self) -> &Natural {
        &self.start
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        self.found.load(Ordering::Acquire)
    }

    /// True if a recorded answer makes searching from `candidate` upwards pointless.
    #[must_use]
    pub fn is_settled_at(&self, candidate: &Natural) -> bool {
        if !self.is_found() {
            return false;
        }
        self.answer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|answer| answer <= candidate)
    }

    #[must_use]
    pub fn answer(&self) -> Option<Natural> {
        self.answer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn ranges_claimed(&self) -> u64 {
        self.ranges_claimed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn candidates_checked(&self) -> u64 {
        self.candidates_checked.load(Ordering::Relaxed)
    }
}

/// Per-worker statistics, logged when the worker finishes.
#[derive(Debug, Default, Clone)]
pub struct WorkerStats {
    pub ranges: u64,
    pub candidates_checked: u64,
    pub successes: u64,
}

/// Claim and search ranges until an answer is recorded or the ranges run out.
pub fn run_worker(
    worker_id: usize,
    config: &SearchConfig,
    state: &SearchState,
    reporter: &ProgressReporter,
) -> WorkerStats {
    let mut scratch = DigitScratch::default();
    let mut stats = WorkerStats::default();
    let mut last_range_checked = 0u64;

    while let Some(claim) = state.claim_range(config.bit_window, config.max_bits) {
        let mut candidate = claim.first_candidate(state.start());
        reporter.range_claimed(&candidate, claim.start_bits, last_range_checked);
        trace!(
            "Worker {worker_id} claimed bits {}..{}",
            claim.start_bits, claim.end_bits
        );

        let mut checked = 0u64;
        let outcome = advance_candidate(
            &mut candidate,
            config.bases,
            Some(claim.end_bits),
            &mut scratch,
            &mut checked,
            |c| state.is_settled_at(c),
        );

        stats.ranges += 1;
        stats.candidates_checked += checked;
        state
            .candidates_checked
            .fetch_add(checked, Ordering::Relaxed);
        last_range_checked = checked;

        match outcome {
            Advance::Accepted => {
                info!("Worker {worker_id} found {candidate}");
                stats.successes += 1;
                state.report_success(&candidate);
            }
            Advance::Cancelled => {
                trace!("Worker {worker_id} passed the recorded answer, abandoning its range");
            }
            Advance::Exhausted => {}
        }
    }

    debug!(
        "Worker {} stats: ranges={}, checked={}, successes={}",
        worker_id, stats.ranges, stats.candidates_checked, stats.successes
    );
    stats
}

/// Run the range-partitioned search on `config.threads` worker threads.
///
/// # Errors
/// Returns an error if the configuration is invalid or the worker pool can't be built.
pub fn search_parallel(config: &SearchConfig, reporter: &ProgressReporter) -> Result<SearchResults> {
    config.validate()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .thread_name(|i| format!("zeroone-worker-{i}"))
        .build()
        .context("Failed to build the worker thread pool")?;

    let state = SearchState::new(config.start_number());
    debug!(
        "Parallel search over bases {} from {} ({} bits) with {} threads",
        config.bases,
        state.start(),
        config.start_bits(),
        config.threads
    );

    let start_time = std::time::Instant::now();
    // One worker loop per pool thread
    let worker_stats: Vec<WorkerStats> =
        pool.broadcast(|ctx| run_worker(ctx.index(), config, &state, reporter));

    let total_ranges: u64 = worker_stats.iter().map(|s| s.ranges).sum();
    debug_assert_eq!(total_ranges, state.ranges_claimed());

    Ok(SearchResults {
        answer: state.answer(),
        candidates_checked: state.candidates_checked(),
        ranges_claimed: state.ranges_claimed(),
        elapsed_secs: start_time.elapsed().as_secs_f64(),
    })
}
