//! Console progress for range claims.
//!
//! Each worker prints one line when it claims a new range:
//! `<decimal digits> <binary digits> <elapsed seconds> <candidates checked in its last range>`.
//! Lines are written to stdout (or any other writer) under a console lock so
//! they never interleave.

use crate::natural_ops::decimal_digit_count;
use log::{debug, warn};
use malachite::natural::Natural;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// One line of progress output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressLine {
    pub decimal_digits: usize,
    pub binary_digits: u64,
    pub elapsed_secs: u64,
    pub candidates_checked: u64,
}

impl fmt::Display for ProgressLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.decimal_digits, self.binary_digits, self.elapsed_secs, self.candidates_checked
        )
    }
}

/// Shared progress printer, one per search run.
pub struct ProgressReporter {
    start: Instant,
    quiet: bool,
    console: Mutex<Box<dyn Write + Send>>,
}

impl fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("start", &self.start)
            .field("quiet", &self.quiet)
            .finish_non_exhaustive()
    }
}

impl ProgressReporter {
    /// A reporter that prints to stdout.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self::with_writer(quiet, io::stdout())
    }

    /// A reporter that writes its lines to `writer` instead of stdout.
    #[must_use]
    pub fn with_writer<W>(quiet: bool, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            start: Instant::now(),
            quiet,
            console: Mutex::new(Box::new(writer)),
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Build the progress line for a worker that just claimed a range
    /// starting at `first_candidate`.
    #[must_use]
    pub fn line_for_claim(
        &self,
        first_candidate: &Natural,
        start_bits: u64,
        last_range_checked: u64,
    ) -> ProgressLine {
        ProgressLine {
            decimal_digits: decimal_digit_count(first_candidate),
            binary_digits: start_bits,
            elapsed_secs: self.elapsed().as_secs(),
            candidates_checked: last_range_checked,
        }
    }

    /// Print a progress line for a new range claim unless we're quiet.
    pub fn range_claimed(&self, first_candidate: &Natural, start_bits: u64, last_range_checked: u64) {
        if self.quiet {
            debug!("Claimed range at {start_bits} bits after checking {last_range_checked}");
            return;
        }
        let line = self.line_for_claim(first_candidate, start_bits, last_range_checked);
        let mut console = self.console.lock().unwrap_or_else(PoisonError::into_inner);
        // Progress is best effort, a closed console shouldn't stop the search
        if let Err(e) = writeln!(console, "{line}").and_then(|()| console.flush()) {
            warn!("Failed to write progress line: {e}");
        }
    }
}
