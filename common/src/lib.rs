//! A library with common utilities for finding numbers written only in zeros
//! and ones in every base of a range.
//!
//! The smallest such number above one is known for bases 2 through 5 (82000),
//! but nobody has found one for bases 2 through 6. The search walks upwards
//! through candidates, and every time a candidate has a digit of 2 or more in
//! some base it jumps straight to the next number that could be written in
//! zeros and ones in that base.

pub mod answer_file;
pub mod base_range;
pub mod benchmark;
pub mod candidate_filter;
pub mod natural_ops;
pub mod progress;
pub mod search;

use base_range::BaseRange;

use anyhow::{Result, bail};
use clap::ValueEnum;
use malachite::base::num::logic::traits::SignificantBits;
use malachite::natural::Natural;
use serde::{Serialize, Serializer};
use std::fmt;

pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_MIN_BASE: u32 = 3;
pub const DEFAULT_MAX_BASE: u32 = 5;
/// The search starts at 10^`DEFAULT_START_LOG10`.
pub const DEFAULT_START_LOG10: u32 = 1;
/// Number of bit-lengths handed to a worker per range claim.
pub const DEFAULT_BIT_WINDOW: u64 = 8;
pub const DEFAULT_THREADS: usize = 4;
pub const DEFAULT_ANSWER_FILE: &str = "answer.txt";

const _: () = assert!(DEFAULT_MIN_BASE <= DEFAULT_MAX_BASE, "Min base must be <= max base");
const _: () = assert!(
    DEFAULT_MIN_BASE >= base_range::MIN_SUPPORTED_BASE
        && DEFAULT_MAX_BASE <= base_range::MAX_SUPPORTED_BASE,
    "Default bases must be supported"
);
const _: () = assert!(DEFAULT_START_LOG10 >= 1, "Must start search at 10^1 or above");
const _: () = assert!(DEFAULT_BIT_WINDOW >= 1, "Bit window must be at least one bit");
const _: () = assert!(
    (DEFAULT_MAX_BASE == 5 && DEFAULT_START_LOG10 <= 4) || DEFAULT_MAX_BASE != 5,
    "Start of search is larger than solution for max base"
);

/// Each way the client can run a search.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Serialize)]
pub enum SearchMode {
    /// Workers claim bit-length ranges from a shared cursor.
    Parallel,
    /// A single thread walks upwards from the start.
    Sequential,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Everything a search run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchConfig {
    pub bases: BaseRange,
    /// The search starts at 10^`start_log10`, in both modes.
    pub start_log10: u32,
    pub bit_window: u64,
    pub threads: usize,
    /// Stop after searching every candidate with at most this many bits.
    pub max_bits: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            bases: BaseRange {
                min_base: DEFAULT_MIN_BASE,
                max_base: DEFAULT_MAX_BASE,
            },
            start_log10: DEFAULT_START_LOG10,
            bit_window: DEFAULT_BIT_WINDOW,
            threads: DEFAULT_THREADS,
            max_bits: None,
        }
    }
}

impl SearchConfig {
    /// Reject configurations that can't describe a search.
    ///
    /// # Errors
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        self.bases.validate()?;
        if self.start_log10 == 0 {
            bail!("Must start search at 10^1 or above, got 10^{}", self.start_log10);
        }
        if self.bit_window == 0 {
            bail!("Bit window must be at least one bit");
        }
        if self.threads == 0 {
            bail!("Need at least one worker thread");
        }
        Ok(())
    }

    /// The first number the search should consider.
    #[must_use]
    pub fn start_number(&self) -> Natural {
        natural_ops::power_of(10, u64::from(self.start_log10))
    }

    /// The bit-length the range cursor starts at.
    #[must_use]
    pub fn start_bits(&self) -> u64 {
        self.start_number().significant_bits()
    }
}

/// The compiled results of a search run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    #[serde(serialize_with = "serialize_optional_natural")]
    pub answer: Option<Natural>,
    pub candidates_checked: u64,
    pub ranges_claimed: u64,
    pub elapsed_secs: f64,
}

/// Write a Natural as a decimal string, since JSON numbers can't hold it.
fn serialize_optional_natural<S>(value: &Option<Natural>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(n) => serializer.serialize_some(&n.to_string()),
        None => serializer.serialize_none(),
    }
}
