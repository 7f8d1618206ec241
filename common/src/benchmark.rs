//! A module to generate some basic offline benchmarking searches.

use super::*;

/// Known terms of the sequence: the smallest number above one written in
/// zeros and ones in every base from 2 up to the first value.
/// Base 2 never rejects anything, so these hold for a minimum base of 3 too.
pub const KNOWN_TERMS: [(u32, u32); 4] = [(2, 2), (3, 3), (4, 4), (5, 82000)];

/// Look up the known answer for bases `2..=max_base`, if there is one.
#[must_use]
pub fn known_term(max_base: u32) -> Option<Natural> {
    KNOWN_TERMS
        .iter()
        .find(|(base, _)| *base == max_base)
        .map(|(_, term)| Natural::from(*term))
}

/// Different benchmark strategies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum BenchmarkMode {
    /// Search bases 3 through 5 from 10, which ends at the known answer 82000.
    KnownTerm,
    /// The default benchmark: bases 3 through 6, every candidate up to 48 bits.
    Default,
    /// A large benchmark: bases 3 through 6, every candidate up to 64 bits.
    Large,
}

/// Get a search configuration for testing and performance evaluation.
#[must_use]
pub fn get_benchmark_config(mode: BenchmarkMode, threads: usize) -> SearchConfig {
    let (max_base, max_bits) = match mode {
        BenchmarkMode::KnownTerm => (5, None),
        BenchmarkMode::Default => (6, Some(48)),
        BenchmarkMode::Large => (6, Some(64)),
    };
    SearchConfig {
        bases: BaseRange {
            min_base: 3,
            max_base,
        },
        start_log10: 1,
        bit_window: DEFAULT_BIT_WINDOW,
        threads,
        max_bits,
    }
}

impl fmt::Display for BenchmarkMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
