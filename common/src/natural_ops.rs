//! Small helpers on top of malachite's `Natural` that the digit test leans on.

use malachite::base::num::arithmetic::traits::{Pow, PowerOf2};
use malachite::base::num::logic::traits::SignificantBits;
use malachite::natural::Natural;

/// `base^exponent` as a Natural.
#[must_use]
pub fn power_of(base: u32, exponent: u64) -> Natural {
    Natural::from(base).pow(exponent)
}

/// The smallest number with exactly `bits` bits, i.e. `2^(bits-1)`.
/// Zero bits gives one, the smallest positive candidate.
#[must_use]
pub fn smallest_with_bits(bits: u64) -> Natural {
    Natural::power_of_2(bits.saturating_sub(1))
}

/// Roughly the number of digits needed to write `n` in `base`.
///
/// Exact for power-of-two bases. For other bases this comes from the bit
/// length, so it is usually exact and otherwise off by one in either
/// direction; callers that need the true leading place must correct for it.
/// Zero takes one digit.
#[must_use]
pub fn size_in_base(n: &Natural, base: u32) -> u64 {
    debug_assert!(base >= 2, "Base must be at least 2");
    let bits = n.significant_bits();
    if bits == 0 {
        return 1;
    }
    if base.is_power_of_two() {
        return bits.div_ceil(u64::from(base.trailing_zeros()));
    }
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    let digits = (bits as f64 / f64::from(base).log2()).floor() as u64 + 1;
    digits
}

/// Exact number of decimal digits in `n`.
#[must_use]
pub fn decimal_digit_count(n: &Natural) -> usize {
    n.to_string().len()
}
