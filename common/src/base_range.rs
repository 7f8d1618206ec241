//! A module for the inclusive range of bases every candidate is tested in.

use super::*;
use std::iter::Rev;
use std::ops::RangeInclusive;

/// Smallest base with a positional representation.
pub const MIN_SUPPORTED_BASE: u32 = 2;
/// Largest base we support, matching the usual 0-9a-zA-Z digit alphabet.
pub const MAX_SUPPORTED_BASE: u32 = 62;

/// An inclusive range of bases, `min_base..=max_base`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct BaseRange {
    pub min_base: u32,
    pub max_base: u32,
}

impl BaseRange {
    /// Build a range of bases, checking that it is usable.
    ///
    /// # Errors
    /// Returns an error if the range is empty or leaves the supported bases.
    pub fn new(min_base: u32, max_base: u32) -> Result<Self> {
        let range = Self { min_base, max_base };
        range.validate()?;
        Ok(range)
    }

    /// # Errors
    /// Returns an error if the range is empty or leaves the supported bases.
    pub fn validate(&self) -> Result<()> {
        if self.min_base > self.max_base {
            bail!(
                "Min base must be <= max base, got {} > {}",
                self.min_base,
                self.max_base
            );
        }
        if self.min_base < MIN_SUPPORTED_BASE {
            bail!(
                "Base {} is below the minimum supported base {MIN_SUPPORTED_BASE}",
                self.min_base
            );
        }
        if self.max_base > MAX_SUPPORTED_BASE {
            bail!(
                "Base {} is above the maximum supported base {MAX_SUPPORTED_BASE}",
                self.max_base
            );
        }
        Ok(())
    }

    /// Bases in testing order, largest first.
    /// Higher bases reject far more candidates, so they go first.
    #[must_use]
    pub fn descending(&self) -> Rev<RangeInclusive<u32>> {
        (self.min_base..=self.max_base).rev()
    }

    #[must_use]
    pub fn contains(&self, base: u32) -> bool {
        (self.min_base..=self.max_base).contains(&base)
    }
}

impl fmt::Display for BaseRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}..={}", self.min_base, self.max_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_range_new() {
        assert!(BaseRange::new(3, 5).is_ok());
        assert!(BaseRange::new(2, 2).is_ok());
        assert!(BaseRange::new(2, 62).is_ok());
        assert!(BaseRange::new(5, 3).is_err());
        assert!(BaseRange::new(1, 5).is_err());
        assert!(BaseRange::new(3, 63).is_err());
    }

    #[test]
    fn test_descending() {
        let range = BaseRange::new(3, 6).unwrap();
        assert_eq!(range.descending().collect::<Vec<_>>(), vec![6, 5, 4, 3]);
        assert!(range.contains(3));
        assert!(range.contains(6));
        assert!(!range.contains(2));
        assert!(!range.contains(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(BaseRange::new(3, 5).unwrap().to_string(), "3..=5");
    }
}
