//! Threshold newtype for member and group thresholds

use crate::error::{Error, Result};

/// Number of shares required to reconstruct (1..=16)
///
/// The upper bound comes from the 4-bit threshold fields of the share header.
/// A threshold of 1 is representable because decoded shares may carry it;
/// splitting policy (see [`SplitConfig`](super::SplitConfig)) still insists on at least 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Threshold(u8);

impl Threshold {
    /// Smallest representable threshold
    pub const MIN: u8 = 1;

    /// Largest representable threshold
    pub const MAX: u8 = 16;

    /// Creates a new threshold
    ///
    /// # Errors
    /// Returns [`Error::DomainRange`] if the value is 0 or greater than 16
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seedsplit::domain::Threshold;
    ///
    /// let threshold = Threshold::new(3).unwrap();
    /// assert_eq!(*threshold, 3);
    ///
    /// assert!(Threshold::new(0).is_err());
    /// assert!(Threshold::new(17).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(Error::DomainRange(format!(
                "threshold must be between {} and {} (got {value})",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for Threshold {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
