//! `ShareCount` newtype

use crate::error::{Error, Result};

/// Number of shares to create (1..=16)
///
/// Member and group counts are stored as 4-bit fields in the share header,
/// which caps a split at 16 shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShareCount(u8);

impl ShareCount {
    /// Minimum valid share count
    pub const MIN: u8 = 1;

    /// Maximum valid share count
    pub const MAX: u8 = 16;

    /// Creates a new share count
    ///
    /// # Errors
    /// Returns [`Error::DomainRange`] if count is 0 or above 16
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seedsplit::domain::ShareCount;
    ///
    /// let count = ShareCount::new(5).unwrap();
    /// assert_eq!(*count, 5);
    ///
    /// let max_count = ShareCount::new(ShareCount::MAX).unwrap();
    /// assert_eq!(*max_count, 16);
    ///
    /// assert!(ShareCount::new(0).is_err());
    /// assert!(ShareCount::new(17).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if value < Self::MIN {
            return Err(Error::DomainRange("share count must be at least 1".into()));
        }
        if value > Self::MAX {
            return Err(Error::DomainRange(format!(
                "share count maximum is {} (got {value})",
                Self::MAX
            )));
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for ShareCount {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
