//! `MemberIndex` newtype

use crate::error::{Error, Result};

/// Index of a share within its group (0..=15)
///
/// The member index doubles as the share's x-coordinate during interpolation.
/// Coordinates 254 and 255 are reserved for the digest and the secret and can never
/// be produced by a 4-bit index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberIndex(u8);

impl MemberIndex {
    /// Maximum valid member index
    pub const MAX: u8 = 15;

    /// Creates a new member index
    ///
    /// # Errors
    /// Returns [`Error::DomainRange`] if index does not fit in 4 bits
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seedsplit::domain::MemberIndex;
    ///
    /// let index = MemberIndex::new(0).unwrap();
    /// assert_eq!(*index, 0);
    ///
    /// let max_index = MemberIndex::new(MemberIndex::MAX).unwrap();
    /// assert_eq!(*max_index, 15);
    ///
    /// assert!(MemberIndex::new(16).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::DomainRange(format!(
                "member index maximum is {} (got {value})",
                Self::MAX
            )));
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for MemberIndex {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
