//! `IterationExponent` newtype

use crate::error::{Error, Result};

/// Cost parameter of the passphrase transform (0..=15)
///
/// Each Feistel round runs `2500 << e` PBKDF2 iterations, so every step up
/// doubles the time both splitting and recovery spend on the passphrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IterationExponent(u8);

impl IterationExponent {
    /// Largest exponent representable in the 4-bit header field
    pub const MAX: u8 = 15;

    /// Creates a new iteration exponent
    ///
    /// # Errors
    /// Returns [`Error::DomainRange`] if the exponent does not fit in 4 bits
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seedsplit::domain::IterationExponent;
    ///
    /// assert_eq!(*IterationExponent::new(1).unwrap(), 1);
    /// assert_eq!(*IterationExponent::default(), 1);
    /// assert!(IterationExponent::new(16).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::DomainRange(format!(
                "iteration exponent maximum is {} (got {value})",
                Self::MAX
            )));
        }
        Ok(Self(value))
    }
}

impl Default for IterationExponent {
    fn default() -> Self {
        Self(1)
    }
}

impl std::ops::Deref for IterationExponent {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
