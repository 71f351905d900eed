//! Split identifier

use rand::{CryptoRng, Rng, RngCore};

use crate::error::{Error, Result};

/// Random 15-bit identifier shared by every share of one split
///
/// Keeps shares of unrelated splits from being mixed and salts the passphrase
/// transform of non-extendable shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier(u16);

impl Identifier {
    /// Width of the identifier field in bits
    pub const BITS: u32 = 15;

    /// Largest identifier value
    pub const MAX: u16 = (1 << Self::BITS) - 1;

    /// Creates an identifier from a known value
    ///
    /// # Errors
    /// Returns [`Error::DomainRange`] if the value needs more than 15 bits
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seedsplit::domain::Identifier;
    ///
    /// assert_eq!(*Identifier::new(7945).unwrap(), 7945);
    /// assert!(Identifier::new(0x8000).is_err());
    /// ```
    pub fn new(value: u16) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::DomainRange(format!(
                "identifier must fit in {} bits (got {value})",
                Self::BITS
            )));
        }
        Ok(Self(value))
    }

    /// Draws a uniformly random identifier
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..=Self::MAX))
    }
}

impl std::ops::Deref for Identifier {
    type Target = u16;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
