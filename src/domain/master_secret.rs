//! Master secret newtype

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Entropy of a seed phrase: 128, 160, 192, 224 or 256 bits
///
/// Held in a `Zeroizing` buffer. Equality is constant time and `Debug` prints
/// only the length.
#[derive(Clone)]
pub struct MasterSecret(Zeroizing<Vec<u8>>);

impl MasterSecret {
    /// Accepted secret lengths in bytes
    pub const VALID_LENGTHS: [usize; 5] = [16, 20, 24, 28, 32];

    /// Creates a master secret, taking ownership of the bytes
    ///
    /// # Errors
    /// Returns [`Error::DomainRange`] unless the length is one of [`Self::VALID_LENGTHS`].
    /// The rejected bytes are wiped before returning.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seedsplit::domain::MasterSecret;
    ///
    /// let secret = MasterSecret::new(vec![0x7f; 16]).unwrap();
    /// assert_eq!(secret.len(), 16);
    ///
    /// assert!(MasterSecret::new(vec![0; 18]).is_err());
    /// ```
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        let bytes = Zeroizing::new(bytes);
        if !Self::VALID_LENGTHS.contains(&bytes.len()) {
            return Err(Error::DomainRange(format!(
                "master secret must be 128, 160, 192, 224 or 256 bits (got {} bits)",
                bytes.len() * 8
            )));
        }
        Ok(Self(bytes))
    }

    /// Copies a slice into a new master secret
    ///
    /// # Errors
    /// See [`MasterSecret::new`]
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::new(bytes.to_vec())
    }

    /// Gets the secret bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the secret holds no bytes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for MasterSecret {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && bool::from(self.as_bytes().ct_eq(other.as_bytes()))
    }
}

impl Eq for MasterSecret {}

impl std::fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MasterSecret(<{} bytes>)", self.0.len())
    }
}
