//! Passphrase keying the secret transform

use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Passphrase bytes fed to the Feistel transform
///
/// An empty passphrase is a defined value, not an absence: shares split with an
/// empty passphrase recover only with an empty passphrase. The bytes are wiped on drop
/// and never printed by `Debug`.
#[derive(Clone, Default)]
pub struct Passphrase(Zeroizing<Vec<u8>>);

impl Passphrase {
    /// Wraps arbitrary passphrase bytes, including the empty passphrase
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Wraps passphrase bytes, rejecting the empty passphrase
    ///
    /// # Errors
    /// Returns [`Error::InvalidFormat`] if `bytes` is empty
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seedsplit::domain::Passphrase;
    ///
    /// assert!(Passphrase::required("secretphrase").is_ok());
    /// assert!(Passphrase::required("").is_err());
    /// ```
    pub fn required(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let passphrase = Self::new(bytes);
        if passphrase.is_empty() {
            return Err(Error::InvalidFormat("passphrase must not be empty".into()));
        }
        Ok(passphrase)
    }

    /// Checks that every byte is printable ASCII (32..=126)
    ///
    /// # Errors
    /// Returns [`Error::InvalidFormat`] naming the offending position
    pub fn ensure_printable_ascii(&self) -> Result<()> {
        match self.0.iter().position(|b| !(32..=126).contains(b)) {
            Some(pos) => Err(Error::InvalidFormat(format!(
                "passphrase must contain only printable ASCII (byte {pos} is not)"
            ))),
            None => Ok(()),
        }
    }

    /// Gets the raw passphrase bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns true for the empty passphrase
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Passphrase {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Passphrase(<redacted>)")
    }
}
