//! BIP-39 seed phrase codec
//!
//! Thin layer over the `bip39` crate that converts master secret entropy to and from
//! the checksummed English word sequence described in [BIP-39], mapping the crate's
//! failures onto [`Error`] and keeping phrases and entropy in zeroizing buffers.
//!
//! ```rust
//! use seedsplit::seed::{decode_mnemonic, encode_entropy};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let phrase = "legal winner thank year wave sausage worth useful legal winner thank yellow";
//! let secret = decode_mnemonic(phrase)?;
//! assert_eq!(secret.as_bytes(), &[0x7f; 16]);
//! assert_eq!(encode_entropy(&secret)?.as_str(), phrase);
//! # Ok(())
//! # }
//! ```
//!
//! [BIP-39]: https://github.com/bitcoin/bips/blob/master/bip-0039.mediawiki

use bip39::{Language, Mnemonic};
use zeroize::Zeroizing;

use crate::domain::MasterSecret;
use crate::error::{Error, Result};

/// A BIP-39 seed phrase produced by [`encode_entropy`]
///
/// Wraps the phrase in `Zeroizing` so it is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SeedMnemonic(Zeroizing<String>);

impl SeedMnemonic {
    /// Gets the phrase as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of words in the phrase
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.0.split(' ').count()
    }
}

impl std::fmt::Display for SeedMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Debug for SeedMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SeedMnemonic(<{} words>)", self.word_count())
    }
}

fn map_bip39_error(err: bip39::Error) -> Error {
    match err {
        bip39::Error::BadWordCount(count) => Error::InvalidFormat(format!(
            "seed phrase must have 12, 15, 18, 21 or 24 words (got {count})"
        )),
        bip39::Error::UnknownWord(idx) => Error::InvalidFormat(format!(
            "word #{} is not in the BIP-39 English wordlist",
            idx + 1
        )),
        bip39::Error::BadEntropyBitCount(bits) => {
            Error::DomainRange(format!("entropy of {bits} bits cannot be encoded"))
        }
        bip39::Error::InvalidChecksum => {
            Error::Checksum("seed phrase checksum does not match".into())
        }
        other => Error::InvalidFormat(other.to_string()),
    }
}

/// Encodes master secret entropy as a seed phrase
///
/// # Errors
/// Returns [`Error::DomainRange`] if the entropy length is rejected by the codec,
/// which [`MasterSecret`] already rules out.
pub fn encode_entropy(secret: &MasterSecret) -> Result<SeedMnemonic> {
    let mnemonic = Mnemonic::from_entropy_in(Language::English, secret.as_bytes())
        .map_err(map_bip39_error)?;

    let mut phrase = Zeroizing::new(String::new());
    for word in mnemonic.words() {
        if !phrase.is_empty() {
            phrase.push(' ');
        }
        phrase.push_str(word);
    }

    Ok(SeedMnemonic(phrase))
}

/// Decodes and validates a seed phrase
///
/// Words are matched case-insensitively and may be separated by any whitespace.
///
/// # Errors
/// - [`Error::InvalidFormat`] if the word count is not 12, 15, 18, 21 or 24, or a word
///   is not in the English wordlist
/// - [`Error::Checksum`] if the embedded checksum does not match the entropy
pub fn decode_mnemonic(phrase: &str) -> Result<MasterSecret> {
    let lowered = Zeroizing::new(phrase.to_lowercase());
    let mnemonic = Mnemonic::parse_in(Language::English, lowered.as_str())
        .map_err(map_bip39_error)?;

    let (entropy, len) = mnemonic.to_entropy_array();
    let entropy = Zeroizing::new(entropy);
    MasterSecret::from_slice(&entropy[..len])
}
