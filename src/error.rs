//! Error taxonomy for splitting and recovery
//!
//! Every fallible operation in the library returns [`Result`]. Variants describe
//! what went wrong with the *input*; none of them carries secret bytes, so an error
//! can be logged or displayed without leaking key material.

/// Errors produced by the seed codec, the share codec, the sharing engine and recovery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A mnemonic or share checksum did not verify (corrupted or mistyped input).
    #[error("checksum mismatch: {0}")]
    Checksum(String),

    /// Wrong word count, unknown word, bad padding or malformed header fields.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// A share disagrees with previously accepted shares of the same split.
    #[error("incompatible share: {0}")]
    IncompatibleShare(String),

    /// Reconstruction was attempted before enough distinct shares were collected.
    #[error("insufficient shares: need {needed}, got {got}")]
    InsufficientShares { needed: usize, got: usize },

    /// Enough shares were present, but the reconstructed secret failed digest
    /// verification. Wrong passphrase, forged shares and shares from different
    /// splits are deliberately indistinguishable here.
    #[error("digest mismatch: wrong passphrase or invalid set of shares")]
    DigestMismatch,

    /// A length, count or parameter lies outside the supported range.
    #[error("value out of range: {0}")]
    DomainRange(String),

    /// The recovery attempt already finished (successfully or not).
    #[error("recovery already finished")]
    RecoveryClosed,
}

/// Library result alias.
pub type Result<T> = std::result::Result<T, Error>;
