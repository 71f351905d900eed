//! Split a BIP-39 seed phrase into passphrase-protected Shamir share mnemonics
//!
//! The seed entropy is encrypted with a passphrase-keyed Feistel network, split over
//! GF(256) with a digest share that authenticates the result, and every share is
//! written as a checksummed mnemonic from a 1024-word list.
//!
//! ```rust
//! use seedsplit::commands::{recover_mnemonic, split_mnemonic};
//! use seedsplit::domain::{IterationExponent, Passphrase, ShareCount, SplitConfig, Threshold};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let seed = "legal winner thank year wave sausage worth useful legal winner thank yellow";
//! let passphrase = Passphrase::from("secretphrase");
//! let config = SplitConfig::new(Threshold::new(2)?, ShareCount::new(3)?)?
//!     .with_iteration_exponent(IterationExponent::new(0)?);
//!
//! let shares = split_mnemonic(seed, &config, &passphrase)?;
//! let recovered = recover_mnemonic(&[shares[0].as_str(), shares[2].as_str()], &passphrase)?;
//! assert_eq!(recovered.as_str(), seed);
//! # Ok(())
//! # }
//! ```

mod bits;

pub mod cipher;
#[cfg(feature = "cli")]
pub mod cli;
pub mod codec;
pub mod commands;
pub mod digest;
pub mod domain;
pub mod error;
pub mod gf256;
pub mod recovery;
pub mod rs1024;
pub mod seed;
pub mod shamir;
pub mod wordlist;

pub use error::{Error, Result};
