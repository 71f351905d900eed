//! Domain types for seed splitting
//!
//! Validated newtypes and configuration used across the codecs and the sharing engine:
//! - [`Threshold`] - Shares required for reconstruction (1..=16)
//! - [`ShareCount`] - Number of shares or groups (1..=16)
//! - [`MemberIndex`] - Position of a share in its group (0..=15)
//! - [`Identifier`] - Random 15-bit split identifier
//! - [`IterationExponent`] - Passphrase transform cost (0..=15)
//! - [`Passphrase`] - Transform key material
//! - [`MasterSecret`] - Seed entropy (128..=256 bits)
//! - [`SplitConfig`] - Validated threshold and share count pair plus transform options
//! - [`Share`], [`ShareHeader`], [`SplitParameters`] - A decoded or generated share

mod config;
mod identifier;
mod iteration_exponent;
mod master_secret;
mod member_index;
mod passphrase;
mod share;
mod share_count;
mod threshold;

pub use config::SplitConfig;
pub use identifier::Identifier;
pub use iteration_exponent::IterationExponent;
pub use master_secret::MasterSecret;
pub use member_index::MemberIndex;
pub use passphrase::Passphrase;
pub use share::{Share, ShareHeader, SplitParameters};
pub use share_count::ShareCount;
pub use threshold::Threshold;
