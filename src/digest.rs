//! Digest share
//!
//! The digest share is one of the base points of the sharing polynomial. Its value is
//! `HMAC-SHA256(random_part, subject)[..4] || random_part`, where `subject` is the
//! secret the recovering party must end up with. After interpolation the digest is
//! recomputed from the candidate secret; only a match proves that the share set was
//! complete, consistent and (for passphrase-bound digests) opened with the right key.

use hmac::{Hmac, Mac};
use rand::{CryptoRng, RngCore};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Length of the truncated HMAC at the front of the digest share
pub const DIGEST_LENGTH: usize = 4;

type HmacSha256 = Hmac<Sha256>;

fn keyed(random_part: &[u8], subject: &[u8]) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(random_part)
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(subject);
    mac
}

/// Computes the 4-byte digest of `subject` under `random_part`
#[must_use]
pub fn create_digest(random_part: &[u8], subject: &[u8]) -> [u8; DIGEST_LENGTH] {
    let tag = keyed(random_part, subject).finalize().into_bytes();
    let mut digest = [0u8; DIGEST_LENGTH];
    digest.copy_from_slice(&tag[..DIGEST_LENGTH]);
    digest
}

/// Builds a digest share value of `share_len` bytes for `subject`
///
/// # Errors
/// Returns [`Error::DomainRange`] if `share_len` leaves no room for the random part
pub fn create_digest_share<R: RngCore + CryptoRng>(
    share_len: usize,
    subject: &[u8],
    rng: &mut R,
) -> Result<Zeroizing<Vec<u8>>> {
    if share_len <= DIGEST_LENGTH {
        return Err(Error::DomainRange(format!(
            "share length {share_len} is too short for a digest share"
        )));
    }

    let mut random_part = Zeroizing::new(vec![0u8; share_len - DIGEST_LENGTH]);
    rng.fill_bytes(&mut random_part);

    let mut share = Zeroizing::new(Vec::with_capacity(share_len));
    share.extend_from_slice(&create_digest(&random_part, subject));
    share.extend_from_slice(&random_part);
    Ok(share)
}

/// Checks an interpolated digest share against a candidate secret in constant time
///
/// # Errors
/// Returns [`Error::DigestMismatch`] if the digest does not match, including when the
/// digest share is too short to hold one
pub fn verify_digest_share(digest_share: &[u8], subject: &[u8]) -> Result<()> {
    if digest_share.len() <= DIGEST_LENGTH {
        return Err(Error::DigestMismatch);
    }
    let (digest, random_part) = digest_share.split_at(DIGEST_LENGTH);
    keyed(random_part, subject)
        .verify_truncated_left(digest)
        .map_err(|_| Error::DigestMismatch)
}
