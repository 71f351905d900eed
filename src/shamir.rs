//! Shamir secret sharing over GF(256) with a digest share
//!
//! A secret of `n` bytes is shared byte-wise: for every byte position there is one
//! polynomial of degree `threshold - 1`. The polynomial is not built from random
//! coefficients but fixed by `threshold` base points:
//!
//! - `threshold - 2` random points at x = 0, 1, …
//! - the digest share at x = [`DIGEST_INDEX`]
//! - the secret itself at x = [`SECRET_INDEX`]
//!
//! Distributed shares are the polynomial evaluated at x = 0 … `share_count - 1`, so the
//! random base points are handed out as they are. Recovery interpolates both reserved
//! coordinates and refuses to release the secret unless the digest matches.

use std::collections::HashSet;

use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::digest::{create_digest_share, verify_digest_share};
use crate::error::{Error, Result};
use crate::gf256::Gf256;

/// x-coordinate holding the shared secret
pub const SECRET_INDEX: u8 = 255;

/// x-coordinate holding the digest share
pub const DIGEST_INDEX: u8 = 254;

/// Largest threshold and share count supported
pub const MAX_SHARE_COUNT: u8 = 16;

/// Shortest secret the engine shares
pub const MIN_SECRET_LEN: usize = 16;

/// One point per byte position, all sharing the same x-coordinate
#[derive(Clone)]
pub struct Point {
    pub x: u8,
    pub value: Zeroizing<Vec<u8>>,
}

impl Point {
    #[must_use]
    pub fn new(x: u8, value: Zeroizing<Vec<u8>>) -> Self {
        Self { x, value }
    }
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Point")
            .field("x", &self.x)
            .field("value", &format_args!("<{} bytes>", self.value.len()))
            .finish()
    }
}

fn random_bytes<R: RngCore + CryptoRng>(len: usize, rng: &mut R) -> Zeroizing<Vec<u8>> {
    let mut bytes = Zeroizing::new(vec![0u8; len]);
    rng.fill_bytes(&mut bytes);
    bytes
}

/// Splits `secret` into `share_count` points, any `threshold` of which recover it
///
/// The digest share authenticates `secret` itself.
///
/// # Errors
/// See [`split_secret_with_digest`]
pub fn split_secret<R: RngCore + CryptoRng>(
    threshold: u8,
    share_count: u8,
    secret: &[u8],
    rng: &mut R,
) -> Result<Vec<Point>> {
    split_secret_with_digest(threshold, share_count, secret, secret, rng)
}

/// Splits `secret` with a digest share that authenticates `digest_subject`
///
/// `digest_subject` is what [`recover_secret_with`] will be asked to verify after
/// opening the interpolated secret; passing the plaintext behind an encrypted `secret`
/// binds the digest to the decryption key.
///
/// With `threshold == 1` every point carries `secret` unchanged and no digest is made.
///
/// # Errors
/// Returns [`Error::DomainRange`] if `threshold` is 0 or above 16, `share_count` is
/// below `threshold` or above 16, or `secret` is shorter than 16 bytes or of odd length
pub fn split_secret_with_digest<R: RngCore + CryptoRng>(
    threshold: u8,
    share_count: u8,
    secret: &[u8],
    digest_subject: &[u8],
    rng: &mut R,
) -> Result<Vec<Point>> {
    if threshold == 0 || threshold > MAX_SHARE_COUNT {
        return Err(Error::DomainRange(format!(
            "threshold must be between 1 and {MAX_SHARE_COUNT} (got {threshold})"
        )));
    }
    if share_count < threshold || share_count > MAX_SHARE_COUNT {
        return Err(Error::DomainRange(format!(
            "share count must be between {threshold} and {MAX_SHARE_COUNT} (got {share_count})"
        )));
    }
    if secret.len() < MIN_SECRET_LEN || secret.len() % 2 != 0 {
        return Err(Error::DomainRange(format!(
            "secret must be an even number of bytes, at least {MIN_SECRET_LEN} (got {})",
            secret.len()
        )));
    }

    if threshold == 1 {
        return Ok((0..share_count)
            .map(|x| Point::new(x, Zeroizing::new(secret.to_vec())))
            .collect());
    }

    let random_share_count = threshold - 2;
    let mut shares: Vec<Point> = (0..random_share_count)
        .map(|x| Point::new(x, random_bytes(secret.len(), rng)))
        .collect();

    let mut base_points = shares.clone();
    base_points.push(Point::new(
        DIGEST_INDEX,
        create_digest_share(secret.len(), digest_subject, rng)?,
    ));
    base_points.push(Point::new(SECRET_INDEX, Zeroizing::new(secret.to_vec())));

    for x in random_share_count..share_count {
        shares.push(Point::new(x, interpolate(&base_points, x)?));
    }

    Ok(shares)
}

/// Recovers a secret split by [`split_secret`]
///
/// # Errors
/// See [`recover_secret_with`]
pub fn recover_secret(threshold: u8, points: &[Point]) -> Result<Zeroizing<Vec<u8>>> {
    recover_secret_with(threshold, points, |secret| Ok(Zeroizing::new(secret.to_vec())))
}

/// Recovers a secret and releases `open(secret)` only if the digest verifies
///
/// `open` receives the interpolated secret (for instance to decrypt it) and its output
/// is checked against the digest share. On any error nothing derived from the
/// interpolated value is returned.
///
/// With `threshold == 1` the first point is opened directly; there is no digest.
///
/// # Errors
/// - [`Error::DomainRange`] if `threshold` is 0
/// - [`Error::InsufficientShares`] if fewer than `threshold` points are given
/// - [`Error::IncompatibleShare`] if x-coordinates repeat or value lengths differ
/// - [`Error::DigestMismatch`] if the digest does not match the opened secret
/// - any error returned by `open`
pub fn recover_secret_with<F>(
    threshold: u8,
    points: &[Point],
    open: F,
) -> Result<Zeroizing<Vec<u8>>>
where
    F: FnOnce(&[u8]) -> Result<Zeroizing<Vec<u8>>>,
{
    if threshold == 0 {
        return Err(Error::DomainRange("threshold must be at least 1".into()));
    }
    if points.len() < usize::from(threshold) {
        return Err(Error::InsufficientShares {
            needed: usize::from(threshold),
            got: points.len(),
        });
    }

    if threshold == 1 {
        return open(&points[0].value);
    }

    let secret = interpolate(points, SECRET_INDEX)?;
    let digest_share = interpolate(points, DIGEST_INDEX)?;
    let opened = open(&secret)?;
    verify_digest_share(&digest_share, &opened)?;
    Ok(opened)
}

/// Evaluates at `x` the polynomial passing through `points`, byte position by byte position
///
/// # Errors
/// Returns [`Error::IncompatibleShare`] if x-coordinates repeat or value lengths differ,
/// and [`Error::InsufficientShares`] for an empty point set
pub(crate) fn interpolate(points: &[Point], x: u8) -> Result<Zeroizing<Vec<u8>>> {
    let Some(first) = points.first() else {
        return Err(Error::InsufficientShares { needed: 1, got: 0 });
    };

    let len = first.value.len();
    if points.iter().any(|p| p.value.len() != len) {
        return Err(Error::IncompatibleShare(
            "all share values must have the same length".into(),
        ));
    }

    let distinct: HashSet<u8> = points.iter().map(|p| p.x).collect();
    if distinct.len() != points.len() {
        return Err(Error::IncompatibleShare(
            "share x-coordinates must be distinct".into(),
        ));
    }

    if let Some(point) = points.iter().find(|p| p.x == x) {
        return Ok(point.value.clone());
    }

    let target = Gf256::new(x);
    let mut result = Zeroizing::new(vec![0u8; len]);

    for (i, point) in points.iter().enumerate() {
        let xi = Gf256::new(point.x);
        // Lagrange basis polynomial for point i, evaluated at the target
        let mut basis = Gf256::ONE;
        for (j, other) in points.iter().enumerate() {
            if i != j {
                let xj = Gf256::new(other.x);
                basis *= (target - xj) / (xi - xj);
            }
        }

        for (acc, &y) in result.iter_mut().zip(point.value.iter()) {
            *acc = (Gf256::new(*acc) + Gf256::new(y) * basis).value();
        }
    }

    Ok(result)
}
