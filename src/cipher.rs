//! Passphrase transform of the master secret
//!
//! A four-round Feistel network whose round function is PBKDF2-HMAC-SHA256. The secret
//! is split into halves `L || R`; each round computes
//! `F = PBKDF2(password = [round] || passphrase, salt = S || R, iterations, len = |R|)`
//! and replaces `(L, R)` with `(R, L ^ F)`. The output is `R || L`. Decryption runs the
//! same network with the round indices reversed.
//!
//! The salt prefix `S` is `"shamir" || identifier` for non-extendable shares and empty
//! for extendable ones, so extendable splits of the same secret and passphrase produce
//! the same ciphertext whatever their identifier.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::domain::{Identifier, IterationExponent, Passphrase};
use crate::error::{Error, Result};

/// PBKDF2 iterations across all rounds at exponent 0
pub const BASE_ITERATION_COUNT: u32 = 10_000;

/// Number of Feistel rounds
pub const ROUND_COUNT: u8 = 4;

const CUSTOMIZATION_STRING: &[u8] = b"shamir";

/// Salt prefix for the given identifier and extendable flag
fn salt_prefix(identifier: Identifier, extendable: bool) -> Vec<u8> {
    if extendable {
        return Vec::new();
    }
    let mut prefix = CUSTOMIZATION_STRING.to_vec();
    prefix.extend_from_slice(&identifier.to_be_bytes());
    prefix
}

fn round_function(
    round: u8,
    passphrase: &Passphrase,
    iterations: u32,
    salt_prefix: &[u8],
    right: &[u8],
) -> Zeroizing<Vec<u8>> {
    let mut password = Zeroizing::new(Vec::with_capacity(passphrase.as_bytes().len() + 1));
    password.push(round);
    password.extend_from_slice(passphrase.as_bytes());

    let mut salt = Vec::with_capacity(salt_prefix.len() + right.len());
    salt.extend_from_slice(salt_prefix);
    salt.extend_from_slice(right);

    let mut output = Zeroizing::new(vec![0u8; right.len()]);
    pbkdf2_hmac::<Sha256>(&password, &salt, iterations, &mut output);
    output
}

fn feistel(
    input: &[u8],
    passphrase: &Passphrase,
    iteration_exponent: IterationExponent,
    identifier: Identifier,
    extendable: bool,
    rounds: impl Iterator<Item = u8>,
) -> Result<Zeroizing<Vec<u8>>> {
    if input.is_empty() || input.len() % 2 != 0 {
        return Err(Error::DomainRange(format!(
            "secret to transform must have a non-zero even length (got {})",
            input.len()
        )));
    }

    let iterations = (BASE_ITERATION_COUNT / u32::from(ROUND_COUNT)) << *iteration_exponent;
    let prefix = salt_prefix(identifier, extendable);
    let half = input.len() / 2;
    let mut left = Zeroizing::new(input[..half].to_vec());
    let mut right = Zeroizing::new(input[half..].to_vec());

    for round in rounds {
        let f = round_function(round, passphrase, iterations, &prefix, &right);
        for (l, f) in left.iter_mut().zip(f.iter()) {
            *l ^= f;
        }
        std::mem::swap(&mut left, &mut right);
    }

    let mut output = Zeroizing::new(Vec::with_capacity(input.len()));
    output.extend_from_slice(&right);
    output.extend_from_slice(&left);
    Ok(output)
}

/// Encrypts a master secret under `passphrase`
///
/// # Errors
/// Returns [`Error::DomainRange`] if `master` is empty or of odd length
pub fn encrypt(
    master: &[u8],
    passphrase: &Passphrase,
    iteration_exponent: IterationExponent,
    identifier: Identifier,
    extendable: bool,
) -> Result<Zeroizing<Vec<u8>>> {
    feistel(
        master,
        passphrase,
        iteration_exponent,
        identifier,
        extendable,
        0..ROUND_COUNT,
    )
}

/// Decrypts a value produced by [`encrypt`]
///
/// A wrong passphrase is not detected here; it yields a different plaintext of the
/// same length.
///
/// # Errors
/// Returns [`Error::DomainRange`] if `encrypted` is empty or of odd length
pub fn decrypt(
    encrypted: &[u8],
    passphrase: &Passphrase,
    iteration_exponent: IterationExponent,
    identifier: Identifier,
    extendable: bool,
) -> Result<Zeroizing<Vec<u8>>> {
    feistel(
        encrypted,
        passphrase,
        iteration_exponent,
        identifier,
        extendable,
        (0..ROUND_COUNT).rev(),
    )
}
