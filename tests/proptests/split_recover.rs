//! Property tests for split/recover workflows

use bip39::Mnemonic;
use quickcheck::{Arbitrary, Gen, QuickCheck};
use quickcheck_macros::quickcheck;
use rand::SeedableRng;
use rand::rngs::StdRng;

use seedsplit::Error;
use seedsplit::commands::{recover_mnemonic, split_mnemonic_with_rng};
use seedsplit::domain::{IterationExponent, Passphrase, ShareCount, SplitConfig, Threshold};
use seedsplit::shamir::{Point, recover_secret, split_secret};

/// Wrapper for valid BIP39 mnemonics of every supported length
#[derive(Clone, Debug)]
struct ValidMnemonic(Mnemonic);

impl Arbitrary for ValidMnemonic {
    fn arbitrary(g: &mut Gen) -> Self {
        let entropy_size = *g
            .choose(&[16usize, 20, 24, 28, 32])
            .unwrap_or_else(|| unreachable!("non-empty slice"));
        let entropy: Vec<u8> = (0..entropy_size).map(|_| u8::arbitrary(g)).collect();

        // Create mnemonic from entropy (this handles checksum automatically)
        let mnemonic = Mnemonic::from_entropy(&entropy).expect("Valid entropy");
        ValidMnemonic(mnemonic)
    }
}

/// Wrapper for valid threshold and share count pairs
#[derive(Clone, Copy, Debug)]
struct ValidShamirParams {
    threshold: u8,
    num_shares: u8,
}

impl Arbitrary for ValidShamirParams {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_shares = (u8::arbitrary(g) % 15) + 2; // 2..=16
        let threshold = (u8::arbitrary(g) % (num_shares - 1)) + 2; // 2..=num_shares

        ValidShamirParams {
            threshold,
            num_shares,
        }
    }
}

/// Wrapper for secrets the sharing engine accepts: even length, 16 to 32 bytes
#[derive(Clone, Debug)]
struct EngineSecret(Vec<u8>);

impl Arbitrary for EngineSecret {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = 16 + 2 * usize::from(u8::arbitrary(g) % 9);
        EngineSecret((0..len).map(|_| u8::arbitrary(g)).collect())
    }
}

/// Deterministic shuffle of `0..count` driven by `seed`
fn shuffled_indices(count: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..count).collect();
    let mut state = seed;
    for i in 0..indices.len() {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        let range = u64::try_from(indices.len() - i).unwrap_or_else(|_| unreachable!());
        let offset = usize::try_from((state >> 33) % range).unwrap_or_else(|_| unreachable!());
        indices.swap(i, i + offset);
    }
    indices
}

fn config(params: ValidShamirParams) -> SplitConfig {
    SplitConfig::new(
        Threshold::new(params.threshold).unwrap(),
        ShareCount::new(params.num_shares).unwrap(),
    )
    .unwrap()
    .with_iteration_exponent(IterationExponent::new(0).unwrap())
}

/// Any threshold-sized subset of engine points restores the secret
#[quickcheck]
fn prop_engine_any_subset_recovers(
    secret: EngineSecret,
    params: ValidShamirParams,
    rng_seed: u64,
    selection_seed: u64,
) -> bool {
    let EngineSecret(secret) = secret;
    let mut rng = StdRng::seed_from_u64(rng_seed);
    let Ok(points) = split_secret(params.threshold, params.num_shares, &secret, &mut rng) else {
        return false;
    };

    let selected: Vec<Point> = shuffled_indices(points.len(), selection_seed)
        .into_iter()
        .take(usize::from(params.threshold))
        .map(|idx| points[idx].clone())
        .collect();

    recover_secret(params.threshold, &selected).is_ok_and(|recovered| *recovered == secret)
}

/// Fewer points than the threshold never yield a secret
#[quickcheck]
fn prop_engine_insufficient_points_fail(
    secret: EngineSecret,
    params: ValidShamirParams,
    rng_seed: u64,
) -> bool {
    let EngineSecret(secret) = secret;
    let mut rng = StdRng::seed_from_u64(rng_seed);
    let Ok(points) = split_secret(params.threshold, params.num_shares, &secret, &mut rng) else {
        return false;
    };

    let insufficient = &points[..usize::from(params.threshold - 1)];
    recover_secret(params.threshold, insufficient)
        == Err(Error::InsufficientShares {
            needed: usize::from(params.threshold),
            got: insufficient.len(),
        })
}

/// Passing too small a threshold is caught by the digest
#[quickcheck]
fn prop_engine_understated_threshold_fails_digest(
    secret: EngineSecret,
    params: ValidShamirParams,
    rng_seed: u64,
) -> bool {
    if params.threshold < 3 {
        return true; // Skip: needs at least two points below the threshold
    }
    let EngineSecret(secret) = secret;
    let mut rng = StdRng::seed_from_u64(rng_seed);
    let Ok(points) = split_secret(params.threshold, params.num_shares, &secret, &mut rng) else {
        return false;
    };

    let claimed = params.threshold - 1;
    recover_secret(claimed, &points[..usize::from(claimed)]) == Err(Error::DigestMismatch)
}

fn split_recover_round_trip(
    mnemonic: ValidMnemonic,
    params: ValidShamirParams,
    rng_seed: u64,
    selection_seed: u64,
) -> bool {
    let ValidMnemonic(mnemonic) = mnemonic;
    let phrase = mnemonic.to_string();
    let passphrase = Passphrase::from("secretphrase");
    let mut rng = StdRng::seed_from_u64(rng_seed);

    let Ok(shares) = split_mnemonic_with_rng(&phrase, &config(params), &passphrase, &mut rng)
    else {
        return false;
    };
    if shares.len() != usize::from(params.num_shares) {
        return false;
    }

    let selected: Vec<&str> = shuffled_indices(shares.len(), selection_seed)
        .into_iter()
        .take(usize::from(params.threshold))
        .map(|idx| shares[idx].as_str())
        .collect();

    recover_mnemonic(&selected, &passphrase).is_ok_and(|recovered| recovered.as_str() == phrase)
}

fn wrong_passphrase_rejected(
    mnemonic: ValidMnemonic,
    params: ValidShamirParams,
    rng_seed: u64,
    suffix: u8,
) -> bool {
    let ValidMnemonic(mnemonic) = mnemonic;
    let mut rng = StdRng::seed_from_u64(rng_seed);
    let Ok(shares) = split_mnemonic_with_rng(
        &mnemonic.to_string(),
        &config(params),
        &Passphrase::from("secretphrase"),
        &mut rng,
    ) else {
        return false;
    };

    let wrong = Passphrase::new(format!("secretphrase{suffix}"));
    let selected: Vec<&str> = shares
        .iter()
        .take(usize::from(params.threshold))
        .map(|share| share.as_str())
        .collect();

    recover_mnemonic(&selected, &wrong) == Err(Error::DigestMismatch)
}

/// Full split/recover through share mnemonics, with a random share selection
///
/// Every case runs the PBKDF2 transform twice, so the case count is kept low.
#[test]
fn prop_split_recover_round_trip() {
    QuickCheck::new().tests(12).quickcheck(
        split_recover_round_trip as fn(ValidMnemonic, ValidShamirParams, u64, u64) -> bool,
    );
}

/// Recovering with any other passphrase reports a digest mismatch
#[test]
fn prop_wrong_passphrase_rejected() {
    QuickCheck::new()
        .tests(12)
        .quickcheck(wrong_passphrase_rejected as fn(ValidMnemonic, ValidShamirParams, u64, u8) -> bool);
}
