use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, info};

use crate::cipher;
use crate::codec::{ShareMnemonic, encode_share};
use crate::domain::{
    Identifier, MasterSecret, MemberIndex, Passphrase, Share, ShareCount, ShareHeader,
    SplitConfig, SplitParameters, Threshold,
};
use crate::error::{Error, Result};
use crate::recovery::RecoveryState;
use crate::seed::{SeedMnemonic, decode_mnemonic, encode_entropy};
use crate::shamir::{split_secret, split_secret_with_digest};

/// Checks the passphrase policy of the command surface: non-empty, printable ASCII
fn check_split_passphrase(passphrase: &Passphrase) -> Result<()> {
    if passphrase.is_empty() {
        return Err(Error::InvalidFormat("passphrase must not be empty".into()));
    }
    passphrase.ensure_printable_ascii()
}

/// Split a master secret into shares of one group
///
/// The secret is encrypted under `passphrase`, shared as a single 1-of-1 group and then
/// split `threshold`-of-`share_count` among the members. The digest share authenticates
/// the plaintext secret, so recovery with a wrong passphrase fails the digest check.
///
/// # Errors
/// Returns an error if encryption or sharing rejects its input; with a validated
/// [`SplitConfig`] and [`MasterSecret`] this does not happen.
pub fn generate_shares<R: RngCore + CryptoRng>(
    secret: &MasterSecret,
    config: &SplitConfig,
    passphrase: &Passphrase,
    rng: &mut R,
) -> Result<Vec<Share>> {
    let identifier = Identifier::random(rng);
    let parameters = SplitParameters {
        identifier,
        extendable: config.extendable(),
        iteration_exponent: config.iteration_exponent(),
        group_threshold: Threshold::new(1)?,
        group_count: ShareCount::new(1)?,
    };
    debug!(
        identifier = *identifier,
        iteration_exponent = *parameters.iteration_exponent,
        extendable = parameters.extendable,
        "encrypting master secret"
    );

    let encrypted = cipher::encrypt(
        secret.as_bytes(),
        passphrase,
        parameters.iteration_exponent,
        identifier,
        parameters.extendable,
    )?;

    let groups = split_secret(1, 1, &encrypted, rng)?;
    let group_index = MemberIndex::new(0)?;
    let threshold = *config.threshold();

    let mut shares = Vec::with_capacity(usize::from(*config.share_count()));
    for group in &groups {
        let members = split_secret_with_digest(
            threshold,
            *config.share_count(),
            &group.value,
            secret.as_bytes(),
            rng,
        )?;
        for member in members {
            let header = ShareHeader::new(
                parameters,
                group_index,
                MemberIndex::new(member.x)?,
                config.threshold(),
            )?;
            shares.push(Share::new(header, member.value)?);
        }
    }

    Ok(shares)
}

/// Split a seed phrase into share mnemonics using the operating system's RNG
///
/// # Errors
/// See [`split_mnemonic_with_rng`]
pub fn split_mnemonic(
    mnemonic: &str,
    config: &SplitConfig,
    passphrase: &Passphrase,
) -> Result<Vec<ShareMnemonic>> {
    split_mnemonic_with_rng(mnemonic, config, passphrase, &mut OsRng)
}

/// Split a seed phrase into share mnemonics
///
/// The seed phrase and passphrase are validated before any sharing computation.
///
/// # Errors
/// - [`Error::InvalidFormat`] for an unknown word, a wrong word count, or an empty or
///   non-printable passphrase
/// - [`Error::Checksum`] if the seed phrase checksum does not match
pub fn split_mnemonic_with_rng<R: RngCore + CryptoRng>(
    mnemonic: &str,
    config: &SplitConfig,
    passphrase: &Passphrase,
    rng: &mut R,
) -> Result<Vec<ShareMnemonic>> {
    let secret = decode_mnemonic(mnemonic)?;
    check_split_passphrase(passphrase)?;

    info!(
        threshold = *config.threshold(),
        share_count = *config.share_count(),
        secret_bits = secret.len() * 8,
        "splitting seed phrase"
    );
    let shares = generate_shares(&secret, config, passphrase, rng)?;
    Ok(shares.iter().map(encode_share).collect())
}

/// Recover a seed phrase from share mnemonics
///
/// Shares are accepted in order; the first share that fails to decode or does not fit
/// the others aborts the recovery.
///
/// # Errors
/// - [`Error::InvalidFormat`] for an empty passphrase or a malformed share
/// - [`Error::Checksum`], [`Error::IncompatibleShare`], [`Error::DomainRange`] from
///   share validation
/// - [`Error::InsufficientShares`] if fewer shares than the threshold were given
/// - [`Error::DigestMismatch`] for a wrong passphrase or mismatched shares
pub fn recover_mnemonic<S: AsRef<str>>(
    share_mnemonics: &[S],
    passphrase: &Passphrase,
) -> Result<SeedMnemonic> {
    if passphrase.is_empty() {
        return Err(Error::InvalidFormat("passphrase must not be empty".into()));
    }

    let mut state = RecoveryState::new();
    for (position, mnemonic) in share_mnemonics.iter().enumerate() {
        let status = state.add_mnemonic(mnemonic.as_ref()).map_err(|err| {
            debug!(share = position + 1, error = %err, "share rejected");
            err
        })?;
        debug!(share = position + 1, %status, "share added");
    }

    info!(shares = state.shares_collected(), "recovering seed phrase");
    let secret = state.recover(passphrase)?;
    encode_entropy(&secret)
}

/// Parse a list of share mnemonics separated by commas or newlines
///
/// Surrounding quotes and whitespace are stripped and blank entries are skipped.
#[must_use]
pub fn parse_share_list(input: &str) -> Vec<String> {
    input
        .split([',', '\n'])
        .map(|part| part.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
