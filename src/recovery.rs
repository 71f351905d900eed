//! Incremental share collection and reconstruction
//!
//! A [`RecoveryState`] accepts shares one at a time, checks each against the shares
//! already accepted and reconstructs the master secret once one group holds enough
//! members. Every state is one of [`RecoveryStatus`]:
//!
//! ```text
//! Empty -> Collecting -> Ready -> Reconstructed
//!                          \---> Failed
//! ```
//!
//! `Reconstructed` and `Failed` are terminal: the state refuses further use with
//! [`Error::RecoveryClosed`] and a new attempt starts from a fresh state.
//!
//! Shares of a split with several groups are accepted as long as the group threshold
//! is 1, in which case any single complete group reconstructs.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::cipher;
use crate::codec::decode_share;
use crate::domain::{MasterSecret, Passphrase, Share, SplitParameters, Threshold};
use crate::error::{Error, Result};
use crate::shamir::{Point, recover_secret_with};

/// Progress of a recovery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStatus {
    /// No share accepted yet
    Empty,
    /// At least one share accepted, no group complete
    Collecting,
    /// A group holds at least its member threshold of shares
    Ready,
    /// The master secret was recovered
    Reconstructed,
    /// Reconstruction was attempted and failed
    Failed,
}

impl RecoveryStatus {
    /// Whether the attempt is over
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Reconstructed | Self::Failed)
    }
}

impl std::fmt::Display for RecoveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Collecting => "collecting",
            Self::Ready => "ready",
            Self::Reconstructed => "reconstructed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
struct Group {
    member_threshold: Threshold,
    members: BTreeMap<u8, Share>,
}

impl Group {
    fn is_complete(&self) -> bool {
        self.members.len() >= usize::from(*self.member_threshold)
    }

    fn missing(&self) -> usize {
        usize::from(*self.member_threshold).saturating_sub(self.members.len())
    }
}

/// Accumulator of shares for one recovery attempt
///
/// Not synchronized: share it between threads only behind a lock.
#[derive(Debug, Default)]
pub struct RecoveryState {
    parameters: Option<SplitParameters>,
    value_len: usize,
    groups: BTreeMap<u8, Group>,
    outcome: Option<RecoveryStatus>,
}

impl RecoveryState {
    /// Starts an empty recovery attempt
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status
    #[must_use]
    pub fn status(&self) -> RecoveryStatus {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        if self.groups.is_empty() {
            RecoveryStatus::Empty
        } else if self.groups.values().any(Group::is_complete) {
            RecoveryStatus::Ready
        } else {
            RecoveryStatus::Collecting
        }
    }

    /// Parameters shared by every accepted share, once the first one is in
    #[must_use]
    pub fn parameters(&self) -> Option<SplitParameters> {
        self.parameters
    }

    /// Number of distinct shares accepted across all groups
    #[must_use]
    pub fn shares_collected(&self) -> usize {
        self.groups.values().map(|group| group.members.len()).sum()
    }

    /// Shares still missing from the group closest to completion
    ///
    /// `None` until the first share tells how many are needed.
    #[must_use]
    pub fn shares_needed(&self) -> Option<usize> {
        self.groups.values().map(Group::missing).min()
    }

    /// Decodes a share mnemonic and accepts it
    ///
    /// # Errors
    /// Any error of [`decode_share`] or [`RecoveryState::add_share`]
    pub fn add_mnemonic(&mut self, mnemonic: &str) -> Result<RecoveryStatus> {
        if let Some(outcome) = self.outcome {
            debug!(%outcome, "share offered to a closed recovery");
            return Err(Error::RecoveryClosed);
        }
        let share = decode_share(mnemonic)?;
        self.add_share(share)
    }

    /// Accepts a share
    ///
    /// A share whose group and member index were already accepted is ignored when its
    /// data is identical. A rejected share leaves the state unchanged.
    ///
    /// # Errors
    /// - [`Error::RecoveryClosed`] after reconstruction succeeded or failed
    /// - [`Error::DomainRange`] for a group threshold above 1 or a value length that is
    ///   not a seed length
    /// - [`Error::IncompatibleShare`] if the share disagrees with accepted shares on the
    ///   identifier, extendable flag, iteration exponent, group parameters, value
    ///   length or member threshold, or repeats an index with different data
    pub fn add_share(&mut self, share: Share) -> Result<RecoveryStatus> {
        if let Some(outcome) = self.outcome {
            debug!(%outcome, "share offered to a closed recovery");
            return Err(Error::RecoveryClosed);
        }

        let header = *share.header();
        if *header.group_threshold() != 1 {
            return Err(Error::DomainRange(format!(
                "group threshold {} is not supported, only single-group recovery is",
                *header.group_threshold()
            )));
        }
        if !MasterSecret::VALID_LENGTHS.contains(&share.value().len()) {
            return Err(Error::DomainRange(format!(
                "share value of {} bytes does not hold a seed",
                share.value().len()
            )));
        }

        self.check_compatible(&share)?;

        let value_len = share.value().len();
        let group_index = *header.group_index();
        let member_index = *header.member_index();
        let group = self.groups.entry(group_index).or_insert_with(|| Group {
            member_threshold: header.member_threshold(),
            members: BTreeMap::new(),
        });

        match group.members.get(&member_index) {
            Some(existing) if *existing == share => {
                debug!(group_index, member_index, "duplicate share ignored");
            }
            Some(_) => {
                return Err(Error::IncompatibleShare(format!(
                    "share {member_index} of group {group_index} was already given with different data"
                )));
            }
            None => {
                group.members.insert(member_index, share);
                if self.parameters.is_none() {
                    self.parameters = Some(header.parameters());
                    self.value_len = value_len;
                }
            }
        }

        let status = self.status();
        debug!(
            group_index,
            member_index,
            collected = self.shares_collected(),
            %status,
            "share accepted"
        );
        Ok(status)
    }

    fn check_compatible(&self, share: &Share) -> Result<()> {
        let header = share.header();
        let Some(parameters) = self.parameters else {
            return Ok(());
        };

        let incompatible = |what: &str| {
            Err(Error::IncompatibleShare(format!(
                "share {what} differs from previously accepted shares"
            )))
        };
        if header.identifier() != parameters.identifier {
            return incompatible("identifier");
        }
        if header.extendable() != parameters.extendable {
            return incompatible("extendable flag");
        }
        if header.iteration_exponent() != parameters.iteration_exponent {
            return incompatible("iteration exponent");
        }
        if header.group_threshold() != parameters.group_threshold
            || header.group_count() != parameters.group_count
        {
            return incompatible("group parameters");
        }
        if share.value().len() != self.value_len {
            return incompatible("value length");
        }
        if let Some(group) = self.groups.get(&*header.group_index()) {
            if group.member_threshold != header.member_threshold() {
                return incompatible("member threshold");
            }
        }
        Ok(())
    }

    /// Reconstructs the master secret with `passphrase`
    ///
    /// Only valid once the state is [`RecoveryStatus::Ready`]. Before that the call fails
    /// without changing the state, so more shares can still be added. Once attempted,
    /// the state becomes terminal either way.
    ///
    /// # Errors
    /// - [`Error::InsufficientShares`] if no group is complete yet
    /// - [`Error::DigestMismatch`] for a wrong passphrase, or shares that are forged or
    ///   belong to different splits
    /// - [`Error::RecoveryClosed`] if the attempt is already over
    pub fn recover(&mut self, passphrase: &Passphrase) -> Result<MasterSecret> {
        if let Some(outcome) = self.outcome {
            debug!(%outcome, "recovery already closed");
            return Err(Error::RecoveryClosed);
        }

        let (Some(parameters), Some(group)) = (
            self.parameters,
            self.groups.values().find(|group| group.is_complete()),
        ) else {
            let (needed, got) = self
                .groups
                .values()
                .min_by_key(|group| group.missing())
                .map_or((1, 0), |group| {
                    (usize::from(*group.member_threshold), group.members.len())
                });
            debug!(needed, got, "recovery attempted before threshold");
            return Err(Error::InsufficientShares { needed, got });
        };

        let threshold = *group.member_threshold;
        let points: Vec<Point> = group
            .members
            .iter()
            .take(usize::from(threshold))
            .map(|(&x, share)| Point::new(x, Zeroizing::new(share.value().to_vec())))
            .collect();

        info!(
            threshold,
            iteration_exponent = *parameters.iteration_exponent,
            "reconstructing master secret"
        );
        let result = recover_secret_with(threshold, &points, |encrypted| {
            cipher::decrypt(
                encrypted,
                passphrase,
                parameters.iteration_exponent,
                parameters.identifier,
                parameters.extendable,
            )
        })
        .and_then(|secret| MasterSecret::from_slice(&secret));

        match result {
            Ok(secret) => {
                self.outcome = Some(RecoveryStatus::Reconstructed);
                info!("master secret reconstructed");
                Ok(secret)
            }
            Err(err) => {
                self.outcome = Some(RecoveryStatus::Failed);
                warn!(error = %err, "reconstruction failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::codec::encode_share;
    use crate::commands::generate_shares;
    use crate::domain::{IterationExponent, ShareCount, SplitConfig};

    fn config(threshold: u8, count: u8) -> SplitConfig {
        SplitConfig::new(Threshold::new(threshold).unwrap(), ShareCount::new(count).unwrap())
            .unwrap()
            .with_iteration_exponent(IterationExponent::new(0).unwrap())
    }

    fn shares(threshold: u8, count: u8, seed: u64) -> (MasterSecret, Vec<Share>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let secret = MasterSecret::new((0u8..16).collect()).unwrap();
        let shares = generate_shares(
            &secret,
            &config(threshold, count),
            &Passphrase::from("secretphrase"),
            &mut rng,
        )
        .unwrap();
        (secret, shares)
    }

    #[test]
    fn test_status_progression() {
        let (secret, shares) = shares(3, 5, 1);
        let mut state = RecoveryState::new();
        assert_eq!(state.status(), RecoveryStatus::Empty);
        assert_eq!(state.shares_needed(), None);

        assert_eq!(state.add_share(shares[4].clone()).unwrap(), RecoveryStatus::Collecting);
        assert_eq!(state.shares_needed(), Some(2));
        assert_eq!(state.add_share(shares[0].clone()).unwrap(), RecoveryStatus::Collecting);
        assert_eq!(state.add_share(shares[2].clone()).unwrap(), RecoveryStatus::Ready);
        assert_eq!(state.shares_collected(), 3);
        assert_eq!(state.shares_needed(), Some(0));

        let recovered = state.recover(&Passphrase::from("secretphrase")).unwrap();
        assert_eq!(recovered, secret);
        assert_eq!(state.status(), RecoveryStatus::Reconstructed);
    }

    #[test]
    fn test_recover_before_ready_keeps_collecting() {
        let (secret, shares) = shares(3, 5, 2);
        let mut state = RecoveryState::new();
        state.add_share(shares[0].clone()).unwrap();
        state.add_share(shares[1].clone()).unwrap();

        let err = state.recover(&Passphrase::from("secretphrase")).unwrap_err();
        assert_eq!(err, Error::InsufficientShares { needed: 3, got: 2 });
        assert_eq!(state.status(), RecoveryStatus::Collecting);

        state.add_share(shares[3].clone()).unwrap();
        assert_eq!(state.recover(&Passphrase::from("secretphrase")).unwrap(), secret);
    }

    #[test]
    fn test_recover_empty() {
        let mut state = RecoveryState::new();
        assert_eq!(
            state.recover(&Passphrase::default()).unwrap_err(),
            Error::InsufficientShares { needed: 1, got: 0 }
        );
        assert_eq!(state.status(), RecoveryStatus::Empty);
    }

    #[test]
    fn test_wrong_passphrase_fails_and_closes() {
        let (_, shares) = shares(2, 3, 3);
        let mut state = RecoveryState::new();
        state.add_share(shares[0].clone()).unwrap();
        state.add_share(shares[1].clone()).unwrap();

        let err = state.recover(&Passphrase::from("wrongphrase")).unwrap_err();
        assert_eq!(err, Error::DigestMismatch);
        assert_eq!(state.status(), RecoveryStatus::Failed);

        assert_eq!(
            state.recover(&Passphrase::from("secretphrase")).unwrap_err(),
            Error::RecoveryClosed
        );
        assert_eq!(
            state.add_share(shares[2].clone()).unwrap_err(),
            Error::RecoveryClosed
        );
    }

    #[test]
    fn test_duplicate_share_is_a_no_op() {
        let (_, shares) = shares(2, 3, 4);
        let mut state = RecoveryState::new();
        state.add_share(shares[1].clone()).unwrap();
        assert_eq!(state.add_share(shares[1].clone()).unwrap(), RecoveryStatus::Collecting);
        assert_eq!(state.shares_collected(), 1);
    }

    #[test]
    fn test_conflicting_duplicate_rejected() {
        let (_, first) = shares(2, 3, 5);
        let mut state = RecoveryState::new();
        state.add_share(first[0].clone()).unwrap();

        let header = *first[0].header();
        let mut value = first[0].value().to_vec();
        value[0] ^= 1;
        let forged = Share::new(header, Zeroizing::new(value)).unwrap();
        assert!(matches!(
            state.add_share(forged),
            Err(Error::IncompatibleShare(_))
        ));
        assert_eq!(state.shares_collected(), 1);
    }

    #[test]
    fn test_shares_of_another_split_rejected() {
        let (_, first) = shares(2, 3, 6);
        let (_, second) = shares(2, 3, 7);
        assert_ne!(first[0].header().identifier(), second[0].header().identifier());

        let mut state = RecoveryState::new();
        state.add_share(first[0].clone()).unwrap();
        let err = state.add_share(second[1].clone()).unwrap_err();
        assert!(matches!(err, Error::IncompatibleShare(_)));
        assert!(err.to_string().contains("identifier"));
        assert_eq!(state.status(), RecoveryStatus::Collecting);
    }

    #[test]
    fn test_mismatched_metadata_rejected() {
        use crate::domain::{MemberIndex, ShareHeader};

        let (_, shares) = shares(2, 3, 9);
        let first = &shares[0];
        let parameters = first.header().parameters();
        let threshold = first.header().member_threshold();
        let value = first.value().to_vec();

        let sibling = |parameters: SplitParameters, member_threshold: Threshold, value: Vec<u8>| {
            let header = ShareHeader::new(
                parameters,
                MemberIndex::new(0).unwrap(),
                MemberIndex::new(1).unwrap(),
                member_threshold,
            )
            .unwrap();
            Share::new(header, Zeroizing::new(value)).unwrap()
        };

        let cases = [
            (
                "iteration exponent",
                sibling(
                    SplitParameters {
                        iteration_exponent: IterationExponent::new(5).unwrap(),
                        ..parameters
                    },
                    threshold,
                    value.clone(),
                ),
            ),
            (
                "extendable flag",
                sibling(
                    SplitParameters {
                        extendable: !parameters.extendable,
                        ..parameters
                    },
                    threshold,
                    value.clone(),
                ),
            ),
            (
                "group parameters",
                sibling(
                    SplitParameters {
                        group_count: ShareCount::new(2).unwrap(),
                        ..parameters
                    },
                    threshold,
                    value.clone(),
                ),
            ),
            ("value length", sibling(parameters, threshold, vec![0; 32])),
            (
                "member threshold",
                sibling(parameters, Threshold::new(3).unwrap(), value),
            ),
        ];

        for (field, candidate) in cases {
            let mut state = RecoveryState::new();
            state.add_share(first.clone()).unwrap();

            let err = state.add_share(candidate).unwrap_err();
            assert!(matches!(err, Error::IncompatibleShare(_)), "{field}: {err}");
            assert!(err.to_string().contains(field), "{field}: {err}");
            assert_eq!(state.shares_collected(), 1, "{field}");
            assert_eq!(state.status(), RecoveryStatus::Collecting, "{field}");
        }
    }

    #[test]
    fn test_add_mnemonic() {
        let (secret, shares) = shares(2, 2, 8);
        let mut state = RecoveryState::new();
        for share in &shares {
            state.add_mnemonic(encode_share(share).as_str()).unwrap();
        }
        assert_eq!(state.recover(&Passphrase::from("secretphrase")).unwrap(), secret);
    }

    #[test]
    fn test_add_mnemonic_rejects_garbage() {
        let mut state = RecoveryState::new();
        assert!(matches!(
            state.add_mnemonic("not a share"),
            Err(Error::InvalidFormat(_))
        ));
        assert_eq!(state.status(), RecoveryStatus::Empty);
    }

    #[test]
    fn test_group_threshold_above_one_rejected() {
        use crate::domain::{Identifier, MemberIndex, ShareHeader};

        let parameters = SplitParameters {
            identifier: Identifier::new(1).unwrap(),
            extendable: false,
            iteration_exponent: IterationExponent::new(0).unwrap(),
            group_threshold: Threshold::new(2).unwrap(),
            group_count: ShareCount::new(3).unwrap(),
        };
        let header = ShareHeader::new(
            parameters,
            MemberIndex::new(0).unwrap(),
            MemberIndex::new(0).unwrap(),
            Threshold::new(2).unwrap(),
        )
        .unwrap();
        let share = Share::new(header, Zeroizing::new(vec![0; 16])).unwrap();

        let mut state = RecoveryState::new();
        assert!(matches!(state.add_share(share), Err(Error::DomainRange(_))));
    }
}
