//! Property tests for the seed phrase and share mnemonic codecs

use bip39::Mnemonic;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use zeroize::Zeroizing;

use seedsplit::Error;
use seedsplit::codec::{decode_share, encode_share};
use seedsplit::domain::{
    Identifier, IterationExponent, MasterSecret, MemberIndex, Share, ShareCount, ShareHeader,
    SplitParameters, Threshold,
};
use seedsplit::seed::{decode_mnemonic, encode_entropy};
use seedsplit::wordlist::{word_at, word_index};

/// Wrapper for entropy of a supported seed length
#[derive(Clone, Debug)]
struct SeedEntropy(Vec<u8>);

impl Arbitrary for SeedEntropy {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = *g
            .choose(&MasterSecret::VALID_LENGTHS)
            .unwrap_or_else(|| unreachable!("non-empty slice"));
        SeedEntropy((0..len).map(|_| u8::arbitrary(g)).collect())
    }
}

/// Wrapper for a share with arbitrary but consistent metadata
#[derive(Clone, Debug)]
struct ArbitraryShare(Share);

impl Arbitrary for ArbitraryShare {
    fn arbitrary(g: &mut Gen) -> Self {
        let group_count = u8::arbitrary(g) % 16 + 1;
        let group_threshold = u8::arbitrary(g) % group_count + 1;
        let group_index = u8::arbitrary(g) % group_count;

        let parameters = SplitParameters {
            identifier: Identifier::new(u16::arbitrary(g) & Identifier::MAX).unwrap(),
            extendable: bool::arbitrary(g),
            iteration_exponent: IterationExponent::new(u8::arbitrary(g) % 16).unwrap(),
            group_threshold: Threshold::new(group_threshold).unwrap(),
            group_count: ShareCount::new(group_count).unwrap(),
        };
        let header = ShareHeader::new(
            parameters,
            MemberIndex::new(group_index).unwrap(),
            MemberIndex::new(u8::arbitrary(g) % 16).unwrap(),
            Threshold::new(u8::arbitrary(g) % 16 + 1).unwrap(),
        )
        .unwrap();

        // any even length from 16 to 32 bytes
        let len = 16 + 2 * usize::from(u8::arbitrary(g) % 9);
        let value: Vec<u8> = (0..len).map(|_| u8::arbitrary(g)).collect();
        ArbitraryShare(Share::new(header, Zeroizing::new(value)).unwrap())
    }
}

/// Our seed codec must agree with the bip39 crate
#[quickcheck]
fn prop_seed_phrase_matches_bip39_crate(entropy: SeedEntropy) -> bool {
    let SeedEntropy(bytes) = entropy;
    let secret = MasterSecret::new(bytes.clone()).unwrap();
    let Ok(ours) = encode_entropy(&secret) else {
        return false;
    };

    let Ok(theirs) = Mnemonic::from_entropy(&bytes) else {
        return false;
    };
    if ours.as_str() != theirs.to_string() {
        return false;
    }

    decode_mnemonic(ours.as_str()).is_ok_and(|decoded| decoded == secret)
}

/// Decoding an encoded share restores every header field and the value
#[quickcheck]
fn prop_share_metadata_preserved(share: ArbitraryShare) -> bool {
    let ArbitraryShare(share) = share;
    let mnemonic = encode_share(&share);
    decode_share(mnemonic.as_str()).is_ok_and(|decoded| decoded == share)
}

/// Replacing any one word of a share mnemonic is always detected
#[quickcheck]
fn prop_single_word_substitution_detected(share: ArbitraryShare, position: usize, shift: u16) -> bool {
    let ArbitraryShare(share) = share;
    let mnemonic = encode_share(&share);
    let mut words: Vec<&str> = mnemonic.as_str().split(' ').collect();

    let position = position % words.len();
    let shift = shift % 1023 + 1;
    let Some(index) = word_index(words[position]) else {
        return false;
    };
    words[position] = word_at((index + shift) % 1024);

    matches!(decode_share(&words.join(" ")), Err(Error::Checksum(_)))
}

/// Swapping two different adjacent words of a share mnemonic is always detected
#[quickcheck]
fn prop_adjacent_transposition_detected(share: ArbitraryShare, position: usize) -> bool {
    let ArbitraryShare(share) = share;
    let mnemonic = encode_share(&share);
    let mut words: Vec<&str> = mnemonic.as_str().split(' ').collect();

    let position = position % (words.len() - 1);
    if words[position] == words[position + 1] {
        return true; // Skip: the swap changes nothing
    }
    words.swap(position, position + 1);

    matches!(decode_share(&words.join(" ")), Err(Error::Checksum(_)))
}

/// Dropping a word never yields a share
#[quickcheck]
fn prop_truncated_share_rejected(share: ArbitraryShare, position: usize) -> bool {
    let ArbitraryShare(share) = share;
    let mnemonic = encode_share(&share);
    let mut words: Vec<&str> = mnemonic.as_str().split(' ').collect();
    words.remove(position % words.len());

    decode_share(&words.join(" ")).is_err()
}
