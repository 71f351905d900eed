//! Share mnemonic codec
//!
//! Encodes one [`Share`] as a sequence of words from the 1024-word share
//! [wordlist](crate::wordlist). Each word carries 10 bits.
//!
//! # Layout
//!
//! | Field | Bits |
//! |---|---|
//! | identifier | 15 |
//! | extendable flag | 1 |
//! | iteration exponent | 4 |
//! | group index | 4 |
//! | group threshold − 1 | 4 |
//! | group count − 1 | 4 |
//! | member index | 4 |
//! | member threshold − 1 | 4 |
//! | zero padding | to a multiple of 10 |
//! | share value | 8 × len |
//! | RS1024 checksum | 30 |
//!
//! The 40 header bits fill exactly four words, so the value starts on a word boundary and
//! is left-padded with zero bits. A 128-bit value takes 13 words, making 20 words the
//! shortest valid share mnemonic.
//!
//! # Examples
//!
//! ```rust
//! use seedsplit::codec::{decode_share, encode_share};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let phrase = "duckling enlarge academic academic agency result length solution fridge \
//!               kidney coal piece deal husband erode duke ajar critical decision keyboard";
//! let share = decode_share(phrase)?;
//!
//! assert_eq!(*share.header().identifier(), 7945);
//! assert_eq!(*share.header().member_threshold(), 1);
//! assert_eq!(share.value().len(), 16);
//!
//! assert_eq!(encode_share(&share).as_str(), phrase);
//! # Ok(())
//! # }
//! ```

use zeroize::Zeroizing;

use crate::bits::{BitReader, BitWriter};
use crate::domain::{
    Identifier, IterationExponent, MemberIndex, Share, ShareCount, ShareHeader, SplitParameters,
    Threshold,
};
use crate::error::{Error, Result};
use crate::rs1024::{CHECKSUM_WORDS, create_checksum, verify_checksum};
use crate::wordlist::{RADIX_BITS, word_at, word_index};

/// Words taken by the share header
pub const HEADER_WORDS: usize = 4;

/// Header and checksum words together
pub const METADATA_WORDS: usize = HEADER_WORDS + CHECKSUM_WORDS;

/// Shortest valid share mnemonic (128-bit value)
pub const MIN_MNEMONIC_WORDS: usize = METADATA_WORDS + 13;

/// A share mnemonic produced by [`encode_share`]
///
/// Wraps the mnemonic in `Zeroizing` to ensure secure memory cleanup.
#[derive(Clone, PartialEq, Eq)]
pub struct ShareMnemonic(Zeroizing<String>);

impl ShareMnemonic {
    /// Creates a new `ShareMnemonic` from a string without validation
    ///
    /// This is used internally when encoding shares. Use [`decode_share`] to validate
    /// existing mnemonics.
    pub(crate) fn new_unchecked(s: String) -> Self {
        Self(Zeroizing::new(s))
    }

    /// Gets the mnemonic as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of words in the mnemonic
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.0.split(' ').count()
    }
}

impl std::fmt::Display for ShareMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Debug for ShareMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ShareMnemonic(<{} words>)", self.word_count())
    }
}

/// Zero bits in front of a value of `value_len` bytes
fn padding_bits(value_len: usize) -> usize {
    let bits = value_len * 8;
    (RADIX_BITS as usize - bits % RADIX_BITS as usize) % RADIX_BITS as usize
}

fn write_header(writer: &mut BitWriter, header: &ShareHeader) {
    writer.write(u32::from(*header.identifier()), Identifier::BITS);
    writer.write(u32::from(header.extendable()), 1);
    writer.write(u32::from(*header.iteration_exponent()), 4);
    writer.write(u32::from(*header.group_index()), 4);
    writer.write(u32::from(*header.group_threshold() - 1), 4);
    writer.write(u32::from(*header.group_count() - 1), 4);
    writer.write(u32::from(*header.member_index()), 4);
    writer.write(u32::from(*header.member_threshold() - 1), 4);
}

/// Encodes a share as a mnemonic
///
/// Infallible: [`Share`] and [`ShareHeader`] already guarantee that every field fits its
/// bit width.
#[must_use]
pub fn encode_share(share: &Share) -> ShareMnemonic {
    let value = share.value();
    let padding = padding_bits(value.len());
    let value_words = (padding + value.len() * 8) / RADIX_BITS as usize;

    let mut writer =
        BitWriter::with_capacity(HEADER_WORDS * RADIX_BITS as usize + padding + value.len() * 8);
    write_header(&mut writer, share.header());
    for _ in 0..padding {
        writer.write(0, 1);
    }
    writer.write_bytes(value);
    debug_assert_eq!(writer.len() % RADIX_BITS as usize, 0);
    let packed = writer.finish();

    let mut reader = BitReader::new(&packed);
    let mut indices: Zeroizing<Vec<u16>> =
        Zeroizing::new(Vec::with_capacity(HEADER_WORDS + value_words + CHECKSUM_WORDS));
    for _ in 0..HEADER_WORDS + value_words {
        let Some(index) = reader.read(RADIX_BITS) else {
            unreachable!("header and padded value fill a whole number of words")
        };
        #[allow(clippy::cast_possible_truncation, reason = "10-bit value")]
        let index = index as u16;
        indices.push(index);
    }
    let checksum = create_checksum(share.header().extendable(), &indices);
    indices.extend_from_slice(&checksum);

    let mut phrase = String::with_capacity(indices.len() * 9);
    for (position, &index) in indices.iter().enumerate() {
        if position > 0 {
            phrase.push(' ');
        }
        phrase.push_str(word_at(index));
    }

    ShareMnemonic::new_unchecked(phrase)
}

fn parse_header(indices: &[u16]) -> Result<ShareHeader> {
    let mut writer = BitWriter::with_capacity(HEADER_WORDS * RADIX_BITS as usize);
    for &index in &indices[..HEADER_WORDS] {
        writer.write(u32::from(index), RADIX_BITS);
    }
    let packed = writer.finish();
    let mut reader = BitReader::new(&packed);
    let mut field = |width: u32| {
        let value = reader
            .read(width)
            .unwrap_or_else(|| unreachable!("four words hold the 40 header bits"));
        #[allow(
            clippy::cast_possible_truncation,
            reason = "header fields are at most 15 bits wide"
        )]
        let value = value as u16;
        value
    };

    let identifier = field(Identifier::BITS);
    let extendable = field(1) == 1;
    let mut nibble = || field(4).to_be_bytes()[1];
    let exponent = nibble();
    let group_index = nibble();
    let group_threshold = nibble() + 1;
    let group_count = nibble() + 1;
    let member_index = nibble();
    let member_threshold = nibble() + 1;

    let parameters = SplitParameters {
        identifier: Identifier::new(identifier)?,
        extendable,
        iteration_exponent: IterationExponent::new(exponent)?,
        group_threshold: Threshold::new(group_threshold)?,
        group_count: ShareCount::new(group_count)?,
    };
    ShareHeader::new(
        parameters,
        MemberIndex::new(group_index)?,
        MemberIndex::new(member_index)?,
        Threshold::new(member_threshold)?,
    )
}

fn parse_value(indices: &[u16]) -> Result<Zeroizing<Vec<u8>>> {
    let value_words = &indices[HEADER_WORDS..indices.len() - CHECKSUM_WORDS];
    let total_bits = value_words.len() * RADIX_BITS as usize;
    let padding = total_bits % 16;

    let mut writer = BitWriter::with_capacity(total_bits);
    for &index in value_words {
        writer.write(u32::from(index), RADIX_BITS);
    }
    let packed = writer.finish();
    let mut reader = BitReader::new(&packed);

    #[allow(clippy::cast_possible_truncation, reason = "padding is at most 8 bits")]
    let padding_value = reader.read(padding as u32);
    if padding_value != Some(0) {
        return Err(Error::InvalidFormat("share value padding bits are not zero".into()));
    }

    let value_len = (total_bits - padding) / 8;
    let mut value = Zeroizing::new(Vec::with_capacity(value_len));
    for _ in 0..value_len {
        let Some(byte) = reader.read(8) else {
            unreachable!("value bytes fit in the remaining bits")
        };
        #[allow(clippy::cast_possible_truncation, reason = "8-bit value")]
        let byte = byte as u8;
        value.push(byte);
    }
    Ok(value)
}

/// Decodes and validates a share mnemonic
///
/// Words are matched case-insensitively and may be separated by any whitespace.
/// Nothing is returned unless the checksum and every header field validate.
///
/// # Errors
/// - [`Error::InvalidFormat`] for an unknown word, fewer than 20 words, a word count that
///   cannot hold an even number of value bytes, non-zero padding, or inconsistent header
///   fields
/// - [`Error::Checksum`] if the RS1024 checksum does not verify
pub fn decode_share(mnemonic: &str) -> Result<Share> {
    let mut indices: Zeroizing<Vec<u16>> = Zeroizing::new(Vec::new());
    for (position, word) in mnemonic.split_whitespace().enumerate() {
        let word = Zeroizing::new(word.to_lowercase());
        let index = word_index(&word).ok_or_else(|| {
            Error::InvalidFormat(format!(
                "word #{} is not in the share wordlist",
                position + 1
            ))
        })?;
        indices.push(index);
    }

    if indices.len() < MIN_MNEMONIC_WORDS {
        return Err(Error::InvalidFormat(format!(
            "share mnemonic must have at least {MIN_MNEMONIC_WORDS} words (got {})",
            indices.len()
        )));
    }

    let padding = ((indices.len() - METADATA_WORDS) * RADIX_BITS as usize) % 16;
    if padding > 8 {
        return Err(Error::InvalidFormat(format!(
            "share mnemonic length of {} words is invalid",
            indices.len()
        )));
    }

    let extendable = (indices[1] >> 4) & 1 == 1;
    if !verify_checksum(extendable, &indices) {
        return Err(Error::Checksum("share mnemonic checksum does not match".into()));
    }

    let header = parse_header(&indices)?;
    let value = parse_value(&indices)?;
    Share::new(header, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VECTOR: &str = "duckling enlarge academic academic agency result length solution fridge kidney coal piece deal husband erode duke ajar critical decision keyboard";

    fn from_hex(hex: &str) -> Vec<u8> {
        (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
            .collect()
    }

    fn share(
        identifier: u16,
        extendable: bool,
        member_index: u8,
        member_threshold: u8,
        value: Vec<u8>,
    ) -> Share {
        let parameters = SplitParameters {
            identifier: Identifier::new(identifier).unwrap(),
            extendable,
            iteration_exponent: IterationExponent::new(3).unwrap(),
            group_threshold: Threshold::new(1).unwrap(),
            group_count: ShareCount::new(1).unwrap(),
        };
        let header = ShareHeader::new(
            parameters,
            MemberIndex::new(0).unwrap(),
            MemberIndex::new(member_index).unwrap(),
            Threshold::new(member_threshold).unwrap(),
        )
        .unwrap();
        Share::new(header, Zeroizing::new(value)).unwrap()
    }

    #[test]
    fn test_decode_known_vector() {
        let share = decode_share(VECTOR).unwrap();
        let header = share.header();
        assert_eq!(*header.identifier(), 7945);
        assert!(!header.extendable());
        assert_eq!(*header.iteration_exponent(), 0);
        assert_eq!(*header.group_index(), 0);
        assert_eq!(*header.group_threshold(), 1);
        assert_eq!(*header.group_count(), 1);
        assert_eq!(*header.member_index(), 0);
        assert_eq!(*header.member_threshold(), 1);
        assert_eq!(share.value(), from_hex("11bc609d21747c49ba78c0701293e417"));
    }

    #[test]
    fn test_encode_known_vector() {
        let share = decode_share(VECTOR).unwrap();
        let mnemonic = encode_share(&share);
        assert_eq!(mnemonic.as_str(), VECTOR);
        assert_eq!(mnemonic.word_count(), 20);
    }

    #[test]
    fn test_decode_is_case_and_whitespace_insensitive() {
        let noisy = VECTOR.to_uppercase().replace(' ', "  \n");
        assert_eq!(decode_share(&noisy).unwrap(), decode_share(VECTOR).unwrap());
    }

    #[test]
    fn test_word_counts_by_value_length() {
        for (len, words) in [(16, 20), (20, 23), (24, 27), (28, 30), (32, 33)] {
            let original = share(100, false, 2, 3, vec![0xA5; len]);
            let mnemonic = encode_share(&original);
            assert_eq!(mnemonic.word_count(), words, "value length {len}");
            assert_eq!(decode_share(mnemonic.as_str()).unwrap(), original);
        }
    }

    #[test]
    fn test_extendable_flag_survives() {
        let original = share(Identifier::MAX, true, 15, 16, (0..32).collect());
        let decoded = decode_share(encode_share(&original).as_str()).unwrap();
        assert!(decoded.header().extendable());
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_wrong_checksum() {
        let corrupted = VECTOR.replace("keyboard", "kidney");
        assert!(matches!(decode_share(&corrupted), Err(Error::Checksum(_))));
    }

    #[test]
    fn test_every_single_word_substitution_fails() {
        let words: Vec<&str> = VECTOR.split(' ').collect();
        for position in 0..words.len() {
            let mut altered = words.clone();
            let index = word_index(words[position]).unwrap();
            altered[position] = word_at((index + 1) % 1024);
            let result = decode_share(&altered.join(" "));
            assert!(
                matches!(result, Err(Error::Checksum(_))),
                "substitution at word {position} not detected"
            );
        }
    }

    #[test]
    fn test_invalid_padding() {
        let phrase = "duckling enlarge academic academic email result length solution fridge kidney coal piece deal husband erode duke ajar music cargo fitness";
        assert!(matches!(decode_share(phrase), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_unknown_word() {
        let phrase = VECTOR.replace("fridge", "fridges");
        let err = decode_share(&phrase).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
        assert!(err.to_string().contains("word #9"));
    }

    #[test]
    fn test_too_short() {
        let phrase: Vec<&str> = VECTOR.split(' ').take(19).collect();
        assert!(matches!(
            decode_share(&phrase.join(" ")),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_impossible_length() {
        // 21 words leave 14 value words: 140 bits with 12 bits of padding
        let original = encode_share(&share(1, false, 0, 2, vec![0; 16]));
        let mut words: Vec<&str> = original.as_str().split(' ').collect();
        words.insert(5, "academic");
        assert!(matches!(
            decode_share(&words.join(" ")),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_debug_hides_words() {
        let mnemonic = encode_share(&decode_share(VECTOR).unwrap());
        assert_eq!(format!("{mnemonic:?}"), "ShareMnemonic(<20 words>)");
    }
}
