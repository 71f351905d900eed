//! Reed-Solomon checksum over GF(1024)
//!
//! Every share mnemonic ends in three checksum words. The code detects any error that
//! affects at most three words. The customization string mixed into the checksum
//! depends on the extendable flag, so flipping that bit invalidates the mnemonic.

/// Number of checksum words at the end of a share mnemonic
pub const CHECKSUM_WORDS: usize = 3;

const GENERATOR: [u32; 10] = [
    0x00E0_E040,
    0x01C1_C080,
    0x0383_8100,
    0x0707_0200,
    0x0E0E_0009,
    0x1C0C_2412,
    0x3808_6C24,
    0x3090_FC48,
    0x21B1_F890,
    0x03F3_F120,
];

/// Customization string for the given extendable flag
#[must_use]
pub fn customization_string(extendable: bool) -> &'static [u8] {
    if extendable {
        b"shamir_extendable"
    } else {
        b"shamir"
    }
}

fn polymod(values: impl Iterator<Item = u16>) -> u32 {
    values.fold(1u32, |chk, value| {
        let top = chk >> 20;
        let mut chk = ((chk & 0x000F_FFFF) << 10) ^ u32::from(value);
        for (i, generator) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 != 0 {
                chk ^= generator;
            }
        }
        chk
    })
}

fn prefixed<'a>(
    customization: &'a [u8],
    data: &'a [u16],
) -> impl Iterator<Item = u16> + 'a {
    customization
        .iter()
        .map(|&b| u16::from(b))
        .chain(data.iter().copied())
}

/// Computes the three checksum words for `data`
#[must_use]
pub fn create_checksum(extendable: bool, data: &[u16]) -> [u16; CHECKSUM_WORDS] {
    let values = prefixed(customization_string(extendable), data).chain([0, 0, 0]);
    let residue = polymod(values) ^ 1;

    #[allow(
        clippy::cast_possible_truncation,
        reason = "each part is masked to 10 bits"
    )]
    let checksum = [
        ((residue >> 20) & 0x3FF) as u16,
        ((residue >> 10) & 0x3FF) as u16,
        (residue & 0x3FF) as u16,
    ];
    checksum
}

/// Checks `data` including its trailing checksum words
#[must_use]
pub fn verify_checksum(extendable: bool, data: &[u16]) -> bool {
    polymod(prefixed(customization_string(extendable), data)) == 1
}
