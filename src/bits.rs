//! MSB-first bit packing for the share codec
//!
//! Share mnemonics are big-endian bit strings sliced into 10-bit words. Output
//! buffers are `Zeroizing` because they carry share values.

use zeroize::Zeroizing;

/// Accumulates values of arbitrary bit width into bytes
pub(crate) struct BitWriter {
    bytes: Zeroizing<Vec<u8>>,
    current: u8,
    filled: u32,
    len: usize,
}

impl BitWriter {
    pub(crate) fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Zeroizing::new(Vec::with_capacity(bits.div_ceil(8))),
            current: 0,
            filled: 0,
            len: 0,
        }
    }

    /// Appends the low `width` bits of `value`, most significant first
    pub(crate) fn write(&mut self, value: u32, width: u32) {
        debug_assert!(width <= 32);
        for bit_pos in (0..width).rev() {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "masked to a single bit"
            )]
            let bit = ((value >> bit_pos) & 1) as u8;
            self.current = (self.current << 1) | bit;
            self.filled += 1;
            self.len += 1;

            if self.filled == 8 {
                self.bytes.push(self.current);
                self.current = 0;
                self.filled = 0;
            }
        }
    }

    /// Appends whole bytes
    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write(u32::from(byte), 8);
        }
    }

    /// Number of bits written so far
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Flushes a partial byte, padding it with zero bits on the right
    pub(crate) fn finish(mut self) -> Zeroizing<Vec<u8>> {
        if self.filled > 0 {
            let last = self.current << (8 - self.filled);
            self.bytes.push(last);
            self.current = 0;
        }
        self.bytes
    }
}

/// Reads big-endian values of arbitrary bit width out of a byte slice
pub(crate) struct BitReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Reads the next `width` bits, or `None` when fewer remain
    pub(crate) fn read(&mut self, width: u32) -> Option<u32> {
        debug_assert!(width <= 32);
        if self.remaining() < width as usize {
            return None;
        }
        let mut value = 0u32;
        for _ in 0..width {
            let byte = self.bytes[self.position / 8];
            let bit = (byte >> (7 - self.position % 8)) & 1;
            value = (value << 1) | u32::from(bit);
            self.position += 1;
        }
        Some(value)
    }

    /// Number of unread bits
    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len() * 8 - self.position
    }
}
