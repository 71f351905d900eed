//! Arithmetic in GF(2^8)
//!
//! The field is generated by the Rijndael polynomial x^8 + x^4 + x^3 + x + 1 (0x11B)
//! with 3 as primitive element. Addition is XOR; multiplication and inversion go
//! through discrete log/exp tables computed at compile time.

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Sub};

const POLYNOMIAL: u16 = 0x11B;

const fn build_tables() -> ([u8; 255], [u8; 256]) {
    let mut exp = [0u8; 255];
    let mut log = [0u8; 256];
    let mut poly: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = poly as u8;
        log[poly as usize] = i as u8;
        // multiply by the generator x + 1
        poly = (poly << 1) ^ poly;
        if poly & 0x100 != 0 {
            poly ^= POLYNOMIAL;
        }
        i += 1;
    }
    (exp, log)
}

const TABLES: ([u8; 255], [u8; 256]) = build_tables();
static EXP: [u8; 255] = TABLES.0;
static LOG: [u8; 256] = TABLES.1;

/// An element of GF(256)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gf256(u8);

impl Gf256 {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    #[inline]
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Multiplicative inverse, `None` for zero
    #[inline]
    #[must_use]
    pub fn checked_inverse(self) -> Option<Self> {
        if self.0 == 0 {
            return None;
        }
        let log = LOG[self.0 as usize] as usize;
        Some(Self(EXP[(255 - log) % 255]))
    }

    /// Quotient, `None` when dividing by zero
    #[inline]
    #[must_use]
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        rhs.checked_inverse().map(|inverse| self * inverse)
    }
}

impl Add for Gf256 {
    type Output = Self;

    #[inline]
    #[allow(clippy::suspicious_arithmetic_impl, reason = "field addition is XOR")]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for Gf256 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Gf256 {
    type Output = Self;

    #[inline]
    #[allow(
        clippy::suspicious_arithmetic_impl,
        reason = "subtraction equals addition in characteristic 2"
    )]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Mul for Gf256 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        if self.0 == 0 || rhs.0 == 0 {
            return Self::ZERO;
        }
        let log = LOG[self.0 as usize] as usize + LOG[rhs.0 as usize] as usize;
        Self(EXP[log % 255])
    }
}

impl MulAssign for Gf256 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Div for Gf256 {
    type Output = Self;

    /// # Panics
    /// Panics on division by zero. Interpolation rules this out by rejecting
    /// duplicate x-coordinates before dividing.
    #[inline]
    fn div(self, rhs: Self) -> Self {
        match self.checked_div(rhs) {
            Some(quotient) => quotient,
            None => panic!("division by zero in GF(256)"),
        }
    }
}
