//! Big Number Operations
//!
//! Provides the arbitrary precision integer carried by integer terms.
//!
//! This module uses the `malachite` crate for the arithmetic. The wire format stores
//! large integers as a sign flag plus a little-endian sequence of base-256 digits, so
//! besides the usual conversions `BigNumber` exposes exactly that split.

use std::fmt;

use malachite::base::num::basic::traits::Zero;
use malachite::base::num::conversion::traits::PowerOf2Digits;
use malachite::base::num::logic::traits::SignificantBits;
use malachite::{Integer, Natural};

/// Big number representation using malachite's Integer
///
/// Small values are stored inline by malachite, so using `BigNumber` for every
/// integer term costs no heap allocation in the common case.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigNumber {
    value: Integer,
}

impl BigNumber {
    /// Create a new big number from i64
    pub fn from_i64(value: i64) -> Self {
        Self {
            value: Integer::from(value),
        }
    }

    /// Create a new big number from u64
    pub fn from_u64(value: u64) -> Self {
        Self {
            value: Integer::from(value),
        }
    }

    /// Create a new big number from i128
    pub fn from_i128(value: i128) -> Self {
        Self {
            value: Integer::from(value),
        }
    }

    /// Build a number from a sign flag and little-endian base-256 digits.
    ///
    /// Trailing zero digits are allowed and do not change the value; an empty digit
    /// slice is zero regardless of the sign flag.
    pub fn from_sign_and_le_bytes(negative: bool, digits: &[u8]) -> Self {
        let magnitude =
            <Natural as PowerOf2Digits<u8>>::from_power_of_2_digits_asc(8, digits.iter().copied())
                .unwrap_or(Natural::ZERO);
        let value = Integer::from(magnitude);
        Self {
            value: if negative { -value } else { value },
        }
    }

    /// Little-endian base-256 digits of the absolute value, without trailing zeros.
    ///
    /// Zero yields an empty vector.
    pub fn magnitude_le_bytes(&self) -> Vec<u8> {
        <Natural as PowerOf2Digits<u8>>::to_power_of_2_digits_asc(self.value.unsigned_abs_ref(), 8)
    }

    /// Number of base-256 digits needed for the absolute value.
    pub fn magnitude_byte_len(&self) -> usize {
        let bits = self.value.unsigned_abs_ref().significant_bits();
        bits.div_ceil(8) as usize
    }

    /// Returns true if the number is strictly below zero
    pub fn is_negative(&self) -> bool {
        self.value < 0
    }

    /// Check if the number is zero
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Convert to i64, `None` if out of range
    pub fn to_i64(&self) -> Option<i64> {
        i64::try_from(&self.value).ok()
    }

    /// Convert to i32, `None` if out of range
    pub fn to_i32(&self) -> Option<i32> {
        i32::try_from(&self.value).ok()
    }

    /// Convert to u32, `None` if negative or out of range
    pub fn to_u32(&self) -> Option<u32> {
        u32::try_from(&self.value).ok()
    }

    /// Convert to u8, `None` if negative or above 255
    pub fn to_u8(&self) -> Option<u8> {
        u8::try_from(&self.value).ok()
    }

    /// Borrow the underlying malachite integer
    pub fn as_integer(&self) -> &Integer {
        &self.value
    }

    /// Unwrap into the underlying malachite integer
    pub fn into_integer(self) -> Integer {
        self.value
    }
}

impl Default for BigNumber {
    fn default() -> Self {
        Self::from_i64(0)
    }
}

impl From<Integer> for BigNumber {
    fn from(value: Integer) -> Self {
        Self { value }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for BigNumber {
                fn from(value: $ty) -> Self {
                    Self { value: Integer::from(value) }
                }
            }
        )*
    };
}

impl_from_primitive!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl fmt::Display for BigNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
