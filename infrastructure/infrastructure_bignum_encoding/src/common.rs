//! Common Encoding/Decoding Definitions
//!
//! Tags, header sizes and error types shared by the bignum codec.
//!
//! ## Encoding Format
//!
//! - **SMALL_BIG_EXT** (tag 110): 1 byte tag + 1 byte digit count + 1 byte sign + n digits (little-endian)
//! - **LARGE_BIG_EXT** (tag 111): 1 byte tag + 4 byte digit count (big-endian) + 1 byte sign + n digits (little-endian)

use thiserror::Error;

/// SMALL_BIG_EXT = 110
pub const SMALL_BIG_EXT: u8 = 110;
/// LARGE_BIG_EXT = 111
pub const LARGE_BIG_EXT: u8 = 111;

/// Largest digit count that fits the SMALL_BIG_EXT 1-byte count field
pub const SMALL_BIG_MAX_DIGITS: usize = u8::MAX as usize;

/// Tag + count + sign bytes for SMALL_BIG_EXT
pub const SMALL_BIG_HEADER: usize = 3;
/// Tag + count + sign bytes for LARGE_BIG_EXT
pub const LARGE_BIG_HEADER: usize = 6;

/// Encoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Magnitude needs more digits than a 4-byte count can express
    #[error("big integer magnitude of {bytes} bytes exceeds the LARGE_BIG limit")]
    TooLarge { bytes: usize },
}

/// Decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input ends before the header or the declared digits
    #[error("big integer needs {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },
    /// First byte is not a big integer tag
    #[error("expected big integer tag (110 or 111), got {0}")]
    UnexpectedTag(u8),
}
