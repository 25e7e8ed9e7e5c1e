//! Bignum Codec Module
//!
//! Reads and writes arbitrary precision integers in the SMALL_BIG_EXT / LARGE_BIG_EXT
//! forms. The value is `sign × Σ digit_i · 256^i`, digits little-endian.
//!
//! The codec always picks the smaller form: SMALL_BIG_EXT while the magnitude fits in
//! 255 digits, LARGE_BIG_EXT beyond. Choosing between a bignum and the fixed-width
//! integer tags is the caller's concern.

use entities_utilities::BigNumber;

use crate::common::{
    DecodeError, EncodeError, LARGE_BIG_EXT, LARGE_BIG_HEADER, SMALL_BIG_EXT,
    SMALL_BIG_HEADER, SMALL_BIG_MAX_DIGITS,
};

/// Bignum codec
pub struct BignumCodec;

impl BignumCodec {
    /// Number of bytes `encode` writes for `value`, tag included.
    pub fn encoded_size(value: &BigNumber) -> usize {
        let digits = value.magnitude_byte_len();
        if digits <= SMALL_BIG_MAX_DIGITS {
            SMALL_BIG_HEADER + digits
        } else {
            LARGE_BIG_HEADER + digits
        }
    }

    /// Append `value` to `buf` as SMALL_BIG_EXT or LARGE_BIG_EXT
    ///
    /// # Arguments
    /// * `value` - Integer to encode
    /// * `buf` - Output buffer
    ///
    /// # Returns
    /// * `Ok(bytes_written)` - Number of bytes appended, tag included
    /// * `Err(EncodeError::TooLarge)` - Magnitude needs more than `u32::MAX` digits
    pub fn encode(value: &BigNumber, buf: &mut Vec<u8>) -> Result<usize, EncodeError> {
        let digits = value.magnitude_le_bytes();
        let sign = u8::from(value.is_negative());
        let start = buf.len();

        if digits.len() <= SMALL_BIG_MAX_DIGITS {
            buf.reserve(SMALL_BIG_HEADER + digits.len());
            buf.push(SMALL_BIG_EXT);
            // Guarded by SMALL_BIG_MAX_DIGITS
            buf.push(digits.len() as u8);
        } else {
            let count = u32::try_from(digits.len())
                .map_err(|_| EncodeError::TooLarge { bytes: digits.len() })?;
            buf.reserve(LARGE_BIG_HEADER + digits.len());
            buf.push(LARGE_BIG_EXT);
            buf.extend_from_slice(&count.to_be_bytes());
        }
        buf.push(sign);
        buf.extend_from_slice(&digits);

        Ok(buf.len() - start)
    }

    /// Decode a big integer starting at its tag byte
    ///
    /// # Arguments
    /// * `data` - Bytes starting with SMALL_BIG_EXT or LARGE_BIG_EXT
    ///
    /// # Returns
    /// * `Ok((value, bytes_consumed))` - Decoded value and bytes consumed, tag included
    /// * `Err(DecodeError)` - Wrong tag or not enough bytes for the declared digits
    pub fn decode(data: &[u8]) -> Result<(BigNumber, usize), DecodeError> {
        let tag = *data.first().ok_or(DecodeError::Truncated {
            needed: 1,
            available: 0,
        })?;

        let (count, header) = match tag {
            SMALL_BIG_EXT => {
                if data.len() < SMALL_BIG_HEADER {
                    return Err(DecodeError::Truncated {
                        needed: SMALL_BIG_HEADER,
                        available: data.len(),
                    });
                }
                (data[1] as usize, SMALL_BIG_HEADER)
            }
            LARGE_BIG_EXT => {
                if data.len() < LARGE_BIG_HEADER {
                    return Err(DecodeError::Truncated {
                        needed: LARGE_BIG_HEADER,
                        available: data.len(),
                    });
                }
                let count = u32::from_be_bytes([data[1], data[2], data[3], data[4]]);
                (count as usize, LARGE_BIG_HEADER)
            }
            other => return Err(DecodeError::UnexpectedTag(other)),
        };

        // Any non-zero sign byte means negative
        let negative = data[header - 1] != 0;
        let end = header
            .checked_add(count)
            .filter(|&end| end <= data.len())
            .ok_or(DecodeError::Truncated {
                needed: header.saturating_add(count),
                available: data.len(),
            })?;

        let value = BigNumber::from_sign_and_le_bytes(negative, &data[header..end]);
        Ok((value, end))
    }
}
