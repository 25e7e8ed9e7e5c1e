//! Infrastructure Layer: Bignum Encoding
//!
//! Encodes and decodes the SMALL_BIG_EXT / LARGE_BIG_EXT payloads that carry integers
//! outside the 32-bit range.
//!
//! ## Overview
//!
//! The `infrastructure_bignum_encoding` crate sits between the `BigNumber` entity and the
//! term codec in `infrastructure_external_format`. It knows only the two bignum tags; the
//! term codec decides when an integer is written as a bignum at all.
//!
//! ## See Also
//!
//! - [`entities_utilities`](../entities_utilities/index.html): `BigNumber`

mod common;

pub mod bignum_codec;

pub use bignum_codec::BignumCodec;

pub use common::{DecodeError, EncodeError};
pub use common::{LARGE_BIG_EXT, SMALL_BIG_EXT, SMALL_BIG_MAX_DIGITS};
