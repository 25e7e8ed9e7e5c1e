//! Infrastructure Layer: External Term Format
//!
//! Encoder and decoder for the external term format (ETF), the tag-prefixed binary
//! serialization the peer runtime uses for terms sent over a byte channel.
//!
//! ## Overview
//!
//! Every encoded term is the version byte [`VERSION_MAGIC`] (131) followed by one
//! tagged term. Both directions are pure functions: no global state, no I/O, safe to
//! call from any number of threads at once. Locating term boundaries in a stream is
//! the job of `adapters_framing`, not of this crate.
//!
//! ## Modules
//!
//! - **[`decoding`](decoding/index.html)**: `decode`, `decode_with`, `decode_prefix`, `decode_prefix_with`
//!
//! - **[`encoding`](encoding/index.html)**: `encode`, `encode_with`, and the tag policy
//!
//! - **[`size_calculation`](size_calculation/index.html)**: exact encoded length of a term
//!
//! - **[`tags`](tags/index.html)**: the tag table
//!
//! - **[`options`](options/index.html)**, **[`error`](error/index.html)**: codec options (depth limits, text handling)
//!   and the `FormatError` / `DecodeError` / `EncodeError` taxonomy
//!
//! ## Usage
//!
//! ```rust
//! use infrastructure_external_format::{decode, encode};
//! use entities_data_handling::Term;
//!
//! let term = Term::tuple(vec![Term::atom("ok"), Term::integer(1)]);
//! let bytes = encode(&term).unwrap();
//! assert_eq!(bytes, vec![131, 104, 2, 115, 2, b'o', b'k', 97, 1]);
//! assert_eq!(decode(&bytes).unwrap(), term);
//! ```

pub mod decoding;
pub mod encoding;
pub mod error;
pub mod options;
pub mod size_calculation;
pub mod tags;

pub use decoding::{decode, decode_prefix, decode_prefix_with, decode_with};
pub use encoding::{encode, encode_with};
pub use error::{DecodeError, EncodeError, FormatError};
pub use options::{DecodeOptions, EncodeOptions, TextEncoding, DEFAULT_MAX_DEPTH};
pub use size_calculation::{encoded_size, encoded_size_with};

/// External term format version magic byte
/// This is the first byte in ETF-encoded data (value 131)
pub const VERSION_MAGIC: u8 = 131;
