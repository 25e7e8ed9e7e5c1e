//! Error Taxonomy
//!
//! - [`FormatError`]: the version byte is missing or not recognised
//! - [`DecodeError`]: the bytes after the version byte are malformed
//! - [`EncodeError`]: a term cannot be represented on the wire
//!
//! Every failure aborts the whole call. Decoding never yields a partial term and
//! encoding never yields truncated output.

use thiserror::Error;

/// Version byte problems
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("input is empty, expected a version byte")]
    MissingVersion,
    #[error("unsupported format version {0}, expected 131")]
    UnsupportedVersion(u8),
}

/// Decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("unknown tag {tag} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },

    /// A fixed field or a declared length runs past the end of the input
    #[error("truncated input at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("nesting deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },

    #[error("atom text at offset {offset} is not valid UTF-8")]
    InvalidAtomText { offset: usize },

    /// A node, module or function position holds a non-atom tag
    #[error("expected an atom for {context}, found tag {found}")]
    ExpectedAtom { context: &'static str, found: u8 },

    #[error("FLOAT_EXT text at offset {offset} is not a number")]
    InvalidFloatText { offset: usize },

    #[error("reference carries {count} id words, expected 1 to 3")]
    InvalidReferenceIdCount { count: usize },

    #[error("invalid arity for {context}")]
    InvalidArity { context: &'static str },

    /// `decode` consumed one term but bytes remain
    #[error("{remaining} trailing bytes after a term of {consumed} bytes")]
    TrailingBytes { consumed: usize, remaining: usize },

    #[error("malformed big integer")]
    InvalidBigInteger,
}

/// Encoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("atom of {len} bytes exceeds the 65535 byte limit")]
    AtomTooLong { len: usize },

    #[error("non-finite floats cannot be encoded")]
    NonFiniteFloat,

    /// A length field cannot hold the container's size
    #[error("{kind} of length {len} does not fit its length field")]
    LengthOverflow { kind: &'static str, len: usize },

    #[error("nesting deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },

    #[error("big integer magnitude of {bytes} bytes is too large")]
    BigIntegerTooLarge { bytes: usize },
}
