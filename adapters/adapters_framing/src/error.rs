//! Error types for the framing adapter.

use infrastructure_external_format::{DecodeError, EncodeError};
use thiserror::Error;

/// Errors raised while reading or writing packets
#[derive(Debug, Error)]
pub enum FramingError {
    /// I/O error on the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A complete payload did not hold a valid term.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A term could not be encoded for sending.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Declared or outgoing payload length above the configured maximum.
    #[error("packet of {len} bytes exceeds maximum {max}")]
    PacketTooLarge { len: usize, max: u32 },

    /// Stream ended inside a length prefix or payload.
    #[error("stream ended after {received} of {expected} bytes")]
    TruncatedPacket { expected: usize, received: usize },
}

/// Result type alias using FramingError.
pub type Result<T> = std::result::Result<T, FramingError>;
