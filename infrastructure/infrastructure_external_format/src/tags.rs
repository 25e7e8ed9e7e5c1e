//! Tag Table
//!
//! One-byte discriminators that precede every encoded term. Values match the peer
//! runtime's external term format byte for byte.

pub use infrastructure_bignum_encoding::{LARGE_BIG_EXT, SMALL_BIG_EXT};

// Scalars

/// SMALL_INTEGER_EXT = 97: unsigned byte
pub const SMALL_INTEGER_EXT: u8 = 97;
/// INTEGER_EXT = 98: 4-byte big-endian signed
pub const INTEGER_EXT: u8 = 98;
/// FLOAT_EXT = 99: 31-byte decimal text, decode only
pub const FLOAT_EXT: u8 = 99;
/// NEW_FLOAT_EXT = 70: 8-byte big-endian IEEE-754
pub const NEW_FLOAT_EXT: u8 = 70;

// Atoms

/// ATOM_EXT = 100: 2-byte length, latin-1
pub const ATOM_EXT: u8 = 100;
/// SMALL_ATOM_EXT = 115: 1-byte length, latin-1
pub const SMALL_ATOM_EXT: u8 = 115;
/// ATOM_UTF8_EXT = 118: 2-byte length, UTF-8
pub const ATOM_UTF8_EXT: u8 = 118;
/// SMALL_ATOM_UTF8_EXT = 119: 1-byte length, UTF-8
pub const SMALL_ATOM_UTF8_EXT: u8 = 119;

// Identity types

/// REFERENCE_EXT = 101: node, one id word, 1-byte creation
pub const REFERENCE_EXT: u8 = 101;
/// PORT_EXT = 102: node, 4-byte id, 1-byte creation
pub const PORT_EXT: u8 = 102;
/// PID_EXT = 103: node, 4-byte id, 4-byte serial, 1-byte creation
pub const PID_EXT: u8 = 103;
/// NEW_PID_EXT = 88: as PID_EXT with 4-byte creation
pub const NEW_PID_EXT: u8 = 88;
/// NEW_PORT_EXT = 89: as PORT_EXT with 4-byte creation
pub const NEW_PORT_EXT: u8 = 89;
/// NEWER_REFERENCE_EXT = 90: as NEW_REFERENCE_EXT with 4-byte creation
pub const NEWER_REFERENCE_EXT: u8 = 90;
/// NEW_REFERENCE_EXT = 114: 2-byte id count, node, 1-byte creation, ids
pub const NEW_REFERENCE_EXT: u8 = 114;
/// EXPORT_EXT = 113: module atom, function atom, integer arity
pub const EXPORT_EXT: u8 = 113;

// Containers

/// SMALL_TUPLE_EXT = 104: 1-byte arity
pub const SMALL_TUPLE_EXT: u8 = 104;
/// LARGE_TUPLE_EXT = 105: 4-byte arity
pub const LARGE_TUPLE_EXT: u8 = 105;
/// NIL_EXT = 106: the empty list
pub const NIL_EXT: u8 = 106;
/// STRING_EXT = 107: 2-byte length, bytes as small integers
pub const STRING_EXT: u8 = 107;
/// LIST_EXT = 108: 4-byte count, elements, tail
pub const LIST_EXT: u8 = 108;
/// BINARY_EXT = 109: 4-byte length, raw bytes
pub const BINARY_EXT: u8 = 109;

/// Width of the FLOAT_EXT text field
pub const FLOAT_EXT_TEXT_LEN: usize = 31;

/// Longest byte list written as STRING_EXT
pub const STRING_EXT_MAX_LEN: usize = u16::MAX as usize;

/// True for the four atom tags
pub fn is_atom_tag(tag: u8) -> bool {
    matches!(
        tag,
        ATOM_EXT | SMALL_ATOM_EXT | ATOM_UTF8_EXT | SMALL_ATOM_UTF8_EXT
    )
}
