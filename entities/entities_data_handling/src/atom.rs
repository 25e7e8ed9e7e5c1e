//! Atom Module
//!
//! An atom is an immutable text label. Two atoms are the same atom exactly when their
//! text is the same; there is no table and no identity beyond the content.
//!
//! ## Encoding Support
//!
//! The wire format carries atom text either as latin-1 (one byte per character) or as
//! UTF-8. Which family applies is a property of the text:
//!
//! - **Latin1**: every character is at most U+00FF, so each one fits a single byte
//! - **Utf8**: at least one character lies outside latin-1
//!
//! ## Limits
//!
//! - Short atom tags carry a 1-byte length: up to 255 bytes (`SMALL_ATOM_MAX_BYTES`)
//! - Long atom tags carry a 2-byte length: up to 65535 bytes (`MAX_ATOM_BYTES`)

use std::borrow::Borrow;
use std::fmt;

/// Longest atom, in encoded bytes, that fits the 1-byte length field.
pub const SMALL_ATOM_MAX_BYTES: usize = u8::MAX as usize;

/// Longest atom, in encoded bytes, that fits the 2-byte length field.
pub const MAX_ATOM_BYTES: usize = u16::MAX as usize;

/// Character encoding family of an atom's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomEncoding {
    /// All characters are in U+0000..=U+00FF
    Latin1,
    /// Some character needs UTF-8
    Utf8,
}

/// An immutable text label, compared and hashed by content.
///
/// # Examples
///
/// ```rust
/// use entities_data_handling::{Atom, AtomEncoding};
///
/// let ok = Atom::new("ok");
/// assert_eq!(ok, Atom::from("ok"));
/// assert_eq!(ok.encoding(), AtomEncoding::Latin1);
/// assert_eq!(Atom::new("λ").encoding(), AtomEncoding::Utf8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Atom {
    name: String,
}

impl Atom {
    /// Create an atom from its text
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Create an atom from latin-1 bytes, mapping each byte to the code point of the
    /// same value.
    pub fn from_latin1(bytes: &[u8]) -> Self {
        Self {
            name: bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }

    /// The atom's text
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Which tag family the text needs on the wire.
    pub fn encoding(&self) -> AtomEncoding {
        if self.name.chars().all(|c| u32::from(c) <= 0xFF) {
            AtomEncoding::Latin1
        } else {
            AtomEncoding::Utf8
        }
    }

    /// Length of the text in the bytes of its own encoding family.
    ///
    /// This is the value written to the atom's length field: the character count for
    /// latin-1 text, the UTF-8 byte count otherwise.
    pub fn encoded_len(&self) -> usize {
        match self.encoding() {
            AtomEncoding::Latin1 => self.name.chars().count(),
            AtomEncoding::Utf8 => self.name.len(),
        }
    }

    /// Append the text in its own encoding family to `buf`.
    pub fn write_encoded(&self, buf: &mut Vec<u8>) {
        match self.encoding() {
            // Every char is <= U+00FF here, the cast is lossless.
            AtomEncoding::Latin1 => buf.extend(self.name.chars().map(|c| c as u8)),
            AtomEncoding::Utf8 => buf.extend_from_slice(self.name.as_bytes()),
        }
    }

    /// Consume the atom, returning its text
    pub fn into_string(self) -> String {
        self.name
    }
}

impl From<&str> for Atom {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Atom {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for Atom {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl Borrow<str> for Atom {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl PartialEq<str> for Atom {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl PartialEq<&str> for Atom {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
