//! Size Calculation Module
//!
//! Exact encoded length of a term, computed without allocating. Mirrors the tag
//! choices in [`encoding`](crate::encoding) one for one and applies the same checks,
//! so a term that sizes successfully also encodes successfully.

use entities_data_handling::{Atom, BigNumber, Term, MAX_ATOM_BYTES, SMALL_ATOM_MAX_BYTES};
use infrastructure_bignum_encoding::BignumCodec;

use crate::encoding::{length_field, wide_creation};
use crate::error::EncodeError;
use crate::options::{EncodeOptions, TextEncoding};
use crate::tags::STRING_EXT_MAX_LEN;

/// Number of bytes `encode` produces for `term`, version byte included
pub fn encoded_size(term: &Term) -> Result<usize, EncodeError> {
    encoded_size_with(term, &EncodeOptions::default())
}

/// Number of bytes `encode_with` produces for `term` under `options`
pub fn encoded_size_with(term: &Term, options: &EncodeOptions) -> Result<usize, EncodeError> {
    Ok(1 + size_term(term, 0, options)?)
}

/// Size of one tagged term
fn size_term(term: &Term, depth: usize, options: &EncodeOptions) -> Result<usize, EncodeError> {
    if depth > options.max_depth {
        return Err(EncodeError::DepthLimitExceeded {
            limit: options.max_depth,
        });
    }

    match term {
        Term::Integer(n) => size_integer(n),
        Term::Float(f) => {
            if !f.is_finite() {
                return Err(EncodeError::NonFiniteFloat);
            }
            // NEW_FLOAT_EXT: tag + 8 bytes
            Ok(9)
        }
        Term::Atom(atom) => size_atom(atom),
        Term::Nil => Ok(1),
        Term::Binary(bytes) => {
            length_field("binary", bytes.len())?;
            Ok(5 + bytes.len())
        }
        Term::ByteList(bytes) => size_byte_list(bytes),
        Term::Text(text) => size_text(text, options.text_encoding),
        Term::Tuple(elements) => {
            let header = if elements.len() <= u8::MAX as usize {
                2
            } else {
                length_field("tuple", elements.len())?;
                5
            };
            let mut size = header;
            for element in elements {
                size += size_term(element, depth + 1, options)?;
            }
            Ok(size)
        }
        Term::List(list) => {
            if list.is_empty() {
                return size_term(list.tail(), depth + 1, options);
            }
            length_field("list", list.len())?;
            let mut size = 5;
            for element in list.elements() {
                size += size_term(element, depth + 1, options)?;
            }
            Ok(size + size_term(list.tail(), depth + 1, options)?)
        }
        Term::Pid(pid) => {
            // tag + node + id + serial + creation
            Ok(1 + size_atom(pid.node())? + 8 + size_creation(pid.creation()))
        }
        Term::Port(port) => Ok(1 + size_atom(port.node())? + 4 + size_creation(port.creation())),
        Term::Reference(reference) => {
            // tag + id count + node + creation + ids
            Ok(1 + 2
                + size_atom(reference.node())?
                + size_creation(reference.creation())
                + 4 * reference.ids().len())
        }
        Term::Export(export) => Ok(1
            + size_atom(export.module())?
            + size_atom(export.function())?
            + size_integer(&BigNumber::from(export.arity()))?),
    }
}

fn size_integer(n: &BigNumber) -> Result<usize, EncodeError> {
    if n.to_u8().is_some() {
        Ok(2)
    } else if n.to_i32().is_some() {
        Ok(5)
    } else {
        let bytes = n.magnitude_byte_len();
        if u32::try_from(bytes).is_err() {
            return Err(EncodeError::BigIntegerTooLarge { bytes });
        }
        Ok(BignumCodec::encoded_size(n))
    }
}

fn size_byte_list(bytes: &[u8]) -> Result<usize, EncodeError> {
    if bytes.is_empty() {
        Ok(1)
    } else if bytes.len() <= STRING_EXT_MAX_LEN {
        Ok(3 + bytes.len())
    } else {
        length_field("byte list", bytes.len())?;
        // LIST_EXT header, SMALL_INTEGER_EXT per byte, NIL_EXT
        Ok(5 + 2 * bytes.len() + 1)
    }
}

fn size_text(text: &str, encoding: TextEncoding) -> Result<usize, EncodeError> {
    match encoding {
        TextEncoding::Binary => {
            length_field("text", text.len())?;
            Ok(5 + text.len())
        }
        TextEncoding::ByteList => size_byte_list(text.as_bytes()),
        TextEncoding::CodePoints => {
            if text.is_empty() {
                return Ok(1);
            }
            length_field("text", text.chars().count())?;
            let mut size = 5 + 1;
            for c in text.chars() {
                size += if u32::from(c) <= u32::from(u8::MAX) { 2 } else { 5 };
            }
            Ok(size)
        }
    }
}

fn size_atom(atom: &Atom) -> Result<usize, EncodeError> {
    let len = atom.encoded_len();
    if len > MAX_ATOM_BYTES {
        return Err(EncodeError::AtomTooLong { len });
    }
    let header = if len <= SMALL_ATOM_MAX_BYTES { 2 } else { 3 };
    Ok(header + len)
}

fn size_creation(creation: u32) -> usize {
    if wide_creation(creation) {
        4
    } else {
        1
    }
}
