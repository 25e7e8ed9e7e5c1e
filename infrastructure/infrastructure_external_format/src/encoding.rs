//! Encoding Module
//!
//! Turns a [`Term`] into external term format bytes: the version byte (131) followed
//! by one tagged term. Each kind of term always gets the same, most compact tag:
//!
//! | Term | Tag |
//! |---|---|
//! | integer 0..=255 | SMALL_INTEGER_EXT |
//! | integer in `i32` range | INTEGER_EXT |
//! | other integers | SMALL_BIG_EXT up to 255 magnitude bytes, else LARGE_BIG_EXT |
//! | float | NEW_FLOAT_EXT (finite values only) |
//! | atom | SMALL_ATOM_EXT / ATOM_EXT, UTF-8 variants only outside latin-1 |
//! | binary | BINARY_EXT |
//! | byte list | NIL_EXT if empty, STRING_EXT up to 65535 bytes, else LIST_EXT |
//! | text | per [`TextEncoding`]: BINARY_EXT of UTF-8 (default), a UTF-8 byte list, or a LIST_EXT of code points |
//! | list | LIST_EXT with explicit tail, NIL_EXT if empty |
//! | tuple | SMALL_TUPLE_EXT below 256 elements, else LARGE_TUPLE_EXT |
//! | pid / port / reference | PID_EXT / PORT_EXT / NEW_REFERENCE_EXT, or the 4-byte creation forms when creation exceeds 255 |
//! | export | EXPORT_EXT |
//!
//! The output buffer is sized once from [`encoded_size_with`] so long or deeply nested
//! terms are never re-copied.

use entities_data_handling::{
    Atom, AtomEncoding, BigNumber, Export, List, Pid, Port, Reference, Term, MAX_ATOM_BYTES,
    SMALL_ATOM_MAX_BYTES,
};
use infrastructure_bignum_encoding::{BignumCodec, EncodeError as BignumEncodeError};
use log::{debug, trace};

use crate::error::EncodeError;
use crate::options::{EncodeOptions, TextEncoding};
use crate::size_calculation::encoded_size_with;
use crate::tags::*;
use crate::VERSION_MAGIC;

/// Encode a term using default options
///
/// # Arguments
/// * `term` - Term to encode
///
/// # Returns
/// * `Ok(bytes)` - Version byte followed by the encoded term
/// * `Err(EncodeError)` - The term has no wire representation
pub fn encode(term: &Term) -> Result<Vec<u8>, EncodeError> {
    encode_with(term, &EncodeOptions::default())
}

/// Encode a term with explicit options
pub fn encode_with(term: &Term, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    let result = encoded_size_with(term, options).and_then(|size| {
        trace!("encoding {} term into {} bytes", term.kind_name(), size);
        let mut buf = Vec::with_capacity(size);
        buf.push(VERSION_MAGIC);
        enc_term(term, &mut buf, 0, options)?;
        Ok(buf)
    });
    if let Err(err) = &result {
        debug!("rejected {} term: {}", term.kind_name(), err);
    }
    result
}

/// Append one tagged term to `buf`
pub(crate) fn enc_term(
    term: &Term,
    buf: &mut Vec<u8>,
    depth: usize,
    options: &EncodeOptions,
) -> Result<(), EncodeError> {
    if depth > options.max_depth {
        return Err(EncodeError::DepthLimitExceeded {
            limit: options.max_depth,
        });
    }

    match term {
        Term::Integer(n) => enc_integer(n, buf),
        Term::Float(f) => {
            if !f.is_finite() {
                return Err(EncodeError::NonFiniteFloat);
            }
            buf.push(NEW_FLOAT_EXT);
            buf.extend_from_slice(&f.to_bits().to_be_bytes());
            Ok(())
        }
        Term::Atom(atom) => enc_atom(atom, buf),
        Term::Nil => {
            buf.push(NIL_EXT);
            Ok(())
        }
        Term::Binary(bytes) => {
            let len = length_field("binary", bytes.len())?;
            buf.push(BINARY_EXT);
            buf.extend_from_slice(&len.to_be_bytes());
            buf.extend_from_slice(bytes);
            Ok(())
        }
        Term::ByteList(bytes) => enc_byte_list(bytes, buf),
        Term::Text(text) => enc_text(text, buf, options.text_encoding),
        Term::Tuple(elements) => {
            if elements.len() <= u8::MAX as usize {
                buf.push(SMALL_TUPLE_EXT);
                buf.push(elements.len() as u8);
            } else {
                let arity = length_field("tuple", elements.len())?;
                buf.push(LARGE_TUPLE_EXT);
                buf.extend_from_slice(&arity.to_be_bytes());
            }
            for element in elements {
                enc_term(element, buf, depth + 1, options)?;
            }
            Ok(())
        }
        Term::List(list) => enc_list(list, buf, depth, options),
        Term::Pid(pid) => enc_pid(pid, buf),
        Term::Port(port) => enc_port(port, buf),
        Term::Reference(reference) => enc_reference(reference, buf),
        Term::Export(export) => enc_export(export, buf),
    }
}

/// Convert a container length to its 4-byte length field
pub(crate) fn length_field(kind: &'static str, len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::LengthOverflow { kind, len })
}

fn enc_integer(n: &BigNumber, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    if let Some(small) = n.to_u8() {
        buf.push(SMALL_INTEGER_EXT);
        buf.push(small);
    } else if let Some(int) = n.to_i32() {
        buf.push(INTEGER_EXT);
        buf.extend_from_slice(&int.to_be_bytes());
    } else {
        BignumCodec::encode(n, buf).map_err(|err| match err {
            BignumEncodeError::TooLarge { bytes } => EncodeError::BigIntegerTooLarge { bytes },
        })?;
    }
    Ok(())
}

/// Tag for an atom of `len` encoded bytes in `encoding`
fn atom_tag(encoding: AtomEncoding, len: usize) -> u8 {
    match (encoding, len <= SMALL_ATOM_MAX_BYTES) {
        (AtomEncoding::Latin1, true) => SMALL_ATOM_EXT,
        (AtomEncoding::Latin1, false) => ATOM_EXT,
        (AtomEncoding::Utf8, true) => SMALL_ATOM_UTF8_EXT,
        (AtomEncoding::Utf8, false) => ATOM_UTF8_EXT,
    }
}

/// Encode an atom
///
/// The text is written latin-1 when every character allows it, so plain ASCII atoms
/// use the same tags older peers produce.
pub(crate) fn enc_atom(atom: &Atom, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    let len = atom.encoded_len();
    if len > MAX_ATOM_BYTES {
        return Err(EncodeError::AtomTooLong { len });
    }
    let tag = atom_tag(atom.encoding(), len);
    buf.push(tag);
    if len <= SMALL_ATOM_MAX_BYTES {
        buf.push(len as u8);
    } else {
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    }
    atom.write_encoded(buf);
    Ok(())
}

fn enc_byte_list(bytes: &[u8], buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    if bytes.is_empty() {
        buf.push(NIL_EXT);
    } else if bytes.len() <= STRING_EXT_MAX_LEN {
        buf.push(STRING_EXT);
        buf.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
        buf.extend_from_slice(bytes);
    } else {
        // Too long for STRING_EXT: a proper list of small integers
        let count = length_field("byte list", bytes.len())?;
        buf.push(LIST_EXT);
        buf.extend_from_slice(&count.to_be_bytes());
        for &b in bytes {
            buf.push(SMALL_INTEGER_EXT);
            buf.push(b);
        }
        buf.push(NIL_EXT);
    }
    Ok(())
}

fn enc_text(text: &str, buf: &mut Vec<u8>, encoding: TextEncoding) -> Result<(), EncodeError> {
    match encoding {
        TextEncoding::Binary => {
            let len = length_field("text", text.len())?;
            buf.push(BINARY_EXT);
            buf.extend_from_slice(&len.to_be_bytes());
            buf.extend_from_slice(text.as_bytes());
            Ok(())
        }
        TextEncoding::ByteList => enc_byte_list(text.as_bytes(), buf),
        TextEncoding::CodePoints => {
            if text.is_empty() {
                buf.push(NIL_EXT);
                return Ok(());
            }
            let count = length_field("text", text.chars().count())?;
            buf.push(LIST_EXT);
            buf.extend_from_slice(&count.to_be_bytes());
            for c in text.chars() {
                enc_integer(&BigNumber::from(u32::from(c)), buf)?;
            }
            buf.push(NIL_EXT);
            Ok(())
        }
    }
}

fn enc_list(
    list: &List,
    buf: &mut Vec<u8>,
    depth: usize,
    options: &EncodeOptions,
) -> Result<(), EncodeError> {
    if list.is_empty() {
        // [] | Tail is just Tail
        return enc_term(list.tail(), buf, depth + 1, options);
    }
    let count = length_field("list", list.len())?;
    buf.push(LIST_EXT);
    buf.extend_from_slice(&count.to_be_bytes());
    for element in list.elements() {
        enc_term(element, buf, depth + 1, options)?;
    }
    enc_term(list.tail(), buf, depth + 1, options)
}

/// True when `creation` needs the 4-byte creation tags
pub(crate) fn wide_creation(creation: u32) -> bool {
    creation > u32::from(u8::MAX)
}

fn enc_creation(creation: u32, buf: &mut Vec<u8>) {
    if wide_creation(creation) {
        buf.extend_from_slice(&creation.to_be_bytes());
    } else {
        buf.push(creation as u8);
    }
}

fn enc_pid(pid: &Pid, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    buf.push(if wide_creation(pid.creation()) {
        NEW_PID_EXT
    } else {
        PID_EXT
    });
    enc_atom(pid.node(), buf)?;
    buf.extend_from_slice(&pid.id().to_be_bytes());
    buf.extend_from_slice(&pid.serial().to_be_bytes());
    enc_creation(pid.creation(), buf);
    Ok(())
}

fn enc_port(port: &Port, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    buf.push(if wide_creation(port.creation()) {
        NEW_PORT_EXT
    } else {
        PORT_EXT
    });
    enc_atom(port.node(), buf)?;
    buf.extend_from_slice(&port.id().to_be_bytes());
    enc_creation(port.creation(), buf);
    Ok(())
}

fn enc_reference(reference: &Reference, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    buf.push(if wide_creation(reference.creation()) {
        NEWER_REFERENCE_EXT
    } else {
        NEW_REFERENCE_EXT
    });
    // At most MAX_REFERENCE_IDS words
    buf.extend_from_slice(&(reference.ids().len() as u16).to_be_bytes());
    enc_atom(reference.node(), buf)?;
    enc_creation(reference.creation(), buf);
    for id in reference.ids() {
        buf.extend_from_slice(&id.to_be_bytes());
    }
    Ok(())
}

fn enc_export(export: &Export, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    buf.push(EXPORT_EXT);
    enc_atom(export.module(), buf)?;
    enc_atom(export.function(), buf)?;
    enc_integer(&BigNumber::from(export.arity()), buf)
}
