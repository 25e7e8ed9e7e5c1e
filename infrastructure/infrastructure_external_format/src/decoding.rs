//! Decoding Module
//!
//! Turns external term format bytes into a [`Term`].
//!
//! The input starts with the version byte (131) followed by exactly one tagged term.
//! Every read is bounds-checked against the remaining input. Declared element counts
//! only pre-reserve up to [`MAX_PREALLOCATED_ELEMENTS`] slots, the rest grows with the
//! elements actually decoded, and container nesting is capped by
//! [`DecodeOptions::max_depth`].

use entities_data_handling::{
    Atom, BigNumber, Export, List, Pid, Port, Reference, Term, MAX_REFERENCE_IDS,
};
use infrastructure_bignum_encoding::{BignumCodec, DecodeError as BignumDecodeError};
use log::{debug, trace};

use crate::error::{DecodeError, FormatError};
use crate::options::DecodeOptions;
use crate::tags::*;
use crate::VERSION_MAGIC;

/// Most element slots reserved up front for one tuple or list
pub const MAX_PREALLOCATED_ELEMENTS: usize = 1024;

/// Decode one term using default options
///
/// # Arguments
/// * `data` - Version byte followed by exactly one encoded term
///
/// # Returns
/// * `Ok(Term)` - Decoded term
/// * `Err(DecodeError)` - Malformed input, including trailing bytes
pub fn decode(data: &[u8]) -> Result<Term, DecodeError> {
    decode_with(data, &DecodeOptions::default())
}

/// Decode one term with explicit options
pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Result<Term, DecodeError> {
    trace!("decoding term from {} bytes", data.len());
    let result = dec_term_ext(data, options).and_then(|(term, consumed)| {
        if consumed < data.len() && !options.allow_trailing {
            return Err(DecodeError::TrailingBytes {
                consumed,
                remaining: data.len() - consumed,
            });
        }
        Ok(term)
    });
    if let Err(err) = &result {
        debug!("rejected {} byte input: {}", data.len(), err);
    }
    result
}

/// Decode the first term of `data`, returning it with the number of bytes consumed
///
/// Bytes after the term are left untouched, so several terms stored back to back can
/// be read by advancing through the returned count. Each term carries its own version
/// byte.
pub fn decode_prefix(data: &[u8]) -> Result<(Term, usize), DecodeError> {
    decode_prefix_with(data, &DecodeOptions::default())
}

/// [`decode_prefix`] with explicit options. `allow_trailing` has no effect here.
pub fn decode_prefix_with(
    data: &[u8],
    options: &DecodeOptions,
) -> Result<(Term, usize), DecodeError> {
    trace!("decoding term prefix from {} bytes", data.len());
    let result = dec_term_ext(data, options);
    if let Err(err) = &result {
        debug!("rejected {} byte input: {}", data.len(), err);
    }
    result
}

/// Check the version byte and decode the term after it
fn dec_term_ext(data: &[u8], options: &DecodeOptions) -> Result<(Term, usize), DecodeError> {
    let version = *data.first().ok_or(FormatError::MissingVersion)?;
    if version != VERSION_MAGIC {
        return Err(FormatError::UnsupportedVersion(version).into());
    }

    let mut decoder = Decoder {
        buf: data,
        pos: 1,
        max_depth: options.max_depth,
        strings_as_text: options.strings_as_text,
    };
    let term = decoder.dec_term(0)?;
    Ok((term, decoder.pos))
}

/// Cursor over the input
struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
    max_depth: usize,
    strings_as_text: bool,
}

impl<'a> Decoder<'a> {
    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining() {
            return Err(DecodeError::Truncated {
                offset: self.pos,
                needed: n,
                available: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_array::<1>()?[0])
    }

    fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Capacity for `declared` items: every item takes at least one byte, and every
    /// open container reserves at most MAX_PREALLOCATED_ELEMENTS.
    fn capacity_for(&self, declared: usize) -> usize {
        declared
            .min(self.remaining())
            .min(MAX_PREALLOCATED_ELEMENTS)
    }

    /// Decode one term at nesting `depth`
    fn dec_term(&mut self, depth: usize) -> Result<Term, DecodeError> {
        if depth > self.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }

        let offset = self.pos;
        let tag = self.read_u8()?;
        match tag {
            SMALL_INTEGER_EXT => Ok(Term::Integer(BigNumber::from(self.read_u8()?))),
            INTEGER_EXT => Ok(Term::Integer(BigNumber::from(self.read_i32()?))),
            SMALL_BIG_EXT | LARGE_BIG_EXT => self.dec_big(offset),
            FLOAT_EXT => self.dec_float_text(),
            NEW_FLOAT_EXT => Ok(Term::Float(f64::from_bits(self.read_u64()?))),
            ATOM_EXT | SMALL_ATOM_EXT | ATOM_UTF8_EXT | SMALL_ATOM_UTF8_EXT => {
                Ok(Term::Atom(self.dec_atom_body(tag)?))
            }
            SMALL_TUPLE_EXT => {
                let arity = self.read_u8()? as usize;
                self.dec_elements(arity, depth).map(Term::Tuple)
            }
            LARGE_TUPLE_EXT => {
                let arity = self.read_u32()? as usize;
                self.dec_elements(arity, depth).map(Term::Tuple)
            }
            NIL_EXT => Ok(Term::Nil),
            STRING_EXT => {
                let len = self.read_u16()? as usize;
                let bytes = self.read_bytes(len)?;
                if self.strings_as_text {
                    if let Ok(text) = std::str::from_utf8(bytes) {
                        return Ok(Term::Text(text.to_owned()));
                    }
                }
                if bytes.is_empty() {
                    return Ok(Term::Nil);
                }
                let elements = bytes
                    .iter()
                    .map(|&b| Term::Integer(BigNumber::from(b)))
                    .collect();
                Ok(Term::List(List::proper(elements)))
            }
            LIST_EXT => {
                let count = self.read_u32()? as usize;
                let elements = self.dec_elements(count, depth)?;
                let tail = self.dec_term(depth + 1)?;
                if elements.is_empty() {
                    return Ok(tail);
                }
                Ok(Term::List(List::new(elements, tail)))
            }
            BINARY_EXT => {
                let len = self.read_u32()? as usize;
                Ok(Term::Binary(self.read_bytes(len)?.to_vec()))
            }
            PID_EXT | NEW_PID_EXT => self.dec_pid(tag),
            PORT_EXT | NEW_PORT_EXT => self.dec_port(tag),
            REFERENCE_EXT => {
                let node = self.dec_atom("reference node")?;
                let id = self.read_u32()?;
                let creation = u32::from(self.read_u8()?);
                let reference = Reference::new(node, vec![id], creation)
                    .map_err(|_| DecodeError::InvalidReferenceIdCount { count: 1 })?;
                Ok(Term::Reference(reference))
            }
            NEW_REFERENCE_EXT | NEWER_REFERENCE_EXT => self.dec_new_reference(tag),
            EXPORT_EXT => self.dec_export(depth),
            _ => Err(DecodeError::UnknownTag { tag, offset }),
        }
    }

    /// Decode `count` consecutive terms one level below `depth`
    fn dec_elements(&mut self, count: usize, depth: usize) -> Result<Vec<Term>, DecodeError> {
        let mut elements = Vec::with_capacity(self.capacity_for(count));
        for _ in 0..count {
            elements.push(self.dec_term(depth + 1)?);
        }
        Ok(elements)
    }

    fn dec_big(&mut self, offset: usize) -> Result<Term, DecodeError> {
        let (value, consumed) =
            BignumCodec::decode(&self.buf[offset..]).map_err(|err| match err {
                BignumDecodeError::Truncated { needed, available } => DecodeError::Truncated {
                    offset,
                    needed,
                    available,
                },
                BignumDecodeError::UnexpectedTag(_) => DecodeError::InvalidBigInteger,
            })?;
        self.pos = offset + consumed;
        Ok(Term::Integer(value))
    }

    /// FLOAT_EXT: NUL-padded decimal text in a fixed 31-byte field
    fn dec_float_text(&mut self) -> Result<Term, DecodeError> {
        let offset = self.pos;
        let field = self.read_bytes(FLOAT_EXT_TEXT_LEN)?;
        let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
        let value = std::str::from_utf8(&field[..end])
            .ok()
            .and_then(|text| text.trim().parse::<f64>().ok())
            .ok_or(DecodeError::InvalidFloatText { offset })?;
        Ok(Term::Float(value))
    }

    /// Atom text after its tag
    fn dec_atom_body(&mut self, tag: u8) -> Result<Atom, DecodeError> {
        let len = match tag {
            SMALL_ATOM_EXT | SMALL_ATOM_UTF8_EXT => self.read_u8()? as usize,
            _ => self.read_u16()? as usize,
        };
        let offset = self.pos;
        let bytes = self.read_bytes(len)?;
        match tag {
            ATOM_EXT | SMALL_ATOM_EXT => Ok(Atom::from_latin1(bytes)),
            _ => std::str::from_utf8(bytes)
                .map(Atom::new)
                .map_err(|_| DecodeError::InvalidAtomText { offset }),
        }
    }

    /// Atom in a node, module or function position
    fn dec_atom(&mut self, context: &'static str) -> Result<Atom, DecodeError> {
        let tag = self.read_u8()?;
        if !is_atom_tag(tag) {
            return Err(DecodeError::ExpectedAtom {
                context,
                found: tag,
            });
        }
        self.dec_atom_body(tag)
    }

    fn dec_creation(&mut self, wide: bool) -> Result<u32, DecodeError> {
        if wide {
            self.read_u32()
        } else {
            Ok(u32::from(self.read_u8()?))
        }
    }

    fn dec_pid(&mut self, tag: u8) -> Result<Term, DecodeError> {
        let node = self.dec_atom("pid node")?;
        let id = self.read_u32()?;
        let serial = self.read_u32()?;
        let creation = self.dec_creation(tag == NEW_PID_EXT)?;
        Ok(Term::Pid(Pid::new(node, id, serial, creation)))
    }

    fn dec_port(&mut self, tag: u8) -> Result<Term, DecodeError> {
        let node = self.dec_atom("port node")?;
        let id = self.read_u32()?;
        let creation = self.dec_creation(tag == NEW_PORT_EXT)?;
        Ok(Term::Port(Port::new(node, id, creation)))
    }

    fn dec_new_reference(&mut self, tag: u8) -> Result<Term, DecodeError> {
        let count = self.read_u16()? as usize;
        if count == 0 || count > MAX_REFERENCE_IDS {
            return Err(DecodeError::InvalidReferenceIdCount { count });
        }
        let node = self.dec_atom("reference node")?;
        let creation = self.dec_creation(tag == NEWER_REFERENCE_EXT)?;
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            ids.push(self.read_u32()?);
        }
        let reference = Reference::new(node, ids, creation)
            .map_err(|_| DecodeError::InvalidReferenceIdCount { count })?;
        Ok(Term::Reference(reference))
    }

    fn dec_export(&mut self, depth: usize) -> Result<Term, DecodeError> {
        let module = self.dec_atom("export module")?;
        let function = self.dec_atom("export function")?;
        let arity = match self.dec_term(depth + 1)? {
            Term::Integer(n) => n.to_u32(),
            _ => None,
        }
        .ok_or(DecodeError::InvalidArity {
            context: "export",
        })?;
        Ok(Term::Export(Export::new(module, function, arity)))
    }
}
