//! Term Module
//!
//! `Term` is the closed set of values that can cross the wire. Encoder and decoder both
//! match on it exhaustively, so adding a variant is a compile error in every place that
//! has to learn about it.
//!
//! ## List kinds
//!
//! Three variants describe lists:
//!
//! - `Nil`: the empty list, never equal to any atom
//! - `List`: elements plus an explicit tail, `Nil` for a proper list
//! - `ByteList`: a proper list of small integers, stored compactly
//!
//! These compare by their flattened elements and final tail (see `term_hashing`), so a
//! `ByteList` and the `List` of the same integers are the same value. `Binary` is a
//! distinct kind and never equals a list.
//!
//! ## Text
//!
//! `Text` is Unicode text with no wire tag of its own. The encoder writes it as a
//! binary, a byte list or a list of code points depending on its options, and
//! [`Term::as_text`] reads any of the byte forms back.

use std::borrow::Cow;

use entities_utilities::BigNumber;

use crate::atom::Atom;
use crate::export::Export;
use crate::pid::Pid;
use crate::port::Port;
use crate::reference::Reference;
use crate::term_hashing::list_bytes;

/// A value of the wire type model
///
/// Equality, hashing and `Display` are implemented by hand in `term_hashing` and
/// `print_term`.
#[derive(Clone, Debug, Default)]
pub enum Term {
    /// Integer of any magnitude
    Integer(BigNumber),
    /// IEEE-754 double
    Float(f64),
    Atom(Atom),
    /// The empty list
    #[default]
    Nil,
    /// Raw bytes
    Binary(Vec<u8>),
    /// Proper list of integers in 0..=255, written compactly when encoded
    ByteList(Vec<u8>),
    /// Unicode text, written in the form chosen by the encoder options
    Text(String),
    Tuple(Vec<Term>),
    List(List),
    Pid(Pid),
    Port(Port),
    Reference(Reference),
    Export(Export),
}

/// Ordered elements followed by an explicit tail.
///
/// A tail of `Term::Nil` makes the list proper; any other tail makes it improper.
#[derive(Clone, Debug)]
pub struct List {
    elements: Vec<Term>,
    tail: Box<Term>,
}

impl List {
    /// Create a list with the given tail
    pub fn new(elements: Vec<Term>, tail: Term) -> Self {
        Self {
            elements,
            tail: Box::new(tail),
        }
    }

    /// Create a proper list
    pub fn proper(elements: Vec<Term>) -> Self {
        Self::new(elements, Term::Nil)
    }

    pub fn elements(&self) -> &[Term] {
        &self.elements
    }

    pub fn tail(&self) -> &Term {
        &self.tail
    }

    /// Number of elements before the tail
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// True if the tail is `Nil`
    pub fn is_proper(&self) -> bool {
        matches!(*self.tail, Term::Nil)
    }

    pub fn into_parts(self) -> (Vec<Term>, Term) {
        (self.elements, *self.tail)
    }
}

impl Term {
    pub fn integer(value: impl Into<BigNumber>) -> Self {
        Term::Integer(value.into())
    }

    pub fn float(value: f64) -> Self {
        Term::Float(value)
    }

    pub fn atom(name: impl Into<Atom>) -> Self {
        Term::Atom(name.into())
    }

    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Term::Binary(bytes.into())
    }

    pub fn byte_list(bytes: impl Into<Vec<u8>>) -> Self {
        Term::ByteList(bytes.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Term::Text(text.into())
    }

    pub fn tuple(elements: Vec<Term>) -> Self {
        Term::Tuple(elements)
    }

    /// Proper list of `elements`
    pub fn list(elements: Vec<Term>) -> Self {
        Term::List(List::proper(elements))
    }

    /// List of `elements` ending in `tail` instead of `Nil`
    pub fn improper_list(elements: Vec<Term>, tail: Term) -> Self {
        Term::List(List::new(elements, tail))
    }

    /// The atom `true` or `false`
    pub fn boolean(value: bool) -> Self {
        Term::Atom(Atom::new(if value { "true" } else { "false" }))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Term::Nil)
    }

    /// Value of an integer term if it fits in an `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Term::Integer(n) => n.to_i64(),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Term::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Term::Atom(a) => Some(a),
            _ => None,
        }
    }

    /// `Some(true)` for the atom `true`, `Some(false)` for `false`, otherwise `None`
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_atom()?.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Term::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Text carried by the term, if any
    ///
    /// `Text` is returned as is. A binary, or a proper list of integers in 0..=255,
    /// is read as UTF-8; `Nil` is the empty text. Anything else, including bytes that
    /// are not valid UTF-8, gives `None`.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Term::Text(text) => Some(Cow::Borrowed(text)),
            Term::Binary(bytes) => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
            Term::ByteList(bytes) => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
            _ => String::from_utf8(list_bytes(self)?).ok().map(Cow::Owned),
        }
    }

    pub fn as_tuple(&self) -> Option<&[Term]> {
        match self {
            Term::Tuple(elements) => Some(elements),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Term::Integer(_) => "integer",
            Term::Float(_) => "float",
            Term::Atom(_) => "atom",
            Term::Nil => "nil",
            Term::Binary(_) => "binary",
            Term::ByteList(_) => "byte list",
            Term::Text(_) => "text",
            Term::Tuple(_) => "tuple",
            Term::List(_) => "list",
            Term::Pid(_) => "pid",
            Term::Port(_) => "port",
            Term::Reference(_) => "reference",
            Term::Export(_) => "export",
        }
    }
}

impl From<BigNumber> for Term {
    fn from(value: BigNumber) -> Self {
        Term::Integer(value)
    }
}

impl From<i32> for Term {
    fn from(value: i32) -> Self {
        Term::Integer(BigNumber::from(value))
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::Integer(BigNumber::from(value))
    }
}

impl From<u32> for Term {
    fn from(value: u32) -> Self {
        Term::Integer(BigNumber::from(value))
    }
}

impl From<u64> for Term {
    fn from(value: u64) -> Self {
        Term::Integer(BigNumber::from(value))
    }
}

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Term::Float(value)
    }
}

impl From<bool> for Term {
    fn from(value: bool) -> Self {
        Term::boolean(value)
    }
}

impl From<Atom> for Term {
    fn from(value: Atom) -> Self {
        Term::Atom(value)
    }
}

impl From<List> for Term {
    fn from(value: List) -> Self {
        Term::List(value)
    }
}

impl From<Pid> for Term {
    fn from(value: Pid) -> Self {
        Term::Pid(value)
    }
}

impl From<Port> for Term {
    fn from(value: Port) -> Self {
        Term::Port(value)
    }
}

impl From<Reference> for Term {
    fn from(value: Reference) -> Self {
        Term::Reference(value)
    }
}

impl From<Export> for Term {
    fn from(value: Export) -> Self {
        Term::Export(value)
    }
}
