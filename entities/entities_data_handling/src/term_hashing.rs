//! Term Hashing Module
//!
//! Structural equality and hashing for [`Term`] and [`List`].
//!
//! Integers compare by value and floats by IEEE bit pattern, so `Term` can be `Eq`.
//! The three list kinds (`Nil`, `List`, `ByteList`) compare by the sequence of
//! elements reached by following tails, plus the first tail that is not itself a list.
//! Consequently:
//!
//! - `List { [], tail }` is equal to `tail`
//! - `[1 | [2 | Nil]]` is equal to `[1, 2]`
//! - `ByteList([1, 2])` is equal to `List([Integer(1), Integer(2)])`
//!
//! Tail chains are walked iteratively by [`ListCursor`], so a long chain of nested
//! tails does not grow the stack.

use std::hash::{Hash, Hasher};
use std::slice;

use entities_utilities::BigNumber;

use crate::term::{List, Term};

static NIL: Term = Term::Nil;

// Hash discriminants. All list kinds share LIST_LIKE.
const INTEGER: u8 = 1;
const FLOAT: u8 = 2;
const ATOM: u8 = 3;
const LIST_LIKE: u8 = 4;
const BINARY: u8 = 5;
const TUPLE: u8 = 6;
const PID: u8 = 7;
const PORT: u8 = 8;
const REFERENCE: u8 = 9;
const EXPORT: u8 = 10;
const TEXT: u8 = 11;

/// One element produced while walking a list.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ListItem<'a> {
    Term(&'a Term),
    Byte(u8),
}

impl PartialEq for ListItem<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ListItem::Term(a), ListItem::Term(b)) => a == b,
            (ListItem::Byte(a), ListItem::Byte(b)) => a == b,
            (ListItem::Term(t), ListItem::Byte(b)) | (ListItem::Byte(b), ListItem::Term(t)) => {
                matches!(resolve(t), Term::Integer(n) if n.to_u8() == Some(*b))
            }
        }
    }
}

enum Segment<'a> {
    Terms(slice::Iter<'a, Term>, &'a Term),
    Bytes(slice::Iter<'a, u8>),
    Done(&'a Term),
}

/// Iterator over the flattened elements of a list-like term.
///
/// Once `next` returns `None`, [`ListCursor::final_tail`] is the first tail that is not
/// a list (`Nil` for a proper list).
pub(crate) struct ListCursor<'a> {
    segment: Segment<'a>,
}

impl<'a> ListCursor<'a> {
    pub(crate) fn new(term: &'a Term) -> Self {
        Self {
            segment: Self::enter(term),
        }
    }

    fn enter(term: &'a Term) -> Segment<'a> {
        match term {
            Term::List(list) => Segment::Terms(list.elements().iter(), list.tail()),
            Term::ByteList(bytes) => Segment::Bytes(bytes.iter()),
            other => Segment::Done(other),
        }
    }

    /// Tail at the end of the walk. Only meaningful once the iterator is exhausted.
    pub(crate) fn final_tail(&self) -> &'a Term {
        match self.segment {
            Segment::Done(tail) => tail,
            _ => &NIL,
        }
    }
}

impl<'a> Iterator for ListCursor<'a> {
    type Item = ListItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.segment {
                Segment::Terms(iter, tail) => match iter.next() {
                    Some(term) => return Some(ListItem::Term(term)),
                    None => {
                        let tail = *tail;
                        self.segment = Self::enter(tail);
                    }
                },
                Segment::Bytes(iter) => match iter.next() {
                    Some(b) => return Some(ListItem::Byte(*b)),
                    None => self.segment = Segment::Done(&NIL),
                },
                Segment::Done(_) => return None,
            }
        }
    }
}

/// Skip empty list heads so that `List { [], tail }` resolves to `tail`.
pub(crate) fn resolve(mut term: &Term) -> &Term {
    loop {
        match term {
            Term::List(list) if list.is_empty() => term = list.tail(),
            Term::ByteList(bytes) if bytes.is_empty() => return &NIL,
            _ => return term,
        }
    }
}

/// Elements of a proper list-like term when every one is an integer in 0..=255.
///
/// `Nil` gives an empty vector. Improper lists and any other element give `None`.
pub(crate) fn list_bytes(term: &Term) -> Option<Vec<u8>> {
    let term = resolve(term);
    if !is_list_like(term) {
        return None;
    }
    let mut bytes = Vec::new();
    let mut cursor = ListCursor::new(term);
    for item in cursor.by_ref() {
        match item {
            ListItem::Byte(b) => bytes.push(b),
            ListItem::Term(t) => match resolve(t) {
                Term::Integer(n) => bytes.push(n.to_u8()?),
                _ => return None,
            },
        }
    }
    match cursor.final_tail() {
        Term::Nil => Some(bytes),
        _ => None,
    }
}

fn is_list_like(term: &Term) -> bool {
    matches!(term, Term::Nil | Term::List(_) | Term::ByteList(_))
}

fn list_eq(a: &Term, b: &Term) -> bool {
    let mut left = ListCursor::new(a);
    let mut right = ListCursor::new(b);
    loop {
        match (left.next(), right.next()) {
            (Some(x), Some(y)) => {
                if x != y {
                    return false;
                }
            }
            (None, None) => return left.final_tail() == right.final_tail(),
            _ => return false,
        }
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        let a = resolve(self);
        let b = resolve(other);
        match (a, b) {
            (Term::Integer(x), Term::Integer(y)) => x == y,
            (Term::Float(x), Term::Float(y)) => x.to_bits() == y.to_bits(),
            (Term::Atom(x), Term::Atom(y)) => x == y,
            (Term::Binary(x), Term::Binary(y)) => x == y,
            (Term::Text(x), Term::Text(y)) => x == y,
            (Term::Tuple(x), Term::Tuple(y)) => x == y,
            (Term::Pid(x), Term::Pid(y)) => x == y,
            (Term::Port(x), Term::Port(y)) => x == y,
            (Term::Reference(x), Term::Reference(y)) => x == y,
            (Term::Export(x), Term::Export(y)) => x == y,
            (Term::Nil, Term::Nil) => true,
            _ if is_list_like(a) && is_list_like(b) => list_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Term {}

fn hash_integer<H: Hasher>(n: &BigNumber, state: &mut H) {
    state.write_u8(INTEGER);
    n.hash(state);
}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match resolve(self) {
            Term::Integer(n) => hash_integer(n, state),
            Term::Float(f) => {
                state.write_u8(FLOAT);
                state.write_u64(f.to_bits());
            }
            Term::Atom(a) => {
                state.write_u8(ATOM);
                a.hash(state);
            }
            Term::Binary(bytes) => {
                state.write_u8(BINARY);
                bytes.hash(state);
            }
            Term::Text(text) => {
                state.write_u8(TEXT);
                text.hash(state);
            }
            Term::Tuple(elements) => {
                state.write_u8(TUPLE);
                elements.hash(state);
            }
            Term::Pid(p) => {
                state.write_u8(PID);
                p.hash(state);
            }
            Term::Port(p) => {
                state.write_u8(PORT);
                p.hash(state);
            }
            Term::Reference(r) => {
                state.write_u8(REFERENCE);
                r.hash(state);
            }
            Term::Export(e) => {
                state.write_u8(EXPORT);
                e.hash(state);
            }
            list @ (Term::Nil | Term::List(_) | Term::ByteList(_)) => {
                state.write_u8(LIST_LIKE);
                let mut cursor = ListCursor::new(list);
                for item in cursor.by_ref() {
                    state.write_u8(1);
                    match item {
                        ListItem::Term(t) => t.hash(state),
                        ListItem::Byte(b) => hash_integer(&BigNumber::from(b), state),
                    }
                }
                state.write_u8(0);
                // The final tail is never a list; Nil is marked instead of recursing.
                match cursor.final_tail() {
                    Term::Nil => state.write_u8(0),
                    tail => {
                        state.write_u8(1);
                        tail.hash(state);
                    }
                }
            }
        }
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.elements() == other.elements() && self.tail() == other.tail()
    }
}

impl Eq for List {}

impl Hash for List {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.elements().hash(state);
        self.tail().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of(term: &Term) -> u64 {
        let mut hasher = DefaultHasher::new();
        term.hash(&mut hasher);
        hasher.finish()
    }

    fn assert_same(a: &Term, b: &Term) {
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_eq!(hash_of(a), hash_of(b));
    }

    #[test]
    fn test_nil_is_not_an_atom() {
        assert_ne!(Term::Nil, Term::atom("nil"));
        assert_ne!(Term::Nil, Term::atom("[]"));
        assert_ne!(Term::atom("nil"), Term::Nil);
    }

    #[test]
    fn test_empty_forms_are_distinct() {
        let nil = Term::Nil;
        let tuple = Term::tuple(vec![]);
        let binary = Term::binary(vec![]);
        assert_ne!(nil, tuple);
        assert_ne!(nil, binary);
        assert_ne!(tuple, binary);
    }

    #[test]
    fn test_empty_lists_are_nil() {
        assert_same(&Term::list(vec![]), &Term::Nil);
        assert_same(&Term::byte_list(vec![]), &Term::Nil);
    }

    #[test]
    fn test_byte_list_equals_integer_list() {
        let bytes = Term::byte_list(vec![1, 2, 3]);
        let ints = Term::list(vec![Term::integer(1), Term::integer(2), Term::integer(3)]);
        assert_same(&bytes, &ints);
    }

    #[test]
    fn test_byte_list_never_equals_binary() {
        assert_ne!(Term::byte_list(vec![1, 2, 3]), Term::binary(vec![1, 2, 3]));
        let ints = Term::list(vec![Term::integer(1), Term::integer(2), Term::integer(3)]);
        assert_ne!(ints, Term::binary(vec![1, 2, 3]));
    }

    #[test]
    fn test_byte_does_not_match_large_integer() {
        let bytes = Term::byte_list(vec![0]);
        assert_ne!(bytes, Term::list(vec![Term::integer(256)]));
        assert_ne!(bytes, Term::list(vec![Term::float(0.0)]));
    }

    #[test]
    fn test_nested_tail_flattens() {
        let nested = Term::improper_list(
            vec![Term::integer(1)],
            Term::improper_list(vec![Term::integer(2)], Term::integer(3)),
        );
        let flat = Term::improper_list(vec![Term::integer(1), Term::integer(2)], Term::integer(3));
        assert_same(&nested, &flat);
    }

    #[test]
    fn test_proper_and_improper_differ() {
        let proper = Term::list(vec![Term::integer(1), Term::integer(2)]);
        let improper = Term::improper_list(vec![Term::integer(1)], Term::integer(2));
        assert_ne!(proper, improper);
    }

    #[test]
    fn test_empty_list_with_tail_is_the_tail() {
        let list = Term::improper_list(vec![], Term::atom("x"));
        assert_same(&list, &Term::atom("x"));
    }

    #[test]
    fn test_floats_compare_by_bits() {
        assert_same(&Term::float(0.1), &Term::float(0.1));
        assert_ne!(Term::float(0.0), Term::float(-0.0));
        assert_same(&Term::float(f64::NAN), &Term::float(f64::NAN));
    }

    #[test]
    fn test_integer_and_float_differ() {
        assert_ne!(Term::integer(1), Term::float(1.0));
    }

    #[test]
    fn test_long_tail_chain() {
        let mut term = Term::Nil;
        for i in 0..100_000 {
            term = Term::improper_list(vec![Term::integer(i)], term);
        }
        let mut other = Term::Nil;
        for i in 0..100_000 {
            other = Term::improper_list(vec![Term::integer(i)], other);
        }
        assert_eq!(term, other);
        assert_eq!(hash_of(&term), hash_of(&other));
        // Iterative drop of the chain
        let mut current = term;
        while let Term::List(list) = current {
            let (_, tail) = list.into_parts();
            current = tail;
        }
        let mut current = other;
        while let Term::List(list) = current {
            let (_, tail) = list.into_parts();
            current = tail;
        }
    }

    #[test]
    fn test_terms_as_set_members() {
        let mut set = HashSet::new();
        set.insert(Term::byte_list(b"abc".to_vec()));
        assert!(set.contains(&Term::list(vec![
            Term::integer(97),
            Term::integer(98),
            Term::integer(99),
        ])));
        assert!(!set.contains(&Term::binary(b"abc".to_vec())));
    }

    #[test]
    fn test_text_is_its_own_kind() {
        assert_same(&Term::text("abc"), &Term::text("abc"));
        assert_ne!(Term::text("abc"), Term::text("abd"));
        assert_ne!(Term::text("abc"), Term::binary(b"abc".to_vec()));
        assert_ne!(Term::text("abc"), Term::byte_list(b"abc".to_vec()));
        assert_ne!(Term::text(""), Term::Nil);
    }

    #[test]
    fn test_list_bytes() {
        let split = Term::improper_list(vec![Term::integer(1)], Term::byte_list(vec![2, 3]));
        assert_eq!(list_bytes(&split), Some(vec![1, 2, 3]));
        assert_eq!(list_bytes(&Term::Nil), Some(vec![]));
        assert_eq!(list_bytes(&Term::list(vec![Term::integer(-1)])), None);
        assert_eq!(list_bytes(&Term::binary(vec![1])), None);
    }

    #[test]
    fn test_list_struct_equality() {
        let a = List::new(vec![Term::integer(1)], Term::Nil);
        let b = List::proper(vec![Term::integer(1)]);
        assert_eq!(a, b);
        assert_ne!(a, List::new(vec![Term::integer(1)], Term::integer(2)));
    }
}
