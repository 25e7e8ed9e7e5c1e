//! Print Term Module
//!
//! `Display` for terms, in the peer runtime's printed syntax:
//!
//! - atoms bare when they read as a plain atom, otherwise single-quoted
//! - lists as `[a,b]` or `[a,b|tail]`, or as `"text"` when every element is a printable byte
//! - binaries as `<<1,2,3>>`, text as `<<"text"/utf8>>`, tuples as `{a,b}`
//! - identity types in their `<...>` / `#Port<...>` / `#Ref<...>` / `#Fun<...>` forms

use std::fmt::{self, Write};

use crate::atom::Atom;
use crate::term::{List, Term};
use crate::term_hashing::{list_bytes, resolve, ListCursor, ListItem};

/// True if the atom can be printed without quotes
fn is_bare_atom(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '@')
}

fn write_atom(f: &mut fmt::Formatter<'_>, atom: &Atom) -> fmt::Result {
    let name = atom.as_str();
    if is_bare_atom(name) {
        return f.write_str(name);
    }
    f.write_char('\'')?;
    for c in name.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('\'')
}

fn is_printable(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(|b| (0x20..=0x7e).contains(b))
}

fn write_quoted(f: &mut fmt::Formatter<'_>, chars: impl Iterator<Item = char>) -> fmt::Result {
    f.write_char('"')?;
    for c in chars {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

fn write_separated(f: &mut fmt::Formatter<'_>, terms: &[Term]) -> fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        write!(f, "{}", term)?;
    }
    Ok(())
}

fn write_list(f: &mut fmt::Formatter<'_>, term: &Term) -> fmt::Result {
    if let Some(bytes) = list_bytes(term) {
        if is_printable(&bytes) {
            return write_quoted(f, bytes.iter().map(|&b| char::from(b)));
        }
    }
    f.write_char('[')?;
    let mut cursor = ListCursor::new(term);
    let mut first = true;
    for item in cursor.by_ref() {
        if !first {
            f.write_char(',')?;
        }
        first = false;
        match item {
            ListItem::Term(t) => write!(f, "{}", t)?,
            ListItem::Byte(b) => write!(f, "{}", b)?,
        }
    }
    match cursor.final_tail() {
        Term::Nil => {}
        tail => write!(f, "|{}", tail)?,
    }
    f.write_char(']')
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match resolve(self) {
            Term::Integer(n) => write!(f, "{}", n),
            Term::Float(x) => write!(f, "{:?}", x),
            Term::Atom(a) => write_atom(f, a),
            Term::Nil => f.write_str("[]"),
            Term::Binary(bytes) => {
                f.write_str("<<")?;
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{}", b)?;
                }
                f.write_str(">>")
            }
            Term::Text(text) => {
                f.write_str("<<")?;
                write_quoted(f, text.chars())?;
                f.write_str("/utf8>>")
            }
            Term::Tuple(elements) => {
                f.write_char('{')?;
                write_separated(f, elements)?;
                f.write_char('}')
            }
            list @ (Term::List(_) | Term::ByteList(_)) => write_list(f, list),
            Term::Pid(p) => write!(f, "{}", p),
            Term::Port(p) => write!(f, "{}", p),
            Term::Reference(r) => write!(f, "{}", r),
            Term::Export(e) => write!(f, "{}", e),
        }
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        write_separated(f, self.elements())?;
        match self.tail() {
            Term::Nil => {}
            tail => write!(f, "|{}", tail)?,
        }
        f.write_char(']')
    }
}
