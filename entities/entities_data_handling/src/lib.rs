//! Entities Layer: Data Handling
//!
//! This crate provides the in-memory term model exchanged with the peer runtime.
//! Every type here is an immutable value: construction is the only point where a field
//! is set, and equality and hashing are defined by field contents alone.
//!
//! ## Overview
//!
//! The `entities_data_handling` crate is the innermost layer of the workspace. The codec
//! in `infrastructure_external_format` produces and consumes these types; nothing in this
//! crate knows about the wire format.
//!
//! ## Modules
//!
//! - **[`atom`](atom/index.html)**: `Atom`, a text label compared by content, and the
//!   latin-1 / UTF-8 classification used to pick an atom tag.
//!
//! - **[`pid`](pid/index.html)**, **[`port`](port/index.html)**,
//!   **[`reference`](reference/index.html)**, **[`export`](export/index.html)**: the four
//!   opaque identity types the peer runtime uses to name its own objects.
//!
//! - **[`term`](term/index.html)**: the `Term` sum type and the explicit `List`
//!   (elements + tail) representation.
//!
//! - **[`term_hashing`](term_hashing/index.html)**: structural equality and hashing for
//!   `Term`, including the flattened comparison of list-like values.
//!
//! - **[`print_term`](print_term/index.html)**: `Display` for terms in the peer's
//!   printed syntax.
//!
//! ## Usage
//!
//! ```rust
//! use entities_data_handling::{Atom, Pid, Term};
//!
//! let pid = Pid::new(Atom::new("node@host"), 42, 0, 1);
//! let term = Term::tuple(vec![Term::atom("ok"), Term::Pid(pid.clone())]);
//!
//! assert_eq!(term, Term::tuple(vec![Term::atom("ok"), Term::Pid(pid)]));
//! assert_ne!(Term::Nil, Term::atom("nil"));
//! ```

pub mod atom;
pub mod export;
pub mod pid;
pub mod port;
pub mod print_term;
pub mod reference;
pub mod term;
pub mod term_hashing;

pub use atom::{Atom, AtomEncoding, MAX_ATOM_BYTES, SMALL_ATOM_MAX_BYTES};
pub use entities_utilities::BigNumber;
pub use export::Export;
pub use pid::Pid;
pub use port::Port;
pub use reference::{Reference, ReferenceError, MAX_REFERENCE_IDS};
pub use term::{List, Term};
