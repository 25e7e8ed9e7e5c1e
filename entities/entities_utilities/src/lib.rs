//! Entities Layer: Utilities
//!
//! Provides the arbitrary precision integer used by the term model.
//!
//! ## Modules
//!
//! - **[`big`](big/index.html)**: `BigNumber`, a signed integer of unbounded size with
//!   conversions to and from the sign + little-endian magnitude layout used on the wire.

pub mod big;

pub use big::BigNumber;
