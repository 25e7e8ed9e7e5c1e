//! Reference Module
//!
//! A distributed reference is a node name, a creation number and a short sequence of
//! 32-bit words. The words are ordered most-significant first and order is part of the
//! value: `[1, 2]` and `[2, 1]` are different references.
//!
//! The wire format allows at most three words, so the constructor rejects anything
//! else. A `Reference` that exists is always encodable.

use std::fmt;

use thiserror::Error;

use crate::atom::Atom;

/// Largest number of id words a reference may carry.
pub const MAX_REFERENCE_IDS: usize = 3;

/// Construction errors for [`Reference`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("reference must carry 1 to {max} id words, got {count}", max = MAX_REFERENCE_IDS)]
    InvalidIdCount { count: usize },
}

/// Distributed reference created by the peer runtime
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reference {
    node: Atom,
    ids: Vec<u32>,
    creation: u32,
}

impl Reference {
    /// Create a reference
    ///
    /// # Arguments
    /// * `node` - Node that created the reference
    /// * `ids` - Id words, most-significant first
    /// * `creation` - Incarnation of the node
    ///
    /// # Returns
    /// The reference, or `ReferenceError::InvalidIdCount` if `ids` is empty or longer
    /// than [`MAX_REFERENCE_IDS`].
    pub fn new(node: Atom, ids: Vec<u32>, creation: u32) -> Result<Self, ReferenceError> {
        if ids.is_empty() || ids.len() > MAX_REFERENCE_IDS {
            return Err(ReferenceError::InvalidIdCount { count: ids.len() });
        }
        Ok(Self {
            node,
            ids,
            creation,
        })
    }

    pub fn node(&self) -> &Atom {
        &self.node
    }

    /// Id words, most-significant first
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn creation(&self) -> u32 {
        self.creation
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#Ref<{}", self.creation)?;
        for id in &self.ids {
            write!(f, ".{}", id)?;
        }
        f.write_str(">")
    }
}
