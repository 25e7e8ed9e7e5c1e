//! Process Identifier Module
//!
//! A `Pid` names a process owned by the peer runtime. This side never creates or
//! inspects processes; it only carries the identifier so that it can be handed back
//! unchanged. Equality and hashing cover all four fields.

use std::fmt;

use crate::atom::Atom;

/// Process identifier of a peer process
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pid {
    node: Atom,
    id: u32,
    serial: u32,
    creation: u32,
}

impl Pid {
    /// Create a process identifier
    ///
    /// # Arguments
    /// * `node` - Name of the node that owns the process
    /// * `id` - Process number on that node
    /// * `serial` - Serial counter for the process number
    /// * `creation` - Incarnation of the node
    pub fn new(node: Atom, id: u32, serial: u32, creation: u32) -> Self {
        Self {
            node,
            id,
            serial,
            creation,
        }
    }

    pub fn node(&self) -> &Atom {
        &self.node
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn serial(&self) -> u32 {
        self.serial
    }

    pub fn creation(&self) -> u32 {
        self.creation
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}.{}.{}>", self.creation, self.id, self.serial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(pid: &Pid) -> u64 {
        let mut hasher = DefaultHasher::new();
        pid.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_equal_fields_are_equal_and_hash_equal() {
        let a = Pid::new(Atom::new("node@host"), 42, 0, 1);
        let b = Pid::new(Atom::from("node@host"), 42, 0, 1);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_any_field_change_breaks_equality() {
        let base = Pid::new(Atom::new("node@host"), 42, 0, 1);
        assert_ne!(base, Pid::new(Atom::new("other@host"), 42, 0, 1));
        assert_ne!(base, Pid::new(Atom::new("node@host"), 43, 0, 1));
        assert_ne!(base, Pid::new(Atom::new("node@host"), 42, 1, 1));
        assert_ne!(base, Pid::new(Atom::new("node@host"), 42, 0, 2));
    }

    #[test]
    fn test_display() {
        let pid = Pid::new(Atom::new("nonode@nohost"), 85, 0, 0);
        assert_eq!(pid.to_string(), "<0.85.0>");
    }
}
