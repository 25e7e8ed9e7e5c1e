//! Port identifier carried opaquely for the peer runtime.

use std::fmt;

use crate::atom::Atom;

/// Port identifier of a peer port
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Port {
    node: Atom,
    id: u32,
    creation: u32,
}

impl Port {
    pub fn new(node: Atom, id: u32, creation: u32) -> Self {
        Self { node, id, creation }
    }

    pub fn node(&self) -> &Atom {
        &self.node
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn creation(&self) -> u32 {
        self.creation
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#Port<{}.{}>", self.creation, self.id)
    }
}
