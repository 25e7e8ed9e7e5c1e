//! Export Module
//!
//! Remote function handle `fun Module:Function/Arity`. Only the three names travel;
//! there is no closure environment.

use std::fmt;

use crate::atom::Atom;

/// Handle to an exported function of the peer runtime
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Export {
    module: Atom,
    function: Atom,
    arity: u32,
}

impl Export {
    pub fn new(module: Atom, function: Atom, arity: u32) -> Self {
        Self {
            module,
            function,
            arity,
        }
    }

    pub fn module(&self) -> &Atom {
        &self.module
    }

    pub fn function(&self) -> &Atom {
        &self.function
    }

    pub fn arity(&self) -> u32 {
        self.arity
    }
}

impl fmt::Display for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#Fun<{}.{}.{}>", self.module, self.function, self.arity)
    }
}
