//! Capability bits of a descriptor group

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Independent bits enabling virtual parameters on a descriptor group
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Capabilities = Capabilities(0);
    /// `earth_radius` and `inverse_flattening` over the ellipsoid axes
    pub const EARTH_RADIUS: Capabilities = Capabilities(1 << 0);
    /// `standard_parallel` array over the two standard parallels
    pub const STANDARD_PARALLEL: Capabilities = Capabilities(1 << 1);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Capabilities) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Capabilities) -> Capabilities {
        Capabilities(self.0 | other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Capabilities {
    type Output = Capabilities;

    fn bitor(self, rhs: Capabilities) -> Capabilities {
        self.union(rhs)
    }
}

impl BitOrAssign for Capabilities {
    fn bitor_assign(&mut self, rhs: Capabilities) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        if self.contains(Capabilities::EARTH_RADIUS) {
            set.entry(&"EARTH_RADIUS");
        }
        if self.contains(Capabilities::STANDARD_PARALLEL) {
            set.entry(&"STANDARD_PARALLEL");
        }
        set.finish()
    }
}
