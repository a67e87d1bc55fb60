//! Typed indices.
//!
//! Every id is a plain `u32` index into a dense `Vec`.  The wrappers keep an
//! agent index from being used to look up a mesh node by accident.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $name:ident, $label:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Placeholder for "no such entry", e.g. the predecessor of a
            /// search root.
            pub const NONE: $name = $name(u32::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// `None` when `index` does not fit, or would collide with [`Self::NONE`].
            pub fn from_index(index: usize) -> Option<$name> {
                u32::try_from(index).ok().filter(|&i| i != u32::MAX).map($name)
            }

            #[inline(always)]
            pub fn is_some(self) -> bool {
                self != Self::NONE
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_some() {
                    write!(f, concat!($label, "#{}"), self.0)
                } else {
                    f.write_str(concat!($label, "#none"))
                }
            }
        }
    };
}

typed_id!(
    /// An agent's slot in the SoA agent store.
    AgentId, "agent"
);
typed_id!(
    /// A waypoint node of the navigation mesh.
    NodeId, "node"
);
typed_id!(
    /// A directed link between two waypoint nodes.
    LinkId, "link"
);
typed_id!(
    /// A tagged obstacle watched for camera clipping.
    ObstacleId, "obstacle"
);
