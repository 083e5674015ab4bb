//! Arena indices for timing graph entities.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }

            /// Returns the index as a `usize` for slice access.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(
    /// Index of a vertex in [`TimingGraph`](crate::TimingGraph)'s vertex arena.
    VertexId
);

define_id!(
    /// Index of an edge in [`TimingGraph`](crate::TimingGraph)'s edge list.
    EdgeId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn raw_and_index_agree() {
        let id = VertexId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn ids_hash_by_value() {
        let set: HashSet<_> = [1, 2, 1].into_iter().map(EdgeId::from_raw).collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&VertexId::from_raw(7)).unwrap();
        assert_eq!(json, "7");
    }
}
