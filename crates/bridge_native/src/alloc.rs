//! Handle allocation.
//!
//! Native identities are random 64-bit GUIDs, so handles stay unique across
//! saved scenes and prefab instances. Zero is reserved for the `INVALID`
//! sentinel and is never produced.

use std::collections::HashSet;

use uuid::Uuid;

/// Allocates unique, nonzero 64-bit identifiers.
#[derive(Debug, Default)]
pub struct GuidAllocator {
    issued: HashSet<u64>,
}

impl GuidAllocator {
    /// Creates an allocator that has issued nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh identifier.
    pub fn allocate(&mut self) -> u64 {
        loop {
            let (high, low) = Uuid::new_v4().as_u64_pair();
            let raw = high ^ low;
            if raw != 0 && self.issued.insert(raw) {
                return raw;
            }
        }
    }

    /// Returns the number of identifiers issued so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.issued.len()
    }
}
