//! Opaque identities for native-owned objects.
//!
//! A handle is a `u64` with no inherent data. The native host hands them out
//! and is the only authority on whether one still names a live object;
//! building a handle never checks liveness.
//!
//! Entities and assets live in two separate identity spaces. They are
//! structurally identical, so each space gets its own newtype and the
//! compiler rejects comparing or substituting one for the other.

use serde::{Deserialize, Serialize};

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[repr(transparent)]
        pub struct $name(u64);

        impl $name {
            /// The reserved sentinel. Never addresses a live native object.
            pub const INVALID: Self = Self(0);

            /// Wrap a raw `u64` identifier.
            #[must_use]
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw `u64` identifier.
            #[must_use]
            pub const fn raw(self) -> u64 {
                self.0
            }

            /// Returns `true` if this is not the [`INVALID`](Self::INVALID)
            /// sentinel. Says nothing about native liveness.
            #[must_use]
            pub const fn is_valid(self) -> bool {
                self.0 != 0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({:#018x})"), self.0)
            }
        }
    };
}

define_handle!(
    /// Identity of a native entity.
    EntityHandle,
    "Entity"
);

define_handle!(
    /// Identity of a native asset registry entry (mesh, texture, prefab).
    AssetHandle,
    "Asset"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_equals_invalid() {
        assert_eq!(EntityHandle::from_raw(0), EntityHandle::INVALID);
        assert_eq!(AssetHandle::from_raw(0), AssetHandle::INVALID);
        assert!(!EntityHandle::from_raw(0).is_valid());
    }

    #[test]
    fn test_nonzero_is_not_invalid() {
        for raw in [1, 42, u64::MAX] {
            let handle = EntityHandle::from_raw(raw);
            assert_ne!(handle, EntityHandle::INVALID);
            assert!(handle.is_valid());
            assert_eq!(handle.raw(), raw);
        }
    }

    #[test]
    fn test_default_is_invalid() {
        assert_eq!(AssetHandle::default(), AssetHandle::INVALID);
    }

    #[test]
    fn test_layout_is_plain_u64() {
        assert_eq!(std::mem::size_of::<EntityHandle>(), 8);
        assert_eq!(std::mem::align_of::<AssetHandle>(), std::mem::align_of::<u64>());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            EntityHandle::from_raw(0xff).to_string(),
            "Entity(0x00000000000000ff)"
        );
        assert_eq!(AssetHandle::INVALID.to_string(), "Asset(0x0000000000000000)");
    }

    #[test]
    fn test_serialization_keeps_raw_value() {
        let handle = AssetHandle::from_raw(999);
        let bytes = rmp_serde::to_vec(&handle).unwrap();
        let restored: AssetHandle = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(handle, restored);
    }
}
