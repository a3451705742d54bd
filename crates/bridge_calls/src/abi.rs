//! Enumerations passed across the call table.
//!
//! Every enumeration travels as a plain `u32`. Reading a discriminant the
//! managed side does not know means the two sides disagree about the
//! contract, which is treated as an integration failure by the callers.

use serde::{Deserialize, Serialize};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($(#[$vmeta:meta])* $variant:ident = $value:literal,)* }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[repr(u32)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value,)*
        }

        impl $name {
            /// Returns the wire value.
            #[must_use]
            pub const fn to_raw(self) -> u32 {
                self as u32
            }

            /// Decode a wire value. Returns `None` for unknown discriminants.
            #[must_use]
            pub const fn from_raw(raw: u32) -> Option<Self> {
                match raw {
                    $($value => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

wire_enum! {
    /// Spawn volume of a particle emitter.
    pub enum EmitterShape {
        Circle = 0,
        Cone = 1,
        Cube = 2,
        Donut = 3,
        Sphere = 4,
        Mesh = 5,
    }
}

wire_enum! {
    /// Keyboard keys understood by the host's input system.
    pub enum KeyCode {
        Space = 32,
        Num0 = 48,
        Num1 = 49,
        Num2 = 50,
        Num3 = 51,
        A = 65,
        D = 68,
        E = 69,
        F = 70,
        Q = 81,
        R = 82,
        S = 83,
        W = 87,
        Escape = 256,
        Enter = 257,
        Tab = 258,
        Right = 262,
        Left = 263,
        Down = 264,
        Up = 265,
        LeftShift = 340,
        LeftControl = 341,
    }
}

wire_enum! {
    /// Mouse buttons understood by the host's input system.
    pub enum MouseButton {
        Left = 0,
        Right = 1,
        Middle = 2,
    }
}

impl Default for EmitterShape {
    fn default() -> Self {
        Self::Cone
    }
}
