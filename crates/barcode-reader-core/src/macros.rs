//! Declaration helpers for the engine's integer-valued enumerations and
//! bitmasks.
//!
//! The engine exchanges every enumeration as a plain `i32`. Each enum
//! declared here keeps an `Other(i32)` variant so values this crate does not
//! name still survive a read/write cycle unchanged.

macro_rules! native_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:expr,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "i32", into = "i32")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// A value reported by the engine that has no named variant.
            Other(i32),
        }

        impl $name {
            /// Raw value as exchanged with the engine.
            #[inline]
            pub fn value(self) -> i32 {
                self.into()
            }
        }

        impl From<i32> for $name {
            #[allow(clippy::redundant_guards)]
            fn from(value: i32) -> Self {
                match value {
                    $( v if v == $value => Self::$variant, )+
                    other => Self::Other(other),
                }
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                match value {
                    $( $name::$variant => $value, )+
                    $name::Other(v) => v,
                }
            }
        }
    };
}

macro_rules! native_flags {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$cmeta:meta])*
                const $flag:ident = $value:expr;
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl $name {
            $(
                $(#[$cmeta])*
                pub const $flag: Self = Self($value);
            )+

            /// Raw bitmask as exchanged with the engine.
            #[inline]
            pub const fn bits(self) -> i32 {
                self.0
            }

            /// True if no bit is set.
            #[inline]
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// True if every bit of `other` is set in `self`.
            #[inline]
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// True if `self` and `other` share at least one bit.
            #[inline]
            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl std::ops::BitAnd for $name {
            type Output = Self;

            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }
    };
}
