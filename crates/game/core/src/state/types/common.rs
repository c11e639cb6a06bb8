use std::borrow::Borrow;
use std::fmt;

/// Declares a string-backed identifier newtype.
///
/// Identifiers borrow as `str` so maps keyed by them can be queried with
/// plain string slices.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id! {
    /// Unique identifier of a character (player or NPC).
    CharacterId
}

string_id! {
    /// Unique identifier of a materialized object or object template.
    ObjectId
}

string_id! {
    /// Unique identifier of a scene.
    SceneId
}

string_id! {
    /// Identifier of an effect definition; shared by every instance created from it.
    EffectId
}

string_id! {
    /// Identifier of a slot, unique within its container.
    SlotId
}

string_id! {
    /// Identifier of a declared object state.
    StateId
}
