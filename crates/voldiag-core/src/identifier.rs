//! Identifier management using string interning
//!
//! Node identifiers are compared and hashed frequently while building and
//! exporting a diagram, so they are interned once and passed around as a
//! `Copy` symbol.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner backing every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Interned identifier of a diagram element.
///
/// # Examples
///
/// ```
/// use voldiag_core::identifier::Id;
///
/// let kind = Id::new("pv");
/// let nested = kind.create_nested(Id::new("alice-standard"));
/// assert_eq!(nested, "pv::alice-standard");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a string, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates a nested ID by joining this ID and `child_id` with `::`.
    pub fn create_nested(&self, child_id: Id) -> Self {
        let mut interner = interner();
        let nested_name = format!(
            "{}::{}",
            interner.resolve(self.0).unwrap_or_default(),
            interner.resolve(child_id.0).unwrap_or_default()
        );
        Self(interner.get_or_intern(nested_name))
    }

    /// Returns the interned string of this ID.
    pub fn as_string(&self) -> String {
        interner().resolve(self.0).unwrap_or_default().to_string()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
