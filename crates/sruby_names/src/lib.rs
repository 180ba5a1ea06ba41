//! Name interning for the sruby front end.
//!
//! Every identifier the compiler deals with, whether it comes from source text
//! or is synthesized by a pass, is stored once in a [`NameTable`] and referred
//! to everywhere else by a [`NameRef`]. Comparing and hashing names is then a
//! matter of comparing and hashing a `u32`.
//!
//! - [`NameTable::intern_raw`] deduplicates identifiers by content.
//! - [`NameTable::intern_unique`] derives fresh, collision-free names.
//! - [`Names`] holds handles that are the same in every table.
//!
//! A `NameRef` carries no reference to the table that produced it. Resolving
//! it against another table is a bug that is only caught in debug builds, and
//! only when the id is out of range.

mod error;
mod name;
mod table;
mod utf8;
mod well_known;

use rustc_hash::FxHasher;

use std::{fmt, hash::Hasher};

pub use error::NameError;
pub use name::{Name, NameKind, RawName, UniqueName, UniqueNameKind};
pub use table::NameTable;
pub use utf8::Utf8Desc;
pub use well_known::Names;

/// A handle to a [`Name`] stored in a [`NameTable`].
///
/// Id 0 is reserved for [`NameRef::NONE`]; interned names start at 1.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameRef(u32);

impl NameRef {
    /// The sentinel for "no name". Never assigned by a table.
    pub const NONE: NameRef = NameRef(0);

    #[inline]
    pub(crate) const fn from_id(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn exists(self) -> bool {
        self.0 != 0
    }

    /// Retrieves the entry this handle refers to in `table`.
    #[inline]
    pub fn name(self, table: &NameTable) -> &Name {
        table.name(self)
    }

    /// Renders this name as text.
    #[inline]
    pub fn show(self, table: &NameTable) -> String {
        table.to_string(self)
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize);
        Self(index as u32 + 1)
    }

    /// The slot of this name in the table. Must not be called on `NONE`.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Debug for NameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameRef({})", self.0)
    }
}

impl fmt::Display for NameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Combines the ids of `names` into a single hash.
///
/// The result depends only on the ids and their order, so equal sequences
/// hash equal in every process and every run.
pub fn hash_names(names: &[NameRef]) -> u32 {
    let mut hasher = FxHasher::default();
    hasher.write_usize(names.len());
    for name in names {
        hasher.write_u32(name.0);
    }
    name::fold(hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_ref_size() {
        assert_eq!(std::mem::size_of::<NameRef>(), 4);
        assert_eq!(NameRef::default(), NameRef::NONE);
        assert!(!NameRef::NONE.exists());
        assert!(NameRef::from_id(1).exists());
    }

    #[test]
    fn name_ref_as_map_key() {
        let mut table = NameTable::new();
        let foo = table.intern("foo");
        let mut map = std::collections::HashMap::new();
        map.insert(foo, 1);
        map.insert(table.intern("foo"), 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map[&foo], 2);
    }

    #[test]
    fn hash_names_is_order_sensitive() {
        let mut table = NameTable::new();
        let a = table.intern("a");
        let b = table.intern("b");
        let c = table.intern("c");

        assert_eq!(table.hash_names(&[a, b]), hash_names(&[a, b]));
        assert_ne!(hash_names(&[a, b]), hash_names(&[b, a]));
        assert_ne!(hash_names(&[a, b]), hash_names(&[a, c]));
        assert_ne!(hash_names(&[a]), hash_names(&[a, a]));
        assert_ne!(hash_names(&[]), hash_names(&[a]));
    }

    #[test]
    fn hash_names_is_table_independent() {
        let mut t1 = NameTable::new();
        let mut t2 = NameTable::new();
        let x1 = t1.intern("x");
        let x2 = t2.intern("x");
        assert_eq!(
            hash_names(&[Names::TO_S, x1]),
            hash_names(&[Names::TO_S, x2])
        );
    }

    #[test]
    fn name_ref_accessors() {
        let mut table = NameTable::new();
        let foo = table.intern("foo");
        assert_eq!(foo.show(&table), "foo");
        assert_eq!(foo.name(&table).kind(), NameKind::Utf8);
        assert_eq!(Names::CONCAT.show(&table), "concat");
        assert_eq!(format!("{}", Names::TO_S), "n3");
        assert_eq!(format!("{:?}", Names::TO_S), "NameRef(3)");
    }
}
