use crate::{
    error::NameError,
    name::{Name, RawName, UniqueName, UniqueNameKind},
    well_known::Names,
    NameRef,
};

use rustc_hash::FxHashMap;

/// The owner of every [`Name`] of a compilation session.
///
/// Identifiers are interned into a [`NameRef`], a `u32` handle that compares
/// and hashes in O(1). Byte-identical raw identifiers always map to the same
/// handle, and every synthesized unique name gets a handle of its own.
///
/// # Memory Management
///
/// Raw bytes are copied into an internal buffer that grows exponentially.
/// Full buffers are retained, so the bytes of an entry never move while the
/// table is alive. Entries are append-only and ids are never reused.
///
/// # Well-known names
///
/// [`NameTable::new`] interns [`Names::ALL`] before anything else, so the
/// constants on [`Names`] are valid in every table.
///
/// # Concurrency
///
/// Interning requires `&mut self`; the table has a single writer. Wrap it in
/// a lock if several workers must intern into the same table.
pub struct NameTable {
    /// Internal byte buffer for storing raw names.
    buf: Vec<u8>,
    /// Previous full buffers to keep stored bytes valid.
    full: Vec<Vec<u8>>,
    /// Entries, where slot `i` holds the name with id `i + 1`.
    names: Vec<Name>,
    /// Raw content to its handle.
    raw: FxHashMap<&'static [u8], NameRef>,
    /// Next free `num` for each `(original, kind)` pair.
    counters: FxHashMap<(NameRef, UniqueNameKind), u32>,
    /// Unique name triples to their handle.
    unique: FxHashMap<UniqueName, NameRef>,
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new()
    }
}

impl NameTable {
    /// Creates a table with a default buffer capacity of 1024 bytes.
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Creates a table whose internal byte buffer starts with `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut table = NameTable {
            buf: Vec::with_capacity(capacity),
            full: Vec::new(),
            names: Vec::new(),
            raw: FxHashMap::default(),
            counters: FxHashMap::default(),
            unique: FxHashMap::default(),
        };
        for &(expected, text) in Names::ALL {
            let name = table.intern(text);
            debug_assert_eq!(name, expected, "well-known name `{text}` out of order");
        }
        log::debug!("name table initialized with {} well-known names", table.len());
        table
    }

    /// Returns the number of names in the table, well-known names included.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Checks whether the table holds no names.
    ///
    /// Always `false` for a constructed table, since the well-known names are
    /// interned eagerly.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Checks whether `name` is a valid handle into this table.
    #[inline]
    pub fn contains(&self, name: NameRef) -> bool {
        name.exists() && name.index() < self.names.len()
    }

    /// Retrieves the entry for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`NameError::InvalidNameRef`] if `name` is [`NameRef::NONE`] or
    /// lies past the end of the table.
    #[inline]
    pub fn resolve(&self, name: NameRef) -> Result<&Name, NameError> {
        match name.exists() {
            false => Err(NameError::InvalidNameRef(name)),
            true => self
                .names
                .get(name.index())
                .ok_or(NameError::InvalidNameRef(name)),
        }
    }

    /// Retrieves the entry for `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is [`NameRef::NONE`] or lies past the end of the table.
    #[inline]
    pub fn name(&self, name: NameRef) -> &Name {
        match self.resolve(name) {
            Ok(entry) => entry,
            Err(err) => panic!("{err}"),
        }
    }

    /// Renders `name` as text. See [`Name::show`] for the format.
    pub fn to_string(&self, name: NameRef) -> String {
        self.name(name).show(self)
    }

    /// Renders `name` as bytes. Raw names come back exactly as interned.
    /// See [`Name::to_bytes`] for unique names.
    pub fn to_bytes(&self, name: NameRef) -> Vec<u8> {
        self.name(name).to_bytes(self)
    }

    /// Combines the ids of `names` into a single order-sensitive hash.
    #[inline]
    pub fn hash_names(&self, names: &[NameRef]) -> u32 {
        crate::hash_names(names)
    }

    /// Returns an iterator over all handles and their entries, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NameRef, &Name)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (NameRef::from_index(i), name))
    }

    /// Returns the handle of `bytes` if it has already been interned.
    #[inline]
    pub fn lookup_raw(&self, bytes: &[u8]) -> Option<NameRef> {
        self.raw.get(bytes).copied()
    }

    /// Returns the handle of the unique name `(original, kind, num)`, if any.
    #[inline]
    pub fn lookup_unique(
        &self,
        original: NameRef,
        kind: UniqueNameKind,
        num: u32,
    ) -> Option<NameRef> {
        self.unique
            .get(&UniqueName {
                original,
                kind,
                num,
            })
            .copied()
    }

    /// Interns a string. Shorthand for [`NameTable::intern_raw`].
    #[inline]
    pub fn intern(&mut self, text: &str) -> NameRef {
        self.intern_raw(text.as_bytes())
    }

    /// Interns the given bytes and returns their handle.
    ///
    /// If the same content has already been interned, from any buffer, the
    /// existing handle is returned and nothing is allocated. Otherwise the
    /// bytes are copied into the table.
    pub fn intern_raw(&mut self, bytes: &[u8]) -> NameRef {
        if let Some(&name) = self.raw.get(bytes) {
            return name;
        }
        // Safety: The allocated bytes stay valid as long as the table is alive.
        let bytes = unsafe { self.alloc(bytes) };
        let name = self.push(Name::Raw(RawName::new(bytes)));
        self.raw.insert(bytes, name);
        log::trace!("interned raw name {name:?}");
        name
    }

    /// Synthesizes a fresh name derived from `original` for the given reason.
    ///
    /// Each call with the same `(original, kind)` gets the next `num`,
    /// starting at 1, so synthesized names never collide.
    ///
    /// `original` must have been produced by this table. This is only
    /// checked in debug builds.
    pub fn intern_unique(&mut self, original: NameRef, kind: UniqueNameKind) -> NameRef {
        debug_assert!(
            self.contains(original),
            "{}",
            NameError::CrossTableReference(original)
        );
        let counter = self.counters.entry((original, kind)).or_insert(0);
        *counter += 1;
        let unique = UniqueName {
            original,
            kind,
            num: *counter,
        };
        let name = self.push(Name::Unique(unique));
        let prev = self.unique.insert(unique, name);
        debug_assert!(prev.is_none(), "unique name {unique:?} interned twice");
        log::trace!("interned unique name {name:?} = {unique:?}");
        name
    }

    #[inline]
    fn push(&mut self, name: Name) -> NameRef {
        let id = NameRef::from_index(self.names.len());
        self.names.push(name);
        id
    }

    /// Copies `bytes` into the table's buffer and returns a static reference to them.
    ///
    /// # Safety
    ///
    /// The returned slice must not outlive the table. The buffer it points into
    /// is never reallocated, only retired into `full` when it runs out of space.
    #[inline]
    unsafe fn alloc(&mut self, bytes: &[u8]) -> &'static [u8] {
        let cap = self.buf.capacity();
        if cap < self.buf.len() + bytes.len() {
            let cap = (cap.max(bytes.len()) + 1).next_power_of_two();
            let full = std::mem::replace(&mut self.buf, Vec::with_capacity(cap));
            self.full.push(full);
        }
        let start = self.buf.len();
        self.buf.extend_from_slice(bytes);
        &*std::ptr::from_ref::<[u8]>(&self.buf[start..])
    }
}
