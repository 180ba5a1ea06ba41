use crate::{NameRef, NameTable, Utf8Desc};

use rustc_hash::FxHasher;

use std::hash::{Hash, Hasher};

// ---------------------------------------------------------------------------
// NameKind
// ---------------------------------------------------------------------------

/// The discriminant of a [`Name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    Utf8,
    Unique,
}

// ---------------------------------------------------------------------------
// RawName
// ---------------------------------------------------------------------------

/// An interned source identifier.
///
/// The bytes live in storage owned by the [`NameTable`], never in the buffer
/// the caller interned from.
#[derive(Debug, PartialEq, Eq)]
pub struct RawName {
    // Points into the table's chunks. Only handed out re-borrowed from `&self`.
    bytes: &'static [u8],
}

impl RawName {
    #[inline]
    pub(crate) fn new(bytes: &'static [u8]) -> Self {
        Self { bytes }
    }

    #[inline]
    pub fn utf8(&self) -> Utf8Desc<'_> {
        Utf8Desc::new(self.bytes)
    }
}

// ---------------------------------------------------------------------------
// UniqueNameKind
// ---------------------------------------------------------------------------

/// The reason a name was synthesized by the compiler.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UniqueNameKind {
    Parser,
    Desugar,
    Namer,
}

impl UniqueNameKind {
    /// The marker used when rendering a unique name of this kind.
    pub fn marker(self) -> char {
        match self {
            UniqueNameKind::Parser => 'p',
            UniqueNameKind::Desugar => 'd',
            UniqueNameKind::Namer => 'n',
        }
    }
}

// ---------------------------------------------------------------------------
// UniqueName
// ---------------------------------------------------------------------------

/// A fresh name derived from `original`.
///
/// `num` disambiguates names sharing the same `original` and `kind`, and
/// starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniqueName {
    pub original: NameRef,
    pub kind: UniqueNameKind,
    pub num: u32,
}

// ---------------------------------------------------------------------------
// Name
// ---------------------------------------------------------------------------

/// An entry of the [`NameTable`].
///
/// Names are only created by the table and never change afterwards. Outside
/// the table they are always seen by reference.
#[derive(Debug, PartialEq, Eq)]
pub enum Name {
    Raw(RawName),
    Unique(UniqueName),
}

impl Name {
    #[inline]
    pub fn kind(&self) -> NameKind {
        match self {
            Name::Raw(_) => NameKind::Utf8,
            Name::Unique(_) => NameKind::Unique,
        }
    }

    #[inline]
    pub fn as_raw(&self) -> Option<&RawName> {
        match self {
            Name::Raw(raw) => Some(raw),
            Name::Unique(_) => None,
        }
    }

    #[inline]
    pub fn as_unique(&self) -> Option<&UniqueName> {
        match self {
            Name::Raw(_) => None,
            Name::Unique(unique) => Some(unique),
        }
    }

    /// Renders the name as text.
    ///
    /// This is [`Name::to_bytes`] as a `String`. Bytes that are not valid
    /// UTF-8 are written as `\xNN`, so the text is exact whenever the name is
    /// valid UTF-8.
    pub fn show(&self, table: &NameTable) -> String {
        match String::from_utf8(self.to_bytes(table)) {
            Ok(text) => text,
            Err(err) => escape_invalid(err.as_bytes()),
        }
    }

    /// Renders the name as bytes.
    ///
    /// Raw names render verbatim. Unique names render as
    /// `{original}${marker}{num}`, e.g. `foo$d1`, where the raw text at the
    /// root of the chain has `\` and `$` escaped with a `\`. Every unescaped
    /// `$` therefore starts a suffix, and distinct unique names never render
    /// the same.
    pub fn to_bytes(&self, table: &NameTable) -> Vec<u8> {
        let (root, suffixes) = self.chain(table);
        let mut buf = Vec::with_capacity(root.len() + 4 * suffixes.len());
        match suffixes.is_empty() {
            true => buf.extend_from_slice(root),
            false => {
                for &b in root {
                    if b == b'$' || b == b'\\' {
                        buf.push(b'\\');
                    }
                    buf.push(b);
                }
            }
        }
        for &(kind, num) in suffixes.iter().rev() {
            buf.push(b'$');
            buf.push(kind.marker() as u8);
            buf.extend_from_slice(num.to_string().as_bytes());
        }
        buf
    }

    /// A content hash of the name.
    ///
    /// Raw names hash their bytes. Unique names hash the bytes at the root of
    /// their chain followed by every `(kind, num)` from the root outwards.
    pub fn hash(&self, table: &NameTable) -> u32 {
        let (root, suffixes) = self.chain(table);
        let mut hasher = FxHasher::default();
        root.hash(&mut hasher);
        suffixes.len().hash(&mut hasher);
        for (kind, num) in suffixes.iter().rev() {
            kind.hash(&mut hasher);
            num.hash(&mut hasher);
        }
        fold(hasher.finish())
    }

    /// Follows `original` links down to the raw name at the root.
    ///
    /// Returns the root bytes and the `(kind, num)` of each link, outermost
    /// first. An original is always older than the names derived from it, so
    /// the walk terminates.
    fn chain<'t>(&'t self, table: &'t NameTable) -> (&'t [u8], Vec<(UniqueNameKind, u32)>) {
        let mut suffixes = Vec::new();
        let mut name = self;
        loop {
            match name {
                Name::Raw(raw) => return (raw.utf8().as_bytes(), suffixes),
                Name::Unique(unique) => {
                    suffixes.push((unique.kind, unique.num));
                    name = table.name(unique.original);
                }
            }
        }
    }
}

fn escape_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        for b in chunk.invalid() {
            text.push_str(&format!("\\x{b:02x}"));
        }
    }
    text
}

#[inline]
pub(crate) fn fold(hash: u64) -> u32 {
    (hash ^ (hash >> 32)) as u32
}
