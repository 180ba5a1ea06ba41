use std::{ffi::CStr, fmt};

/// A borrowed view over the bytes of an identifier.
///
/// Two descriptors are equal when they hold the same bytes, no matter which
/// buffer they point into.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Utf8Desc<'a> {
    bytes: &'a [u8],
}

impl<'a> Utf8Desc<'a> {
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the text, replacing invalid UTF-8 sequences.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.bytes).into_owned()
    }
}

impl<'a> From<&'a str> for Utf8Desc<'a> {
    fn from(s: &'a str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Utf8Desc<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl PartialEq<str> for Utf8Desc<'_> {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for Utf8Desc<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&CStr> for Utf8Desc<'_> {
    fn eq(&self, other: &&CStr) -> bool {
        self.bytes == other.to_bytes()
    }
}

impl fmt::Display for Utf8Desc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.bytes))
    }
}

impl fmt::Debug for Utf8Desc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_compares_content() {
        let a = String::from("hello");
        let b = String::from("hello");
        assert_eq!(Utf8Desc::from(a.as_str()), Utf8Desc::from(b.as_str()));
        assert_ne!(Utf8Desc::from("hello"), Utf8Desc::from("hell"));
        assert_ne!(Utf8Desc::from("hello"), Utf8Desc::from("jello"));
    }

    #[test]
    fn compare_with_literals() {
        let desc = Utf8Desc::new(b"to_s");
        assert!(desc == "to_s");
        assert!(desc != "to_s!");
        assert!(desc == c"to_s");
        assert!(desc != c"to");
    }

    #[test]
    fn display_writes_bytes() {
        let desc = Utf8Desc::from("concat");
        assert_eq!(desc.to_string(), "concat");
        assert_eq!(desc.len(), 6);
        assert!(!desc.is_empty());
        assert!(Utf8Desc::new(b"").is_empty());
    }
}
