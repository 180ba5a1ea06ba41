use crate::NameRef;

/// Internal errors raised when a [`NameRef`] is used incorrectly.
///
/// Neither variant can be caused by malformed user source. Both indicate a
/// bug in the compiler itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// The reference is the `NONE` sentinel or lies past the end of the table.
    #[error("invalid name reference {0:?}")]
    InvalidNameRef(NameRef),
    /// The reference was produced by a different table.
    #[error("name reference {0:?} does not belong to this table")]
    CrossTableReference(NameRef),
}
