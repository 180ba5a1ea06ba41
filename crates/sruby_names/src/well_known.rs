use crate::NameRef;

/// Names with a fixed handle in every [`NameTable`](crate::NameTable).
///
/// The table interns [`Names::ALL`] in order when it is constructed, so these
/// constants can be used without access to a table.
pub struct Names;

impl Names {
    pub const INITIALIZE: NameRef = NameRef::from_id(1);
    pub const AND_AND: NameRef = NameRef::from_id(2);
    pub const TO_S: NameRef = NameRef::from_id(3);
    pub const CONCAT: NameRef = NameRef::from_id(4);

    /// Every well-known name with its text, in interning order.
    pub const ALL: &'static [(NameRef, &'static str)] = &[
        (Self::INITIALIZE, "initialize"),
        (Self::AND_AND, "&&"),
        (Self::TO_S, "to_s"),
        (Self::CONCAT, "concat"),
    ];

    /// Returns the well-known handle for `text`, if it is one.
    #[inline]
    pub fn lookup(text: &str) -> Option<NameRef> {
        WELL_KNOWN.get(text).copied()
    }

    #[inline]
    pub fn is_well_known(name: NameRef) -> bool {
        name.exists() && name.index() < Self::ALL.len()
    }
}

static WELL_KNOWN: phf::Map<&'static str, NameRef> = phf::phf_map! {
    "initialize" => Names::INITIALIZE,
    "&&" => Names::AND_AND,
    "to_s" => Names::TO_S,
    "concat" => Names::CONCAT,
};
