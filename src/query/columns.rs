//! Output columns returned by synthesized queries.
//!
//! Each address column holds one value per `Addrobj` node on the matched
//! path, root first.

/// Display names of the path nodes.
pub const ADDROBJ_OFFNAME: &str = "AddrobjOffname";

/// Registry identifiers of the path nodes.
pub const ADDROBJ_AOGUID: &str = "AddrobjAoguid";

/// Type labels of the path nodes.
pub const ADDROBJ_SOCRNAME: &str = "AddrobjSocrname";

/// Postal codes of the path nodes.
pub const ADDROBJ_POSTALCODE: &str = "AddrobjPostalcode";

/// Matched house, present only when house tokens were given.
pub const HOUSES: &str = "Houses";

/// Matched house interval, present only when house tokens were given.
pub const HOUSES_INT: &str = "HousesInt";

/// The four address columns, in the order they are returned.
pub const ADDRESS_COLUMNS: [&str; 4] = [
    ADDROBJ_OFFNAME,
    ADDROBJ_AOGUID,
    ADDROBJ_SOCRNAME,
    ADDROBJ_POSTALCODE,
];

/// The node property behind each address column.
pub(crate) const ADDRESS_PROPERTIES: [(&str, &str); 4] = [
    ("offname", ADDROBJ_OFFNAME),
    ("aoguid", ADDROBJ_AOGUID),
    ("socrname", ADDROBJ_SOCRNAME),
    ("postalcode", ADDROBJ_POSTALCODE),
];
