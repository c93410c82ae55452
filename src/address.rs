//! Resolved addresses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Word placed between a house number and its letter.
pub const LETTER: &str = "литера";

/// One node of the address registry hierarchy: a region, city, street, ...
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddrObject {
    /// Registry identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Type label ("г", "ул", ...).
    pub type_name: String,
    /// Postal code, possibly empty.
    pub postal_code: String,
}

impl AddrObject {
    /// Create a new address object.
    pub fn new<S: Into<String>>(id: S, name: S, type_name: S, postal_code: S) -> Self {
        AddrObject {
            id: id.into(),
            name: name.into(),
            type_name: type_name.into(),
            postal_code: postal_code.into(),
        }
    }

    /// An object without an identifier cannot be referenced and is dropped
    /// from address paths.
    pub fn is_well_formed(&self) -> bool {
        !self.id.is_empty()
    }
}

impl fmt::Display for AddrObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.id, self.name)
    }
}

/// A resolved address: the registry path from the root down, plus an
/// optional house number and letter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    addr_path: Vec<AddrObject>,
    /// House number, 0 when unknown.
    pub house_num: u32,
    /// House letter, empty when none.
    pub house_num_literal: String,
}

impl Address {
    /// Create an empty address.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an address from a registry path.
    pub fn with_path<I: IntoIterator<Item = AddrObject>>(path: I) -> Self {
        let mut address = Self::new();
        address.set_addr_path(path);
        address
    }

    /// The registry path, root first.
    pub fn addr_path(&self) -> &[AddrObject] {
        &self.addr_path
    }

    /// Replace the registry path. Malformed objects are dropped; the rest
    /// keep their order.
    pub fn set_addr_path<I: IntoIterator<Item = AddrObject>>(&mut self, path: I) {
        self.addr_path = path
            .into_iter()
            .filter(AddrObject::is_well_formed)
            .collect();
    }

    /// Identifiers along the path.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.addr_path.iter().map(|object| object.id.as_str())
    }

    /// Postal code of the deepest path node, or `""`.
    pub fn postal_code(&self) -> &str {
        self.addr_path
            .last()
            .map(|object| object.postal_code.as_str())
            .unwrap_or_default()
    }

    /// Human-readable rendering, e.g. `"г Москва, ул Арбат, 12 литера а, 119002"`.
    pub fn address_string(&self) -> String {
        let mut result = self
            .addr_path
            .iter()
            .map(|object| format!("{} {}", object.type_name, object.name))
            .collect::<Vec<_>>()
            .join(", ");

        if self.house_num != 0 {
            result.push_str(&format!(", {}", self.house_num));
        }
        if !self.house_num_literal.is_empty() {
            result.push_str(&format!(" {LETTER} {}", self.house_num_literal));
        }
        let postal_code = self.postal_code();
        if !postal_code.is_empty() {
            result.push_str(&format!(", {postal_code}"));
        }
        result
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address_string())
    }
}
