//! Turning query rows into addresses.

use serde_json::{Map, Value};

use crate::address::{AddrObject, Address};
use crate::query::columns::{ADDROBJ_AOGUID, ADDROBJ_OFFNAME, ADDROBJ_POSTALCODE, ADDROBJ_SOCRNAME};

/// One result row: output column name to value.
pub type Row = Map<String, Value>;

fn column<'a>(row: &'a Row, name: &str) -> Option<&'a Vec<Value>> {
    row.get(name).and_then(Value::as_array)
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Build the address of a single row.
///
/// The four address columns are zipped position by position, stopping at the
/// shortest. A row missing any of them, or holding a non-array in one,
/// yields an address with an empty path.
pub fn assemble_address(row: &Row) -> Address {
    let (Some(names), Some(ids), Some(types), Some(postal_codes)) = (
        column(row, ADDROBJ_OFFNAME),
        column(row, ADDROBJ_AOGUID),
        column(row, ADDROBJ_SOCRNAME),
        column(row, ADDROBJ_POSTALCODE),
    ) else {
        return Address::new();
    };

    let path = names
        .iter()
        .zip(ids)
        .zip(types)
        .zip(postal_codes)
        .map(|(((name, id), type_name), postal_code)| {
            AddrObject::new(render(id), render(name), render(type_name), render(postal_code))
        });

    Address::with_path(path)
}

/// One address per row, in row order.
pub fn assemble_addresses(rows: &[Row]) -> Vec<Address> {
    rows.iter().map(assemble_address).collect()
}
