//! Output formatting for CLI commands.

use std::io::Write;

use serde::Serialize;

use crate::address::Address;
use crate::cli::args::{OutputFormat, ResolverArgs};
use crate::error::Result;
use crate::query::CypherQuery;

/// Corrected words of one input line.
#[derive(Debug, Serialize)]
pub struct CorrectionResult {
    pub input: String,
    pub words: Vec<String>,
}

/// Query synthesized for one input line.
#[derive(Debug, Serialize)]
pub struct QueryResult {
    pub input: String,
    pub query: Option<CypherQuery>,
}

/// One resolved address.
#[derive(Debug, Serialize)]
pub struct AddressRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub ids: Vec<String>,
}

impl AddressRecord {
    /// Build a record, keeping the optional parts that were asked for.
    pub fn new(input: Option<&str>, address: &Address, show_address: bool) -> Self {
        AddressRecord {
            input: input.map(str::to_string),
            address: show_address.then(|| address.address_string()),
            ids: address.ids().map(str::to_string).collect(),
        }
    }

    /// `[input;][address;]id1;id2;...`
    pub fn to_line(&self) -> String {
        self.input
            .iter()
            .chain(self.address.iter())
            .chain(self.ids.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// A result the CLI can print in every output format.
pub trait Printable: Serialize {
    /// Human-readable rendering.
    fn human(&self) -> String;
}

impl Printable for CorrectionResult {
    fn human(&self) -> String {
        self.words.join(" ")
    }
}

impl Printable for QueryResult {
    fn human(&self) -> String {
        match &self.query {
            Some(query) => format!("{}\n", query.text),
            None => String::new(),
        }
    }
}

impl Printable for AddressRecord {
    fn human(&self) -> String {
        self.to_line()
    }
}

/// Write one result in the selected format.
pub fn write_result<W: Write, T: Printable>(
    out: &mut W,
    result: &T,
    args: &ResolverArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => writeln!(out, "{}", result.human())?,
        OutputFormat::Json if args.pretty => {
            writeln!(out, "{}", serde_json::to_string_pretty(result)?)?
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(result)?)?,
    }
    out.flush()?;
    Ok(())
}
