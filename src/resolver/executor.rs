//! Query execution.
//!
//! The graph database driver lives outside this crate; callers plug it in
//! through [`QueryExecutor`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::Result;
use crate::resolver::assemble::Row;

/// Runs a query text against an address registry.
pub trait QueryExecutor: Send + Sync {
    /// Execute `query` and return its rows.
    fn execute(&self, query: &str) -> Result<Vec<Row>>;
}

impl<T: QueryExecutor + ?Sized> QueryExecutor for Arc<T> {
    fn execute(&self, query: &str) -> Result<Vec<Row>> {
        (**self).execute(query)
    }
}

impl<T: QueryExecutor + ?Sized> QueryExecutor for Box<T> {
    fn execute(&self, query: &str) -> Result<Vec<Row>> {
        (**self).execute(query)
    }
}

/// On-disk form of an [`InMemoryExecutor`]: either a plain array of rows or
/// an object with `rows` and `keyed` sections.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RowsFile {
    Rows(Vec<Row>),
    Keyed {
        #[serde(default)]
        rows: Vec<Row>,
        #[serde(default)]
        keyed: Vec<KeyedRows>,
    },
}

#[derive(Debug, Clone, Deserialize)]
struct KeyedRows {
    contains: String,
    rows: Vec<Row>,
}

/// Serves pre-loaded rows.
///
/// Keyed row sets are tried in insertion order and returned when the query
/// text contains their key; otherwise the default rows are returned.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExecutor {
    rows: Vec<Row>,
    keyed: Vec<KeyedRows>,
}

impl InMemoryExecutor {
    /// An executor that returns `rows` for every query.
    pub fn new(rows: Vec<Row>) -> Self {
        InMemoryExecutor {
            rows,
            keyed: Vec::new(),
        }
    }

    /// Return `rows` for queries whose text contains `key`.
    pub fn with_keyed_rows<S: Into<String>>(mut self, key: S, rows: Vec<Row>) -> Self {
        self.keyed.push(KeyedRows {
            contains: key.into(),
            rows,
        });
        self
    }

    /// Parse rows from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::from_rows_file(serde_json::from_str(json)?))
    }

    /// Load rows from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(Self::from_rows_file(serde_json::from_reader(reader)?))
    }

    fn from_rows_file(file: RowsFile) -> Self {
        match file {
            RowsFile::Rows(rows) => Self::new(rows),
            RowsFile::Keyed { rows, keyed } => keyed
                .into_iter()
                .fold(Self::new(rows), |executor, set| {
                    executor.with_keyed_rows(set.contains, set.rows)
                }),
        }
    }

    /// The default rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

impl QueryExecutor for InMemoryExecutor {
    fn execute(&self, query: &str) -> Result<Vec<Row>> {
        let rows = self
            .keyed
            .iter()
            .find(|keyed| query.contains(&keyed.contains))
            .map_or(&self.rows, |keyed| &keyed.rows);
        Ok(rows.clone())
    }
}
