//! An owned collection of records with clause queries.

use std::fs;
use std::path::Path;

use log::{error, info};
use serde_json::Value as Json;

use crate::error::{LoadError, ParseError};
use crate::query::Query;
use crate::value::Record;

/// In-memory record store.
///
/// Records are loaded once and never modified; every query borrows them.
#[derive(Debug, Clone, Default)]
pub struct Database {
    records: Vec<Record>,
}

impl Database {
    /// Creates a database over the given records.
    pub fn new(records: Vec<Record>) -> Self {
        info!("database initialized with {} records", records.len());
        Database { records }
    }

    /// Loads records from JSON text.
    ///
    /// Accepts a JSON array of objects, or a JavaScript assignment wrapping
    /// one (`var vessels = [...];`).
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        let cleaned = clean_js_content(content);
        let value: Json = serde_json::from_str(cleaned)?;
        let Json::Array(items) = value else {
            return Err(LoadError::NotAnArray);
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Json::Object(map) => Ok(map),
                _ => Err(LoadError::NotAnObject { index }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Database::new(records))
    }

    /// Loads records from a JSON (or JavaScript-wrapped JSON) file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| {
            error!("failed to read {}: {source}", path.display());
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Database::from_json_str(&content).inspect_err(|e| {
            error!("failed to load {}: {e}", path.display());
        })
    }

    /// Runs a clause against every record.
    ///
    /// Matching records are returned in storage order.
    pub fn query(&self, clause: &str) -> Result<Vec<&Record>, ParseError> {
        let query = Query::parse(clause).inspect_err(|e| {
            error!("query failed: {e}");
        })?;
        Ok(self.execute(&query))
    }

    /// Runs an already parsed query.
    pub fn execute(&self, query: &Query) -> Vec<&Record> {
        query.filter(&self.records)
    }

    /// Returns the number of records.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Returns all records in storage order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

/// Strips a JavaScript variable assignment around a JSON array.
///
/// Text starting with `var ` is cut from the first `[` up to the last `;`.
/// The result is trimmed.
pub fn clean_js_content(content: &str) -> &str {
    let content = content.trim();
    if !content.starts_with("var ") {
        return content;
    }

    match (content.find('['), content.rfind(';')) {
        (Some(start), Some(end)) if start < end => content[start..end].trim(),
        (Some(start), _) => content[start..].trim(),
        _ => content,
    }
}
