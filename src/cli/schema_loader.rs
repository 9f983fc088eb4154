//! Schema file loading.
//!
//! A schema file is a JSON array of `{"name": ..., "type": ...}` objects,
//! in column-index order — the external collaborator spec §1 and §3 assume
//! but deliberately leave unspecified. `type` is one of the spellings
//! [`crate::schema::Datatype`]'s `FromStr` impl accepts (`int`/`integer`,
//! `real`/`float`/`double`, `str`/`string`/`text`).

use crate::error::CliError;
use crate::schema::{Datatype, Schema};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ColumnSpec {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}

/// Parses `text` (a JSON array of column specs) into a [`Schema`].
pub fn load_schema_str(text: &str) -> Result<Schema, CliError> {
    let specs: Vec<ColumnSpec> = serde_json::from_str(text)
        .map_err(|e| CliError::Schema(format!("invalid schema JSON: {e}")))?;

    if specs.is_empty() {
        return Err(CliError::Schema(
            "schema file defines no columns".to_string(),
        ));
    }

    let mut schema = Schema::new();
    for spec in specs {
        let datatype: Datatype = spec
            .type_name
            .parse()
            .map_err(|e| CliError::Schema(format!("column '{}': {e}", spec.name)))?;
        if schema.contains(&spec.name) {
            return Err(CliError::Schema(format!(
                "duplicate column name '{}'",
                spec.name
            )));
        }
        schema.push(spec.name, datatype);
    }

    Ok(schema)
}

/// Reads and parses a schema file from disk.
pub fn load_schema_file(path: impl AsRef<Path>) -> Result<Schema, CliError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        CliError::Io(format!("failed to read schema file {}: {e}", path.display()))
    })?;
    load_schema_str(&text)
}
