//! Post-processing of the IDL emitted by the generator.

use std::{fs, path::Path};

use log::info;
use serde_json::{Map, Value};

use crate::error::{GeneratorError, GeneratorResult};

/// Set `metadata.address` to `program_id` unless the generator already did.
///
/// Returns whether the IDL was changed.
pub fn ensure_address(idl: &mut Map<String, Value>, program_id: &str) -> bool {
    let metadata = idl
        .entry("metadata")
        .or_insert_with(|| Value::Object(Map::new()));

    // A non-object metadata field is replaced wholesale.
    if !metadata.is_object() {
        *metadata = Value::Object(Map::new());
    }
    let Value::Object(metadata) = metadata else {
        return false;
    };

    if metadata.get("address").is_some_and(|a| !a.is_null()) {
        return false;
    }
    metadata.insert("address".to_string(), Value::String(program_id.to_string()));
    true
}

/// Number of entries in a top-level array of the IDL, 0 if absent.
pub fn count(idl: &Map<String, Value>, key: &str) -> usize {
    idl.get(key).and_then(Value::as_array).map_or(0, Vec::len)
}

/// Load the IDL at `path`, stamp the program address and rewrite it
/// pretty-printed.
///
/// # Errors
///
/// Fails when the file is missing, unreadable or not a JSON object.
pub fn finalize(path: &Path, program_id: &str) -> GeneratorResult<()> {
    if !path.exists() {
        return Err(GeneratorError::MissingIdl {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
    let value: Value = serde_json::from_str(&content).map_err(|e| GeneratorError::InvalidIdl {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let Value::Object(mut idl) = value else {
        return Err(GeneratorError::InvalidIdl {
            path: path.to_path_buf(),
            reason: "top-level value is not an object".to_string(),
        });
    };

    ensure_address(&mut idl, program_id);

    info!(
        "Extracted {} instructions, {} accounts, {} types, {} errors",
        count(&idl, "instructions"),
        count(&idl, "accounts"),
        count(&idl, "types"),
        count(&idl, "errors"),
    );

    let mut json = serde_json::to_string_pretty(&Value::Object(idl)).map_err(|e| {
        GeneratorError::InvalidIdl {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;
    json.push('\n');
    fs::write(path, json).map_err(|e| GeneratorError::io(path, e))
}
