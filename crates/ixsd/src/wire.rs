//! Wire-format constants and the lenient decode layer.
//!
//! The server speaks two JSON channels with identical nesting: the data
//! channel (header name → record object or array of row objects) and the
//! sparse exception channel. This module owns the reserved key names and
//! the fallible-to-lenient boundary: decoding errors are typed internally
//! with [`WireError`] and recovered to empty structures before they reach
//! a public entry point.

use serde_json::{Map, Value};
use thiserror::Error;

/// Row-level metadata key carrying the lifecycle marker (`A`, `D`, `C`,
/// `S`, `M`). Not a displayable field.
pub const ITEM_STATE: &str = "itemState";

/// Row-level duplicate flag. Not a displayable field.
pub const HAS_DUPLICATED: &str = "hasDuplicated";

/// Recognized keys of a rich field object.
pub const FIELD_VALUE: &str = "value";
pub const FIELD_INPUT_TYPE: &str = "inputType";
pub const FIELD_READ_ONLY: &str = "readOnly";
pub const FIELD_REQUIRED: &str = "required";
pub const FIELD_DISPLAY_LABEL: &str = "displayLabel";
pub const FIELD_LOOKUP_OPTIONS: &str = "lookupOptions";
pub const FIELD_MAX_LENGTH: &str = "maxLength";

/// Keys of an exception channel leaf entry.
pub const EXCEPTION_MESSAGE: &str = "message";
pub const EXCEPTION_SEVERITY: &str = "severity";

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum WireError {
    #[error("document is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("document root is not a JSON object")]
    RootNotAnObject,
}

// ── Lenient decode ────────────────────────────────────────────────────────

/// Decodes a wire document string into its root object.
pub fn decode_root(text: &str) -> Result<Map<String, Value>, WireError> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(WireError::RootNotAnObject),
    }
}

/// Decodes a wire document string, degrading to an empty root on any
/// error. The UI must stay interactive on partial or corrupt server data,
/// so this is the only behavior the public parse boundary exposes.
pub fn decode_root_lenient(text: &str) -> Map<String, Value> {
    match decode_root(text) {
        Ok(map) => map,
        Err(err) => {
            log::warn!("dropping malformed wire document: {err}");
            Map::new()
        }
    }
}
