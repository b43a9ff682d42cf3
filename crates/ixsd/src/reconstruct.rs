//! Reconstructor: the header model back into the two wire channels.
//!
//! Structural inverse of the parser. The data channel re-emits every row
//! of every visible header, tombstoned rows included (as
//! `itemState: "D"`), so the server applies deletions transactionally
//! instead of diffing absence. The exception channel is sparse: only
//! headers, rows, and fields that currently carry exceptions appear,
//! matching the parser's "absence means none" read convention.

use serde_json::{Map, Value};

use ixsd_core::{Field, Header, Row, RowState, ViewStyle};

use crate::wire;

/// Serializes the data channel for save.
pub fn to_data_json(headers: &[Header]) -> Value {
    let mut root = Map::new();
    for header in headers.iter().filter(|h| h.visible) {
        let node = match header.view_style {
            ViewStyle::Object => header
                .rows
                .first()
                .map(row_to_value)
                .unwrap_or_else(|| Value::Object(Map::new())),
            ViewStyle::Array => {
                Value::Array(header.rows.iter().map(row_to_value).collect())
            }
        };
        root.insert(header.name.clone(), node);
    }
    Value::Object(root)
}

fn row_to_value(row: &Row) -> Value {
    let mut obj = Map::new();
    for field in &row.fields {
        obj.insert(field.key.clone(), field_to_value(field));
    }
    if let Some(marker) = row_marker(row) {
        obj.insert(wire::ITEM_STATE.to_string(), Value::String(marker));
    }
    if let Some(dup) = row.has_duplicated {
        obj.insert(wire::HAS_DUPLICATED.to_string(), Value::Bool(dup));
    }
    Value::Object(obj)
}

/// The `itemState` marker a row emits. Edit-lifecycle states win; an
/// unchanged row re-emits whatever marker it arrived with, or nothing.
fn row_marker(row: &Row) -> Option<String> {
    match row.state {
        RowState::Unchanged => row.wire_state.clone(),
        state => state.wire_marker().map(str::to_string),
    }
}

/// Rich fields re-emit their original wire object with the live value
/// written over it; scalar fields re-emit the bare value.
fn field_to_value(field: &Field) -> Value {
    match &field.wire {
        Some(wire_obj) => {
            let mut obj = wire_obj.clone();
            obj.insert(wire::FIELD_VALUE.to_string(), field.value.to_wire());
            Value::Object(obj)
        }
        None => field.value.to_wire(),
    }
}

/// Serializes the sparse exception channel.
///
/// Object-view headers emit a field-key map; array-view headers emit a map
/// keyed by row index rendered as a string, so sparse rows stay
/// addressable without positional padding.
pub fn to_exception_json(headers: &[Header]) -> Value {
    let mut root = Map::new();
    for header in headers.iter().filter(|h| h.visible) {
        let node = match header.view_style {
            ViewStyle::Object => header.rows.first().and_then(row_exceptions),
            ViewStyle::Array => {
                let mut rows = Map::new();
                for (index, row) in header.rows.iter().enumerate() {
                    if let Some(fields) = row_exceptions(row) {
                        rows.insert(index.to_string(), fields);
                    }
                }
                (!rows.is_empty()).then_some(Value::Object(rows))
            }
        };
        if let Some(node) = node {
            root.insert(header.name.clone(), node);
        }
    }
    Value::Object(root)
}

fn row_exceptions(row: &Row) -> Option<Value> {
    let mut fields = Map::new();
    for field in &row.fields {
        if field.exceptions.is_empty() {
            continue;
        }
        let leaf = serde_json::to_value(&field.exceptions).unwrap_or(Value::Null);
        fields.insert(field.key.clone(), leaf);
    }
    (!fields.is_empty()).then_some(Value::Object(fields))
}

// ── Tests ─────────────────────────────────────────────────────────────────
