//! Line-item editor: structural operations over a parsed header set.
//!
//! Every operation takes the current headers by reference and returns a
//! new header vector; callers replace their reference so re-renders see a
//! fresh object graph. An operation aimed at a target that does not exist
//! (stale index, unknown key, wrong view style) or is not editable
//! (read-only field, tombstoned row) returns the headers unchanged:
//! UI event handlers race against header reloads and must never crash
//! the session.

use ixsd_core::{Field, FieldValue, Header, Row, RowState, ViewStyle};

/// Appends a new empty row to an array-view header.
///
/// The last existing row serves as the template: field metadata (kind,
/// lookups, length caps, read-only and required flags, wire shape) is
/// copied, values are emptied, and the new row starts as
/// [`RowState::Added`]. Appending keeps server-side ordinal row numbers
/// stable for pre-existing rows. A header with no rows has no template and
/// the operation is a no-op.
pub fn add_row(headers: &[Header], header_index: usize) -> Vec<Header> {
    let mut next = headers.to_vec();
    let Some(header) = next.get_mut(header_index) else {
        log::debug!("add_row: no header at index {header_index}");
        return next;
    };
    if header.view_style != ViewStyle::Array {
        log::debug!("add_row: header {} is not an array view", header.name);
        return next;
    }
    let Some(template) = header.rows.last() else {
        log::debug!("add_row: header {} has no template row", header.name);
        return next;
    };
    let fields: Vec<Field> = template.fields.iter().map(Field::blank_clone).collect();
    let mut row = Row::new(fields);
    row.set_state(RowState::Added);
    header.rows.push(row);
    next
}

/// Tombstones a row of an array-view header.
///
/// The row stays in place, keeping indexes stable for any UI still
/// referencing it and letting the save payload carry the deletion
/// explicitly; its state (and every field's copy of it) becomes
/// [`RowState::Deleted`].
/// Deleting an already-deleted row changes nothing.
pub fn delete_row(headers: &[Header], header_index: usize, row_index: usize) -> Vec<Header> {
    let mut next = headers.to_vec();
    let Some(header) = next.get_mut(header_index) else {
        return next;
    };
    if header.view_style != ViewStyle::Array {
        log::debug!("delete_row: header {} is not an array view", header.name);
        return next;
    }
    match header.rows.get_mut(row_index) {
        Some(row) => row.set_state(RowState::Deleted),
        None => log::debug!(
            "delete_row: header {} has no row {row_index}",
            header.name
        ),
    }
    next
}

/// Replaces one field's value, flagging the field as changed.
///
/// The change flag is set the first time the value actually moves;
/// re-writing the current value is not a change. Read-only fields and
/// tombstoned rows are never mutated.
pub fn update_field_value(
    headers: &[Header],
    header_index: usize,
    row_index: usize,
    field_key: &str,
    new_value: FieldValue,
) -> Vec<Header> {
    let mut next = headers.to_vec();
    let Some(row) = next
        .get_mut(header_index)
        .and_then(|h| h.rows.get_mut(row_index))
    else {
        return next;
    };
    if row.is_deleted() {
        log::debug!("update_field_value: row {row_index} is deleted");
        return next;
    }
    let Some(field) = row.field_mut(field_key) else {
        log::debug!("update_field_value: no field {field_key} in row {row_index}");
        return next;
    };
    if field.read_only {
        log::debug!("update_field_value: field {field_key} is read-only");
        return next;
    }
    if field.value != new_value {
        field.value = new_value;
        field.changed_since_load = true;
    }
    next
}

/// True when the session holds edits a save has not yet persisted: any
/// changed field, or any row added or tombstoned since load.
pub fn has_unsaved_changes(headers: &[Header]) -> bool {
    headers.iter().any(|header| {
        header.rows.iter().any(|row| {
            matches!(row.state, RowState::Added | RowState::Deleted)
                || row.fields.iter().any(|f| f.changed_since_load)
        })
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────
