//! Rows and their edit lifecycle.

use crate::field::Field;

/// Edit lifecycle of a row.
///
/// The wire carries this as the row-level `itemState` marker: `A` maps to
/// `Added`, `D` to `Deleted`, `M` to `Modified`. Other markers (`C`, `S`,
/// …) are lifecycle states of the surrounding workflow; they parse as
/// `Unchanged` and the raw marker is preserved on the row so a save
/// re-emits it verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowState {
    #[default]
    Unchanged,
    Added,
    Deleted,
    Modified,
}

impl RowState {
    /// Parses a wire `itemState` marker.
    pub fn from_wire_marker(marker: &str) -> Self {
        match marker {
            "A" => RowState::Added,
            "D" => RowState::Deleted,
            "M" => RowState::Modified,
            _ => RowState::Unchanged,
        }
    }

    /// The wire marker this state emits on its own. `Unchanged` emits
    /// nothing; the row's preserved marker (if any) is used instead.
    pub fn wire_marker(&self) -> Option<&'static str> {
        match self {
            RowState::Unchanged => None,
            RowState::Added => Some("A"),
            RowState::Deleted => Some("D"),
            RowState::Modified => Some("M"),
        }
    }
}

/// One row of a header: an ordered field list plus row-level wire
/// metadata. The row's state is authoritative; every field carries a copy,
/// kept in sync by [`Row::set_state`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub fields: Vec<Field>,
    pub state: RowState,
    /// The raw `itemState` marker as parsed, for lossless reconstruction
    /// of markers the model does not interpret.
    pub wire_state: Option<String>,
    /// Row-level duplicate flag; `None` when absent on the wire, so
    /// absence survives reconstruction.
    pub has_duplicated: Option<bool>,
}

impl Row {
    pub fn new(fields: Vec<Field>) -> Self {
        Row {
            fields,
            state: RowState::Unchanged,
            wire_state: None,
            has_duplicated: None,
        }
    }

    /// Sets the row state and mirrors it onto every field.
    pub fn set_state(&mut self, state: RowState) {
        self.state = state;
        for field in &mut self.fields {
            field.row_state = state;
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.state == RowState::Deleted
    }

    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn field_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.key == key)
    }

    pub fn has_exception(&self) -> bool {
        self.fields.iter().any(Field::has_exceptions)
    }
}
