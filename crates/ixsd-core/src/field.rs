//! The atomic unit of the form model: one field of one row.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::exception::{FieldException, Severity};
use crate::input_kind::InputKind;
use crate::row::RowState;

/// One entry of a field's lookup list. An empty lookup list is a valid
/// state ("no lookup information available"), not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOption {
    pub id: String,
    pub description: String,
}

/// A field's current value.
///
/// Every input kind stores a scalar except `booleanButton`, whose value is
/// an ordered label → pressed mapping. `PartialEq` compares structurally,
/// which the version-compare engine relies on.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    Flags(IndexMap<String, bool>),
}

impl FieldValue {
    /// The empty value that `addRow` assigns to cloned template fields:
    /// scalars become the empty string, flag maps keep their labels with
    /// every flag cleared.
    pub fn empty_like(&self) -> FieldValue {
        match self {
            FieldValue::Scalar(_) => FieldValue::Scalar(Value::String(String::new())),
            FieldValue::Flags(flags) => {
                FieldValue::Flags(flags.keys().map(|k| (k.clone(), false)).collect())
            }
        }
    }

    /// Returns true when the value holds nothing a user entered: empty or
    /// null scalar, or a flag map with nothing pressed.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Scalar(Value::Null) => true,
            FieldValue::Scalar(Value::String(s)) => s.is_empty(),
            FieldValue::Scalar(_) => false,
            FieldValue::Flags(flags) => flags.values().all(|pressed| !pressed),
        }
    }

    /// Serializes back to the wire representation.
    pub fn to_wire(&self) -> Value {
        match self {
            FieldValue::Scalar(v) => v.clone(),
            FieldValue::Flags(flags) => {
                let mut obj = Map::new();
                for (label, pressed) in flags {
                    obj.insert(label.clone(), Value::Bool(*pressed));
                }
                Value::Object(obj)
            }
        }
    }

    /// Human-readable rendering. Strings render verbatim, null renders
    /// empty, other scalars use their JSON text, and flag maps render the
    /// pressed labels joined with commas.
    pub fn display_text(&self) -> String {
        match self {
            FieldValue::Scalar(Value::String(s)) => s.clone(),
            FieldValue::Scalar(Value::Null) => String::new(),
            FieldValue::Scalar(v) => v.to_string(),
            FieldValue::Flags(flags) => flags
                .iter()
                .filter(|(_, pressed)| **pressed)
                .map(|(label, _)| label.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(v: Value) -> Self {
        FieldValue::Scalar(v)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Scalar(Value::String(s.to_string()))
    }
}

/// One form field: value, wire metadata, exception list, and the edit
/// lifecycle of its row (duplicated onto the field for convenience).
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Stable identifier, unique within its row.
    pub key: String,
    /// Human-readable label; derived from `key` when the server omits it.
    pub display_label: String,
    pub value: FieldValue,
    pub input_kind: InputKind,
    /// No edit path may mutate the value of a read-only field.
    pub read_only: bool,
    /// Display-only annotation.
    pub required: bool,
    pub lookup_options: Vec<LookupOption>,
    /// Input-time cap for text-like values; not enforced by the model.
    pub max_length: Option<u32>,
    /// Server-provided exception annotations, wire order preserved.
    pub exceptions: Vec<FieldException>,
    /// Set the first time an edit moves `value` away from its loaded state.
    pub changed_since_load: bool,
    pub row_state: RowState,
    /// The original rich wire object for fields that arrived as metadata
    /// objects. Reconstruction re-emits it with the live value written
    /// over, so wire keys this model does not interpret survive a save.
    pub wire: Option<Map<String, Value>>,
}

impl Field {
    /// A plain scalar field with default metadata, as parsed from a bare
    /// wire value.
    pub fn scalar(key: impl Into<String>, label: impl Into<String>, value: Value) -> Self {
        Field {
            key: key.into(),
            display_label: label.into(),
            value: FieldValue::Scalar(value),
            input_kind: InputKind::Text,
            read_only: false,
            required: false,
            lookup_options: Vec::new(),
            max_length: None,
            exceptions: Vec::new(),
            changed_since_load: false,
            row_state: RowState::Unchanged,
            wire: None,
        }
    }

    /// Clones this field as an empty template for a freshly added row:
    /// metadata and wire shape are kept, the value is emptied, and the
    /// exception list and change flag start clean.
    pub fn blank_clone(&self) -> Field {
        Field {
            key: self.key.clone(),
            display_label: self.display_label.clone(),
            value: self.value.empty_like(),
            input_kind: self.input_kind,
            read_only: self.read_only,
            required: self.required,
            lookup_options: self.lookup_options.clone(),
            max_length: self.max_length,
            exceptions: Vec::new(),
            changed_since_load: false,
            row_state: RowState::Added,
            wire: self.wire.clone(),
        }
    }

    pub fn has_exceptions(&self) -> bool {
        !self.exceptions.is_empty()
    }

    /// The highest severity among this field's exceptions, if any.
    pub fn worst_severity(&self) -> Option<Severity> {
        self.exceptions.iter().map(|e| e.severity).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_like_scalar() {
        let v = FieldValue::Scalar(json!("100"));
        assert_eq!(v.empty_like(), FieldValue::Scalar(json!("")));
        assert!(v.empty_like().is_empty());
    }

    #[test]
    fn test_empty_like_flags_keeps_labels() {
        let v = FieldValue::Flags(IndexMap::from([
            ("approve".to_string(), true),
            ("escalate".to_string(), false),
        ]));
        let empty = v.empty_like();
        assert_eq!(
            empty,
            FieldValue::Flags(IndexMap::from([
                ("approve".to_string(), false),
                ("escalate".to_string(), false),
            ]))
        );
        assert!(empty.is_empty());
    }

    #[test]
    fn test_flags_compare_structurally() {
        let a = FieldValue::Flags(IndexMap::from([("x".to_string(), true)]));
        let b = FieldValue::Flags(IndexMap::from([("x".to_string(), true)]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_text() {
        assert_eq!(FieldValue::Scalar(json!("Acme")).display_text(), "Acme");
        assert_eq!(FieldValue::Scalar(json!(12.5)).display_text(), "12.5");
        assert_eq!(FieldValue::Scalar(json!(null)).display_text(), "");
        let flags = FieldValue::Flags(IndexMap::from([
            ("approve".to_string(), true),
            ("hold".to_string(), false),
            ("escalate".to_string(), true),
        ]));
        assert_eq!(flags.display_text(), "approve, escalate");
    }

    #[test]
    fn test_blank_clone_keeps_metadata_drops_state() {
        let mut field = Field::scalar("amount", "Amount", json!("100"));
        field.input_kind = InputKind::Currency;
        field.max_length = Some(12);
        field.exceptions.push(FieldException::new("bad", Severity::Error));
        field.changed_since_load = true;

        let blank = field.blank_clone();
        assert_eq!(blank.input_kind, InputKind::Currency);
        assert_eq!(blank.max_length, Some(12));
        assert_eq!(blank.value, FieldValue::Scalar(json!("")));
        assert!(blank.exceptions.is_empty());
        assert!(!blank.changed_since_load);
        assert_eq!(blank.row_state, RowState::Added);
    }

    #[test]
    fn test_worst_severity() {
        let mut field = Field::scalar("a", "A", json!(""));
        assert_eq!(field.worst_severity(), None);
        field.exceptions.push(FieldException::new("w", Severity::Warning));
        assert_eq!(field.worst_severity(), Some(Severity::Warning));
        field.exceptions.push(FieldException::new("e", Severity::Error));
        assert_eq!(field.worst_severity(), Some(Severity::Error));
    }
}
