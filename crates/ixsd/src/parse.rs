//! Wire parser: document JSON plus exception JSON into the header model.
//!
//! The parser is pure and total: the same inputs always produce a
//! structurally equal header list, malformed input degrades to an empty
//! one, and nothing here performs I/O.

use serde_json::{Map, Value};

use ixsd_core::{
    Field, FieldException, FieldValue, Header, InputKind, LookupOption, Row, RowState, Severity,
    ViewStyle,
};
use ixsd_util::display_label;

use crate::wire;

/// Parses the two wire channels into the header model.
///
/// `data` maps header names to a record object (object view) or an array
/// of row objects (array view). `exceptions` mirrors the same nesting but
/// sparsely; absence of an entry means "no exceptions", never an error.
/// A non-object `data` root yields an empty header list.
pub fn parse_headers(data: &Value, exceptions: &Value) -> Vec<Header> {
    let root = match data.as_object() {
        Some(map) => map,
        None => return Vec::new(),
    };
    let exc_root = exceptions.as_object();
    root.iter()
        .map(|(name, node)| build_header(name, node, exc_root.and_then(|m| m.get(name))))
        .collect()
}

/// String front end of [`parse_headers`]. Unparsable JSON in either
/// channel behaves as an empty document for that channel.
pub fn parse_headers_str(data: &str, exceptions: &str) -> Vec<Header> {
    let data = Value::Object(wire::decode_root_lenient(data));
    let exceptions = Value::Object(wire::decode_root_lenient(exceptions));
    parse_headers(&data, &exceptions)
}

// ── Header / row construction ─────────────────────────────────────────────

fn build_header(name: &str, node: &Value, exc_node: Option<&Value>) -> Header {
    let mut header = Header::new(name, display_label(name), view_style_of(node));
    match node {
        Value::Array(elements) => {
            for (index, element) in elements.iter().enumerate() {
                let exc_row = exceptions_for_row(exc_node, index);
                match element.as_object() {
                    Some(obj) => header.rows.push(build_row(obj, exc_row)),
                    None => {
                        // Keep positional alignment with the exception
                        // channel even when the server emits a bad element.
                        log::debug!("header {name}: row {index} is not an object, kept empty");
                        header.rows.push(Row::new(Vec::new()));
                    }
                }
            }
        }
        Value::Object(obj) => header.rows.push(build_row(obj, exc_node)),
        _ => {
            log::debug!("header {name}: unexpected shape, kept as empty record");
            header.rows.push(Row::new(Vec::new()));
        }
    }
    header
}

fn view_style_of(node: &Value) -> ViewStyle {
    if node.is_array() {
        ViewStyle::Array
    } else {
        ViewStyle::Object
    }
}

fn build_row(obj: &Map<String, Value>, exc_row: Option<&Value>) -> Row {
    let exc_fields = exc_row.and_then(Value::as_object);
    let mut state = RowState::Unchanged;
    let mut wire_state = None;
    let mut has_duplicated = None;
    let mut fields = Vec::new();

    for (key, value) in obj {
        match key.as_str() {
            wire::ITEM_STATE => {
                if let Some(marker) = value.as_str() {
                    state = RowState::from_wire_marker(marker);
                    wire_state = Some(marker.to_string());
                }
            }
            wire::HAS_DUPLICATED => has_duplicated = value.as_bool(),
            _ => fields.push(build_field(key, value, exc_fields.and_then(|m| m.get(key)))),
        }
    }

    let mut row = Row::new(fields);
    row.wire_state = wire_state;
    row.has_duplicated = has_duplicated;
    row.set_state(state);
    row
}

/// For array-view headers the exception channel keys rows by their index
/// rendered as a string (sparse), but a position-aligned array is accepted
/// too.
fn exceptions_for_row<'a>(exc_node: Option<&'a Value>, index: usize) -> Option<&'a Value> {
    match exc_node? {
        Value::Object(map) => map.get(&index.to_string()),
        Value::Array(rows) => rows.get(index),
        _ => None,
    }
}

// ── Field construction ────────────────────────────────────────────────────

fn build_field(key: &str, value: &Value, exc_leaf: Option<&Value>) -> Field {
    let mut field = match rich_object(value) {
        Some(meta) => rich_field(key, meta),
        None => Field::scalar(key, display_label(key), value.clone()),
    };
    if let Some(leaf) = exc_leaf {
        field.exceptions = parse_exception_leaf(leaf);
    }
    field
}

/// A property value is a rich field object iff it is an object carrying a
/// `value` key; any other object is an opaque scalar value.
fn rich_object(value: &Value) -> Option<&Map<String, Value>> {
    value
        .as_object()
        .filter(|map| map.contains_key(wire::FIELD_VALUE))
}

fn rich_field(key: &str, meta: &Map<String, Value>) -> Field {
    let input_kind = meta
        .get(wire::FIELD_INPUT_TYPE)
        .and_then(Value::as_str)
        .map(InputKind::from_wire)
        .unwrap_or_default();
    let raw_value = meta.get(wire::FIELD_VALUE).cloned().unwrap_or(Value::Null);

    Field {
        key: key.to_string(),
        display_label: meta
            .get(wire::FIELD_DISPLAY_LABEL)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| display_label(key)),
        value: field_value(input_kind, raw_value),
        input_kind,
        read_only: meta
            .get(wire::FIELD_READ_ONLY)
            .and_then(Value::as_bool)
            .unwrap_or(false),
        required: meta
            .get(wire::FIELD_REQUIRED)
            .and_then(Value::as_bool)
            .unwrap_or(false),
        lookup_options: meta
            .get(wire::FIELD_LOOKUP_OPTIONS)
            .map(parse_lookup_options)
            .unwrap_or_default(),
        max_length: meta
            .get(wire::FIELD_MAX_LENGTH)
            .and_then(Value::as_u64)
            .map(|n| n as u32),
        exceptions: Vec::new(),
        changed_since_load: false,
        row_state: RowState::Unchanged,
        wire: Some(meta.clone()),
    }
}

/// Boolean-button values arrive as an object of label → pressed; every
/// other kind stores its wire value as a scalar.
fn field_value(kind: InputKind, raw: Value) -> FieldValue {
    if kind == InputKind::BooleanButton {
        if let Value::Object(map) = &raw {
            return FieldValue::Flags(
                map.iter()
                    .map(|(label, v)| (label.clone(), v.as_bool().unwrap_or(false)))
                    .collect(),
            );
        }
    }
    FieldValue::Scalar(raw)
}

fn parse_lookup_options(node: &Value) -> Vec<LookupOption> {
    let Some(entries) = node.as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| LookupOption {
            id: stringify(entry.get("id")),
            description: stringify(entry.get("description")),
        })
        .collect()
}

/// Lookup ids and descriptions arrive as strings or numbers; both render
/// as their text form.
fn stringify(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn parse_exception_leaf(leaf: &Value) -> Vec<FieldException> {
    let Some(entries) = leaf.as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| FieldException {
            message: entry
                .get(wire::EXCEPTION_MESSAGE)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            severity: entry
                .get(wire::EXCEPTION_SEVERITY)
                .and_then(Value::as_str)
                .map(Severity::from_wire)
                .unwrap_or(Severity::Warning),
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_object_view_header() {
        let headers = parse_headers(
            &json!({"invoice": {"amount": "100", "vendor": "Acme"}}),
            &json!({}),
        );
        assert_eq!(headers.len(), 1);
        let invoice = &headers[0];
        assert_eq!(invoice.name, "invoice");
        assert_eq!(invoice.label, "Invoice");
        assert_eq!(invoice.view_style, ViewStyle::Object);
        assert_eq!(invoice.rows.len(), 1);
        let fields = &invoice.rows[0].fields;
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].key, "amount");
        assert_eq!(fields[0].value, FieldValue::Scalar(json!("100")));
        assert!(fields.iter().all(|f| f.exceptions.is_empty()));
    }

    #[test]
    fn parse_array_view_header() {
        let headers = parse_headers(
            &json!({"lineItems": [{"qty": "1"}, {"qty": "2"}]}),
            &json!({}),
        );
        assert_eq!(headers.len(), 1);
        let items = &headers[0];
        assert_eq!(items.view_style, ViewStyle::Array);
        assert_eq!(items.label, "Line Items");
        assert_eq!(items.rows.len(), 2);
        assert_eq!(items.rows[1].fields[0].value, FieldValue::Scalar(json!("2")));
    }

    #[test]
    fn parse_empty_document() {
        assert!(parse_headers(&json!({}), &json!({})).is_empty());
    }

    #[test]
    fn parse_malformed_string_degrades_to_empty() {
        assert!(parse_headers_str("not valid json", "{}").is_empty());
        assert!(parse_headers_str("[1,2,3]", "{}").is_empty());
    }

    #[test]
    fn parse_malformed_exception_channel_is_ignored() {
        let headers = parse_headers_str(r#"{"invoice": {"amount": "1"}}"#, "oops");
        assert_eq!(headers.len(), 1);
        assert!(headers[0].rows[0].fields[0].exceptions.is_empty());
    }

    #[test]
    fn parse_rich_field_metadata() {
        let headers = parse_headers(
            &json!({"invoice": {"currency": {
                "value": "EUR",
                "inputType": "options",
                "readOnly": true,
                "required": true,
                "maxLength": 3,
                "lookupOptions": [
                    {"id": "EUR", "description": "Euro"},
                    {"id": 840, "description": "US Dollar"}
                ]
            }}}),
            &json!({}),
        );
        let field = &headers[0].rows[0].fields[0];
        assert_eq!(field.input_kind, InputKind::Options);
        assert!(field.read_only);
        assert!(field.required);
        assert_eq!(field.max_length, Some(3));
        assert_eq!(field.lookup_options.len(), 2);
        assert_eq!(field.lookup_options[0].id, "EUR");
        assert_eq!(field.lookup_options[1].id, "840");
        assert!(field.wire.is_some());
    }

    #[test]
    fn parse_empty_lookup_options_is_valid() {
        let headers = parse_headers(
            &json!({"invoice": {"currency": {
                "value": "", "inputType": "options", "lookupOptions": []
            }}}),
            &json!({}),
        );
        let field = &headers[0].rows[0].fields[0];
        assert!(field.lookup_options.is_empty());
        assert_eq!(field.input_kind, InputKind::Options);
    }

    #[test]
    fn parse_unknown_input_type_degrades_to_text() {
        let headers = parse_headers(
            &json!({"invoice": {"notes": {"value": "x", "inputType": "richText"}}}),
            &json!({}),
        );
        assert_eq!(headers[0].rows[0].fields[0].input_kind, InputKind::Text);
    }

    #[test]
    fn parse_display_label_prefers_server_value() {
        let headers = parse_headers(
            &json!({"invoice": {
                "poNumber": {"value": "7", "displayLabel": "Purchase Order #"},
                "dueDate": {"value": "2024-01-01"}
            }}),
            &json!({}),
        );
        let fields = &headers[0].rows[0].fields;
        assert_eq!(fields[0].display_label, "Purchase Order #");
        assert_eq!(fields[1].display_label, "Due Date");
    }

    #[test]
    fn parse_boolean_button_flags() {
        let headers = parse_headers(
            &json!({"review": {"actions": {
                "value": {"approve": true, "hold": false},
                "inputType": "booleanButton"
            }}}),
            &json!({}),
        );
        let field = &headers[0].rows[0].fields[0];
        assert_eq!(
            field.value,
            FieldValue::Flags(indexmap::IndexMap::from([
                ("approve".to_string(), true),
                ("hold".to_string(), false),
            ]))
        );
    }

    #[test]
    fn parse_reserved_keys_seed_row_state() {
        let headers = parse_headers(
            &json!({"lineItems": [
                {"qty": "1", "itemState": "D", "hasDuplicated": true},
                {"qty": "2", "itemState": "C"}
            ]}),
            &json!({}),
        );
        let rows = &headers[0].rows;
        assert_eq!(rows[0].state, RowState::Deleted);
        assert_eq!(rows[0].has_duplicated, Some(true));
        assert_eq!(rows[1].state, RowState::Unchanged);
        assert_eq!(rows[1].wire_state.as_deref(), Some("C"));
        assert_eq!(rows[1].has_duplicated, None);
        // Reserved keys never surface as fields.
        for row in rows {
            assert_eq!(row.fields.len(), 1);
            assert_eq!(row.fields[0].key, "qty");
        }
        // The row state is mirrored onto each field.
        assert_eq!(rows[0].fields[0].row_state, RowState::Deleted);
    }

    #[test]
    fn parse_attaches_object_view_exceptions() {
        let headers = parse_headers(
            &json!({"invoice": {"amount": "100", "vendor": "Acme"}}),
            &json!({"invoice": {"amount": [
                {"message": "below tolerance", "severity": "warning"},
                {"message": "missing tax", "severity": "error"}
            ]}}),
        );
        let row = &headers[0].rows[0];
        let amount = row.field("amount").unwrap();
        assert_eq!(amount.exceptions.len(), 2);
        assert_eq!(amount.exceptions[0].severity, Severity::Warning);
        assert_eq!(amount.exceptions[1].severity, Severity::Error);
        assert!(row.field("vendor").unwrap().exceptions.is_empty());
        assert_eq!(headers[0].exception_severity(), Some(Severity::Error));
    }

    #[test]
    fn parse_attaches_array_view_exceptions_by_row_index() {
        let exceptions = json!({"lineItems": {"1": {"qty": [
            {"message": "quantity mismatch", "severity": "error"}
        ]}}});
        let headers = parse_headers(
            &json!({"lineItems": [{"qty": "1"}, {"qty": "2"}]}),
            &exceptions,
        );
        let rows = &headers[0].rows;
        assert!(rows[0].fields[0].exceptions.is_empty());
        assert_eq!(rows[1].fields[0].exceptions.len(), 1);
    }

    #[test]
    fn parse_accepts_position_aligned_exception_array() {
        let exceptions = json!({"lineItems": [
            {"qty": [{"message": "bad", "severity": "warning"}]},
            {}
        ]});
        let headers = parse_headers(
            &json!({"lineItems": [{"qty": "1"}, {"qty": "2"}]}),
            &exceptions,
        );
        assert_eq!(headers[0].rows[0].fields[0].exceptions.len(), 1);
        assert!(headers[0].rows[1].fields[0].exceptions.is_empty());
    }

    #[test]
    fn parse_unknown_severity_degrades_to_warning() {
        let headers = parse_headers(
            &json!({"invoice": {"amount": "1"}}),
            &json!({"invoice": {"amount": [{"message": "m", "severity": "fatal"}]}}),
        );
        assert_eq!(
            headers[0].rows[0].fields[0].exceptions[0].severity,
            Severity::Warning
        );
    }

    #[test]
    fn parse_is_pure() {
        let data = json!({"invoice": {"amount": "100"}, "lineItems": [{"qty": "1"}]});
        let exceptions = json!({"invoice": {"amount": [{"message": "m", "severity": "error"}]}});
        assert_eq!(
            parse_headers(&data, &exceptions),
            parse_headers(&data, &exceptions)
        );
    }

    #[test]
    fn parse_non_object_row_element_keeps_alignment() {
        let exceptions = json!({"lineItems": {"2": {"qty": [
            {"message": "m", "severity": "error"}
        ]}}});
        let headers = parse_headers(
            &json!({"lineItems": [{"qty": "1"}, 42, {"qty": "3"}]}),
            &exceptions,
        );
        let rows = &headers[0].rows;
        assert_eq!(rows.len(), 3);
        assert!(rows[1].fields.is_empty());
        assert_eq!(rows[2].fields[0].exceptions.len(), 1);
    }
}
