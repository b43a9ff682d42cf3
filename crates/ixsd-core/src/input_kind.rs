//! Input kind tags for form fields.

/// The editor/validator family a field belongs to.
///
/// The wire carries this as the `inputType` string on rich field objects.
/// Unrecognized tags degrade to [`InputKind::Text`] at the parse boundary
/// rather than failing the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Textarea,
    Options,
    MultiSelect,
    Date,
    Checkbox,
    Boolean,
    BooleanButton,
    Currency,
    Decimal,
}

impl InputKind {
    /// Returns the wire tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Textarea => "textarea",
            InputKind::Options => "options",
            InputKind::MultiSelect => "multiSelect",
            InputKind::Date => "date",
            InputKind::Checkbox => "checkbox",
            InputKind::Boolean => "boolean",
            InputKind::BooleanButton => "booleanButton",
            InputKind::Currency => "currency",
            InputKind::Decimal => "decimal",
        }
    }

    /// Parses a wire tag. Unknown tags fall back to `Text`.
    pub fn from_wire(tag: &str) -> Self {
        match tag {
            "text" => InputKind::Text,
            "textarea" => InputKind::Textarea,
            "options" => InputKind::Options,
            "multiSelect" => InputKind::MultiSelect,
            "date" => InputKind::Date,
            "checkbox" => InputKind::Checkbox,
            "boolean" => InputKind::Boolean,
            "booleanButton" => InputKind::BooleanButton,
            "currency" => InputKind::Currency,
            "decimal" => InputKind::Decimal,
            _ => InputKind::Text,
        }
    }

    /// Returns true for kinds driven by server-provided lookup options.
    pub fn is_lookup(&self) -> bool {
        matches!(self, InputKind::Options | InputKind::MultiSelect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_tags_round_trip() {
        let kinds = [
            InputKind::Text,
            InputKind::Textarea,
            InputKind::Options,
            InputKind::MultiSelect,
            InputKind::Date,
            InputKind::Checkbox,
            InputKind::Boolean,
            InputKind::BooleanButton,
            InputKind::Currency,
            InputKind::Decimal,
        ];
        for kind in kinds {
            assert_eq!(InputKind::from_wire(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_unknown_tag_degrades_to_text() {
        assert_eq!(InputKind::from_wire("richText"), InputKind::Text);
        assert_eq!(InputKind::from_wire(""), InputKind::Text);
    }

    #[test]
    fn test_lookup_kinds() {
        assert!(InputKind::Options.is_lookup());
        assert!(InputKind::MultiSelect.is_lookup());
        assert!(!InputKind::Date.is_lookup());
    }
}
