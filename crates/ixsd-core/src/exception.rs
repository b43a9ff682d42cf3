//! Field-level exception annotations.

use serde::Serialize;

/// Severity of a field exception. `Error` outranks `Warning` wherever a
/// single severity is derived for a group of exceptions, so the variant
/// order matters for `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// Returns the wire string for this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Parses a wire severity string. Anything that is not `error` is
    /// treated as a warning so an unknown marker never drops an exception.
    pub fn from_wire(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("error") {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

/// One exception attached to a field by the server-side extraction
/// pipeline. Order within a field's exception list mirrors the wire and is
/// never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldException {
    pub message: String,
    pub severity: Severity,
}

impl FieldException {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}
