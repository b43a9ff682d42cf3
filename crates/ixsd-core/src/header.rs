//! Named field-groups.

use crate::exception::Severity;
use crate::row::Row;

/// Whether a header holds one record or repeating line-item rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStyle {
    /// Exactly one row; rows are never added or deleted, only field
    /// values mutate.
    Object,
    /// Zero or more rows ("line items").
    Array,
}

/// A named group of fields: one record (object view) or a line-item grid
/// (array view). Within an array view, every row carries the same ordered
/// set of field keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Stable key matching the wire document's top-level property name.
    pub name: String,
    /// Display title; derived from `name` when the server omits it.
    pub label: String,
    pub view_style: ViewStyle,
    pub rows: Vec<Row>,
    /// Hidden headers stay in memory but are excluded from rendering and
    /// from reconstruction.
    pub visible: bool,
}

impl Header {
    pub fn new(name: impl Into<String>, label: impl Into<String>, view_style: ViewStyle) -> Self {
        Header {
            name: name.into(),
            label: label.into(),
            view_style,
            rows: Vec::new(),
            visible: true,
        }
    }

    pub fn is_array(&self) -> bool {
        self.view_style == ViewStyle::Array
    }

    /// True when any field of any non-deleted row carries an exception.
    pub fn has_exception(&self) -> bool {
        self.rows
            .iter()
            .filter(|row| !row.is_deleted())
            .any(Row::has_exception)
    }

    /// The highest exception severity across non-deleted rows: `Error`
    /// beats `Warning`; `None` when the header is clean.
    pub fn exception_severity(&self) -> Option<Severity> {
        self.rows
            .iter()
            .filter(|row| !row.is_deleted())
            .flat_map(|row| row.fields.iter())
            .flat_map(|field| field.exceptions.iter())
            .map(|exc| exc.severity)
            .max()
    }
}
