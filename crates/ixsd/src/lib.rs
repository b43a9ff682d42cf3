//! iXSD dynamic-form engine.
//!
//! Converts the server's schema-free document JSON (a data channel plus a
//! sparse exception channel) into the [`ixsd_core`] model, supports
//! structural line-item edits over it, reconstructs the wire payload for
//! save, compares two document versions for audit rendering, and
//! aggregates field exceptions for notification and filtering.
//!
//! Every operation is a synchronous pure transformation: plain data in,
//! plain data out, no I/O and no shared mutable state. Malformed input
//! degrades to an empty structure and invalid edit targets are silent
//! no-ops, so a UI session never crashes on partial server data or on an
//! event racing a reload.

pub mod compare;
pub mod edit;
pub mod exceptions;
pub mod parse;
pub mod reconstruct;
pub mod wire;

pub use compare::{
    compare_headers, compare_snapshots, CellView, FieldComparison, HeaderComparison,
    RowComparison, Snapshot, SnapshotComparison,
};
pub use edit::{add_row, delete_row, has_unsaved_changes, update_field_value};
pub use exceptions::{collect_exceptions, worst_severity, ExceptionRecord, RowFilter};
pub use parse::{parse_headers, parse_headers_str};
pub use reconstruct::{to_data_json, to_exception_json};
