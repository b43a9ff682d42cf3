//! Core data model for iXSD dynamic forms.
//!
//! An iXSD document is a set of named field-groups ([`Header`]s), each
//! holding one record (object view) or repeating line-item rows (array
//! view). Every [`Field`] carries its wire metadata (input kind, lookup
//! options, read-only flag), its per-field exception list, and the edit
//! lifecycle of the row it belongs to.
//!
//! The model is plain data: construction, mutation, and serialization live
//! in the `ixsd` crate. Everything here is `Clone + PartialEq` so callers
//! can hold snapshots and compare them structurally.

pub mod exception;
pub mod field;
pub mod header;
pub mod input_kind;
pub mod row;

pub use exception::{FieldException, Severity};
pub use field::{Field, FieldValue, LookupOption};
pub use header::{Header, ViewStyle};
pub use input_kind::InputKind;
pub use row::{Row, RowState};
