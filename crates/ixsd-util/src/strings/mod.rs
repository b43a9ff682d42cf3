//! String utilities.
//!
//! Label derivation and display truncation used by the form model.

mod label;
mod truncate;

pub use label::display_label;
pub use truncate::truncate_chars;
