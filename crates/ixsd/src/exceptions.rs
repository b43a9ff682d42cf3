//! Exception aggregation: flatten per-field exceptions into one addressable
//! sequence.
//!
//! The audit surface wants every exception including those on tombstoned
//! rows; the notification surface excludes tombstoned rows. The row filter
//! is a parameter so neither policy is baked in.

use serde::Serialize;

use ixsd_core::{Header, Severity};

/// Which rows an aggregation pass visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFilter {
    /// Every row, tombstoned ones included (audit).
    All,
    /// Skip tombstoned rows (notification).
    ActiveOnly,
}

/// One flattened exception with enough identity to link back to the
/// offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionRecord {
    pub header: String,
    pub row_index: usize,
    pub field_key: String,
    pub message: String,
    pub severity: Severity,
}

/// Flattens every field exception across all headers into one sequence.
///
/// Order is deterministic: header order, then row order, then field order,
/// then the server-provided order within each field's exception list.
pub fn collect_exceptions(headers: &[Header], filter: RowFilter) -> Vec<ExceptionRecord> {
    let mut records = Vec::new();
    for header in headers {
        for (row_index, row) in header.rows.iter().enumerate() {
            if filter == RowFilter::ActiveOnly && row.is_deleted() {
                continue;
            }
            for field in &row.fields {
                for exc in &field.exceptions {
                    records.push(ExceptionRecord {
                        header: header.name.clone(),
                        row_index,
                        field_key: field.key.clone(),
                        message: exc.message.clone(),
                        severity: exc.severity,
                    });
                }
            }
        }
    }
    records
}

/// The highest severity across a collected record set, for banner
/// rendering.
pub fn worst_severity(records: &[ExceptionRecord]) -> Option<Severity> {
    records.iter().map(|r| r.severity).max()
}

// ── Tests ─────────────────────────────────────────────────────────────────
