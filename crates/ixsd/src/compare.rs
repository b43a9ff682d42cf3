//! Version compare: two parsed snapshots of the same document, aligned
//! side by side for audit rendering.
//!
//! Headers pair by name, rows by position, fields by key. Positional row
//! pairing is deliberate: the server preserves row order for unchanged
//! rows and its own row addressing is ordinal, so a content-based (LCS)
//! alignment would disagree with the system of record. The change flag is
//! computed on full values with structural equality; display truncation
//! happens afterwards and never feeds the decision.

use indexmap::IndexMap;
use serde_json::Value;

use ixsd_core::{Field, Header, Row, RowState};
use ixsd_util::truncate_chars;

use crate::parse;

/// Character budget for a rendered cell before truncation applies.
const CELL_DISPLAY_BUDGET: usize = 100;

/// One parsed document version, tagged with its version identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub version: String,
    pub headers: Vec<Header>,
}

impl Snapshot {
    /// Builds a snapshot from the two wire channels. Lenient like the
    /// parser itself: malformed input yields an empty header set.
    pub fn from_wire(version: impl Into<String>, data: &Value, exceptions: &Value) -> Self {
        Snapshot {
            version: version.into(),
            headers: parse::parse_headers(data, exceptions),
        }
    }

    /// String front end of [`Snapshot::from_wire`].
    pub fn from_wire_str(version: impl Into<String>, data: &str, exceptions: &str) -> Self {
        Snapshot {
            version: version.into(),
            headers: parse::parse_headers_str(data, exceptions),
        }
    }
}

/// A rendered cell: display text (truncated past the display budget) plus
/// the truncation marker so the caller can offer a full-value affordance.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub text: String,
    pub truncated: bool,
}

impl CellView {
    fn of(field: &Field) -> Self {
        let full = field.value.display_text();
        match truncate_chars(&full, CELL_DISPLAY_BUDGET) {
            Some(short) => CellView {
                text: short,
                truncated: true,
            },
            None => CellView {
                text: full,
                truncated: false,
            },
        }
    }
}

/// One field position across the two versions. A side is `None` when that
/// version has no field at this `(row, key)` position.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldComparison {
    pub key: String,
    pub label: String,
    pub left: Option<CellView>,
    pub right: Option<CellView>,
    pub changed: bool,
}

/// One row position across the two versions.
#[derive(Debug, Clone, PartialEq)]
pub struct RowComparison {
    pub index: usize,
    pub left_state: Option<RowState>,
    pub right_state: Option<RowState>,
    pub fields: Vec<FieldComparison>,
}

/// One header name across the two versions. A header present in only one
/// version renders with an empty counterpart pane.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderComparison {
    pub name: String,
    pub label: String,
    pub in_left: bool,
    pub in_right: bool,
    pub rows: Vec<RowComparison>,
}

impl HeaderComparison {
    /// True when any field position in this header changed.
    pub fn has_changes(&self) -> bool {
        self.rows
            .iter()
            .any(|row| row.fields.iter().any(|f| f.changed))
    }
}

/// The full side-by-side view, tagged with both version identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotComparison {
    pub left_version: String,
    pub right_version: String,
    pub headers: Vec<HeaderComparison>,
}

/// Aligns two parsed header sets for side-by-side rendering.
///
/// Output order: left headers first (in their own order), then headers
/// only the right version has.
pub fn compare_headers(left: &[Header], right: &[Header]) -> Vec<HeaderComparison> {
    let mut pairs: IndexMap<&str, (Option<&Header>, Option<&Header>)> = IndexMap::new();
    for header in left {
        pairs.insert(header.name.as_str(), (Some(header), None));
    }
    for header in right {
        pairs.entry(header.name.as_str()).or_insert((None, None)).1 = Some(header);
    }

    pairs
        .into_iter()
        .map(|(name, (l, r))| compare_header_pair(name, l, r))
        .collect()
}

/// Compares two version-tagged snapshots.
pub fn compare_snapshots(left: &Snapshot, right: &Snapshot) -> SnapshotComparison {
    SnapshotComparison {
        left_version: left.version.clone(),
        right_version: right.version.clone(),
        headers: compare_headers(&left.headers, &right.headers),
    }
}

fn compare_header_pair(
    name: &str,
    left: Option<&Header>,
    right: Option<&Header>,
) -> HeaderComparison {
    let label = left
        .or(right)
        .map(|h| h.label.clone())
        .unwrap_or_default();
    let left_rows = left.map(|h| h.rows.as_slice()).unwrap_or_default();
    let right_rows = right.map(|h| h.rows.as_slice()).unwrap_or_default();
    let row_count = left_rows.len().max(right_rows.len());

    let rows = (0..row_count)
        .map(|index| RowComparison {
            index,
            left_state: left_rows.get(index).map(|r| r.state),
            right_state: right_rows.get(index).map(|r| r.state),
            fields: compare_row_pair(left_rows.get(index), right_rows.get(index)),
        })
        .collect();

    HeaderComparison {
        name: name.to_string(),
        label,
        in_left: left.is_some(),
        in_right: right.is_some(),
        rows,
    }
}

fn compare_row_pair(left: Option<&Row>, right: Option<&Row>) -> Vec<FieldComparison> {
    let left_fields = left.map(|r| r.fields.as_slice()).unwrap_or_default();
    let right_fields = right.map(|r| r.fields.as_slice()).unwrap_or_default();

    let mut keys: IndexMap<&str, ()> = IndexMap::new();
    for field in left_fields.iter().chain(right_fields) {
        keys.insert(field.key.as_str(), ());
    }

    keys.into_keys()
        .map(|key| {
            let l = left_fields.iter().find(|f| f.key == key);
            let r = right_fields.iter().find(|f| f.key == key);
            let changed = match (l, r) {
                // Structural comparison of full values; boolean-button
                // flag maps compare entry by entry.
                (Some(l), Some(r)) => l.value != r.value,
                _ => true,
            };
            FieldComparison {
                key: key.to_string(),
                label: l
                    .or(r)
                    .map(|f| f.display_label.clone())
                    .unwrap_or_default(),
                left: l.map(CellView::of),
                right: r.map(CellView::of),
                changed,
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────
