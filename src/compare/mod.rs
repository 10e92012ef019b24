//! # Sheet Comparison
//!
//! Compares the tables of two indexed sheets kind by kind. Only kinds found
//! on both sheets are compared. A kind whose table lacks a required column
//! fails on its own; the other kinds still produce rows.
pub mod diff;
pub mod sort;

pub use diff::diff;
pub use diff::ComparisonRow;
pub use diff::Status;
pub use sort::sort_rows;

use crate::index::WorkbookIndex;
use crate::table::column::ColumnError;
use crate::table::column::Field;
use crate::table::ExtractedTable;
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;
use tracing::debug;
use tracing::warn;

/// Errors related to comparing two sheets.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    #[error("Missing '{field}' column in '{kind}' table of the {side} sheet")]
    MissingColumn { kind: String, field: Field, side: Side },

    #[error("Sheet '{sheet}' not found")]
    SheetNotFound { sheet: String },
}

/// Side of a comparison.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Sorted comparison rows of one kind, or why that kind could not be compared.
#[derive(Clone, Debug, PartialEq)]
pub struct KindComparison {
    pub kind: String,
    pub outcome: Result<Vec<ComparisonRow>, CompareError>,
}

/// Result of comparing two sheets.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub left_sheet: String,
    pub right_sheet: String,
    /// Kinds present on both sheets, in configured kind order
    pub kinds: Vec<KindComparison>,
}

impl Comparison {
    pub fn get(&self, kind: &str) -> Option<&KindComparison> {
        self.kinds.iter().find(|it| it.kind == kind)
    }

    /// Rows of a successfully compared kind.
    pub fn rows(&self, kind: &str) -> Option<&[ComparisonRow]> {
        self.get(kind)
            .and_then(|it| it.outcome.as_ref().ok())
            .map(Vec::as_slice)
    }

    /// Per-kind failures.
    pub fn errors(&self) -> impl Iterator<Item = &CompareError> {
        self.kinds.iter().filter_map(|it| it.outcome.as_ref().err())
    }
}

/// Compares every kind found on both sheets.
///
/// # Errors
///
/// Returns `SheetNotFound` if either sheet is not in the index. Missing
/// columns are reported per kind inside the returned [`Comparison`].
pub fn compare(index: &WorkbookIndex, left_sheet: &str, right_sheet: &str) -> Result<Comparison, CompareError> {
    let sheet = |name: &str| {
        index.sheet(name).ok_or_else(|| CompareError::SheetNotFound {
            sheet: name.to_owned(),
        })
    };
    let left = sheet(left_sheet)?;
    let right = sheet(right_sheet)?;

    let mut kinds = Vec::new();
    for left_table in left.iter() {
        let Some(right_table) = right.get(&left_table.kind) else {
            debug!(kind = left_table.kind.as_str(), left_sheet, right_sheet, "kind not on both sheets");
            continue;
        };
        let outcome = compare_tables(left_table, right_table);
        if let Err(error) = &outcome {
            warn!(kind = left_table.kind.as_str(), %error, "table comparison failed");
        }
        kinds.push(KindComparison {
            kind: left_table.kind.clone(),
            outcome,
        });
    }
    Ok(Comparison {
        left_sheet: left_sheet.to_owned(),
        right_sheet: right_sheet.to_owned(),
        kinds,
    })
}

/// Diffs and sorts two tables of the same kind.
pub fn compare_tables(left: &ExtractedTable, right: &ExtractedTable) -> Result<Vec<ComparisonRow>, CompareError> {
    let check = |table: &ExtractedTable, side: Side| {
        table.check_columns().map_err(|ColumnError::MissingColumn(field)| CompareError::MissingColumn {
            kind: table.kind.clone(),
            field,
            side,
        })
    };
    check(left, Side::Left)?;
    check(right, Side::Right)?;

    let mut rows = diff(left, right);
    sort_rows(&mut rows);
    Ok(rows)
}
