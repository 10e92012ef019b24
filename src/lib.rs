//! # Contingency Table Comparison
//!
//! Finds contingency report tables ("ACCA Long Term", "ACCA", "DCwAC") inside
//! loosely structured spreadsheet sheets and compares the same table kind
//! between two sheets.
//!
//! ## Features
//!
//! - **Two sheet layouts**: labelled "Contingency Events" marker rows, or
//!   unlabelled header rows recognized by their percent column
//! - **Pluggable layouts**: new workbook layouts are new [`locate::LayoutStrategy`] implementations
//! - **Column normalization**: header prefixes or column positions mapped onto
//!   contingency, issue, value and percent
//! - **Keyed outer join**: rows matched on (contingency, issue) with delta
//!   percent and a status, sorted deterministically
//! - **Diagnostics**: skipped blocks and unresolved columns are reported, not lost
//! - **calamine adapter** (feature `calamine`): index a workbook opened with calamine
//!
//! ## Usage
//!
//! ```
//! use ctg_compare::spreadsheet::{Grid, MemoryWorkbook};
//! use ctg_compare::{compare, load_workbook, LoadOptions, Status};
//!
//! let sheet = |percent: &str| {
//!     Grid::from_rows(vec![
//!         vec!["ACCA", "", ""],
//!         vec!["Contingency Events", "Resulting Issue", "Percent"],
//!         vec!["Line 1-2", "Overload", percent],
//!     ])
//! };
//! let mut workbook = MemoryWorkbook::new()
//!     .with_sheet("Base", sheet("95"))
//!     .with_sheet("Peak", sheet("97.5"));
//!
//! let index = load_workbook(&mut workbook, &LoadOptions::default())?;
//! let comparison = compare(&index, "Base", "Peak")?;
//!
//! let rows = comparison.rows("ACCA").unwrap_or_default();
//! assert_eq!(rows[0].status, Status::Both);
//! assert_eq!(rows[0].delta_percent, Some(2.5));
//! # Ok::<(), ctg_compare::TableDiffError>(())
//! ```
pub mod compare;
pub mod error;
pub mod index;
pub mod locate;
pub mod spreadsheet;
pub mod table;

pub use compare::compare;
pub use compare::Comparison;
pub use compare::ComparisonRow;
pub use compare::CompareError;
pub use compare::Status;
pub use error::TableDiffError;
pub use index::load_workbook;
pub use index::Diagnostic;
pub use index::LoadOptions;
pub use index::WorkbookIndex;
pub use locate::ExtractionSettings;
pub use locate::Strategy;
pub use table::kind::TableKinds;
pub use table::CanonicalRow;
pub use table::ExtractedTable;
