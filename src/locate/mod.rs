//! # Table Block Locator
//!
//! Finds the row ranges of the known table kinds inside a sheet grid.
//!
//! The scan itself lives in [`Locator::locate`]: it asks a [`LayoutStrategy`]
//! which rows are block headers, cuts each block at the first blank row (or
//! at the next header, if the layout says so), and lets the layout decide the
//! block's kind and column binding. Supporting a new workbook layout means
//! writing a new `LayoutStrategy`, not touching the scan.
//!
//! Two layouts ship with the crate:
//!
//! - [`MarkerLayout`]: a "Contingency Events" marker row, with the kind label
//!   in the row above it
//! - [`SignatureLayout`]: header rows recognized by a "percent" column, kinds
//!   assigned by order of appearance
pub mod marker;
pub mod signature;

pub use marker::MarkerLayout;
pub use signature::SignatureLayout;

use crate::spreadsheet::grid::Grid;
use crate::table::column::ColumnMap;
use crate::table::kind::TableKinds;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Debug;
use std::ops::Range;
use thiserror::Error;
use tracing::debug;

/// Errors raised while building a locator from settings.
#[derive(Error, Debug)]
pub enum LocateError {
    #[error("Invalid header pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Why a header row did not produce a block. Never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnrecognizedBlock {
    #[error("no table kind label in the row above the marker")]
    UnknownKind,

    #[error("header row beyond the {0} configured table kinds")]
    SurplusHeader(usize),

    #[error("no data row to infer columns from")]
    NoDataRows,

    #[error("only {found} non-empty column(s) left of the percent column, at least 2 needed")]
    TooFewColumns { found: usize },
}

/// How a block's columns map to canonical fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColumnBinding {
    /// Resolve from the header row text
    Header,
    /// Already resolved by position
    Positional(ColumnMap),
}

/// A header row the scan found, handed to the layout for resolution.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// Header row index
    pub row: usize,
    /// Position of this header among all header rows of the sheet
    pub ordinal: usize,
    /// Data rows below the header
    pub rows: Range<usize>,
}

/// What a layout decided about a candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub kind: String,
    pub columns: ColumnBinding,
}

/// Contiguous rows belonging to one occurrence of one table kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    /// Table kind name
    pub kind: String,
    /// Header row index
    pub header_row: usize,
    /// Data rows, end exclusive
    pub rows: Range<usize>,
    /// Column binding
    pub columns: ColumnBinding,
}

/// Outcome of scanning one grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Located {
    /// Name of the layout that recognized the grid, if any
    pub layout: Option<&'static str>,
    /// Blocks in sheet order
    pub blocks: Vec<Block>,
    /// Header rows that did not make a block
    pub skipped: Vec<(usize, UnrecognizedBlock)>,
}

/// Workbook layout policy used by the locator scan.
pub trait LayoutStrategy: Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns true if `row` is a block header row.
    fn is_header(&self, grid: &Grid, row: usize) -> bool;

    /// Returns true if a later header row ends the block above it.
    fn header_ends_block(&self) -> bool;

    /// Decides the kind and column binding of a header row.
    fn resolve(
        &self,
        grid: &Grid,
        candidate: &Candidate,
        kinds: &TableKinds,
    ) -> Result<Resolution, UnrecognizedBlock>;

    /// Returns true if the grid contains at least one header row.
    fn probe(&self, grid: &Grid) -> bool {
        (0..grid.height()).any(|row| self.is_header(grid, row))
    }
}

/// Layout selection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Marker layout if the sheet has a marker row, signature layout otherwise
    #[default]
    Auto,
    /// Marker layout only
    Marker,
    /// Signature layout only
    Signature,
}

/// Extraction configuration, loadable with serde.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Layout selection
    pub strategy: Strategy,
    /// Table kinds in positional order
    pub kinds: TableKinds,
    /// First-cell text of marker rows (compared trimmed, case-insensitive)
    pub marker: String,
    /// Regex a header cell must match for the signature layout
    pub percent_pattern: String,
    /// Regex of the optional case column in signature headers
    pub case_pattern: String,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            kinds: TableKinds::default(),
            marker: "contingency events".to_owned(),
            percent_pattern: "(?i)percent".to_owned(),
            case_pattern: "(?i)case".to_owned(),
        }
    }
}

/// Scans grids for table blocks using an ordered list of layouts.
#[derive(Debug)]
pub struct Locator {
    kinds: TableKinds,
    layouts: Vec<Box<dyn LayoutStrategy>>,
}

impl Locator {
    /// Creates a locator with no layouts; add them with [`Locator::with_layout`].
    pub fn new(kinds: TableKinds) -> Self {
        Self {
            kinds,
            layouts: Vec::new(),
        }
    }

    /// Builds the layouts named by the settings.
    pub fn from_settings(settings: &ExtractionSettings) -> Result<Self, LocateError> {
        let locator = Self::new(settings.kinds.clone());
        let marker = MarkerLayout::new(&settings.marker);
        let signature = SignatureLayout::new(&settings.percent_pattern, &settings.case_pattern)?;
        Ok(match settings.strategy {
            Strategy::Auto => locator.with_layout(marker).with_layout(signature),
            Strategy::Marker => locator.with_layout(marker),
            Strategy::Signature => locator.with_layout(signature),
        })
    }

    /// Appends a layout; earlier layouts are probed first.
    pub fn with_layout<L>(mut self, layout: L) -> Self
    where
        L: LayoutStrategy + 'static,
    {
        self.layouts.push(Box::new(layout));
        self
    }

    pub fn kinds(&self) -> &TableKinds {
        &self.kinds
    }

    /// Locates all blocks of the first layout that recognizes the grid.
    /// A grid no layout recognizes yields no blocks.
    pub fn locate(&self, grid: &Grid) -> Located {
        match self.layouts.iter().find(|layout| layout.probe(grid)) {
            Some(layout) => scan(grid, layout.as_ref(), &self.kinds),
            None => Located::default(),
        }
    }
}

impl Default for Locator {
    fn default() -> Self {
        Self::from_settings(&ExtractionSettings::default()).expect("Hardcode regex pattern")
    }
}

/// Runs one layout over the grid.
pub fn scan(grid: &Grid, layout: &dyn LayoutStrategy, kinds: &TableKinds) -> Located {
    let headers: Vec<usize> = (0..grid.height())
        .filter(|row| layout.is_header(grid, *row))
        .collect();
    let mut located = Located {
        layout: Some(layout.name()),
        ..Located::default()
    };
    for (ordinal, &row) in headers.iter().enumerate() {
        let start = row + 1;
        let mut end = grid.next_blank_row(start);
        if layout.header_ends_block() {
            if let Some(next) = headers.get(ordinal + 1) {
                end = end.min(*next);
            }
        }
        let candidate = Candidate {
            row,
            ordinal,
            rows: start..end,
        };
        match layout.resolve(grid, &candidate, kinds) {
            Ok(Resolution { kind, columns }) => {
                debug!(layout = layout.name(), kind = kind.as_str(), header_row = row, start, end, "located block");
                located.blocks.push(Block {
                    kind,
                    header_row: row,
                    rows: candidate.rows,
                    columns,
                });
            }
            Err(reason) => located.skipped.push((row, reason)),
        }
    }
    located
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::grid::Grid;
    use pretty_assertions::assert_eq;

    /// Rows starting with `#` are headers named after the rest of the cell; `#x` has no kind.
    #[derive(Debug)]
    struct FirstCellLayout;

    impl LayoutStrategy for FirstCellLayout {
        fn name(&self) -> &'static str {
            "first-cell"
        }

        fn is_header(&self, grid: &Grid, row: usize) -> bool {
            grid.get(row, 0).as_text().map(|text| text.starts_with('#')).unwrap_or(false)
        }

        fn header_ends_block(&self) -> bool {
            true
        }

        fn resolve(&self, grid: &Grid, candidate: &Candidate, _: &TableKinds) -> Result<Resolution, UnrecognizedBlock> {
            match grid.get(candidate.row, 0).to_text().as_str() {
                "#x" => Err(UnrecognizedBlock::UnknownKind),
                label => Ok(Resolution {
                    kind: label.trim_start_matches('#').to_owned(),
                    columns: ColumnBinding::Header,
                }),
            }
        }
    }

    #[test]
    fn scan_with_custom_layout() {
        let grid = Grid::from_rows(vec![
            vec!["#a"],
            vec!["1"],
            vec!["#x"],
            vec!["2"],
            vec!["3"],
            vec![""],
            vec!["#b"],
        ]);
        let locator = Locator::new(TableKinds::default()).with_layout(FirstCellLayout);

        let located = locator.locate(&grid);

        assert_eq!(located.layout, Some("first-cell"));
        assert_eq!(located.blocks, vec![
            Block {
                kind: "a".to_owned(),
                header_row: 0,
                rows: 1..2,
                columns: ColumnBinding::Header,
            },
            Block {
                kind: "b".to_owned(),
                header_row: 6,
                rows: 7..7,
                columns: ColumnBinding::Header,
            },
        ]);
        assert_eq!(located.skipped, vec![(2, UnrecognizedBlock::UnknownKind)]);
    }

    #[test]
    fn no_layout_recognizes_grid() {
        let grid = Grid::from_rows(vec![vec!["nothing", "here"]]);

        assert_eq!(Locator::default().locate(&grid), Located::default());
        assert_eq!(Locator::new(TableKinds::default()).locate(&grid), Located::default());
    }

    #[test]
    fn settings_defaults_and_overrides() {
        let settings: ExtractionSettings =
            serde_json::from_str(r#"{"strategy": "signature", "kinds": ["N-1"]}"#).unwrap();

        assert_eq!(settings.strategy, Strategy::Signature);
        assert_eq!(settings.kinds, TableKinds::new(["N-1"]));
        assert_eq!(settings.marker, "contingency events");
        assert_eq!(settings.percent_pattern, "(?i)percent");
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let settings = ExtractionSettings {
            percent_pattern: "(".to_owned(),
            ..ExtractionSettings::default()
        };

        let error = Locator::from_settings(&settings).unwrap_err();
        assert!(error.to_string().starts_with("Invalid header pattern"));
    }
}
