//! # Spreadsheet Access Module
//!
//! The core never opens files. It reads sheets through the [`GridSource`] trait,
//! which hands out one rectangular [`Grid`] of [`CellValue`]s per sheet name.
//! [`MemoryWorkbook`] is the in-memory implementation used by callers that
//! already hold the cell data, and by the tests.
#[cfg(feature = "calamine")]
pub mod calamine;
pub mod cell;
pub mod criteria;
pub mod grid;

pub use cell::CellValue;
pub use criteria::Criteria;
pub use grid::Grid;
use thiserror::Error;

/// Errors raised while reading sheets from a workbook.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// The collaborator could not produce a grid for the sheet
    #[error("Cannot read sheet '{sheet}': {source}")]
    UnreadableSheet {
        sheet: String,
        source: anyhow::Error,
    },

    /// Requested sheet does not exist in the workbook
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),
}

/// Supplies the sheets of one opened workbook as cell grids.
pub trait GridSource {
    /// Returns the names of all sheets, in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Reads the full grid of the named sheet.
    ///
    /// # Errors
    ///
    /// Any failure is fatal for the whole workbook load.
    fn read_grid(&mut self, sheet_name: &str) -> anyhow::Result<Grid>;
}

/// Workbook whose sheets are already in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryWorkbook {
    /// Sheets in workbook order
    sheets: Vec<(String, Grid)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sheet, replacing any sheet with the same name in place.
    pub fn push(&mut self, name: &str, grid: Grid) {
        match self.sheets.iter_mut().find(|(it, _)| it == name) {
            Some((_, existing)) => *existing = grid,
            None => self.sheets.push((name.to_owned(), grid)),
        }
    }

    /// Builder-style variant of [`MemoryWorkbook::push`].
    pub fn with_sheet(mut self, name: &str, grid: Grid) -> Self {
        self.push(name, grid);
        self
    }
}

impl GridSource for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.to_owned()).collect()
    }

    fn read_grid(&mut self, sheet_name: &str) -> anyhow::Result<Grid> {
        let grid = self.sheets
            .iter()
            .find(|(name, _)| name == sheet_name)
            .map(|(_, grid)| grid.clone())
            .ok_or_else(|| SpreadsheetError::SheetNotFound(sheet_name.to_owned()))?;
        Ok(grid)
    }
}
