//! [`GridSource`] over a workbook opened with calamine.
//!
//! Opening the file stays with the caller (`calamine::open_workbook_auto` or
//! `open_workbook_auto_from_rs`); this adapter only turns ranges into grids.
use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::grid::Grid;
use crate::spreadsheet::GridSource;
use anyhow::Context;
use ::calamine::Data;
use ::calamine::Reader;
use ::calamine::Sheets;
use std::io::Read;
use std::io::Seek;

/// Calamine-backed workbook.
pub struct CalamineWorkbook<RS> {
    sheets: Sheets<RS>,
}

impl<RS> CalamineWorkbook<RS>
where
    RS: Read + Seek,
{
    pub fn new(sheets: Sheets<RS>) -> Self {
        Self { sheets }
    }
}

impl<RS> GridSource for CalamineWorkbook<RS>
where
    RS: Read + Seek,
{
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn read_grid(&mut self, sheet_name: &str) -> anyhow::Result<Grid> {
        let range = self.sheets
            .worksheet_range(sheet_name)
            .map_err(|error| anyhow::anyhow!(error.to_string()))
            .with_context(|| format!("worksheet range of '{sheet_name}'"))?;
        let Some((row_offset, col_offset)) = range.start() else {
            return Ok(Grid::default());
        };

        // Ranges start at the first used cell; pad so indexes stay absolute.
        let mut rows = vec![Vec::new(); row_offset as usize];
        for record in range.rows() {
            let mut row = vec![CellValue::Empty; col_offset as usize];
            row.extend(record.iter().map(to_cell_value));
            rows.push(row);
        }
        Ok(Grid::new(rows))
    }
}

fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Float(value) => CellValue::Number(*value),
        Data::String(value) => CellValue::Text(value.to_owned()),
        Data::Bool(value) => CellValue::Text(value.to_string()),
        Data::DateTime(value) => CellValue::Number(value.as_f64()),
        Data::DateTimeIso(value) => CellValue::Text(value.to_owned()),
        Data::DurationIso(value) => CellValue::Text(value.to_owned()),
        Data::Error(value) => CellValue::Text(value.to_string()),
        Data::Empty => CellValue::Empty,
    }
}
