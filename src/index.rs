//! # Workbook Table Index
//!
//! Loads every selected sheet of a workbook once, runs the block locator and
//! the column normalizer over it, and keeps the extracted tables keyed by
//! sheet name and table kind.
//!
//! A sheet with no recognizable table is still indexed, with no tables, so
//! "no such sheet" and "nothing found on the sheet" stay distinguishable.
//! Blocks that could not be used are reported as [`Diagnostic`]s instead of
//! failing the load; only a sheet that cannot be read at all aborts it.
use crate::error::ResultMessage;
use crate::error::TableDiffError;
use crate::locate::ColumnBinding;
use crate::locate::ExtractionSettings;
use crate::locate::Locator;
use crate::spreadsheet::cell::cell_reference;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::grid::Grid;
use crate::spreadsheet::GridSource;
use crate::spreadsheet::SpreadsheetError;
use crate::table::column::ColumnError;
use crate::table::column::ColumnMap;
use crate::table::ExtractedTable;
use serde::Serialize;
use std::fmt::Display;
use tracing::info;
use tracing::warn;

/// A recoverable extraction issue, reported rather than dropped.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Sheet the issue was found on
    pub sheet: String,
    /// Zero-based grid row of the offending header
    pub row: usize,
    /// Table kind, when it was known
    pub kind: Option<String>,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}!{}: ", self.sheet, cell_reference(self.row, 0))?;
        if let Some(kind) = &self.kind {
            write!(f, "[{}] ", kind)?;
        }
        write!(f, "{}", self.message)
    }
}

/// Options for [`load_workbook`].
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    /// How blocks are located and which kinds exist
    pub settings: ExtractionSettings,
    /// Which sheets are loaded
    pub criteria: Criteria,
}

/// Tables found on one sheet, one per kind, in configured kind order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SheetTables {
    tables: Vec<ExtractedTable>,
}

impl SheetTables {
    pub fn get(&self, kind: &str) -> Option<&ExtractedTable> {
        self.tables.iter().find(|table| table.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractedTable> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    fn entry(&mut self, kind: &str) -> &mut ExtractedTable {
        let position = match self.tables.iter().position(|table| table.kind == kind) {
            Some(position) => position,
            None => {
                self.tables.push(ExtractedTable::new(kind));
                self.tables.len() - 1
            }
        };
        &mut self.tables[position]
    }
}

/// Extracted tables of a loaded workbook, by sheet name and table kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkbookIndex {
    /// Sheets in workbook order
    sheets: Vec<(String, SheetTables)>,
    diagnostics: Vec<Diagnostic>,
}

impl WorkbookIndex {
    /// Names of the loaded sheets, in workbook order.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|(name, _)| name.as_str())
    }

    /// Tables of a sheet; `None` if the sheet was not loaded.
    pub fn sheet(&self, name: &str) -> Option<&SheetTables> {
        self.sheets
            .iter()
            .find(|(it, _)| it == name)
            .map(|(_, tables)| tables)
    }

    /// Table of one kind on one sheet.
    pub fn table(&self, sheet: &str, kind: &str) -> Option<&ExtractedTable> {
        self.sheet(sheet).and_then(|tables| tables.get(kind))
    }

    /// Issues collected while loading, in sheet order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Locates and normalizes every table on one sheet.
pub fn extract_sheet(sheet: &str, grid: &Grid, locator: &Locator) -> (SheetTables, Vec<Diagnostic>) {
    let located = locator.locate(grid);
    let mut tables = SheetTables::default();
    let mut diagnostics = Vec::new();

    for (row, reason) in located.skipped {
        warn!(sheet, row, %reason, "unrecognized block");
        diagnostics.push(Diagnostic {
            sheet: sheet.to_owned(),
            row,
            kind: None,
            message: format!("Unrecognized block: {}", reason),
        });
    }

    for block in located.blocks {
        let table = tables.entry(&block.kind);
        let columns = match block.columns {
            ColumnBinding::Positional(columns) => columns,
            ColumnBinding::Header => match ColumnMap::from_header(grid.row(block.header_row)) {
                Ok(columns) => columns,
                Err(ColumnError::MissingColumn(field)) => {
                    let error = ColumnError::MissingColumn(field);
                    warn!(sheet, row = block.header_row, kind = block.kind.as_str(), %error, "unresolved columns");
                    table.mark_missing(field);
                    diagnostics.push(Diagnostic {
                        sheet: sheet.to_owned(),
                        row: block.header_row,
                        kind: Some(block.kind.clone()),
                        message: error.to_string(),
                    });
                    continue;
                }
            },
        };
        table.rows.extend(block.rows.filter_map(|row| columns.read_row(grid.row(row))));
    }

    let kinds = locator.kinds();
    tables.tables.sort_by_key(|table| kinds.rank(&table.kind).unwrap_or(usize::MAX));
    diagnostics.sort_by_key(|diagnostic| diagnostic.row);
    (tables, diagnostics)
}

/// Builds the table index of a workbook.
///
/// # Arguments
///
/// * `source` - The opened workbook
/// * `options` - Extraction settings and sheet selection
///
/// # Errors
///
/// Fails if the settings hold an invalid pattern or if any selected sheet
/// cannot be read. No partial index is returned.
pub fn load_workbook<S>(source: &mut S, options: &LoadOptions) -> Result<WorkbookIndex, TableDiffError>
where
    S: GridSource + ?Sized,
{
    let locator = Locator::from_settings(&options.settings)
        .map_err(TableDiffError::from)
        .with_prefix("Invalid extraction settings")?;
    let mut index = WorkbookIndex::default();
    for name in options.criteria.select(&source.sheet_names()) {
        let grid = source
            .read_grid(&name)
            .map_err(|source| SpreadsheetError::UnreadableSheet {
                sheet: name.clone(),
                source,
            })?;
        let (tables, diagnostics) = extract_sheet(&name, &grid, &locator);
        index.diagnostics.extend(diagnostics);
        index.sheets.push((name, tables));
    }

    info!(
        sheets = index.len(),
        tables = index.sheets.iter().map(|(_, tables)| tables.len()).sum::<usize>(),
        diagnostics = index.diagnostics.len(),
        "loaded workbook"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::Strategy;
    use crate::spreadsheet::MemoryWorkbook;
    use crate::table::column::Field;
    use crate::table::CanonicalRow;
    use pretty_assertions::assert_eq;

    fn row(contingency: &str, issue: &str, value: Option<f64>, percent: Option<f64>) -> CanonicalRow {
        CanonicalRow {
            contingency: contingency.to_owned(),
            issue: issue.to_owned(),
            value,
            percent,
        }
    }

    fn kinds(tables: &SheetTables) -> Vec<&str> {
        tables.iter().map(|table| table.kind.as_str()).collect()
    }

    fn marker_sheet() -> Grid {
        Grid::from_rows(vec![
            vec!["Study results", "", "", ""],
            vec!["DCwAC", "", "", ""],
            vec!["Contingency Events", "Resulting Issue", "Contingency Value", "Percent"],
            vec!["X", "Overload", "10", "50"],
            vec!["", "", "", ""],
            vec!["", "ACCA", "", ""],
            vec!["Contingency Events", "Resulting Issue", "Contingency Value", "Percent"],
            vec!["A", "Overload", "120", "95.0"],
            vec!["  ", "Ignored", "", "80"],
            vec!["B", "Undervoltage", "n/a", ""],
            vec!["", "", "", ""],
            vec!["ACCA", "", "", ""],
            vec!["Contingency Events", "Resulting Issue", "Contingency Value", "Percent"],
            vec!["C", "Overload", "", "101%"],
        ])
    }

    #[test]
    fn marker_sheet_is_extracted_in_kind_order() {
        let (tables, diagnostics) = extract_sheet("Base", &marker_sheet(), &Locator::default());

        assert!(diagnostics.is_empty());
        assert_eq!(kinds(&tables), vec!["ACCA", "DCwAC"]);
        assert!(tables.get("ACCA Long Term").is_none());
        assert_eq!(tables.get("ACCA").unwrap().rows, vec![
            row("A", "Overload", Some(120.0), Some(95.0)),
            row("B", "Undervoltage", None, None),
            row("C", "Overload", None, Some(101.0)),
        ]);
        assert_eq!(tables.get("DCwAC").unwrap().rows, vec![row("X", "Overload", Some(10.0), Some(50.0))]);
    }

    #[test]
    fn signature_sheet_is_extracted_positionally() {
        let grid = Grid::from_rows(vec![
            vec!["", "", "", "Case", "Percent Loading"],
            vec!["Line 1-2", "Overload", "118", "Base", "104.2"],
            vec!["Line 2-3", "Overload", "", "Base", "99"],
        ]);

        let (tables, diagnostics) = extract_sheet("Peak", &grid, &Locator::default());

        assert!(diagnostics.is_empty());
        assert_eq!(tables.len(), 1);
        assert_eq!(tables.get("ACCA Long Term").unwrap().rows, vec![
            row("Line 1-2", "Overload", Some(118.0), Some(104.2)),
            row("Line 2-3", "Overload", None, Some(99.0)),
        ]);
    }

    #[test]
    fn missing_column_keeps_kind_and_reports() {
        let grid = Grid::from_rows(vec![
            vec!["ACCA", ""],
            vec!["Contingency Events", "Percent"],
            vec!["A", "95"],
            vec!["", ""],
            vec!["Hourly", ""],
            vec!["Contingency Events", "Percent"],
        ]);

        let (tables, diagnostics) = extract_sheet("Base", &grid, &Locator::default());

        let table = tables.get("ACCA").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.missing, Some(Field::Issue));
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].kind.as_deref(), Some("ACCA"));
        assert_eq!(diagnostics[0].to_string(), "Base!A2: [ACCA] Missing 'issue' column");
        assert_eq!(
            diagnostics[1].to_string(),
            "Base!A6: Unrecognized block: no table kind label in the row above the marker"
        );
    }

    #[test]
    fn load_keeps_sheet_order_and_empty_sheets() {
        let mut workbook = MemoryWorkbook::new()
            .with_sheet("Summer", marker_sheet())
            .with_sheet("Notes", Grid::from_rows(vec![vec!["nothing to see"]]))
            .with_sheet("Empty", Grid::default());

        let index = load_workbook(&mut workbook, &LoadOptions::default()).unwrap();

        assert_eq!(index.sheet_names().collect::<Vec<_>>(), vec!["Summer", "Notes", "Empty"]);
        assert_eq!(index.sheet("Summer").unwrap().len(), 2);
        assert!(index.sheet("Notes").unwrap().is_empty());
        assert!(index.sheet("Empty").unwrap().is_empty());
        assert!(index.sheet("Winter").is_none());
        assert_eq!(index.table("Summer", "DCwAC").unwrap().len(), 1);
        assert!(index.diagnostics().is_empty());
    }

    #[test]
    fn load_applies_criteria_and_strategy() {
        let mut workbook = MemoryWorkbook::new()
            .with_sheet("Summer", marker_sheet())
            .with_sheet("Winter", marker_sheet());
        let options = LoadOptions {
            settings: ExtractionSettings {
                strategy: Strategy::Signature,
                ..ExtractionSettings::default()
            },
            criteria: Criteria {
                sheet_name_patterns: Some(vec![glob::Pattern::new("W*").unwrap()]),
                sheet_limit: None,
            },
        };

        let index = load_workbook(&mut workbook, &options).unwrap();

        // Marker tables read through the signature layout: three header rows, three kinds
        assert_eq!(index.sheet_names().collect::<Vec<_>>(), vec!["Winter"]);
        assert_eq!(
            kinds(index.sheet("Winter").unwrap()),
            vec!["ACCA Long Term", "ACCA", "DCwAC"]
        );
        assert_eq!(index.table("Winter", "ACCA Long Term").unwrap().rows, vec![
            row("X", "Overload", Some(10.0), Some(50.0)),
        ]);
    }

    #[derive(Debug)]
    struct BrokenWorkbook;

    impl GridSource for BrokenWorkbook {
        fn sheet_names(&self) -> Vec<String> {
            vec!["Base".to_owned()]
        }

        fn read_grid(&mut self, _: &str) -> anyhow::Result<Grid> {
            Err(anyhow::anyhow!("corrupted stream"))
        }
    }

    #[test]
    fn unreadable_sheet_fails_the_load() {
        let error = load_workbook(&mut BrokenWorkbook, &LoadOptions::default()).unwrap_err();

        assert!(matches!(
            error,
            TableDiffError::SpreadsheetError(SpreadsheetError::UnreadableSheet { .. })
        ));
        assert_eq!(error.to_string(), "Cannot read sheet 'Base': corrupted stream");
    }

    #[test]
    fn invalid_settings_fail_the_load() {
        let options = LoadOptions {
            settings: ExtractionSettings {
                case_pattern: "[".to_owned(),
                ..ExtractionSettings::default()
            },
            ..LoadOptions::default()
        };

        let error = load_workbook(&mut MemoryWorkbook::new(), &options).unwrap_err();

        assert!(error.to_string().starts_with("Invalid extraction settings: Invalid header pattern"));
    }
}
