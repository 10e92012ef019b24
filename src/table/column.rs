use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::cell::EMPTY;
use crate::table::CanonicalRow;
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;

/// Errors related to binding sheet columns to canonical fields.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColumnError {
    #[error("Missing '{0}' column")]
    MissingColumn(Field),
}

/// Canonical fields every extracted table is normalized into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Contingency identifier, part of the comparison key
    Contingency,
    /// Resulting issue, part of the comparison key
    Issue,
    /// Contingency value (magnitude)
    Value,
    /// Percent of limit loading
    Percent,
}

impl Field {
    /// Header prefixes in resolution order: the more specific
    /// "contingency value" has to be tried before "contingency".
    const HEADER_PREFIXES: [(&'static str, Field); 4] = [
        ("contingency value", Field::Value),
        ("contingency", Field::Contingency),
        ("resulting", Field::Issue),
        ("percent", Field::Percent),
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Field::Contingency => "contingency",
            Field::Issue => "issue",
            Field::Value => "value",
            Field::Percent => "percent",
        }
    }

    /// Classifies a header cell by case-insensitive prefix of its trimmed text.
    pub fn from_header(text: &str) -> Option<Field> {
        let text = text.trim().to_lowercase();
        Self::HEADER_PREFIXES
            .iter()
            .find(|(prefix, _)| text.starts_with(prefix))
            .map(|(_, field)| *field)
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Column index of each canonical field within a block's rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    pub contingency: usize,
    pub issue: usize,
    pub value: Option<usize>,
    pub percent: Option<usize>,
}

impl ColumnMap {
    /// Resolves fields from a labelled header row. The leftmost column wins
    /// when several headers classify as the same field.
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` when no header maps to `contingency` or `issue`.
    pub fn from_header(header: &[CellValue]) -> Result<Self, ColumnError> {
        let mut contingency = None;
        let mut issue = None;
        let mut value = None;
        let mut percent = None;
        for (col, cell) in header.iter().enumerate() {
            let slot = match cell.as_text().and_then(Field::from_header) {
                Some(Field::Contingency) => &mut contingency,
                Some(Field::Issue) => &mut issue,
                Some(Field::Value) => &mut value,
                Some(Field::Percent) => &mut percent,
                None => continue,
            };
            slot.get_or_insert(col);
        }
        Ok(ColumnMap {
            contingency: contingency.ok_or(ColumnError::MissingColumn(Field::Contingency))?,
            issue: issue.ok_or(ColumnError::MissingColumn(Field::Issue))?,
            value,
            percent,
        })
    }

    /// Reads one data row into canonical form.
    /// Returns `None` when the contingency identifier is blank.
    pub fn read_row(&self, row: &[CellValue]) -> Option<CanonicalRow> {
        let cell = |col: usize| row.get(col).unwrap_or(&EMPTY);
        let contingency = cell(self.contingency).to_text();
        if contingency.is_empty() {
            return None;
        }
        Some(CanonicalRow {
            contingency,
            issue: cell(self.issue).to_text(),
            value: self.value.and_then(|col| cell(col).to_number()),
            percent: self.percent.and_then(|col| cell(col).to_number()),
        })
    }
}
