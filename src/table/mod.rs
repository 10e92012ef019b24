//! Canonical, in-memory form of the contingency tables found on a sheet.
pub mod column;
pub mod kind;

use crate::table::column::ColumnError;
use crate::table::column::Field;
use serde::Serialize;

/// One table row normalized into the canonical field set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CanonicalRow {
    /// Contingency identifier (never blank)
    pub contingency: String,
    /// Resulting issue description
    pub issue: String,
    /// Contingency value, absent when the cell was not numeric
    pub value: Option<f64>,
    /// Percent of limit loading, absent when the cell was not numeric
    pub percent: Option<f64>,
}

impl CanonicalRow {
    /// Comparison key: `(contingency, issue)`, compared case-sensitively.
    pub fn key(&self) -> (&str, &str) {
        (self.contingency.as_str(), self.issue.as_str())
    }
}

/// A located table of one kind on one sheet.
///
/// All blocks of the same kind on a sheet are concatenated in order of
/// appearance. A table with no rows is still a table: the kind was found.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractedTable {
    /// Table kind name
    pub kind: String,
    /// Canonical rows in sheet order
    pub rows: Vec<CanonicalRow>,
    /// Required field that one of the blocks could not bind
    pub missing: Option<Field>,
}

impl ExtractedTable {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_owned(),
            rows: Vec::new(),
            missing: None,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Records a block whose required columns could not be bound; the first
    /// missing field is kept.
    pub(crate) fn mark_missing(&mut self, field: Field) {
        self.missing.get_or_insert(field);
    }

    /// Checks that every block of the table had its required columns.
    pub fn check_columns(&self) -> Result<(), ColumnError> {
        match self.missing {
            Some(field) => Err(ColumnError::MissingColumn(field)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lifecycle() {
        let mut table = ExtractedTable::new("ACCA");
        assert!(table.is_empty());
        assert_eq!(table.check_columns(), Ok(()));

        table.rows.push(CanonicalRow {
            contingency: "A".to_owned(),
            issue: "Overload".to_owned(),
            value: None,
            percent: Some(95.0),
        });
        table.mark_missing(Field::Issue);
        table.mark_missing(Field::Contingency);

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].key(), ("A", "Overload"));
        assert_eq!(table.check_columns(), Err(ColumnError::MissingColumn(Field::Issue)));
    }
}
