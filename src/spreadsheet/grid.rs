use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::cell::EMPTY;

/// Immutable, rectangular grid of cell values for one sheet.
///
/// Rows shorter than the widest row are padded with `Empty`. Row and column
/// indexes are zero-based.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    /// Row-major cell storage
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    /// Builds a grid from row-major values, padding ragged rows.
    pub fn new(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        Self { rows }
    }

    /// Builds a grid from anything convertible into cell values.
    pub fn from_rows<I, R, C>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = C>,
        C: Into<CellValue>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Gets the cell at (row, col); positions outside the grid read as `Empty`.
    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|record| record.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Gets a whole row; rows outside the grid are an empty slice.
    pub fn row(&self, row: usize) -> &[CellValue] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if every cell of the row is blank.
    pub fn is_blank_row(&self, row: usize) -> bool {
        self.row(row).iter().all(CellValue::is_blank)
    }

    /// Finds the first blank row at or after `start`, or the grid height when
    /// the rows run to the end of the grid.
    pub fn next_blank_row(&self, start: usize) -> usize {
        (start..self.height())
            .find(|row| self.is_blank_row(*row))
            .unwrap_or(self.height().max(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_padding() {
        let grid = Grid::from_rows(vec![vec!["a"], vec!["b", "c", "d"], vec![]]);

        assert_eq!(grid.height(), 3);
        assert_eq!(grid.row(0).len(), 3);
        assert_eq!(grid.get(0, 2), &CellValue::Empty);
        assert_eq!(grid.get(1, 2), &CellValue::from("d"));
        assert_eq!(grid.get(7, 7), &CellValue::Empty);
        assert!(grid.row(9).is_empty());
    }

    #[test]
    fn grid_blank_rows() {
        let grid = Grid::from_rows(vec![
            vec!["x", ""],
            vec!["", "  "],
            vec!["", "y"],
        ]);

        assert!(!grid.is_blank_row(0));
        assert!(grid.is_blank_row(1));
        assert!(!grid.is_blank_row(2));
        assert!(grid.is_blank_row(3));
        assert_eq!(grid.next_blank_row(0), 1);
        assert_eq!(grid.next_blank_row(2), 3);
        assert_eq!(grid.next_blank_row(5), 5);
    }

    #[test]
    fn grid_empty() {
        let grid = Grid::default();

        assert_eq!(grid.height(), 0);
        assert!(grid.row(0).is_empty());
        assert_eq!(grid.next_blank_row(0), 0);
    }
}
