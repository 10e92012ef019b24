use crate::locate::Candidate;
use crate::locate::ColumnBinding;
use crate::locate::LayoutStrategy;
use crate::locate::Resolution;
use crate::locate::UnrecognizedBlock;
use crate::spreadsheet::grid::Grid;
use crate::table::column::ColumnMap;
use crate::table::kind::TableKinds;
use regex::Regex;
use tracing::debug;

/// Unlabelled layout: header rows carry a "percent" column and the table
/// kinds are assigned by the order the header rows appear in.
///
/// Column headers other than the percent column are not trusted. The
/// contingency, issue and value columns are the first three columns left of
/// the percent column holding a value in the first data row.
#[derive(Clone, Debug)]
pub struct SignatureLayout {
    percent: Regex,
    case: Regex,
}

impl SignatureLayout {
    /// Creates the layout from the percent and case header patterns.
    ///
    /// # Errors
    ///
    /// Returns the regex error of the first invalid pattern.
    pub fn new(percent_pattern: &str, case_pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            percent: Regex::new(percent_pattern)?,
            case: Regex::new(case_pattern)?,
        })
    }

    fn find_column(grid: &Grid, row: usize, pattern: &Regex) -> Option<usize> {
        grid.row(row)
            .iter()
            .position(|cell| cell.as_text().map(|text| pattern.is_match(text)).unwrap_or(false))
    }
}

impl Default for SignatureLayout {
    fn default() -> Self {
        Self::new("(?i)percent", "(?i)case").expect("Hardcode regex pattern")
    }
}

impl LayoutStrategy for SignatureLayout {
    fn name(&self) -> &'static str {
        "signature"
    }

    fn is_header(&self, grid: &Grid, row: usize) -> bool {
        Self::find_column(grid, row, &self.percent).is_some()
    }

    fn header_ends_block(&self) -> bool {
        true
    }

    fn resolve(
        &self,
        grid: &Grid,
        candidate: &Candidate,
        kinds: &TableKinds,
    ) -> Result<Resolution, UnrecognizedBlock> {
        let kind = kinds
            .at(candidate.ordinal)
            .ok_or(UnrecognizedBlock::SurplusHeader(kinds.len()))?;
        let percent = Self::find_column(grid, candidate.row, &self.percent).expect("Hardcode header row");
        let case = Self::find_column(grid, candidate.row, &self.case).filter(|col| *col != percent);
        if let Some(case) = case {
            debug!(kind, header_row = candidate.row, case, "case column");
        }
        if candidate.rows.is_empty() {
            Err(UnrecognizedBlock::NoDataRows)?
        }

        // The case column never takes part in positional binding
        let sample = candidate.rows.start;
        let filled: Vec<usize> = (0..percent)
            .filter(|col| Some(*col) != case && !grid.get(sample, *col).is_blank())
            .take(3)
            .collect();
        match filled.as_slice() {
            [contingency, issue, rest @ ..] => Ok(Resolution {
                kind: kind.to_owned(),
                columns: ColumnBinding::Positional(ColumnMap {
                    contingency: *contingency,
                    issue: *issue,
                    value: rest.first().copied(),
                    percent: Some(percent),
                }),
            }),
            _ => Err(UnrecognizedBlock::TooFewColumns { found: filled.len() }),
        }
    }
}
