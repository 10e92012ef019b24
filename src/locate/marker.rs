use crate::locate::Candidate;
use crate::locate::ColumnBinding;
use crate::locate::LayoutStrategy;
use crate::locate::Resolution;
use crate::locate::UnrecognizedBlock;
use crate::spreadsheet::grid::Grid;
use crate::table::kind::TableKinds;

/// Labelled layout:
///
/// ```text
/// row N-1 : ... "ACCA" ...                  kind label, any column
/// row N   : "Contingency Events" | ...      marker in the first cell, column headers
/// row N+1 : data rows until the first blank row
/// ```
#[derive(Clone, Debug)]
pub struct MarkerLayout {
    /// Marker text, trimmed and lower-cased
    marker: String,
}

impl MarkerLayout {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.trim().to_lowercase(),
        }
    }
}

impl Default for MarkerLayout {
    fn default() -> Self {
        Self::new("contingency events")
    }
}

impl LayoutStrategy for MarkerLayout {
    fn name(&self) -> &'static str {
        "marker"
    }

    fn is_header(&self, grid: &Grid, row: usize) -> bool {
        grid.get(row, 0)
            .as_text()
            .map(|text| text.to_lowercase() == self.marker)
            .unwrap_or(false)
    }

    fn header_ends_block(&self) -> bool {
        false
    }

    fn resolve(
        &self,
        grid: &Grid,
        candidate: &Candidate,
        kinds: &TableKinds,
    ) -> Result<Resolution, UnrecognizedBlock> {
        let label_row = candidate.row.checked_sub(1).ok_or(UnrecognizedBlock::UnknownKind)?;
        let kind = grid.row(label_row)
            .iter()
            .filter_map(|cell| cell.as_text())
            .find_map(|text| kinds.match_label(text))
            .ok_or(UnrecognizedBlock::UnknownKind)?;
        Ok(Resolution {
            kind: kind.to_owned(),
            columns: ColumnBinding::Header,
        })
    }
}
