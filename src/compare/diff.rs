use crate::table::CanonicalRow;
use crate::table::ExtractedTable;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;

/// Which side(s) of the comparison contributed a row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Both,
    OnlyInLeft,
    OnlyInRight,
}

impl Status {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Both => "both",
            Status::OnlyInLeft => "only_in_left",
            Status::OnlyInRight => "only_in_right",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One keyed result row of a table comparison.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub contingency: String,
    pub issue: String,
    pub value_left: Option<f64>,
    pub percent_left: Option<f64>,
    pub value_right: Option<f64>,
    pub percent_right: Option<f64>,
    /// `percent_right - percent_left`, only when both percents are present
    pub delta_percent: Option<f64>,
    pub status: Status,
}

impl ComparisonRow {
    fn new(left: Option<&CanonicalRow>, right: Option<&CanonicalRow>) -> Option<Self> {
        let (key, status) = match (left, right) {
            (Some(row), Some(_)) => (row, Status::Both),
            (Some(row), None) => (row, Status::OnlyInLeft),
            (None, Some(row)) => (row, Status::OnlyInRight),
            (None, None) => return None,
        };
        let percent_left = left.and_then(|row| row.percent);
        let percent_right = right.and_then(|row| row.percent);
        Some(Self {
            contingency: key.contingency.clone(),
            issue: key.issue.clone(),
            value_left: left.and_then(|row| row.value),
            percent_left,
            value_right: right.and_then(|row| row.value),
            percent_right,
            delta_percent: percent_left.zip(percent_right).map(|(left, right)| right - left),
            status,
        })
    }
}

/// Full outer join of two tables on `(contingency, issue)`.
///
/// A key repeated within one table is paired by occurrence: the k-th left
/// row with that key meets the k-th right row with that key, and surplus
/// occurrences come out as one-sided rows. No input row is dropped.
///
/// Output follows the left table's row order, then the right-only rows in
/// the right table's order.
pub fn diff(left: &ExtractedTable, right: &ExtractedTable) -> Vec<ComparisonRow> {
    let mut occurrences: HashMap<(&str, &str), Vec<usize>> = HashMap::new();
    for (position, row) in right.rows.iter().enumerate() {
        occurrences.entry(row.key()).or_default().push(position);
    }
    // Reversed so that `pop` hands out the earliest occurrence first
    for positions in occurrences.values_mut() {
        positions.reverse();
    }

    let mut matched = vec![false; right.rows.len()];
    let mut rows = Vec::with_capacity(left.rows.len() + right.rows.len());
    for row in &left.rows {
        let partner = occurrences.get_mut(&row.key()).and_then(Vec::pop);
        if let Some(position) = partner {
            matched[position] = true;
        }
        rows.extend(ComparisonRow::new(Some(row), partner.map(|position| &right.rows[position])));
    }
    for (row, _) in right.rows.iter().zip(&matched).filter(|(_, matched)| !**matched) {
        rows.extend(ComparisonRow::new(None, Some(row)));
    }
    rows
}
