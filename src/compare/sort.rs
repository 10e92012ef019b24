use crate::compare::diff::ComparisonRow;
use crate::compare::diff::Status;
use std::cmp::Ordering;

impl Status {
    /// Presentation rank: matched rows first, then left-only, then right-only.
    pub const fn rank(&self) -> u8 {
        match self {
            Status::Both => 0,
            Status::OnlyInLeft => 1,
            Status::OnlyInRight => 2,
        }
    }
}

/// Orders a delta descending, absent deltas last.
fn by_delta_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts comparison rows by status rank, then by delta percent descending.
/// Stable: rows with equal status and delta keep their join order.
pub fn sort_rows(rows: &mut [ComparisonRow]) {
    rows.sort_by(|a, b| {
        a.status
            .rank()
            .cmp(&b.status.rank())
            .then_with(|| by_delta_desc(a.delta_percent, b.delta_percent))
    });
}
