use serde::Deserialize;
use serde::Serialize;

/// Report kinds shipped with the contingency workbooks, in positional order.
pub const DEFAULT_TABLE_KINDS: [&str; 3] = ["ACCA Long Term", "ACCA", "DCwAC"];

/// Ordered set of table kind names.
///
/// Order matters: the signature layout assigns kinds to header rows by
/// position, and comparison results are listed in this order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableKinds(Vec<String>);

impl TableKinds {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Kind assigned to the `index`-th block found on a sheet.
    pub fn at(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Position of a kind in the configured order.
    pub fn rank(&self, kind: &str) -> Option<usize> {
        self.0.iter().position(|it| it == kind)
    }

    /// Matches a label cell against the kinds: trimmed, case-insensitive,
    /// whole-text equality. Returns the canonical spelling.
    pub fn match_label(&self, text: &str) -> Option<&str> {
        let text = text.trim().to_lowercase();
        self.0
            .iter()
            .find(|kind| kind.to_lowercase() == text)
            .map(String::as_str)
    }
}

impl Default for TableKinds {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_KINDS)
    }
}
