use serde::Serialize;
use std::fmt::Display;

/// Shared `Empty` for reads outside a row or grid.
pub(crate) static EMPTY: CellValue = CellValue::Empty;

/// Value of a single grid cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub enum CellValue {
    #[default]
    Empty,
    /// Any text, including text that looks like a number
    Text(String),
    /// Numeric cell as stored by the spreadsheet
    Number(f64),
}

impl CellValue {
    /// Returns true for `Empty` and for text that is only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Returns the trimmed text if this is a `Text` cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text.trim()),
            _ => None,
        }
    }

    /// Renders the cell as an identifier string; numbers with no fractional
    /// part lose their trailing `.0`.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.trim().to_owned(),
            CellValue::Number(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 => {
                format!("{}", *value as i64)
            }
            CellValue::Number(value) => value.to_string(),
        }
    }

    /// Reads the cell as a number.
    ///
    /// Text is trimmed, a trailing `%` is stripped and the rest is parsed as a
    /// decimal. Anything unparseable, empty or non-finite is `None`.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(value) => Some(*value).filter(|value| value.is_finite()),
            CellValue::Text(text) => parse_number(text),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

/// Parses a loading or magnitude text such as `" 97.5% "`.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let text = text.strip_suffix('%').unwrap_or(text).trim_end();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Converts zero-based row & column indexes to an Excel-style reference such as `B7`.
pub fn cell_reference(row: usize, col: usize) -> String {
    let mut col = col + 1;
    let mut reference = String::new();
    while col > 0 {
        col -= 1;
        let digit = char::from_u32(65 + (col % 26) as u32).expect("Hardcode letters");
        col /= 26;
        reference.insert(0, digit);
    }
    reference.push_str((row + 1).to_string().as_str());
    reference
}
