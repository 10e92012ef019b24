use glob::Pattern;

/// Criteria for selecting which sheets of a workbook get indexed.
#[derive(Clone, Debug, Default)]
pub struct Criteria {
    /// Sheet name patterns; a sheet is loaded if it matches any of them.
    pub sheet_name_patterns: Option<Vec<Pattern>>,

    /// Maximum number of sheets to load.
    pub sheet_limit: Option<usize>,
}

impl Criteria {
    /// Checks if a sheet name matches the criteria patterns.
    /// Returns true if no patterns are specified or if name matches any pattern.
    pub fn accept(&self, sheet_name: &str) -> bool {
        if let Some(patterns) = &self.sheet_name_patterns {
            patterns.iter().any(|pattern| pattern.matches(sheet_name))
        } else {
            true
        }
    }

    /// Applies the patterns and the sheet limit to a workbook's sheet names,
    /// keeping workbook order.
    pub fn select(&self, sheet_names: &[String]) -> Vec<String> {
        sheet_names
            .iter()
            .filter(|name| self.accept(name))
            .take(self.sheet_limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn accept_everything_by_default() {
        let criteria = Criteria::default();

        assert!(criteria.accept("Summer Peak"));
        assert_eq!(
            criteria.select(&names(&["B", "A", "C"])),
            names(&["B", "A", "C"])
        );
    }

    #[test]
    fn select_with_patterns_and_limit() {
        let criteria = Criteria {
            sheet_name_patterns: Some(vec![
                Pattern::new("2025*").unwrap(),
                Pattern::new("Base").unwrap(),
            ]),
            sheet_limit: Some(2),
        };

        assert!(!criteria.accept("Notes"));
        assert_eq!(
            criteria.select(&names(&["Notes", "2025 Summer", "Base", "2025 Winter"])),
            names(&["2025 Summer", "Base"])
        );
    }
}
