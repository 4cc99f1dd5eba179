use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{AnalysisError, Result};

/// Published age-group time standards for the 2026 qualifying system,
/// expressed as 4-decimal multipliers of the reference group (M30-34).
/// F80-84 and F85-89 have no standard: those groups had no finishers in
/// the editions the standards were derived from.
const STANDARD_2026: &[(&str, i64)] = &[
    ("M18-24", 9698),
    ("M25-29", 9921),
    ("M30-34", 10000),
    ("M35-39", 9895),
    ("M40-44", 9683),
    ("M45-49", 9401),
    ("M50-54", 9002),
    ("M55-59", 8667),
    ("M60-64", 8262),
    ("M65-69", 7552),
    ("M70-74", 6876),
    ("M75-79", 6768),
    ("M80-84", 5555),
    ("M85-89", 5416),
    ("F18-24", 8567),
    ("F25-29", 8961),
    ("F30-34", 8977),
    ("F35-39", 8866),
    ("F40-44", 8707),
    ("F45-49", 8501),
    ("F50-54", 8125),
    ("F55-59", 7778),
    ("F60-64", 7218),
    ("F65-69", 6828),
    ("F70-74", 6439),
    ("F75-79", 5521),
];

/// Immutable category -> multiplier table used to convert raw finish times
/// into age-graded times. A category absent from the table cannot be graded
/// and its finishers are excluded from the analysis entirely.
///
/// The table is plain configuration: construct it once and pass it by
/// reference, so rule revisions can coexist side by side.
#[derive(Debug, Clone)]
pub struct StandardTable {
    multipliers: BTreeMap<String, Decimal>,
}

impl StandardTable {
    /// Builds a table from explicit multipliers, rejecting empty tables and
    /// multipliers outside (0, 1].
    pub fn new(multipliers: BTreeMap<String, Decimal>) -> Result<Self> {
        if multipliers.is_empty() {
            return Err(AnalysisError::EmptyStandards);
        }
        for (category, &value) in &multipliers {
            if value <= Decimal::ZERO || value > Decimal::ONE {
                return Err(AnalysisError::InvalidMultiplier {
                    category: category.clone(),
                    value,
                });
            }
        }
        Ok(Self { multipliers })
    }

    /// Loads a table from a JSON object of category -> multiplier, e.g.
    /// `{"M30-34": "1.0000", "F40-44": "0.8707"}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let multipliers: BTreeMap<String, Decimal> = serde_json::from_str(json)?;
        Self::new(multipliers)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// The built-in 2026 standards.
    pub fn standard_2026() -> Self {
        let multipliers = STANDARD_2026
            .iter()
            .map(|&(category, value)| (category.to_string(), Decimal::new(value, 4)))
            .collect();
        Self { multipliers }
    }

    pub fn multiplier(&self, category: &str) -> Option<Decimal> {
        self.multipliers.get(category).copied()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.multipliers.contains_key(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.multipliers.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_lookup() {
        let standards = StandardTable::standard_2026();
        assert_eq!(standards.multiplier("M30-34"), Some(Decimal::ONE));
        assert_eq!(standards.multiplier("F40-44"), Some(Decimal::new(8707, 4)));
        assert_eq!(standards.multiplier("F80-84"), None);
    }

    #[test]
    fn test_builtin_table_is_valid() {
        let multipliers = StandardTable::standard_2026().multipliers;
        StandardTable::new(multipliers).unwrap();
    }

    #[test]
    fn test_rejects_empty_table() {
        let err = StandardTable::new(BTreeMap::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyStandards));
    }

    #[test]
    fn test_rejects_out_of_range_multiplier() {
        let mut multipliers = BTreeMap::new();
        multipliers.insert("M30-34".to_string(), Decimal::new(10001, 4));
        let err = StandardTable::new(multipliers).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidMultiplier { .. }));

        let mut multipliers = BTreeMap::new();
        multipliers.insert("M30-34".to_string(), Decimal::ZERO);
        let err = StandardTable::new(multipliers).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidMultiplier { .. }));
    }

    #[test]
    fn test_from_json_str() {
        let standards =
            StandardTable::from_json_str(r#"{"M30-34": "1.0000", "F40-44": "0.8707"}"#).unwrap();
        assert_eq!(standards.multiplier("F40-44"), Some(Decimal::new(8707, 4)));
        assert!(!standards.contains("M18-24"));
    }

    #[test]
    fn test_from_json_str_rejects_invalid() {
        let err = StandardTable::from_json_str(r#"{"M30-34": "1.5"}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidMultiplier { .. }));
    }
}
