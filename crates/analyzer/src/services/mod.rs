pub mod analyzer;
pub mod grading;
pub mod performance;
pub mod proportional;

use std::collections::{BTreeMap, BTreeSet};

use crate::models::GradedRecord;

/// One system's allocation over a graded field. Qualifiers are indices into
/// the graded slice, so two athletes who happen to share a name stay
/// distinct.
#[derive(Debug, Clone)]
pub struct SystemOutcome {
    pub qualifiers: BTreeSet<usize>,
    /// Slowest qualifying time per category, rounded to whole seconds.
    pub cutoffs: BTreeMap<String, u32>,
}

impl SystemOutcome {
    pub fn qualifies(&self, index: usize) -> bool {
        self.qualifiers.contains(&index)
    }
}

/// Picks each category's winner: the lowest raw time, ties resolved to the
/// lower finish place. Both systems guarantee these finishers a slot before
/// anything else is allocated.
///
/// The field is expected in place order (see `grading::grade_records`), so
/// a strict comparison keeps the earliest-placed finisher on equal times.
pub fn category_winners(field: &[GradedRecord]) -> BTreeMap<String, usize> {
    let mut winners: BTreeMap<String, usize> = BTreeMap::new();
    for (index, record) in field.iter().enumerate() {
        match winners.get_mut(&record.category) {
            Some(current) => {
                if record.raw_seconds < field[*current].raw_seconds {
                    *current = index;
                }
            }
            None => {
                winners.insert(record.category.clone(), index);
            }
        }
    }
    winners
}


#[cfg(test)]
mod tests {
    use super::test_support::{finisher, graded_field};
    use super::*;

    #[test]
    fn test_winner_is_fastest_raw_time() {
        let records = vec![
            finisher(1, "Alda", "F40-44", 35200),
            finisher(2, "Berta", "F40-44", 34900),
            finisher(3, "Cleo", "F45-49", 36100),
        ];
        let field = graded_field(&records);
        let winners = category_winners(&field);

        assert_eq!(winners.len(), 2);
        assert_eq!(field[winners["F40-44"]].name, "Berta");
        assert_eq!(field[winners["F45-49"]].name, "Cleo");
    }

    #[test]
    fn test_winner_tie_goes_to_lower_place() {
        let records = vec![
            finisher(5, "Second", "M30-34", 31000),
            finisher(4, "First", "M30-34", 31000),
        ];
        let field = graded_field(&records);
        let winners = category_winners(&field);

        assert_eq!(field[winners["M30-34"]].name, "First");
    }
}
