//! Drives both qualifying systems over one race's results and assembles
//! the comparison report.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

use crate::dto::{
    AnalysisReport, AthleteResult, CategoryComparison, CategoryDelta, CategoryOutcome,
    SystemChanges, SystemSummary,
};
use crate::models::{FinisherRecord, Gender, GradedRecord, SlotConfig, StandardTable};
use crate::services::{SystemOutcome, grading, performance, proportional};

/// Runs the 2025 and 2026 allocations over one race and compares them.
///
/// Returns `None` — the normal "no analysis available" outcome, not an
/// error — when the result list is empty or no record could be graded.
pub fn analyze(
    records: &[FinisherRecord],
    slots: &SlotConfig,
    standards: &StandardTable,
) -> Option<AnalysisReport> {
    if records.is_empty() {
        warn!("no finisher results, skipping analysis");
        return None;
    }

    let field = grading::grade_records(records, standards);
    if field.is_empty() {
        warn!(
            records = records.len(),
            "no gradable finisher results, skipping analysis"
        );
        return None;
    }

    let outcome_2025 = proportional::allocate_2025(&field, slots.men_slots, slots.women_slots);
    let outcome_2026 = performance::allocate_2026(&field, slots.slots_2026());

    let system_2025 = summarize(&field, &outcome_2025);
    let system_2026 = summarize(&field, &outcome_2026);
    let changes = SystemChanges {
        men_difference: diff(system_2026.men_qualified, system_2025.men_qualified),
        women_difference: diff(system_2026.women_qualified, system_2025.women_qualified),
        total_difference: diff(system_2026.total_qualified, system_2025.total_qualified),
    };

    let category_keys: BTreeSet<&String> = outcome_2025
        .cutoffs
        .keys()
        .chain(outcome_2026.cutoffs.keys())
        .collect();
    let mut categories = BTreeMap::new();
    for category in category_keys {
        let in_2025 = category_outcome(&field, &outcome_2025, category);
        let in_2026 = category_outcome(&field, &outcome_2026, category);
        let difference = CategoryDelta {
            men: diff(in_2026.men, in_2025.men),
            women: diff(in_2026.women, in_2025.women),
            total: diff(in_2026.total, in_2025.total),
        };
        categories.insert(
            category.clone(),
            CategoryComparison {
                system_2025: in_2025,
                system_2026: in_2026,
                difference,
            },
        );
    }

    let detailed_results = field
        .iter()
        .enumerate()
        .map(|(index, record)| AthleteResult {
            place: record.place,
            name: record.name.clone(),
            category: record.category.clone(),
            raw_time_seconds: record.raw_seconds,
            age_standard: record.multiplier.to_f64().unwrap_or(1.0),
            age_graded_time_seconds: record
                .graded_seconds
                .round_dp(0)
                .to_u32()
                .unwrap_or(u32::MAX),
            qualified_2025: outcome_2025.qualifies(index),
            qualified_2026: outcome_2026.qualifies(index),
        })
        .collect();

    Some(AnalysisReport {
        total_participants: field.len() as u32,
        men_participants: count_gender(&field, Gender::Men),
        women_participants: count_gender(&field, Gender::Women),
        total_slots: slots.total_slots,
        system_2025,
        system_2026,
        changes,
        categories,
        detailed_results,
    })
}

fn count_gender(field: &[GradedRecord], gender: Gender) -> u32 {
    field.iter().filter(|record| record.gender == gender).count() as u32
}

fn diff(system_2026: u32, system_2025: u32) -> i32 {
    system_2026 as i32 - system_2025 as i32
}

fn summarize(field: &[GradedRecord], outcome: &SystemOutcome) -> SystemSummary {
    let men_qualified = outcome
        .qualifiers
        .iter()
        .filter(|&&index| field[index].gender == Gender::Men)
        .count() as u32;
    let total_qualified = outcome.qualifiers.len() as u32;
    SystemSummary {
        men_qualified,
        women_qualified: total_qualified - men_qualified,
        total_qualified,
    }
}

fn category_outcome(
    field: &[GradedRecord],
    outcome: &SystemOutcome,
    category: &str,
) -> CategoryOutcome {
    let mut men = 0u32;
    let mut women = 0u32;
    for &index in &outcome.qualifiers {
        if field[index].category != category {
            continue;
        }
        match field[index].gender {
            Gender::Men => men += 1,
            Gender::Women => women += 1,
        }
    }
    CategoryOutcome {
        men,
        women,
        total: men + women,
        cutoff_time_seconds: outcome.cutoffs.get(category).copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::finisher;

    fn slots(total: u32, men: u32, women: u32, total_2026: Option<u32>) -> SlotConfig {
        SlotConfig {
            total_slots: total,
            men_slots: men,
            women_slots: women,
            total_slots_2026: total_2026,
        }
    }

    /// The 20-finisher reference race: 12 men in M30-34, 8 women in
    /// F40-44, times spaced so raw order and place order agree.
    fn reference_race() -> Vec<FinisherRecord> {
        let mut records = Vec::new();
        for i in 0..12u32 {
            records.push(finisher(i + 1, &format!("M{}", i + 1), "M30-34", 30000 + i * 120));
        }
        for i in 0..8u32 {
            records.push(finisher(i + 13, &format!("W{}", i + 1), "F40-44", 34000 + i * 150));
        }
        records
    }

    #[test]
    fn test_empty_results_yield_no_analysis() {
        let standards = StandardTable::standard_2026();
        assert!(analyze(&[], &slots(5, 3, 2, None), &standards).is_none());
    }

    #[test]
    fn test_ungradable_results_yield_no_analysis() {
        let standards = StandardTable::standard_2026();
        let records = vec![
            finisher(1, "Greta", "F80-84", 40000),
            finisher(2, "Hana", "F85-89", 0),
        ];
        assert!(analyze(&records, &slots(5, 3, 2, None), &standards).is_none());
    }

    #[test]
    fn test_reference_race_report() {
        let standards = StandardTable::standard_2026();
        let report = analyze(&reference_race(), &slots(5, 3, 2, Some(4)), &standards).unwrap();

        assert_eq!(report.total_participants, 20);
        assert_eq!(report.men_participants, 12);
        assert_eq!(report.women_participants, 8);
        assert_eq!(report.total_slots, 5);

        // 2025: M winner + 2 proportional, W winner + 1 proportional.
        assert_eq!(report.system_2025.men_qualified, 3);
        assert_eq!(report.system_2025.women_qualified, 2);
        assert_eq!(report.system_2025.total_qualified, 5);

        // 2026: both winners, then the 2 fastest graded times. The women's
        // graded times (34000 * 0.8707 ~ 29604 and up) all beat the men's
        // remainder (30120 and up), so the pool goes to W2 and W3.
        assert_eq!(report.system_2026.men_qualified, 1);
        assert_eq!(report.system_2026.women_qualified, 3);
        assert_eq!(report.system_2026.total_qualified, 4);

        assert_eq!(report.changes.men_difference, -2);
        assert_eq!(report.changes.women_difference, 1);
        assert_eq!(report.changes.total_difference, -1);

        let m_group = &report.categories["M30-34"];
        assert_eq!(m_group.system_2025.men, 3);
        assert_eq!(m_group.system_2025.cutoff_time_seconds, Some(30240));
        assert_eq!(m_group.system_2026.men, 1);
        assert_eq!(m_group.difference.total, -2);

        let w_group = &report.categories["F40-44"];
        assert_eq!(w_group.system_2025.women, 2);
        assert_eq!(w_group.system_2026.women, 3);
        assert_eq!(w_group.difference.total, 1);

        let qualified_2026: Vec<&str> = report
            .detailed_results
            .iter()
            .filter(|athlete| athlete.qualified_2026)
            .map(|athlete| athlete.name.as_str())
            .collect();
        assert_eq!(qualified_2026, vec!["M1", "W1", "W2", "W3"]);
    }

    #[test]
    fn test_detailed_results_in_place_order() {
        let standards = StandardTable::standard_2026();
        let mut records = reference_race();
        records.reverse();
        let report = analyze(&records, &slots(5, 3, 2, None), &standards).unwrap();

        let places: Vec<u32> = report.detailed_results.iter().map(|a| a.place).collect();
        assert_eq!(places, (1..=20).collect::<Vec<u32>>());
        assert_eq!(report.detailed_results[0].age_standard, 1.0);
    }

    #[test]
    fn test_excluded_category_is_invisible() {
        let standards = StandardTable::standard_2026();
        let mut records = reference_race();
        // Five finishers in a group with no standard: not participants, not
        // qualifiers, not a category key.
        for i in 0..5u32 {
            records.push(finisher(i + 21, &format!("G{}", i + 1), "F80-84", 36000 + i * 60));
        }
        let report = analyze(&records, &slots(5, 3, 2, None), &standards).unwrap();

        assert_eq!(report.total_participants, 20);
        assert_eq!(report.women_participants, 8);
        assert!(!report.categories.contains_key("F80-84"));
        assert!(report.detailed_results.iter().all(|a| a.category != "F80-84"));
    }

    #[test]
    fn test_zero_2026_pool_awards_only_winners() {
        let standards = StandardTable::standard_2026();
        let records = vec![
            finisher(1, "M1", "M30-34", 30000),
            finisher(2, "M2", "M30-34", 30600),
            finisher(3, "V1", "M50-54", 33000),
            finisher(4, "W1", "F40-44", 34000),
            finisher(5, "W2", "F40-44", 34500),
        ];
        let report = analyze(&records, &slots(5, 3, 2, Some(0)), &standards).unwrap();

        assert_eq!(report.system_2026.total_qualified, 3);
        assert_eq!(report.system_2026.men_qualified, 2);
        assert_eq!(report.system_2026.women_qualified, 1);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let standards = StandardTable::standard_2026();
        let config = slots(5, 3, 2, Some(4));

        let first = analyze(&reference_race(), &config, &standards).unwrap();
        let second = analyze(&reference_race(), &config, &standards).unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
