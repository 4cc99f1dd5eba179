//! The 2026 qualifying system: one slot pool, category winners first, the
//! rest filled by age-graded time across the whole field.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::GradedRecord;
use crate::services::{SystemOutcome, category_winners};

/// Allocates the single 2026 pool over a graded field.
///
/// Category winners always qualify; when they alone exceed `total_slots`
/// the race hands out more slots than configured and the performance pool
/// is empty. Otherwise the leftover pool admits the fastest remaining
/// graded times regardless of category or gender.
pub fn allocate_2026(field: &[GradedRecord], total_slots: u32) -> SystemOutcome {
    let winners = category_winners(field);
    let mut qualifiers: BTreeSet<usize> = winners.values().copied().collect();

    let pool_slots = (total_slots as usize).saturating_sub(winners.len());
    let mut contenders: Vec<usize> = (0..field.len())
        .filter(|index| !qualifiers.contains(index))
        .collect();
    // Stable sort over a place-ordered field: equal graded times keep the
    // lower finish place first.
    contenders.sort_by(|&a, &b| field[a].graded_seconds.cmp(&field[b].graded_seconds));
    let admitted = &contenders[..pool_slots.min(contenders.len())];
    qualifiers.extend(admitted.iter().copied());

    // The pool boundary is the last admitted graded time; each category's
    // qualifying bar is whichever bound it: its own winner's time, or that
    // boundary projected back through the category's standard.
    let boundary = admitted.last().map(|&index| field[index].graded_seconds);
    let mut cutoffs: BTreeMap<String, u32> = BTreeMap::new();
    for (category, &winner) in &winners {
        let winner_time = Decimal::from(field[winner].raw_seconds);
        let cutoff = match boundary {
            Some(graded) => winner_time.max(graded / field[winner].multiplier),
            None => winner_time,
        };
        cutoffs.insert(category.clone(), round_seconds(cutoff));
    }

    SystemOutcome { qualifiers, cutoffs }
}

fn round_seconds(value: Decimal) -> u32 {
    value.round_dp(0).to_u32().unwrap_or(u32::MAX)
}
