//! The 2025 qualifying system: gendered slot pools spread across age-group
//! categories in proportion to participation.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::{Gender, GradedRecord};
use crate::services::{SystemOutcome, category_winners};

/// Allocates the gendered 2025 pools over a graded field.
///
/// Every category winner qualifies first and is charged against their
/// gender's pool; winners are guaranteed even when they outnumber it, so a
/// race with more categories than slots hands out more slots than
/// configured. The rest of each pool is apportioned across that gender's
/// categories by largest remainder and filled by raw finish time.
pub fn allocate_2025(field: &[GradedRecord], men_slots: u32, women_slots: u32) -> SystemOutcome {
    let winners = category_winners(field);
    let mut qualifiers: BTreeSet<usize> = winners.values().copied().collect();

    for (gender, pool) in [(Gender::Men, men_slots), (Gender::Women, women_slots)] {
        let winner_count = winners
            .values()
            .filter(|&&index| field[index].gender == gender)
            .count() as u32;
        let remaining = pool.saturating_sub(winner_count);
        fill_gender_pool(field, &winners, gender, remaining, &mut qualifiers);
    }

    let cutoffs = cutoff_times(field, &qualifiers);
    SystemOutcome { qualifiers, cutoffs }
}

/// Hamilton (largest-remainder) apportionment of one gender's remaining
/// slots, then the per-category fill by ascending raw time.
fn fill_gender_pool(
    field: &[GradedRecord],
    winners: &BTreeMap<String, usize>,
    gender: Gender,
    remaining: u32,
    qualifiers: &mut BTreeSet<usize>,
) {
    if remaining == 0 {
        return;
    }

    let participants: Vec<usize> = (0..field.len())
        .filter(|&index| field[index].gender == gender)
        .collect();
    if participants.is_empty() {
        return;
    }
    let total = Decimal::from(participants.len() as u64);

    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for &index in &participants {
        *counts.entry(field[index].category.as_str()).or_insert(0) += 1;
    }

    let mut allocated: BTreeMap<&str, u32> = BTreeMap::new();
    let mut remainders: Vec<(Decimal, &str)> = Vec::new();
    let mut assigned = 0u32;
    for (&category, &count) in &counts {
        if !winners.contains_key(category) {
            continue;
        }
        let share = Decimal::from(count) * Decimal::from(remaining) / total;
        let base = share.floor();
        let base_slots = base.to_u32().unwrap_or(0);
        allocated.insert(category, base_slots);
        assigned += base_slots;
        remainders.push((share - base, category));
    }

    // Largest fractional remainder gets the next leftover slot; equal
    // remainders resolve by category label so the result is order-free.
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(b.1)));
    let shortfall = remaining.saturating_sub(assigned);
    for (_, category) in remainders.into_iter().take(shortfall as usize) {
        if let Some(slots) = allocated.get_mut(category) {
            *slots += 1;
        }
    }

    for (category, extra) in allocated {
        if extra == 0 {
            continue;
        }
        let winner = winners[category];
        let mut members: Vec<usize> = participants
            .iter()
            .copied()
            .filter(|&index| field[index].category == category && index != winner)
            .collect();
        // Stable sort over a place-ordered field: equal raw times keep the
        // lower finish place first.
        members.sort_by_key(|&index| field[index].raw_seconds);
        qualifiers.extend(members.into_iter().take(extra as usize));
    }
}

/// Slowest qualifying raw time per category.
fn cutoff_times(field: &[GradedRecord], qualifiers: &BTreeSet<usize>) -> BTreeMap<String, u32> {
    let mut cutoffs: BTreeMap<String, u32> = BTreeMap::new();
    for &index in qualifiers {
        let record = &field[index];
        let slowest = cutoffs.entry(record.category.clone()).or_insert(0);
        *slowest = (*slowest).max(record.raw_seconds);
    }
    cutoffs
}
