use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The full comparison report for one race. Plain data, ready to store or
/// serialize as-is; maps are BTree-keyed so repeated runs over the same
/// input serialize to identical bytes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalysisReport {
    pub total_participants: u32,
    pub men_participants: u32,
    pub women_participants: u32,
    /// The configured 2025 pool, echoed for presentation.
    pub total_slots: u32,
    pub system_2025: SystemSummary,
    pub system_2026: SystemSummary,
    pub changes: SystemChanges,
    pub categories: BTreeMap<String, CategoryComparison>,
    pub detailed_results: Vec<AthleteResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SystemSummary {
    pub men_qualified: u32,
    pub women_qualified: u32,
    pub total_qualified: u32,
}

/// Qualifier count deltas, 2026 minus 2025.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SystemChanges {
    pub men_difference: i32,
    pub women_difference: i32,
    pub total_difference: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryComparison {
    pub system_2025: CategoryOutcome,
    pub system_2026: CategoryOutcome,
    pub difference: CategoryDelta,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryOutcome {
    pub men: u32,
    pub women: u32,
    pub total: u32,
    /// Slowest qualifying time in this category, rounded to whole seconds;
    /// None when the category produced no qualifiers under this system.
    pub cutoff_time_seconds: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDelta {
    pub men: i32,
    pub women: i32,
    pub total: i32,
}

/// Per-athlete outcome row, in finish-place order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteResult {
    pub place: u32,
    pub name: String,
    pub category: String,
    pub raw_time_seconds: u32,
    pub age_standard: f64,
    pub age_graded_time_seconds: u32,
    pub qualified_2025: bool,
    pub qualified_2026: bool,
}
