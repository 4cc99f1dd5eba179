use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-race qualifying slot counts for both systems.
///
/// `men_slots` + `women_slots` conventionally sum to `total_slots` but are
/// not required to; the 2025 allocation only ever reads the gendered pools.
/// `total_slots_2026` of `None` means the race uses the same total under
/// the 2026 system; `Some(0)` is an explicit zero pool and is honored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct SlotConfig {
    pub total_slots: u32,
    pub men_slots: u32,
    pub women_slots: u32,
    #[serde(default)]
    pub total_slots_2026: Option<u32>,
}

impl SlotConfig {
    /// The single 2026 pool, falling back to the 2025 total when the race
    /// has no separate 2026 figure.
    pub fn slots_2026(&self) -> u32 {
        self.total_slots_2026.unwrap_or(self.total_slots)
    }
}
