use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One finisher's result, as assembled by the caller from whatever result
/// source it uses. `raw_time_seconds` of 0 means the time could not be
/// parsed; such records are dropped from the analysis.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FinisherRecord {
    pub place: u32,
    pub name: String,
    /// Age-group label. Canonical form is gender code + age band
    /// (e.g. "M30-34"); a bare band ("30-34") is combined with `gender`.
    pub category: String,
    /// Single-character gender code, "M" or "F".
    pub gender: String,
    pub raw_time_seconds: u32,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    #[serde(rename = "M")]
    Men,
    #[serde(rename = "F")]
    Women,
}

impl Gender {
    /// Reads the gender from a canonical category label's leading
    /// character. Only "M" and "F" are accepted; anything else means the
    /// record cannot be classified.
    pub fn from_category(category: &str) -> Option<Self> {
        match category.chars().next() {
            Some('M') => Some(Self::Men),
            Some('F') => Some(Self::Women),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Men => "M",
            Self::Women => "F",
        }
    }
}

/// A finisher with its age-graded time attached. The category is in
/// canonical form and the multiplier is the one it was graded with.
#[derive(Debug, Clone)]
pub struct GradedRecord {
    pub place: u32,
    pub name: String,
    pub category: String,
    pub gender: Gender,
    pub country: Option<String>,
    pub raw_seconds: u32,
    pub multiplier: Decimal,
    pub graded_seconds: Decimal,
}

/// Parses a display-formatted finish time ("H:MM:SS", "MM:SS", or plain
/// seconds) into seconds. Returns 0 for anything unparsable, which the
/// grading stage treats as a missing time.
pub fn parse_time_seconds(time: &str) -> u32 {
    let parts: Vec<&str> = time.trim().split(':').collect();
    let nums: Option<Vec<u32>> = parts.iter().map(|p| p.parse().ok()).collect();
    match nums.as_deref() {
        Some(&[hours, minutes, seconds]) => hours
            .saturating_mul(3600)
            .saturating_add(minutes.saturating_mul(60))
            .saturating_add(seconds),
        Some(&[minutes, seconds]) => minutes.saturating_mul(60).saturating_add(seconds),
        Some(&[seconds]) => seconds,
        _ => 0,
    }
}
