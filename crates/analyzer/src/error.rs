use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to parse standards table: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to read standards table: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Standards table is empty")]
    EmptyStandards,

    #[error("Invalid multiplier {value} for category '{category}': must be in (0, 1]")]
    InvalidMultiplier { category: String, value: Decimal },
}
