pub mod dto;
pub mod error;
pub mod models;
pub mod services;

pub use error::{AnalysisError, Result};
pub use models::{FinisherRecord, Gender, GradedRecord, SlotConfig, StandardTable};
pub use services::analyzer::analyze;
