mod finisher;
mod slots;
mod standards;

pub use finisher::{FinisherRecord, Gender, GradedRecord, parse_time_seconds};
pub use slots::SlotConfig;
pub use standards::StandardTable;
