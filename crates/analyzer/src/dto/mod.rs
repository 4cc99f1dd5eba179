mod report;

pub use report::{
    AnalysisReport, AthleteResult, CategoryComparison, CategoryDelta, CategoryOutcome,
    SystemChanges, SystemSummary,
};
