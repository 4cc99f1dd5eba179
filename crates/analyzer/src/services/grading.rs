use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{FinisherRecord, Gender, GradedRecord, StandardTable};

/// The key a record is graded under. Result feeds sometimes carry the
/// gender prefix on the age-group label and sometimes a bare band like
/// "30-34"; a bare band is combined with the record's own gender code.
pub fn standard_key(gender: &str, category: &str) -> String {
    if category.starts_with('M') || category.starts_with('F') {
        category.to_string()
    } else {
        format!("{gender}{category}")
    }
}

/// Converts raw finisher records into the graded field both systems
/// allocate over.
///
/// Records are dropped (logged, never an error) when the finish time is
/// missing, the category has no standard, or the canonical label carries no
/// recognizable gender code. The returned field is sorted by finish place;
/// every tie-break downstream refers to that order.
pub fn grade_records(records: &[FinisherRecord], standards: &StandardTable) -> Vec<GradedRecord> {
    let mut field: Vec<GradedRecord> = records
        .iter()
        .filter_map(|record| grade_record(record, standards))
        .collect();
    field.sort_by_key(|record| record.place);
    field
}

fn grade_record(record: &FinisherRecord, standards: &StandardTable) -> Option<GradedRecord> {
    if record.raw_time_seconds == 0 {
        debug!(name = %record.name, place = record.place, "missing finish time, excluding");
        return None;
    }

    let category = standard_key(&record.gender, &record.category);
    let Some(gender) = Gender::from_category(&category) else {
        debug!(name = %record.name, category = %category, "unrecognized gender code, excluding");
        return None;
    };
    let Some(multiplier) = standards.multiplier(&category) else {
        debug!(name = %record.name, category = %category, "no grading standard, excluding");
        return None;
    };

    Some(GradedRecord {
        place: record.place,
        name: record.name.clone(),
        gender,
        country: record.country.clone(),
        raw_seconds: record.raw_time_seconds,
        multiplier,
        graded_seconds: Decimal::from(record.raw_time_seconds) * multiplier,
        category,
    })
}
