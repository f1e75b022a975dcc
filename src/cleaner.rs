//! Per-row coercion and filtering of uploaded records.
//!
//! Cleaning favors reported data loss over fatal failure: rows whose date
//! matches none of the accepted formats are dropped and counted, while a
//! missing or unparseable engagement count is zero-filled and kept. A row
//! without a date cannot be placed in time, but a zero engagement count is
//! still informative.

use crate::dataset::{CleanRecord, CleaningReport, Dataset};
use crate::ingest::RawTable;
use crate::schema::{ColumnMap, RequiredField};
use chrono::NaiveDate;

/// Date formats accepted for the `date` field, tried in order.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Parses a date value against the accepted formats.
///
/// The first format that parses the full value wins; each row is parsed
/// independently, so rows in one upload may use different formats.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Coerces an engagement value to a non-negative integer.
///
/// Blank or non-numeric input yields 0. Fractional values truncate toward
/// zero ("7.9" becomes 7) and negative values clamp to 0, keeping the
/// dataset invariant that engagements are never negative.
pub fn coerce_engagements(value: &str) -> u64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n.trunc() as u64,
        _ => 0,
    }
}

/// Cleans a raw table into a Dataset using the resolved column mapping.
///
/// Surviving rows keep their original order (stable filter, no re-sort).
/// Returns the Dataset together with a report of row counts; the report
/// always satisfies `original_row_count = final_row_count +
/// rows_dropped_for_date`.
pub fn clean(table: &RawTable, columns: &ColumnMap) -> (Dataset, CleaningReport) {
    let original_row_count = table.rows().len();
    let mut records = Vec::with_capacity(original_row_count);
    let mut rows_dropped_for_date = 0usize;

    let field = |row: &[String], f: RequiredField| -> String {
        row.get(columns.index(f)).cloned().unwrap_or_default()
    };

    for row in table.rows() {
        let date_raw = field(row, RequiredField::Date);
        let Some(date) = parse_date(&date_raw) else {
            rows_dropped_for_date += 1;
            continue;
        };

        records.push(CleanRecord {
            date,
            platform: field(row, RequiredField::Platform),
            sentiment: field(row, RequiredField::Sentiment),
            location: field(row, RequiredField::Location),
            engagements: coerce_engagements(&field(row, RequiredField::Engagements)),
            mediatype: field(row, RequiredField::MediaType),
        });
    }

    let final_row_count = records.len();
    if rows_dropped_for_date > 0 {
        tracing::warn!(
            rows_dropped_for_date,
            original_row_count,
            "dropped rows with unparseable dates"
        );
    }
    tracing::info!(final_row_count, "cleaned uploaded rows");

    (
        Dataset::new(records),
        CleaningReport {
            original_row_count,
            rows_dropped_for_date,
            final_row_count,
        },
    )
}
