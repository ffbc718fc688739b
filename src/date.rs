//! Date reformatting for the import columns.
//!
//! The billing exports carry timestamps such as `2021-03-01 10:15` or
//! `2021-03-01 10:15:42`; the accounting import wants `01/03/2021`.

use chrono::{NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Output format of every date column.
pub const OUTPUT_FORMAT: &str = "%d/%m/%Y";

/// Parses any of the accepted export date layouts.
pub fn parse_export_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        })
}

/// Reformats an export date as `dd/mm/yyyy`.
pub fn to_day_month_year(value: &str) -> Option<String> {
    parse_export_date(value).map(|d| d.format(OUTPUT_FORMAT).to_string())
}
