//! Date normalization between the canonical `YYYY-MM-DD` form produced by
//! date inputs and the `DD/MM/YYYY` display form sent on the wire.

use chrono::NaiveDate;

const ISO_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// `YYYY-MM-DD` -> `DD/MM/YYYY`, zero-padding day and month. Empty input
/// stays empty; input that does not parse as a calendar date is returned
/// unchanged rather than treated as an error.
pub fn display_from_iso(value: &str) -> String {
    match NaiveDate::parse_from_str(value, ISO_FORMAT) {
        Ok(date) => date.format(DISPLAY_FORMAT).to_string(),
        Err(_) => value.to_string(),
    }
}

/// `DD/MM/YYYY` -> `YYYY-MM-DD`, the inverse of [`display_from_iso`], with
/// the same defensive contract for empty and unparseable input.
pub fn iso_from_display(value: &str) -> String {
    match NaiveDate::parse_from_str(value, DISPLAY_FORMAT) {
        Ok(date) => date.format(ISO_FORMAT).to_string(),
        Err(_) => value.to_string(),
    }
}
