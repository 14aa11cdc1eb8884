//! Expense date parsing.
//!
//! Dates travel as strings. Two layouts are accepted and tried in a fixed
//! order: day-month-year first, ISO year-month-day second. Output is always
//! ISO (`NaiveDate`'s own format).

use chrono::NaiveDate;

use crate::{FieldError, Rule};

const DATE: &str = "date";

/// Accepted input layouts, in the order they are attempted.
pub const DATE_FORMATS: [&str; 2] = ["%d-%m-%Y", "%Y-%m-%d"];

/// Byte offsets of the two dashes for each entry of [`DATE_FORMATS`].
const DASHES: [[usize; 2]; 2] = [[2, 5], [4, 7]];

/// Fixed-width check: chrono alone accepts `5-3-2030` or two-digit years.
fn has_shape(value: &str, dashes: [usize; 2]) -> bool {
    value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| {
            if dashes.contains(&i) {
                b == b'-'
            } else {
                b.is_ascii_digit()
            }
        })
}

/// Parses an expense date from its wire representation.
pub fn parse_date(value: &str) -> Result<NaiveDate, FieldError> {
    if value.is_empty() {
        return Err(FieldError::new(DATE, Rule::Required, "date is required"));
    }

    DATE_FORMATS
        .iter()
        .zip(DASHES)
        .filter(|(_, dashes)| has_shape(value, *dashes))
        .find_map(|(format, _)| NaiveDate::parse_from_str(value, format).ok())
        .ok_or_else(|| {
            FieldError::new(
                DATE,
                Rule::DateFormat,
                "invalid date format, expected dd-mm-yyyy or yyyy-mm-dd",
            )
        })
}

/// Rejects dates strictly before `today`. Today itself and later are fine.
pub fn ensure_not_past(date: NaiveDate, today: NaiveDate) -> Result<(), FieldError> {
    if date < today {
        return Err(FieldError::new(
            DATE,
            Rule::NotInPast,
            "date cannot be in the past",
        ));
    }
    Ok(())
}
