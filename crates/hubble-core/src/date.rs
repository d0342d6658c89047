//! Flexible date parsing and duration labels
//!
//! Upstream extraction emits dates at whatever precision the document gives:
//! a bare year (`2019`), a month (`2019-06`), or a full day (`2019-06-15`).
//! All three normalize to a [`NaiveDate`]; coarser forms land on the first
//! day of their year or month.
//!
//! ```rust
//! use hubble_core::date::{duration_label, normalize};
//!
//! assert_eq!(normalize("2020").unwrap(), normalize("2020-01-01").unwrap());
//! let start = normalize("2019-01-01").unwrap();
//! let end = normalize("2024-01-01").unwrap();
//! assert_eq!(duration_label(start, end), "5y");
//! ```

use chrono::NaiveDate;
use thiserror::Error;

/// Precision of a parsed date string
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateGranularity {
    /// `YYYY`
    Year,
    /// `YYYY-MM`
    Month,
    /// `YYYY-MM-DD`
    Day,
}

impl DateGranularity {
    /// Pick the granularity from the trimmed string length.
    ///
    /// Anything that is not exactly 4 or 7 characters is treated as a full
    /// date and left to the day parser to accept or reject.
    pub fn of(spec: &str) -> Self {
        match spec.len() {
            4 => Self::Year,
            7 => Self::Month,
            _ => Self::Day,
        }
    }
}

/// A date string that could not be normalized
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("malformed date '{value}': expected YYYY, YYYY-MM or YYYY-MM-DD")]
pub struct DateError {
    pub value: String,
}

/// Parse a date spec and report the granularity it was written at.
pub fn parse(spec: &str) -> Result<(NaiveDate, DateGranularity), DateError> {
    let trimmed = spec.trim();
    let malformed = || DateError {
        value: spec.to_string(),
    };
    // chrono's %Y takes a sign and any digit count; the year must be 4 digits
    if !has_four_digit_year(trimmed) {
        return Err(malformed());
    }
    let granularity = DateGranularity::of(trimmed);

    let full = match granularity {
        DateGranularity::Year => format!("{trimmed}-01-01"),
        DateGranularity::Month => format!("{trimmed}-01"),
        DateGranularity::Day => trimmed.to_string(),
    };

    NaiveDate::parse_from_str(&full, "%Y-%m-%d")
        .map(|date| (date, granularity))
        .map_err(|_| malformed())
}

fn has_four_digit_year(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 4
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes.get(4).map_or(true, |b| *b == b'-')
}

/// Normalize a date spec to a calendar date.
pub fn normalize(spec: &str) -> Result<NaiveDate, DateError> {
    parse(spec).map(|(date, _)| date)
}

/// Approximate human-readable span between two dates.
///
/// Years are 365 days and months 30 days, so the label is stable but not
/// calendar-exact: `"5y 5m"`, `"5y"`, `"3m"`, or `"12d"`.
pub fn duration_label(start: NaiveDate, end: NaiveDate) -> String {
    let days = (end - start).num_days();
    let years = days.div_euclid(365);
    let months = days.rem_euclid(365) / 30;

    if years > 0 && months > 0 {
        format!("{}y {}m", years, months)
    } else if years > 0 {
        format!("{}y", years)
    } else if months > 0 {
        format!("{}m", months)
    } else {
        format!("{}d", days)
    }
}
