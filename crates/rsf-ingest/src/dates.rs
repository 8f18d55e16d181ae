//! Tolerant date grammar used by spreadsheet ingestion.
//!
//! Four input forms are accepted and normalized to `YYYYMMDD`: the packed
//! `YYYYMMDD` form itself, ISO `YYYY-MM-DD`, European `DD/MM/YYYY`, and
//! bounded Excel serial-day numbers. Anything else is invalid.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;

static PACKED_YYYYMMDD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(19|20)\d{2}(0[1-9]|1[0-2])(0[1-9]|[12]\d|3[01])$").expect("packed date pattern")
});
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("iso date pattern"));
static EU_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("eu date pattern"));
static SERIAL_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("serial number pattern"));

const OUTPUT_FORMAT: &str = "%Y%m%d";

/// Excel serial days accepted as dates; the window keeps obviously
/// non-date numerics (quantities, codes) from being read as dates.
const SERIAL_MIN: i64 = 15_000;
const SERIAL_MAX: i64 = 50_000;

/// Normalizes an accepted date form to `YYYYMMDD`; `None` when the value is
/// not a recognizable date.
pub fn normalize_date(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    if PACKED_YYYYMMDD.is_match(raw) {
        return Some(raw.to_string());
    }

    if ISO_DATE.is_match(raw)
        && let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    {
        return Some(parsed.format(OUTPUT_FORMAT).to_string());
    }

    if EU_DATE.is_match(raw)
        && let Ok(parsed) = NaiveDate::parse_from_str(raw, "%d/%m/%Y")
    {
        return Some(parsed.format(OUTPUT_FORMAT).to_string());
    }

    if SERIAL_NUMBER.is_match(raw)
        && let Ok(serial) = raw.parse::<f64>()
    {
        let days = serial as i64;
        if days > SERIAL_MIN && days < SERIAL_MAX {
            // Excel day 1 is 1900-01-01; the -2 accounts for the day-zero
            // origin and Excel's phantom 1900-02-29.
            let date = NaiveDate::from_ymd_opt(1900, 1, 1)?
                .checked_add_days(Days::new((days - 2) as u64))?;
            return Some(date.format(OUTPUT_FORMAT).to_string());
        }
    }

    None
}

/// Whether the value is acceptable under the tolerant date grammar.
pub fn is_valid_date(raw: &str) -> bool {
    normalize_date(raw).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_form_passes_through() {
        assert_eq!(normalize_date("20170315").as_deref(), Some("20170315"));
    }

    #[test]
    fn iso_and_european_forms_normalize() {
        assert_eq!(normalize_date("2017-03-15").as_deref(), Some("20170315"));
        assert_eq!(normalize_date("15/03/2017").as_deref(), Some("20170315"));
    }

    #[test]
    fn excel_serial_days_normalize() {
        // 42736 is 2017-01-01.
        assert_eq!(normalize_date("42736").as_deref(), Some("20170101"));
        assert_eq!(normalize_date("42736.5").as_deref(), Some("20170101"));
    }

    #[test]
    fn out_of_window_serials_are_rejected() {
        assert!(normalize_date("14999").is_none());
        assert!(normalize_date("50000").is_none());
    }

    #[test]
    fn invalid_forms_are_rejected() {
        assert!(normalize_date("").is_none());
        assert!(normalize_date("20171301").is_none()); // month 13
        assert!(normalize_date("20170132").is_none()); // day 32
        assert!(normalize_date("31/02/2017").is_none()); // no Feb 31
        assert!(normalize_date("2017/03/15").is_none());
        assert!(normalize_date("15-03-2017").is_none());
        assert!(normalize_date("not a date").is_none());
    }
}
