//! Per-field constraint checks.
//!
//! Every field present on a record is checked against its hand-authored
//! constraint, when one exists. The constraint table is deliberately
//! separate in semantics from the ingest-time value specs: dates here are
//! `ddMMyyyy` under strict calendar rules.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use rsf_model::{Dataset, ErrorKind, Record, ValidationError};
use rsf_standards::{ConstraintKind, FieldConstraint, YearSchema};

use crate::engine::RuleFailure;

static DECIMAL_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d*\.?\d+$").expect("decimal value pattern"));

pub(crate) fn check(
    dataset: &Dataset,
    schema: &YearSchema,
) -> Result<Vec<ValidationError>, RuleFailure> {
    let mut errors = Vec::new();
    for record in dataset.records() {
        let record_schema = schema.record(record.record_type);
        for (name, value) in &record.fields {
            if let Some(constraint) = record_schema.constraint(name) {
                check_field(record, name, value, constraint, &mut errors)?;
            }
        }
    }
    Ok(errors)
}

fn check_field(
    record: &Record,
    name: &str,
    value: &str,
    constraint: &FieldConstraint,
    errors: &mut Vec<ValidationError>,
) -> Result<(), RuleFailure> {
    let trimmed = value.trim();
    let label = constraint.label;
    let line = record.line_number as i64;
    let data_error = |message: String| {
        ValidationError::new(line, ErrorKind::Data, message).with_field(name)
    };

    // Mandatory-and-empty is terminal for the field.
    if trimmed.is_empty() {
        if constraint.mandatory {
            errors.push(data_error(format!("{label}: field is mandatory but was empty")));
        }
        return Ok(());
    }

    let length = trimmed.chars().count();
    if let Some(min) = constraint.min_length
        && length < usize::from(min)
    {
        errors.push(data_error(format!(
            "{label}: value '{trimmed}' is shorter than minimum length {min}"
        )));
    }
    if let Some(max) = constraint.max_length
        && length > usize::from(max)
    {
        errors.push(data_error(format!(
            "{label}: value '{trimmed}' is longer than maximum length {max}"
        )));
    }

    match constraint.kind {
        ConstraintKind::Numeric => {
            if !trimmed.chars().all(|c| c.is_ascii_digit()) {
                errors.push(data_error(format!(
                    "{label}: value '{trimmed}' must be numeric"
                )));
            }
        }
        ConstraintKind::Date => {
            if !is_valid_ddmmyyyy(trimmed) {
                errors.push(data_error(format!(
                    "{label}: value '{trimmed}' must be a valid date in ddMMyyyy format"
                )));
            }
        }
        ConstraintKind::Decimal => {
            if !DECIMAL_VALUE.is_match(trimmed) {
                errors.push(data_error(format!(
                    "{label}: value '{trimmed}' must be a valid decimal number"
                )));
            }
        }
        ConstraintKind::Boolean => {
            let valid = trimmed.eq_ignore_ascii_case("true")
                || trimmed.eq_ignore_ascii_case("false")
                || trimmed == "1"
                || trimmed == "0";
            if !valid {
                errors.push(data_error(format!(
                    "{label}: value '{trimmed}' must be a valid boolean (true/false or 1/0)"
                )));
            }
        }
        ConstraintKind::Text => {}
    }

    if let Some(pattern) = constraint.regex {
        let regex = Regex::new(pattern)?;
        if !regex.is_match(trimmed) {
            errors.push(data_error(format!(
                "{label}: value '{trimmed}' does not match the required pattern: {pattern}"
            )));
        }
    }

    Ok(())
}

/// Strict `ddMMyyyy` calendar check: eight digits naming a real date.
fn is_valid_ddmmyyyy(value: &str) -> bool {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let day: u32 = value[0..2].parse().unwrap_or(0);
    let month: u32 = value[2..4].parse().unwrap_or(0);
    let year: i32 = value[4..8].parse().unwrap_or(0);
    NaiveDate::from_ymd_opt(year, month, day).is_some()
}
