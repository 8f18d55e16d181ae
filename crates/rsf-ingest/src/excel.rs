//! Archive/spreadsheet ingestion.
//!
//! An uploaded archive carries exactly one supported workbook: either an
//! `HORAIRES_*` schedule-update sheet or a `LIGNES_<T>_*` record sheet whose
//! file name embeds the record type letter. Row-level failures are recorded
//! and the row is dropped; only naming, header, and workbook-shape problems
//! stop ingestion outright.

use std::io::{Cursor, Read};
use std::sync::LazyLock;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use regex::Regex;
use tracing::warn;
use zip::ZipArchive;

use rsf_model::{
    ErrorKind, HoraireUpdate, Record, RecordType, ValidationError, ValidationReport,
};
use rsf_standards::{RecordSchema, ValueKind, horaire};

use crate::cell::cell_to_string;
use crate::dates::normalize_date;
use crate::error::IngestError;

const HORAIRES_PREFIX: &str = "HORAIRES_";
const LIGNES_PREFIX: &str = "LIGNES_";

static LIGNES_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^LIGNES_([A-Z])_.*\.xlsx?$").expect("lignes filename pattern"));

static DECIMAL_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("decimal value pattern"));

/// What an archive ingestion produced.
#[derive(Debug, Clone)]
pub enum ImportPayload {
    /// Ingestion stopped before any rows could be extracted.
    None,
    /// Schedule updates from an HORAIRES workbook, not yet applied.
    Schedule(Vec<HoraireUpdate>),
    /// Whole records of one type from a LIGNES workbook.
    Records {
        record_type: RecordType,
        records: Vec<Record>,
    },
}

/// Result of ingesting one archive.
#[derive(Debug, Clone)]
pub struct ExcelImport {
    pub payload: ImportPayload,
    /// Errors found during ingestion, including per-row data errors.
    pub report: ValidationReport,
    /// Data rows examined, counting rows that were rejected.
    pub total_rows: usize,
}

impl ExcelImport {
    fn error(report: ValidationReport) -> Self {
        Self {
            payload: ImportPayload::None,
            report,
            total_rows: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Schedule,
    Records(char),
    MalformedLignes,
}

/// Ingests an in-memory ZIP archive.
///
/// Only the first `HORAIRES_`/`LIGNES_` workbook is processed; later
/// candidates are skipped with a warning. Fails hard only for an
/// unregistered year — everything else is reported through the embedded
/// [`ValidationReport`].
pub fn parse_archive(
    bytes: &[u8],
    archive_name: &str,
    year: u16,
) -> Result<ExcelImport, IngestError> {
    let schema = rsf_standards::year(year)?;
    let mut report = ValidationReport::for_file(archive_name);

    let mut archive = match ZipArchive::new(Cursor::new(bytes)) {
        Ok(archive) => archive,
        Err(error) => {
            report.push(ValidationError::file_level(
                ErrorKind::Structural,
                format!("failed to open archive: {error}"),
            ));
            return Ok(ExcelImport::error(report));
        }
    };

    let mut chosen: Option<(usize, String, EntryKind)> = None;
    for index in 0..archive.len() {
        let entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(error) => {
                report.push(ValidationError::file_level(
                    ErrorKind::Structural,
                    format!("failed to read archive entry {index}: {error}"),
                ));
                return Ok(ExcelImport::error(report));
            }
        };
        if entry.is_dir() {
            continue;
        }
        let name = base_name(entry.name()).to_string();
        drop(entry);

        match classify_entry(&name) {
            Some(EntryKind::MalformedLignes) => {
                report.push(
                    ValidationError::file_level(
                        ErrorKind::FileName,
                        format!(
                            "invalid LIGNES file name '{name}': expected LIGNES_[A|B|C|H|M|P|L]_*.xlsx"
                        ),
                    )
                    .with_snippet(name),
                );
            }
            Some(kind) => {
                if chosen.is_some() {
                    warn!(entry = %name, "additional workbook candidate ignored; only the first is processed");
                } else {
                    chosen = Some((index, name, kind));
                }
            }
            None => {}
        }
    }

    let Some((index, name, kind)) = chosen else {
        report.push(ValidationError::file_level(
            ErrorKind::FileName,
            format!(
                "no workbook starting with '{HORAIRES_PREFIX}' or '{LIGNES_PREFIX}' found in archive"
            ),
        ));
        return Ok(ExcelImport::error(report));
    };

    let record_type = match kind {
        EntryKind::Schedule => None,
        EntryKind::Records(tag) => match RecordType::try_from(tag) {
            Ok(record_type) => Some(record_type),
            Err(_) => {
                report.push(
                    ValidationError::file_level(
                        ErrorKind::FileName,
                        format!("unsupported LIGNES record type '{tag}' in file name"),
                    )
                    .with_snippet(name),
                );
                return Ok(ExcelImport::error(report));
            }
        },
        EntryKind::MalformedLignes => None, // never selected
    };

    let mut data = Vec::new();
    match archive.by_index(index) {
        Ok(mut entry) => {
            if let Err(error) = entry.read_to_end(&mut data) {
                report.push(ValidationError::file_level(
                    ErrorKind::Structural,
                    format!("failed to read workbook '{name}': {error}"),
                ));
                return Ok(ExcelImport::error(report));
            }
        }
        Err(error) => {
            report.push(ValidationError::file_level(
                ErrorKind::Structural,
                format!("failed to read workbook '{name}': {error}"),
            ));
            return Ok(ExcelImport::error(report));
        }
    }

    let range = match open_first_sheet(&data) {
        Ok(range) => range,
        Err(message) => {
            report.push(ValidationError::file_level(
                ErrorKind::Structural,
                format!("failed to parse workbook '{name}': {message}"),
            ));
            return Ok(ExcelImport::error(report));
        }
    };

    Ok(match record_type {
        None => parse_horaire_sheet(&range, report),
        Some(record_type) => parse_lignes_sheet(&range, schema.record(record_type), report),
    })
}

fn base_name(entry_name: &str) -> &str {
    entry_name.rsplit('/').next().unwrap_or(entry_name)
}

fn classify_entry(name: &str) -> Option<EntryKind> {
    let is_workbook = name.ends_with(".xlsx") || name.ends_with(".xls");
    if !is_workbook {
        return None;
    }
    if name.starts_with(HORAIRES_PREFIX) {
        return Some(EntryKind::Schedule);
    }
    if name.starts_with(LIGNES_PREFIX) {
        return match LIGNES_FILENAME.captures(name) {
            Some(captures) => {
                let tag = captures[1].chars().next()?;
                Some(EntryKind::Records(tag))
            }
            None => Some(EntryKind::MalformedLignes),
        };
    }
    None
}

fn open_first_sheet(data: &[u8]) -> Result<Range<Data>, String> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(data)).map_err(|error| error.to_string())?;
    match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => Ok(range),
        Some(Err(error)) => Err(error.to_string()),
        None => Err("workbook contains no sheets".to_string()),
    }
}

fn header_values(row: &[Data]) -> Vec<String> {
    let mut values: Vec<String> = row.iter().map(cell_to_string).collect();
    while values.last().is_some_and(String::is_empty) {
        values.pop();
    }
    values
}

fn row_cells(row: &[Data], width: usize) -> Vec<String> {
    (0..width)
        .map(|i| cell_to_string(row.get(i).unwrap_or(&Data::Empty)))
        .collect()
}

fn parse_horaire_sheet(range: &Range<Data>, mut report: ValidationReport) -> ExcelImport {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        report.push(ValidationError::new(
            1,
            ErrorKind::Structural,
            "missing header row in HORAIRES sheet",
        ));
        return ExcelImport::error(report);
    };

    let actual = header_values(header_row);
    let expected = horaire::EXPECTED_HEADERS;
    if actual.len() != expected.len() || actual.iter().map(String::as_str).ne(expected) {
        report.push(
            ValidationError::new(
                1,
                ErrorKind::Format,
                format!(
                    "invalid headers in HORAIRES sheet. Expected: [{}], Found: [{}]",
                    expected.join(", "),
                    actual.join(", ")
                ),
            )
            .with_snippet(actual.join("|")),
        );
        return ExcelImport::error(report);
    }

    let mut updates = Vec::new();
    let mut total_rows = 0usize;

    for (offset, row) in rows.enumerate() {
        let row_number = offset + 2;
        let cells = row_cells(row, expected.len());
        if cells.iter().all(String::is_empty) {
            continue;
        }
        total_rows += 1;
        let snippet = cells.join("|");
        let mut row_has_error = false;

        let mut data_error = |report: &mut ValidationReport, field: &str, message: String| {
            report.push(
                ValidationError::new(row_number as i64, ErrorKind::Data, message)
                    .with_field(field)
                    .with_snippet(snippet.clone()),
            );
        };

        let insured_id = cells[0].clone();
        if insured_id.is_empty() {
            data_error(
                &mut report,
                "num_immatriculation",
                "num_immatriculation cannot be empty".to_string(),
            );
            row_has_error = true;
        } else if insured_id.chars().count() != horaire::NUM_IMMATRICULATION_LEN {
            data_error(
                &mut report,
                "num_immatriculation",
                format!(
                    "invalid length for num_immatriculation: expected {}, got {}",
                    horaire::NUM_IMMATRICULATION_LEN,
                    insured_id.chars().count()
                ),
            );
            row_has_error = true;
        }

        let birth_date = validate_date_cell(
            &cells[1],
            "date_naissance",
            &mut row_has_error,
            &mut report,
            row_number,
            &snippet,
        );
        let care_date = validate_date_cell(
            &cells[2],
            "date_soins",
            &mut row_has_error,
            &mut report,
            row_number,
            &snippet,
        );

        let act_code = cells[3].clone();
        if act_code.is_empty() {
            data_error(&mut report, "code_acte", "code_acte cannot be empty".to_string());
            row_has_error = true;
        } else if act_code.chars().count() != horaire::CODE_ACTE_LEN {
            data_error(
                &mut report,
                "code_acte",
                format!(
                    "invalid length for code_acte: expected {}, got {}",
                    horaire::CODE_ACTE_LEN,
                    act_code.chars().count()
                ),
            );
            row_has_error = true;
        }

        let schedule = cells[4].clone();
        if schedule.is_empty() {
            data_error(&mut report, "horaire", "horaire cannot be empty".to_string());
            row_has_error = true;
        }

        if !row_has_error {
            updates.push(HoraireUpdate {
                source_row: row_number,
                insured_id,
                birth_date: birth_date.unwrap_or_default(),
                care_date: care_date.unwrap_or_default(),
                act_code,
                schedule,
            });
        }
    }

    ExcelImport {
        payload: ImportPayload::Schedule(updates),
        report,
        total_rows,
    }
}

fn validate_date_cell(
    value: &str,
    field: &str,
    row_has_error: &mut bool,
    report: &mut ValidationReport,
    row_number: usize,
    snippet: &str,
) -> Option<String> {
    if value.is_empty() {
        report.push(
            ValidationError::new(
                row_number as i64,
                ErrorKind::Data,
                format!("{field} cannot be empty"),
            )
            .with_field(field)
            .with_snippet(snippet),
        );
        *row_has_error = true;
        return None;
    }
    match normalize_date(value) {
        Some(normalized) => Some(normalized),
        None => {
            report.push(
                ValidationError::new(
                    row_number as i64,
                    ErrorKind::Data,
                    format!(
                        "invalid format for {field}: expected YYYYMMDD, YYYY-MM-DD, or DD/MM/YYYY, got '{value}'"
                    ),
                )
                .with_field(field)
                .with_snippet(snippet),
            );
            *row_has_error = true;
            None
        }
    }
}

fn parse_lignes_sheet(
    range: &Range<Data>,
    schema: &RecordSchema,
    mut report: ValidationReport,
) -> ExcelImport {
    let record_type = schema.record_type;
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        report.push(ValidationError::new(
            1,
            ErrorKind::Structural,
            format!("missing header row in LIGNES sheet for record type '{record_type}'"),
        ));
        return ExcelImport::error(report);
    };

    let actual = header_values(header_row);
    let expected = schema.headers();
    if actual.len() != expected.len()
        || actual.iter().map(String::as_str).ne(expected.iter().copied())
    {
        report.push(
            ValidationError::new(
                1,
                ErrorKind::Format,
                format!(
                    "invalid headers for LIGNES sheet of record type '{record_type}'. Expected: [{}], Found: [{}]",
                    expected.join(", "),
                    actual.join(", ")
                ),
            )
            .with_snippet(actual.join("|")),
        );
        return ExcelImport::error(report);
    }

    let mut records = Vec::new();
    let mut total_rows = 0usize;

    for (offset, row) in rows.enumerate() {
        let row_number = offset + 2;
        let cells = row_cells(row, expected.len());
        if cells.iter().all(String::is_empty) {
            continue;
        }
        total_rows += 1;
        let snippet = cells.join("|");
        let mut row_has_error = false;
        let mut record = Record::new(record_type, row_number);

        for (field_schema, value) in schema.fields().iter().zip(&cells) {
            record.set_field(field_schema.name, value.clone());

            if field_schema.mandatory && value.is_empty() {
                report.push(
                    ValidationError::new(
                        row_number as i64,
                        ErrorKind::Data,
                        format!("mandatory field '{}' cannot be empty", field_schema.name),
                    )
                    .with_field(field_schema.name)
                    .with_snippet(snippet.clone()),
                );
                row_has_error = true;
                continue;
            }
            if value.is_empty() {
                continue;
            }

            let mut failure = match field_schema.kind {
                ValueKind::Date if !crate::dates::is_valid_date(value) => Some(format!(
                    "invalid format for date field '{}': expected YYYYMMDD, got '{value}'",
                    field_schema.name
                )),
                ValueKind::Numeric if !value.chars().all(|c| c.is_ascii_digit()) => Some(format!(
                    "invalid format for numeric field '{}': expected only digits, got '{value}'",
                    field_schema.name
                )),
                ValueKind::NumericDecimal
                    if !DECIMAL_VALUE.is_match(&value.replace(',', ".")) =>
                {
                    Some(format!(
                        "invalid format for decimal field '{}': expected a number, got '{value}'",
                        field_schema.name
                    ))
                }
                _ => None,
            };

            if failure.is_none()
                && field_schema.length > 0
                && value.chars().count() != usize::from(field_schema.length)
            {
                failure = Some(format!(
                    "invalid length for field '{}': expected {} characters, got {}",
                    field_schema.name,
                    field_schema.length,
                    value.chars().count()
                ));
            }

            if let Some(message) = failure {
                report.push(
                    ValidationError::new(row_number as i64, ErrorKind::Data, message)
                        .with_field(field_schema.name)
                        .with_snippet(snippet.clone()),
                );
                row_has_error = true;
            }
        }

        if !row_has_error {
            records.push(record);
        }
    }

    ExcelImport {
        payload: ImportPayload::Records {
            record_type,
            records,
        },
        report,
        total_rows,
    }
}
