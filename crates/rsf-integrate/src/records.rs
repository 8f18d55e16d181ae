//! Whole-record import merging.

use tracing::debug;

use rsf_model::{Dataset, IntegrationReport, Record, RecordType};
use rsf_standards::fields;

/// Key fields shared by every record type.
const COMMON_KEYS: [&str; 4] = [
    fields::N_FINESS_EPMSI,
    fields::N_FINESS_GEOGRAPHIQUE,
    fields::N_IMMATRICULATION_ASSURE,
    fields::N_ENTREE,
];

/// Type-specific key fields completing the composite match key.
fn extra_keys(record_type: RecordType) -> &'static [&'static str] {
    match record_type {
        RecordType::A => &[],
        RecordType::B | RecordType::C => &[fields::DATE_SOINS, fields::CODE_ACTE],
        RecordType::M => &[fields::DATE_SOINS, fields::CODE_CCAM],
        RecordType::H => &[fields::DATE_DEBUT_SEJOUR, fields::CODE_UCD],
        RecordType::P => &[fields::DATE_DEBUT_SEJOUR, fields::CODE_REFERENCE_LPP],
        RecordType::L => &[fields::DATE_ACTE1, fields::CODE_ACTE1],
    }
}

/// Merges imported records of one type into the dataset.
///
/// Each incoming record is matched against existing records of the same
/// type on the composite key; a match replaces the existing record's fields
/// in place, no match appends the record. The type's bucket comes into
/// existence with the first append.
pub fn apply_records(
    records: Vec<Record>,
    record_type: RecordType,
    dataset: &mut Dataset,
) -> IntegrationReport {
    let mut report = IntegrationReport::new(records.len());

    for record in records {
        let existing = dataset
            .indices_of(record_type)
            .iter()
            .copied()
            .find(|&idx| keys_match(&dataset.records()[idx], &record, record_type));

        match existing {
            Some(idx) => {
                dataset.replace_fields(idx, record.fields);
                report.updated += 1;
                debug!(%record_type, index = idx, "imported record replaced an existing line");
            }
            None => {
                dataset.push(record);
                report.added += 1;
            }
        }
    }

    report
}

fn keys_match(existing: &Record, incoming: &Record, record_type: RecordType) -> bool {
    COMMON_KEYS
        .iter()
        .chain(extra_keys(record_type))
        .all(|key| existing.field(key) == incoming.field(key))
}
