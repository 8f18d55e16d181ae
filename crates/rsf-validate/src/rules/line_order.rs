//! Original-file-order checks.
//!
//! Runs over the dataset's record arena, which preserves source order: the
//! first record must open an `A` block, and an `M` or `L` record must have
//! seen a `C` record earlier in its block.

use rsf_model::{Dataset, ErrorKind, RecordType, ValidationError};
use rsf_standards::fields;

pub(crate) fn check(dataset: &Dataset) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let Some(first) = dataset.records().first() else {
        return errors;
    };
    if first.record_type != RecordType::A {
        errors.push(
            ValidationError::new(
                first.line_number as i64,
                ErrorKind::Structural,
                "first line must be of type A",
            )
            .with_field(fields::TYPE_ENREGISTREMENT),
        );
    }

    // One C satisfies any number of following M/L lines until the next A.
    let mut c_seen_in_block = false;
    for record in dataset.records() {
        match record.record_type {
            RecordType::A => c_seen_in_block = false,
            RecordType::C => c_seen_in_block = true,
            RecordType::M | RecordType::L if !c_seen_in_block => {
                errors.push(
                    ValidationError::new(
                        record.line_number as i64,
                        ErrorKind::Structural,
                        format!(
                            "type {} line at line {} must be preceded by a C line within the same A block",
                            record.record_type, record.line_number
                        ),
                    )
                    .with_field(fields::TYPE_ENREGISTREMENT),
                );
            }
            _ => {}
        }
    }

    errors
}
