//! Inter-type dependency: L and M records require C records.
//!
//! Checked both file-wide and per `N_ENTREE` sequence. The per-sequence
//! check intentionally overlaps the one in the sequence rule; both are kept
//! to match the long-observed combined behavior.

use std::collections::{BTreeMap, BTreeSet};

use rsf_model::{Dataset, ErrorKind, RecordType, ValidationError};
use rsf_standards::fields;

const DEPENDENT_TYPES: [RecordType; 2] = [RecordType::L, RecordType::M];

pub(crate) fn check(dataset: &Dataset) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if DEPENDENT_TYPES.iter().all(|t| !dataset.has_type(*t)) {
        return errors;
    }

    if !dataset.has_type(RecordType::C) {
        for dependent in DEPENDENT_TYPES {
            if dataset.has_type(dependent) {
                errors.push(ValidationError::file_level(
                    ErrorKind::Dependency,
                    format!("type {dependent} lines exist without any type C lines"),
                ));
            }
        }
        return errors;
    }

    let mut types_by_entree: BTreeMap<String, BTreeSet<RecordType>> = BTreeMap::new();
    for record in dataset.records() {
        let n_entree = record.field(fields::N_ENTREE);
        if !n_entree.is_empty() {
            types_by_entree
                .entry(n_entree.to_string())
                .or_default()
                .insert(record.record_type);
        }
    }

    for (n_entree, types) in &types_by_entree {
        for dependent in DEPENDENT_TYPES {
            if types.contains(&dependent) && !types.contains(&RecordType::C) {
                errors.push(
                    ValidationError::file_level(
                        ErrorKind::Dependency,
                        format!(
                            "sequence {n_entree} has type {dependent} lines without required type C lines"
                        ),
                    )
                    .with_field(fields::N_ENTREE),
                );
            }
        }
    }

    errors
}
