//! Sequence integrity across related records.
//!
//! Records sharing an `N_ENTREE` form one sequence owned by an `A` record.
//! When several `A` records carry the same key, the last one wins the group.

use std::collections::BTreeMap;

use rsf_model::{Dataset, ErrorKind, RecordType, ValidationError};
use rsf_standards::fields;

struct Sequence {
    parent: usize,
    members: Vec<usize>,
}

pub(crate) fn check(dataset: &Dataset) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !dataset.has_type(RecordType::A) {
        errors.push(ValidationError::file_level(
            ErrorKind::Structural,
            "missing type A lines",
        ));
        return errors;
    }

    let mut sequences: BTreeMap<String, Sequence> = BTreeMap::new();
    for &idx in dataset.indices_of(RecordType::A) {
        let record = &dataset.records()[idx];
        let n_entree = record.field(fields::N_ENTREE);
        if n_entree.is_empty() {
            errors.push(
                ValidationError::new(
                    record.line_number as i64,
                    ErrorKind::Data,
                    "missing N_ENTREE in type A line",
                )
                .with_field(fields::N_ENTREE),
            );
            continue;
        }
        sequences.insert(
            n_entree.to_string(),
            Sequence {
                parent: idx,
                members: Vec::new(),
            },
        );
    }

    for (idx, record) in dataset.records().iter().enumerate() {
        if record.record_type == RecordType::A {
            continue;
        }
        let n_entree = record.field(fields::N_ENTREE);
        if n_entree.is_empty() {
            errors.push(
                ValidationError::new(
                    record.line_number as i64,
                    ErrorKind::Data,
                    format!("missing N_ENTREE in type {} line", record.record_type),
                )
                .with_field(fields::N_ENTREE),
            );
            continue;
        }
        match sequences.get_mut(n_entree) {
            Some(sequence) => sequence.members.push(idx),
            None => errors.push(
                ValidationError::new(
                    record.line_number as i64,
                    ErrorKind::Sequence,
                    format!(
                        "type {} line refers to non-existent N_ENTREE: {n_entree}",
                        record.record_type
                    ),
                )
                .with_field(fields::N_ENTREE),
            ),
        }
    }

    for (n_entree, sequence) in &sequences {
        validate_sequence(dataset, n_entree, sequence, &mut errors);
    }

    errors
}

fn validate_sequence(
    dataset: &Dataset,
    n_entree: &str,
    sequence: &Sequence,
    errors: &mut Vec<ValidationError>,
) {
    let parent = &dataset.records()[sequence.parent];
    let parent_insured = parent.field(fields::N_IMMATRICULATION_ASSURE);

    let has_b_or_c = sequence.members.iter().any(|&idx| {
        matches!(
            dataset.records()[idx].record_type,
            RecordType::B | RecordType::C
        )
    });
    if !has_b_or_c {
        errors.push(ValidationError::file_level(
            ErrorKind::Structural,
            format!("sequence with N_ENTREE {n_entree} has no B or C lines"),
        ));
    }

    let has_c = sequence
        .members
        .iter()
        .any(|&idx| dataset.records()[idx].record_type == RecordType::C);

    for &idx in &sequence.members {
        let record = &dataset.records()[idx];
        let insured = record.field(fields::N_IMMATRICULATION_ASSURE);
        if insured != parent_insured {
            errors.push(
                ValidationError::new(
                    record.line_number as i64,
                    ErrorKind::Sequence,
                    format!(
                        "inconsistent N_IMMATRICULATION_ASSURE in sequence {n_entree}: \
                         parent='{parent_insured}', line='{insured}'"
                    ),
                )
                .with_field(fields::N_IMMATRICULATION_ASSURE),
            );
        }
        if matches!(record.record_type, RecordType::L | RecordType::M) && !has_c {
            errors.push(ValidationError::new(
                record.line_number as i64,
                ErrorKind::Dependency,
                format!(
                    "type {} line exists in sequence {n_entree} without any C line",
                    record.record_type
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::rules::testutil::{a_record, b_record, record};

    #[test]
    fn missing_a_records_is_structural() {
        let mut dataset = Dataset::new();
        dataset.push(b_record(1, "123456789", "P1"));
        let errors = check(&dataset);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Structural);
        assert_eq!(errors[0].line, 0);
    }

    #[test]
    fn orphan_key_is_a_sequence_error() {
        let mut dataset = Dataset::new();
        dataset.push(a_record(1, "111111111", "P1"));
        dataset.push(b_record(2, "111111111", "P1"));
        dataset.push(b_record(3, "999999999", "P1"));

        let errors = check(&dataset);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Sequence);
        assert_eq!(errors[0].line, 3);
        assert!(errors[0].message.contains("999999999"));
    }

    #[test]
    fn missing_key_is_a_data_error() {
        let mut dataset = Dataset::new();
        dataset.push(a_record(1, "111111111", "P1"));
        dataset.push(b_record(2, "111111111", "P1"));
        dataset.push(b_record(3, "", "P1"));

        let errors = check(&dataset);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Data);
        assert_eq!(errors[0].field.as_deref(), Some("N_ENTREE"));
    }

    #[test]
    fn inconsistent_insured_id_is_flagged() {
        let mut dataset = Dataset::new();
        dataset.push(a_record(1, "111111111", "PARENT"));
        dataset.push(b_record(2, "111111111", "SOMEONE_ELSE"));

        let errors = check(&dataset);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Sequence);
        assert!(errors[0].message.contains("PARENT"));
        assert!(errors[0].message.contains("SOMEONE_ELSE"));
    }

    #[test]
    fn group_without_b_or_c_is_structural() {
        let mut dataset = Dataset::new();
        dataset.push(a_record(1, "111111111", "P1"));
        let errors = check(&dataset);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Structural);
        assert!(errors[0].message.contains("111111111"));
    }

    #[test]
    fn l_without_c_in_group_is_a_dependency_error() {
        let mut dataset = Dataset::new();
        dataset.push(a_record(1, "111111111", "P1"));
        dataset.push(b_record(2, "111111111", "P1"));
        dataset.push(record(
            RecordType::L,
            3,
            &[
                ("N_ENTREE", "111111111"),
                ("N_IMMATRICULATION_ASSURE", "P1"),
            ],
        ));

        let errors = check(&dataset);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Dependency);
        assert!(errors[0].message.contains("111111111"));
    }

    #[test]
    fn last_a_record_wins_a_duplicated_key() {
        let mut dataset = Dataset::new();
        dataset.push(a_record(1, "111111111", "FIRST"));
        dataset.push(a_record(2, "111111111", "SECOND"));
        dataset.push(b_record(3, "111111111", "SECOND"));

        let errors = check(&dataset);
        assert!(errors.is_empty(), "{errors:?}");
    }
}
