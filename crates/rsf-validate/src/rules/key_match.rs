//! Parent-key consistency.
//!
//! Every non-`A` record carries the dataset index of the `A` record whose
//! block it was decoded in; its identifying fields must match that parent's.

use rsf_model::{Dataset, ErrorKind, RecordType, ValidationError};
use rsf_standards::fields;

const KEY_FIELDS: [&str; 2] = [fields::N_IMMATRICULATION_ASSURE, fields::N_ENTREE];

pub(crate) fn check(dataset: &Dataset) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for record in dataset.records() {
        if record.record_type == RecordType::A {
            continue;
        }
        let Some(parent) = record.parent.and_then(|idx| dataset.get(idx)) else {
            errors.push(
                ValidationError::new(
                    record.line_number as i64,
                    ErrorKind::Structural,
                    format!(
                        "type {} line at line {} has no preceding A line",
                        record.record_type, record.line_number
                    ),
                )
                .with_field(fields::TYPE_ENREGISTREMENT),
            );
            continue;
        };

        for key in KEY_FIELDS {
            let child_value = record.field(key);
            let parent_value = parent.field(key);
            if child_value != parent_value {
                errors.push(
                    ValidationError::new(
                        record.line_number as i64,
                        ErrorKind::Sequence,
                        format!(
                            "{key} '{child_value}' does not match parent A line {} ('{parent_value}')",
                            parent.line_number
                        ),
                    )
                    .with_field(key),
                );
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::rules::testutil::{a_record, b_record};

    #[test]
    fn matching_children_are_clean() {
        let mut dataset = Dataset::new();
        let a = dataset.push(a_record(1, "111111111", "P1"));
        let mut b = b_record(2, "111111111", "P1");
        b.parent = Some(a);
        dataset.push(b);

        assert!(check(&dataset).is_empty());
    }

    #[test]
    fn each_mismatching_key_field_is_its_own_error() {
        let mut dataset = Dataset::new();
        let a = dataset.push(a_record(1, "111111111", "P1"));
        let mut b = b_record(4, "999999999", "P2");
        b.parent = Some(a);
        dataset.push(b);

        let errors = check(&dataset);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == ErrorKind::Sequence));
        assert!(errors.iter().all(|e| e.line == 4));
        let fields_flagged: Vec<_> = errors.iter().filter_map(|e| e.field.as_deref()).collect();
        assert!(fields_flagged.contains(&"N_ENTREE"));
        assert!(fields_flagged.contains(&"N_IMMATRICULATION_ASSURE"));
    }

    #[test]
    fn child_without_a_parent_block_is_structural() {
        let mut dataset = Dataset::new();
        dataset.push(b_record(1, "111111111", "P1"));

        let errors = check(&dataset);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Structural);
        assert!(errors[0].message.contains("no preceding A line"));
    }
}
