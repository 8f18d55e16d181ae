//! Whole-file structural expectation: at least one billed line.

use rsf_model::{Dataset, ErrorKind, RecordType, ValidationError};

pub(crate) fn check(dataset: &Dataset) -> Vec<ValidationError> {
    if dataset.has_type(RecordType::B) || dataset.has_type(RecordType::C) {
        return Vec::new();
    }
    vec![ValidationError::file_level(
        ErrorKind::Structural,
        "file must contain at least one B or C line",
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::rules::testutil::{a_record, b_record};

    #[test]
    fn a_only_dataset_yields_exactly_one_structural_error() {
        let mut dataset = Dataset::new();
        dataset.push(a_record(1, "123456789", "INSURED_32_CHARACTERS_LONG_ID__"));

        let errors = check(&dataset);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Structural);
        assert_eq!(errors[0].line, 0);
    }

    #[test]
    fn one_b_record_clears_the_error() {
        let mut dataset = Dataset::new();
        dataset.push(a_record(1, "123456789", "INSURED_32_CHARACTERS_LONG_ID__"));
        dataset.push(b_record(2, "123456789", "INSURED_32_CHARACTERS_LONG_ID__"));
        assert!(check(&dataset).is_empty());
    }
}
