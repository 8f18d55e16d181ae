//! Schedule-update merging.

use tracing::debug;

use rsf_model::{Dataset, HoraireUpdate, IntegrationReport, Record, RecordType};
use rsf_standards::fields;

/// Applies schedule updates to the dataset's billed lines.
///
/// For each update, B records are scanned before C records; the first record
/// whose `(N_IMMATRICULATION_ASSURE, DATE_SOINS, CODE_ACTE)` matches the
/// update — and whose owning A record (found by `N_ENTREE` + insured id)
/// carries the update's birth date — receives the schedule value in its
/// `horaire` field. Updates that match nothing produce one error message
/// naming the source row and all four key values.
pub fn apply_schedule(updates: &[HoraireUpdate], dataset: &mut Dataset) -> IntegrationReport {
    let mut report = IntegrationReport::new(updates.len());

    for update in updates {
        let matched = find_matching_line(dataset, update);
        match matched {
            Some(idx) => {
                if let Some(record) = dataset.get_mut(idx) {
                    record.set_field(fields::HORAIRE, update.schedule.clone());
                    report.updated += 1;
                    debug!(row = update.source_row, index = idx, "schedule update applied");
                }
            }
            None => report.errors.push(format!(
                "row {}: no matching B or C line found for N_IMMATRICULATION_ASSURE={}, \
                 DATE_NAISSANCE={}, DATE_SOINS={}, CODE_ACTE={}",
                update.source_row,
                update.insured_id,
                update.birth_date,
                update.care_date,
                update.act_code
            )),
        }
    }

    report
}

/// First-match-wins linear scan, B records before C records.
fn find_matching_line(dataset: &Dataset, update: &HoraireUpdate) -> Option<usize> {
    for record_type in [RecordType::B, RecordType::C] {
        for &idx in dataset.indices_of(record_type) {
            let record = &dataset.records()[idx];
            if line_matches(dataset, record, update) {
                return Some(idx);
            }
        }
    }
    None
}

fn line_matches(dataset: &Dataset, record: &Record, update: &HoraireUpdate) -> bool {
    if record.field(fields::N_IMMATRICULATION_ASSURE) != update.insured_id
        || record.field(fields::DATE_SOINS) != update.care_date
        || record.field(fields::CODE_ACTE) != update.act_code
    {
        return false;
    }

    // The owning A record must confirm the birth date.
    let n_entree = record.field(fields::N_ENTREE);
    let insured = record.field(fields::N_IMMATRICULATION_ASSURE);
    dataset.of_type(RecordType::A).any(|a| {
        a.field(fields::N_ENTREE) == n_entree
            && a.field(fields::N_IMMATRICULATION_ASSURE) == insured
            && a.field(fields::DATE_NAISSANCE) == update.birth_date
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(record_type: RecordType, line: usize, pairs: &[(&str, &str)]) -> Record {
        let mut record = Record::new(record_type, line);
        for (name, value) in pairs {
            record.set_field(*name, *value);
        }
        record
    }

    fn dataset_with_parent_birth(birth_date: &str) -> Dataset {
        let mut dataset = Dataset::new();
        dataset.push(record(
            RecordType::A,
            1,
            &[
                (fields::N_ENTREE, "123456789"),
                (fields::N_IMMATRICULATION_ASSURE, "1234567890123"),
                (fields::DATE_NAISSANCE, birth_date),
            ],
        ));
        dataset.push(record(
            RecordType::B,
            2,
            &[
                (fields::N_ENTREE, "123456789"),
                (fields::N_IMMATRICULATION_ASSURE, "1234567890123"),
                (fields::DATE_SOINS, "20170315"),
                (fields::CODE_ACTE, "C0051"),
            ],
        ));
        dataset
    }

    fn update() -> HoraireUpdate {
        HoraireUpdate {
            source_row: 2,
            insured_id: "1234567890123".to_string(),
            birth_date: "19900101".to_string(),
            care_date: "20170315".to_string(),
            act_code: "C0051".to_string(),
            schedule: "0830".to_string(),
        }
    }

    #[test]
    fn matching_update_sets_horaire_on_the_b_line() {
        let mut dataset = dataset_with_parent_birth("19900101");
        let report = apply_schedule(&[update()], &mut dataset);

        assert_eq!(report.total_processed, 1);
        assert_eq!(report.updated, 1);
        assert!(report.errors.is_empty());
        let b = dataset.of_type(RecordType::B).next().unwrap();
        assert_eq!(b.field(fields::HORAIRE), "0830");
    }

    #[test]
    fn parent_birth_date_mismatch_leaves_the_update_unmatched() {
        let mut dataset = dataset_with_parent_birth("19800101");
        let report = apply_schedule(&[update()], &mut dataset);

        assert_eq!(report.updated, 0);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("row 2"));
        assert!(report.errors[0].contains("1234567890123"));
        let b = dataset.of_type(RecordType::B).next().unwrap();
        assert_eq!(b.field(fields::HORAIRE), "");
    }

    #[test]
    fn b_lines_are_preferred_over_c_lines() {
        let mut dataset = dataset_with_parent_birth("19900101");
        // An equally matching C line after the B line.
        dataset.push(record(
            RecordType::C,
            3,
            &[
                (fields::N_ENTREE, "123456789"),
                (fields::N_IMMATRICULATION_ASSURE, "1234567890123"),
                (fields::DATE_SOINS, "20170315"),
                (fields::CODE_ACTE, "C0051"),
            ],
        ));
        let report = apply_schedule(&[update()], &mut dataset);

        assert_eq!(report.updated, 1);
        assert_eq!(dataset.of_type(RecordType::B).next().unwrap().field(fields::HORAIRE), "0830");
        assert_eq!(dataset.of_type(RecordType::C).next().unwrap().field(fields::HORAIRE), "");
    }

    #[test]
    fn c_lines_match_when_no_b_line_does() {
        let mut dataset = Dataset::new();
        dataset.push(record(
            RecordType::A,
            1,
            &[
                (fields::N_ENTREE, "123456789"),
                (fields::N_IMMATRICULATION_ASSURE, "1234567890123"),
                (fields::DATE_NAISSANCE, "19900101"),
            ],
        ));
        dataset.push(record(
            RecordType::C,
            2,
            &[
                (fields::N_ENTREE, "123456789"),
                (fields::N_IMMATRICULATION_ASSURE, "1234567890123"),
                (fields::DATE_SOINS, "20170315"),
                (fields::CODE_ACTE, "C0051"),
            ],
        ));
        let report = apply_schedule(&[update()], &mut dataset);

        assert_eq!(report.updated, 1);
        assert_eq!(dataset.of_type(RecordType::C).next().unwrap().field(fields::HORAIRE), "0830");
    }
}
