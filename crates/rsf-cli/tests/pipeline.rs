//! End-to-end pipeline: decode a fixed-width file, validate it, and merge a
//! schedule update into the decoded dataset.

use rsf_ingest::decode_rsf;
use rsf_integrate::apply_schedule;
use rsf_model::{ErrorKind, HoraireUpdate, RecordType};
use rsf_standards::fields;
use rsf_validate::RuleEngine;

/// Writes each (field, value) pair at its 2017 schema offset.
fn build_line(record_type: RecordType, values: &[(&str, &str)]) -> String {
    let schema = rsf_standards::year(2017).unwrap();
    let layout = schema.record(record_type).fields();
    let width = layout
        .iter()
        .map(|f| usize::from(f.start) - 1 + usize::from(f.length))
        .max()
        .unwrap();
    let mut line = vec![b' '; width];
    line[0] = record_type.as_char() as u8;
    for (name, value) in values {
        let field = layout.iter().find(|f| f.name == *name).unwrap();
        let start = usize::from(field.start) - 1;
        line[start..start + value.len()].copy_from_slice(value.as_bytes());
    }
    String::from_utf8(line).unwrap()
}

const INSURED: &str = "1234567890123";

// The fixed-width decoder materializes every schema field, so a clean file
// must fill everything the field rule marks mandatory.
fn sample_file() -> String {
    let a = build_line(
        RecordType::A,
        &[
            (fields::N_FINESS_EPMSI, "123456789"),
            (fields::N_FINESS_GEOGRAPHIQUE, "987654321"),
            (fields::N_IMMATRICULATION_ASSURE, INSURED),
            ("RANG_BENEFICIAIRE", "001"),
            (fields::N_ENTREE, "000000123"),
            (fields::DATE_NAISSANCE, "01011990"),
            ("DATE_ENTREE", "01032017"),
            ("DATE_SORTIE", "05032017"),
            ("CODE_POSTAL_RESIDENCE_PATIENT", "75001"),
            ("TOTAL_BASE_REMBOURSEMENT", "00012345"),
            ("TOTAL_REMBOURSABLE_AMO", "00012345"),
            ("TOTAL_HONORAIRE_FACTURE", "00000000"),
            ("TOTAL_HONORAIRE_REMBOURSABLE_AM", "00000000"),
        ],
    );
    let b = build_line(
        RecordType::B,
        &[
            (fields::N_FINESS_EPMSI, "123456789"),
            (fields::N_FINESS_GEOGRAPHIQUE, "987654321"),
            (fields::N_IMMATRICULATION_ASSURE, INSURED),
            ("RANG_BENEFICIAIRE", "001"),
            (fields::N_ENTREE, "000000123"),
            (fields::DATE_SOINS, "02032017"),
            (fields::CODE_ACTE, "C0051"),
            ("QUANTITE", "001"),
            ("PRIX_UNITAIRE", "0012050"),
            ("MONTANT_BASE_REMBOURSEMENT", "00012050"),
            ("MONTANT_REMBOURSABLE_AMO", "00008435"),
            ("MONTANT_HONORAIRE", "00000000"),
        ],
    );
    format!("{a}\n{b}\n")
}

#[test]
fn decode_validate_and_merge_round_trip() {
    let dataset = decode_rsf(sample_file().as_bytes(), 2017).unwrap();
    assert_eq!(dataset.count_of(RecordType::A), 1);
    assert_eq!(dataset.count_of(RecordType::B), 1);

    let engine = RuleEngine::new(2017).unwrap();
    let report = engine.validate(&dataset);
    assert!(!report.has_errors(), "{:?}", report.errors());

    // Merge a schedule value into the decoded B line. The decoder stores
    // DATE_SOINS verbatim (ddMMyyyy on the wire), so the update must carry
    // the same representation to match.
    let mut dataset = dataset;
    let update = HoraireUpdate {
        source_row: 2,
        insured_id: INSURED.to_string(),
        birth_date: "01011990".to_string(),
        care_date: "02032017".to_string(),
        act_code: "C0051".to_string(),
        schedule: "0915".to_string(),
    };
    let integration = apply_schedule(&[update], &mut dataset);
    assert_eq!(integration.updated, 1);
    assert!(integration.errors.is_empty());
    assert_eq!(
        dataset.of_type(RecordType::B).next().unwrap().field(fields::HORAIRE),
        "0915"
    );
}

#[test]
fn a_block_without_billed_lines_fails_validation() {
    let a = build_line(
        RecordType::A,
        &[
            (fields::N_IMMATRICULATION_ASSURE, INSURED),
            (fields::N_ENTREE, "000000123"),
            (fields::DATE_NAISSANCE, "01011990"),
        ],
    );
    let dataset = decode_rsf(a.as_bytes(), 2017).unwrap();
    let engine = RuleEngine::new(2017).unwrap();
    let report = engine.validate(&dataset);

    assert!(report.has_errors());
    // Both the whole-file expectation and the per-sequence check fire.
    let structural: Vec<_> = report
        .errors()
        .iter()
        .filter(|e| e.kind == ErrorKind::Structural)
        .collect();
    assert!(structural.iter().any(|e| e.message.contains("at least one B or C")));
    assert!(structural.iter().any(|e| e.message.contains("has no B or C lines")));
}

#[test]
fn l_line_without_c_line_reports_the_dependency() {
    let a = build_line(
        RecordType::A,
        &[
            (fields::N_IMMATRICULATION_ASSURE, INSURED),
            (fields::N_ENTREE, "000000123"),
            (fields::DATE_NAISSANCE, "01011990"),
        ],
    );
    let b = build_line(
        RecordType::B,
        &[
            (fields::N_IMMATRICULATION_ASSURE, INSURED),
            (fields::N_ENTREE, "000000123"),
            (fields::DATE_SOINS, "02032017"),
            (fields::CODE_ACTE, "C0051"),
        ],
    );
    let l = build_line(
        RecordType::L,
        &[
            (fields::N_IMMATRICULATION_ASSURE, INSURED),
            (fields::N_ENTREE, "000000123"),
            (fields::DATE_ACTE1, "02032017"),
            ("QUANTITE_ACTE1", "01"),
            (fields::CODE_ACTE1, "ACT00001"),
        ],
    );
    let dataset = decode_rsf(format!("{a}\n{b}\n{l}\n").as_bytes(), 2017).unwrap();
    let engine = RuleEngine::new(2017).unwrap();
    let report = engine.validate(&dataset);

    let dependency_errors: Vec<_> = report
        .errors()
        .iter()
        .filter(|e| e.kind == ErrorKind::Dependency)
        .collect();
    assert!(!dependency_errors.is_empty());
    assert!(dependency_errors.iter().any(|e| e.message.contains("000000123")));
}
