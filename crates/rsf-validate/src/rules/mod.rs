pub(crate) mod dependency;
pub(crate) mod field;
pub(crate) mod key_match;
pub(crate) mod line_order;
pub(crate) mod sequence;
pub(crate) mod structure;

#[cfg(test)]
pub(crate) mod testutil {
    use rsf_model::{Record, RecordType};
    use rsf_standards::fields;

    pub(crate) fn record(
        record_type: RecordType,
        line: usize,
        pairs: &[(&str, &str)],
    ) -> Record {
        let mut record = Record::new(record_type, line);
        record.set_field(fields::TYPE_ENREGISTREMENT, record_type.as_char().to_string());
        for (name, value) in pairs {
            record.set_field(*name, *value);
        }
        record
    }

    /// A minimal A record that passes the structural rules.
    pub(crate) fn a_record(line: usize, n_entree: &str, insured: &str) -> Record {
        record(
            RecordType::A,
            line,
            &[
                (fields::N_ENTREE, n_entree),
                (fields::N_IMMATRICULATION_ASSURE, insured),
                (fields::DATE_NAISSANCE, "01011990"),
            ],
        )
    }

    /// A minimal B record for the same sequence.
    pub(crate) fn b_record(line: usize, n_entree: &str, insured: &str) -> Record {
        record(
            RecordType::B,
            line,
            &[
                (fields::N_ENTREE, n_entree),
                (fields::N_IMMATRICULATION_ASSURE, insured),
                (fields::DATE_SOINS, "15032017"),
                (fields::CODE_ACTE, "C0051"),
            ],
        )
    }
}
