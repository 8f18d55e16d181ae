//! 2017 RSF record layouts.
//!
//! Offsets are 1-based and contiguous within each record type. Field names
//! are the canonical ones; the legacy spreadsheet header variants
//! (`NuméroB`, `PRIXUNITAIRE`, …) are normalized onto them so that both
//! ingestion paths read the same table.

use rsf_model::RecordType;

use crate::schema::{
    ConstraintKind, FieldConstraint, FieldSchema, RecordSchema, ValueKind, YearSchema, field,
};

fn an(name: &'static str, start: u16, length: u16) -> FieldSchema {
    field(name, start, length, ValueKind::Alphanumeric)
}

fn num(name: &'static str, start: u16, length: u16) -> FieldSchema {
    field(name, start, length, ValueKind::Numeric)
}

fn dec(name: &'static str, start: u16, length: u16) -> FieldSchema {
    field(name, start, length, ValueKind::NumericDecimal)
}

fn date(name: &'static str, start: u16, length: u16) -> FieldSchema {
    field(name, start, length, ValueKind::Date)
}

fn req(
    kind: ConstraintKind,
    min: Option<u16>,
    max: Option<u16>,
    label: &'static str,
) -> FieldConstraint {
    FieldConstraint::required(kind, min, max, label)
}

fn opt(
    kind: ConstraintKind,
    min: Option<u16>,
    max: Option<u16>,
    label: &'static str,
) -> FieldConstraint {
    FieldConstraint::optional(kind, min, max, label)
}

pub(crate) fn build() -> YearSchema {
    YearSchema::new(
        2017,
        vec![
            record_a(),
            record_b(),
            record_c(),
            record_h(),
            record_m(),
            record_p(),
            record_l(),
        ],
    )
}

fn record_a() -> RecordSchema {
    RecordSchema::new(
        RecordType::A,
        vec![
            an("TYPE_ENREGISTREMENT", 1, 1),
            an("N_FINESS_EPMSI", 2, 9)
                .mandatory()
                .rule(req(ConstraintKind::Numeric, Some(9), Some(9), "FINESS EPMSI")),
            an("N_FINESS_GEOGRAPHIQUE", 11, 9)
                .mandatory()
                .rule(req(ConstraintKind::Numeric, Some(9), Some(9), "FINESS Géographique")),
            an("SEXE", 20, 1),
            an("CODE_CIVILITE", 21, 1),
            an("N_IMMATRICULATION_ASSURE", 22, 32)
                .mandatory()
                .rule(req(ConstraintKind::Text, None, Some(32), "N° Immatriculation Assuré")),
            an("CLE_N_IMMATRICULATION", 54, 2),
            num("RANG_BENEFICIAIRE", 56, 3)
                .rule(req(ConstraintKind::Numeric, Some(3), Some(3), "Rang Bénéficiaire")),
            an("N_ENTREE", 59, 9)
                .mandatory()
                .rule(req(ConstraintKind::Text, None, Some(9), "N° Entrée")),
            an("N_IMMATRICULATION_INDIVIDUEL", 68, 32),
            an("CLE_N_IMMATRICULATION_INDIVIDUEL", 100, 2),
            an("INDICATEUR_PARCOURS_SOINS", 102, 1),
            an("NATURE_OPERATION", 103, 1),
            an("NATURE_ASSURANCE", 104, 2),
            an("TYPE_CONTRAT_ORGANISME_COMPLEMENTAIRE", 106, 2),
            an("JUSTIF_EXO_TM", 108, 1),
            an("SEJOUR_FACTURABLE_ASSURANCE_MALADIE", 109, 1),
            an("FILLER_1", 110, 1),
            an("MOTIF_NON_FACTURATION", 111, 1),
            an("CODE_GD_REGIME", 112, 2),
            date("DATE_NAISSANCE", 114, 8)
                .mandatory()
                .rule(req(ConstraintKind::Date, Some(8), Some(8), "Date Naissance (ddMMyyyy)")),
            num("RANG_NAISSANCE", 122, 1),
            date("DATE_ENTREE", 123, 8)
                .mandatory()
                .rule(req(ConstraintKind::Date, Some(8), Some(8), "Date Entrée (ddMMyyyy)")),
            date("DATE_SORTIE", 131, 8)
                .mandatory()
                .rule(req(ConstraintKind::Date, Some(8), Some(8), "Date Sortie (ddMMyyyy)")),
            num("CODE_POSTAL_RESIDENCE_PATIENT", 139, 5)
                .rule(req(ConstraintKind::Numeric, Some(5), Some(5), "Code Postal Résidence")),
            dec("TOTAL_BASE_REMBOURSEMENT", 144, 8)
                .rule(req(ConstraintKind::Decimal, None, Some(8), "Total Base Remboursement")),
            dec("TOTAL_REMBOURSABLE_AMO", 152, 8)
                .rule(req(ConstraintKind::Decimal, None, Some(8), "Total Remboursable AMO")),
            dec("TOTAL_HONORAIRE_FACTURE", 160, 8)
                .rule(req(ConstraintKind::Decimal, None, Some(8), "Total Honoraire Facturé")),
            dec("TOTAL_HONORAIRE_REMBOURSABLE_AM", 168, 8).rule(req(
                ConstraintKind::Decimal,
                None,
                Some(8),
                "Total Honoraire Remboursable AM",
            )),
            dec("TOTAL_PARTICIPATION_ASSURE_AVANT_OC", 176, 8),
            dec("TOTAL_REMBOURSABLE_OC_PH", 184, 8),
            dec("TOTAL_REMBOURSABLE_OC_HONORAIRES", 192, 8),
            dec("MONTANT_TOTAL_FACTUREPH", 200, 8),
            an("NUMERO_A", 208, 5),
        ],
    )
}

fn record_b() -> RecordSchema {
    RecordSchema::new(
        RecordType::B,
        vec![
            an("TYPE_ENREGISTREMENT", 1, 1),
            an("N_FINESS_EPMSI", 2, 9)
                .mandatory()
                .rule(req(ConstraintKind::Numeric, Some(9), Some(9), "FINESS EPMSI")),
            an("N_FINESS_GEOGRAPHIQUE", 11, 9)
                .mandatory()
                .rule(req(ConstraintKind::Numeric, Some(9), Some(9), "FINESS Géographique")),
            an("N_IMMATRICULATION_ASSURE", 20, 32)
                .mandatory()
                .rule(req(ConstraintKind::Text, None, Some(32), "N° Immatriculation Assuré")),
            an("CLE_N_IMMATRICULATION", 52, 2),
            num("RANG_BENEFICIAIRE", 54, 3)
                .rule(req(ConstraintKind::Numeric, Some(3), Some(3), "Rang Bénéficiaire")),
            an("N_ENTREE", 57, 9)
                .mandatory()
                .rule(req(ConstraintKind::Text, None, Some(9), "N° Entrée")),
            an("N_IMMATRICULATION_INDIVIDUEL", 66, 32),
            an("CLE_N_IMMATRICULATION_INDIVIDUEL", 98, 2),
            an("MODE_TRAITEMENT", 100, 2),
            an("DISCIPLINE_PRESTATION", 102, 3),
            an("JUSTIFICATION_EXOTM", 105, 1),
            an("SPECIALITE_EXECUTANT", 106, 2),
            date("DATE_SOINS", 108, 8)
                .mandatory()
                .rule(req(ConstraintKind::Date, Some(8), Some(8), "Date Soins (ddMMyyyy)")),
            an("CODE_ACTE", 116, 5)
                .mandatory()
                .rule(req(ConstraintKind::Text, None, Some(5), "Code Acte")),
            num("QUANTITE", 121, 3).rule(req(ConstraintKind::Numeric, None, Some(3), "Quantité")),
            dec("COEFFICIENT", 124, 6),
            an("TYPE_PRESTATION_INTERMEDIAIRE", 130, 1),
            dec("COEFFICIENT_MCO", 131, 5),
            num("DENOMBREMENT", 136, 2),
            dec("PRIX_UNITAIRE", 138, 7)
                .rule(req(ConstraintKind::Decimal, None, Some(7), "Prix Unitaire")),
            dec("MONTANT_BASE_REMBOURSEMENT", 145, 8)
                .rule(req(ConstraintKind::Decimal, None, Some(8), "Montant Base Remboursement")),
            dec("TAUX_APPLICABLE", 153, 3),
            dec("MONTANT_REMBOURSABLE_AMO", 156, 8)
                .rule(req(ConstraintKind::Decimal, None, Some(8), "Montant Remboursable AMO")),
            dec("MONTANT_HONORAIRE", 164, 8)
                .rule(req(ConstraintKind::Decimal, None, Some(8), "Montant Honoraire")),
            dec("MONTANT_REMBOURSABLE_AMC", 172, 7),
            an("FILLER", 179, 15),
            an("NUMERO_B", 194, 5),
        ],
    )
}

fn record_c() -> RecordSchema {
    RecordSchema::new(
        RecordType::C,
        vec![
            an("TYPE_ENREGISTREMENT", 1, 1),
            an("N_FINESS_EPMSI", 2, 9)
                .mandatory()
                .rule(req(ConstraintKind::Numeric, Some(9), Some(9), "FINESS EPMSI")),
            an("N_FINESS_GEOGRAPHIQUE", 11, 9)
                .mandatory()
                .rule(req(ConstraintKind::Numeric, Some(9), Some(9), "FINESS Géographique")),
            an("N_IMMATRICULATION_ASSURE", 20, 32)
                .mandatory()
                .rule(req(ConstraintKind::Text, None, Some(32), "N° Immatriculation Assuré")),
            an("CLE_N_IMMATRICULATION", 52, 2),
            num("RANG_BENEFICIAIRE", 54, 3)
                .rule(req(ConstraintKind::Numeric, Some(3), Some(3), "Rang Bénéficiaire")),
            an("N_ENTREE", 57, 9)
                .mandatory()
                .rule(req(ConstraintKind::Text, None, Some(9), "N° Entrée")),
            an("N_IMMATRICULATION_INDIVIDUEL", 66, 32),
            an("CLE_N_IMMATRICULATION_INDIVIDUEL", 98, 2),
            an("MODE_TRAITEMENT", 100, 2),
            an("DISCIPLINE_PRESTATION", 102, 3),
            an("JUSTIFICATION_EXOTM", 105, 1),
            an("SPECIALITE_EXECUTANT", 106, 2),
            date("DATE_SOINS", 108, 8)
                .mandatory()
                .rule(req(ConstraintKind::Date, Some(8), Some(8), "Date Soins (ddMMyyyy)")),
            an("CODE_ACTE", 116, 5)
                .mandatory()
                .rule(req(ConstraintKind::Text, None, Some(5), "Code Acte")),
            num("QUANTITE", 121, 3).rule(req(ConstraintKind::Numeric, None, Some(3), "Quantité")),
            dec("COEFFICIENT", 124, 6),
            num("DENOMBREMENT", 130, 2),
            dec("PRIX_UNITAIRE", 132, 7)
                .rule(req(ConstraintKind::Decimal, None, Some(7), "Prix Unitaire")),
            dec("MONTANT_BASE_REMBOURSEMENT", 139, 8)
                .rule(req(ConstraintKind::Decimal, None, Some(8), "Montant Base Remboursement")),
            dec("TAUX_APPLICABLE", 147, 3),
            dec("MONTANT_REMBOURSABLE_AMO", 150, 8)
                .rule(req(ConstraintKind::Decimal, None, Some(8), "Montant Remboursable AMO")),
            dec("MONTANT_HONORAIRE", 158, 8)
                .rule(req(ConstraintKind::Decimal, None, Some(8), "Montant Honoraire")),
            dec("MONTANT_REMBOURSABLE_AMC", 166, 7),
            an("FILLER", 173, 11),
            an("TYPE_UNITE_FONCTIONNELLE", 184, 2),
            dec("COEFFICIENT_MCO", 186, 5),
            an("NUMERO_C", 191, 5),
        ],
    )
}

fn record_h() -> RecordSchema {
    RecordSchema::new(
        RecordType::H,
        vec![
            an("TYPE_ENREGISTREMENT", 1, 1),
            an("N_FINESS_EPMSI", 2, 9)
                .mandatory()
                .rule(req(ConstraintKind::Numeric, Some(9), Some(9), "FINESS EPMSI")),
            an("N_FINESS_GEOGRAPHIQUE", 11, 9)
                .mandatory()
                .rule(req(ConstraintKind::Numeric, Some(9), Some(9), "FINESS Géographique")),
            an("N_IMMATRICULATION_ASSURE", 20, 32)
                .mandatory()
                .rule(req(ConstraintKind::Text, None, Some(32), "N° Immatriculation Assuré")),
            an("CLE_N_IMMATRICULATION", 52, 2),
            num("RANG_BENEFICIAIRE", 54, 3)
                .rule(req(ConstraintKind::Numeric, Some(3), Some(3), "Rang Bénéficiaire")),
            an("N_ENTREE", 57, 9)
                .mandatory()
                .rule(req(ConstraintKind::Text, None, Some(9), "N° Entrée")),
            an("N_IMMATRICULATION_INDIVIDUEL", 66, 32),
            an("CLE_N_IMMATRICULATION_INDIVIDUEL", 98, 2),
            date("DATE_DEBUT_SEJOUR", 100, 8)
                .mandatory()
                .rule(req(ConstraintKind::Date, Some(8), Some(8), "Date Début Séjour (ddMMyyyy)")),
            an("CODE_UCD", 108, 7)
                .mandatory()
                .rule(req(ConstraintKind::Text, None, Some(7), "Code UCD")),
            dec("COEFF_FRACTIONNEMENT", 115, 5),
            dec("PRIX_ACHAT_UNITAIRE", 120, 7),
            dec("MONTANT_UNITAIRE_ECART", 127, 7),
            dec("MONTANT_TOTAL_ECART", 134, 7),
            num("QUANTITE", 141, 3)
                .mandatory()
                .rule(req(ConstraintKind::Numeric, None, Some(3), "Quantité")),
            dec("TOTAL_FACTURE", 144, 7),
            an("INDICATION", 151, 7),
            an("NUMERO_H", 158, 5),
        ],
    )
}

fn record_m() -> RecordSchema {
    let mut fields = vec![
        an("TYPE_ENREGISTREMENT", 1, 1),
        an("N_FINESS_EPMSI", 2, 9)
            .mandatory()
            .rule(req(ConstraintKind::Numeric, Some(9), Some(9), "FINESS EPMSI")),
        an("N_FINESS_GEOGRAPHIQUE", 11, 9)
            .mandatory()
            .rule(req(ConstraintKind::Numeric, Some(9), Some(9), "FINESS Géographique")),
        an("N_IMMATRICULATION_ASSURE", 20, 32)
            .mandatory()
            .rule(req(ConstraintKind::Text, None, Some(32), "N° Immatriculation Assuré")),
        an("CLE_N_IMMATRICULATION", 52, 2),
        num("RANG_BENEFICIAIRE", 54, 3)
            .rule(req(ConstraintKind::Numeric, Some(3), Some(3), "Rang Bénéficiaire")),
        an("N_ENTREE", 57, 9)
            .mandatory()
            .rule(req(ConstraintKind::Text, None, Some(9), "N° Entrée")),
        an("N_IMMATRICULATION_INDIVIDUEL", 66, 32),
        an("CLE_N_IMMATRICULATION_INDIVIDUEL", 98, 2),
        an("MODE_TRAITEMENT", 100, 2),
        an("DISCIPLINE_PRESTATION", 102, 3),
        date("DATE_SOINS", 105, 8)
            .mandatory()
            .rule(req(ConstraintKind::Date, Some(8), Some(8), "Date Soins (ddMMyyyy)")),
        an("CODE_CCAM", 113, 13)
            .mandatory()
            .rule(req(ConstraintKind::Text, None, Some(13), "Code CCAM")),
        an("EXTENSION_DOCUMENTAIRE", 126, 1),
        an("ACTIVITE", 127, 1),
        an("PHASE", 128, 1),
        an("MODIFICATEUR1", 129, 1),
        an("MODIFICATEUR2", 130, 1),
        an("MODIFICATEUR3", 131, 1),
        an("MODIFICATEUR4", 132, 1),
        an("CODE_ASSOCIATION_ACTE", 133, 1),
        an("CODE_REMBOURSEMENT", 134, 1),
    ];
    const TOOTH_FIELDS: [&str; 16] = [
        "NUM_DENT1",
        "NUM_DENT2",
        "NUM_DENT3",
        "NUM_DENT4",
        "NUM_DENT5",
        "NUM_DENT6",
        "NUM_DENT7",
        "NUM_DENT8",
        "NUM_DENT9",
        "NUM_DENT10",
        "NUM_DENT11",
        "NUM_DENT12",
        "NUM_DENT13",
        "NUM_DENT14",
        "NUM_DENT15",
        "NUM_DENT16",
    ];
    for (i, name) in TOOTH_FIELDS.into_iter().enumerate() {
        fields.push(num(name, 135 + 2 * i as u16, 2));
    }
    fields.push(an("NUMERO_M", 167, 5));
    RecordSchema::new(RecordType::M, fields)
}

fn record_p() -> RecordSchema {
    RecordSchema::new(
        RecordType::P,
        vec![
            an("TYPE_ENREGISTREMENT", 1, 1),
            an("N_FINESS_EPMSI", 2, 9)
                .mandatory()
                .rule(req(ConstraintKind::Numeric, Some(9), Some(9), "FINESS EPMSI")),
            an("N_FINESS_GEOGRAPHIQUE", 11, 9)
                .mandatory()
                .rule(req(ConstraintKind::Numeric, Some(9), Some(9), "FINESS Géographique")),
            an("N_IMMATRICULATION_ASSURE", 20, 32)
                .mandatory()
                .rule(req(ConstraintKind::Text, None, Some(32), "N° Immatriculation Assuré")),
            an("CLE_N_IMMATRICULATION", 52, 2),
            num("RANG_BENEFICIAIRE", 54, 3)
                .rule(req(ConstraintKind::Numeric, Some(3), Some(3), "Rang Bénéficiaire")),
            an("N_ENTREE", 57, 9)
                .mandatory()
                .rule(req(ConstraintKind::Text, None, Some(9), "N° Entrée")),
            an("N_IMMATRICULATION_INDIVIDUEL", 66, 32),
            an("CLE_N_IMMATRICULATION_INDIVIDUEL", 98, 2),
            date("DATE_DEBUT_SEJOUR", 100, 8)
                .mandatory()
                .rule(req(ConstraintKind::Date, Some(8), Some(8), "Date Début Séjour (ddMMyyyy)")),
            an("CODE_REFERENCE_LPP", 108, 13)
                .mandatory()
                .rule(req(ConstraintKind::Text, None, Some(13), "Code Référence LPP")),
            num("QUANTITE", 121, 2)
                .mandatory()
                .rule(req(ConstraintKind::Numeric, None, Some(2), "Quantité")),
            dec("TARIF_REFERENCE_LPP", 123, 7),
            dec("MONTANT_TOTAL_FACTURE", 130, 7),
            dec("PRIX_ACHAT_UNITAIRE", 137, 7),
            dec("MONTANT_UNITAIRE_ECART", 144, 7),
            dec("MONTANT_TOTAL_ECART", 151, 7),
            an("NUMERO_P", 158, 5),
        ],
    )
}

fn record_l() -> RecordSchema {
    let mut fields = vec![
        an("TYPE_ENREGISTREMENT", 1, 1),
        an("N_FINESS_EPMSI", 2, 9)
            .mandatory()
            .rule(req(ConstraintKind::Numeric, Some(9), Some(9), "FINESS EPMSI")),
        an("N_FINESS_GEOGRAPHIQUE", 11, 9)
            .mandatory()
            .rule(req(ConstraintKind::Numeric, Some(9), Some(9), "FINESS Géographique")),
        an("N_IMMATRICULATION_ASSURE", 20, 32)
            .mandatory()
            .rule(req(ConstraintKind::Text, None, Some(32), "N° Immatriculation Assuré")),
        an("CLE_N_IMMATRICULATION", 52, 2),
        num("RANG_BENEFICIAIRE", 54, 3)
            .rule(req(ConstraintKind::Numeric, Some(3), Some(3), "Rang Bénéficiaire")),
        an("N_ENTREE", 57, 9)
            .mandatory()
            .rule(req(ConstraintKind::Text, None, Some(9), "N° Entrée")),
        an("N_IMMATRICULATION_INDIVIDUEL", 66, 32),
        an("CLE_N_IMMATRICULATION_INDIVIDUEL", 98, 2),
        an("MODE_TRAITEMENT", 100, 2),
        an("DISCIPLINE_PRESTATION", 102, 3),
    ];
    // Five dated act slots; only the first is mandatory.
    const ACT_LABELS: [(&str, &str, &str, &str, &str, &str); 5] = [
        ("DATE_ACTE1", "QUANTITE_ACTE1", "CODE_ACTE1", "Date Acte 1 (ddMMyyyy)", "Quantité Acte 1", "Code Acte 1"),
        ("DATE_ACTE2", "QUANTITE_ACTE2", "CODE_ACTE2", "Date Acte 2 (ddMMyyyy)", "Quantité Acte 2", "Code Acte 2"),
        ("DATE_ACTE3", "QUANTITE_ACTE3", "CODE_ACTE3", "Date Acte 3 (ddMMyyyy)", "Quantité Acte 3", "Code Acte 3"),
        ("DATE_ACTE4", "QUANTITE_ACTE4", "CODE_ACTE4", "Date Acte 4 (ddMMyyyy)", "Quantité Acte 4", "Code Acte 4"),
        ("DATE_ACTE5", "QUANTITE_ACTE5", "CODE_ACTE5", "Date Acte 5 (ddMMyyyy)", "Quantité Acte 5", "Code Acte 5"),
    ];
    for (i, (date_name, qty_name, code_name, date_label, qty_label, code_label)) in
        ACT_LABELS.into_iter().enumerate()
    {
        let start = 105 + 18 * i as u16;
        let (date_rule, qty_rule, code_rule) = if i == 0 {
            (
                req(ConstraintKind::Date, Some(8), Some(8), date_label),
                req(ConstraintKind::Numeric, None, Some(2), qty_label),
                req(ConstraintKind::Text, None, Some(8), code_label),
            )
        } else {
            (
                opt(ConstraintKind::Date, Some(8), Some(8), date_label),
                opt(ConstraintKind::Numeric, None, Some(2), qty_label),
                opt(ConstraintKind::Text, None, Some(8), code_label),
            )
        };
        let mut date_field = date(date_name, start, 8).rule(date_rule);
        let mut qty_field = num(qty_name, start + 8, 2).rule(qty_rule);
        let mut code_field = an(code_name, start + 10, 8).rule(code_rule);
        if i == 0 {
            date_field = date_field.mandatory();
            qty_field = qty_field.mandatory();
            code_field = code_field.mandatory();
        }
        fields.push(date_field);
        fields.push(qty_field);
        fields.push(code_field);
    }
    RecordSchema::new(RecordType::L, fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_record_types_are_defined() {
        let schema = build();
        for record_type in RecordType::ALL {
            assert!(!schema.record(record_type).fields().is_empty());
        }
    }

    #[test]
    fn field_counts_match_the_2017_layout() {
        let schema = build();
        assert_eq!(schema.record(RecordType::A).fields().len(), 34);
        assert_eq!(schema.record(RecordType::B).fields().len(), 28);
        assert_eq!(schema.record(RecordType::C).fields().len(), 28);
        assert_eq!(schema.record(RecordType::H).fields().len(), 19);
        assert_eq!(schema.record(RecordType::M).fields().len(), 39);
        assert_eq!(schema.record(RecordType::P).fields().len(), 18);
        assert_eq!(schema.record(RecordType::L).fields().len(), 26);
    }

    #[test]
    fn offsets_tile_each_record_without_gaps() {
        let schema = build();
        for record in schema.iter() {
            let mut expected_start = 1u16;
            for field in record.fields() {
                assert_eq!(
                    field.start, expected_start,
                    "field {} of record {} starts at {} instead of {}",
                    field.name, record.record_type, field.start, expected_start
                );
                expected_start += field.length;
            }
        }
    }

    #[test]
    fn headers_follow_layout_order() {
        let schema = build();
        let headers = schema.record(RecordType::B).headers();
        assert_eq!(headers[0], "TYPE_ENREGISTREMENT");
        assert_eq!(headers[14], "CODE_ACTE");
        assert_eq!(*headers.last().unwrap(), "NUMERO_B");
    }

    #[test]
    fn mandatory_sets_match_the_import_rules() {
        let schema = build();
        let mandatory: Vec<&str> = schema.record(RecordType::A).mandatory_fields().collect();
        assert_eq!(
            mandatory,
            vec![
                "N_FINESS_EPMSI",
                "N_FINESS_GEOGRAPHIQUE",
                "N_IMMATRICULATION_ASSURE",
                "N_ENTREE",
                "DATE_NAISSANCE",
                "DATE_ENTREE",
                "DATE_SORTIE",
            ]
        );
        let l_mandatory: Vec<&str> = schema.record(RecordType::L).mandatory_fields().collect();
        assert!(l_mandatory.contains(&"DATE_ACTE1"));
        assert!(!l_mandatory.contains(&"DATE_ACTE2"));
    }

    #[test]
    fn constraints_keep_their_own_semantics() {
        let schema = build();
        let record = schema.record(RecordType::B);
        let quantity = record.constraint("QUANTITE").unwrap();
        assert!(quantity.mandatory);
        assert_eq!(quantity.kind, ConstraintKind::Numeric);
        assert_eq!(quantity.max_length, Some(3));
        // RANG_BENEFICIAIRE is rule-mandatory but not import-mandatory.
        let rang = record.field("RANG_BENEFICIAIRE").unwrap();
        assert!(!rang.mandatory);
        assert!(rang.constraint.unwrap().mandatory);
        // Filler fields carry no business constraint.
        assert!(record.constraint("FILLER").is_none());
    }
}
