use serde::Serialize;

/// One schedule-update instruction extracted from an HORAIRES workbook.
///
/// Dates are already normalized to `YYYYMMDD` by the ingestor; the update is
/// not yet applied to any dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoraireUpdate {
    /// 1-based row number in the source sheet, for error reporting.
    pub source_row: usize,
    /// Insured-person id (`N_IMMATRICULATION_ASSURE`).
    pub insured_id: String,
    /// Birth date of the insured (`DATE_NAISSANCE`), `YYYYMMDD`.
    pub birth_date: String,
    /// Date of care (`DATE_SOINS`), `YYYYMMDD`.
    pub care_date: String,
    /// Act code (`CODE_ACTE`).
    pub act_code: String,
    /// Schedule value to merge into the matched record.
    pub schedule: String,
}
