//! Expected shape of HORAIRES schedule-update workbooks.

/// Header row of a schedule-update sheet, in exact column order.
pub const EXPECTED_HEADERS: [&str; 5] = [
    "num_immatriculation",
    "date_naissance",
    "date_soins",
    "code_acte",
    "horaire",
];

/// Required length of the `num_immatriculation` column.
pub const NUM_IMMATRICULATION_LEN: usize = 13;

/// Required length of the `code_acte` column.
pub const CODE_ACTE_LEN: usize = 5;
