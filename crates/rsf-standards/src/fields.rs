//! Canonical field names shared across record types.
//!
//! Only the fields referenced by cross-record rules and the merge engine are
//! named here; per-type fields live in the year tables.

pub const TYPE_ENREGISTREMENT: &str = "TYPE_ENREGISTREMENT";
pub const N_FINESS_EPMSI: &str = "N_FINESS_EPMSI";
pub const N_FINESS_GEOGRAPHIQUE: &str = "N_FINESS_GEOGRAPHIQUE";
pub const N_IMMATRICULATION_ASSURE: &str = "N_IMMATRICULATION_ASSURE";
pub const N_ENTREE: &str = "N_ENTREE";
pub const DATE_NAISSANCE: &str = "DATE_NAISSANCE";
pub const DATE_SOINS: &str = "DATE_SOINS";
pub const CODE_ACTE: &str = "CODE_ACTE";
pub const CODE_CCAM: &str = "CODE_CCAM";
pub const CODE_UCD: &str = "CODE_UCD";
pub const CODE_REFERENCE_LPP: &str = "CODE_REFERENCE_LPP";
pub const DATE_DEBUT_SEJOUR: &str = "DATE_DEBUT_SEJOUR";
pub const DATE_ACTE1: &str = "DATE_ACTE1";
pub const CODE_ACTE1: &str = "CODE_ACTE1";

/// Synthetic field written by schedule-update integration; not part of any
/// fixed-width layout.
pub const HORAIRE: &str = "horaire";
