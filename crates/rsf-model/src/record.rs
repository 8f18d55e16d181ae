use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The single-character record tags defined by the RSF format.
///
/// Each tag denotes one business record kind: `A` is the stay header, the
/// other six are the billed-line variants that depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// Stay/admission header.
    A,
    /// Billed act line.
    B,
    /// Billed act line (honoraire variant).
    C,
    /// Pharmacy (UCD) line.
    H,
    /// CCAM act line (dental acts carry tooth numbers).
    M,
    /// Device (LPP) line.
    P,
    /// Multi-act line (up to five dated acts).
    L,
}

/// Raised when a character does not name any known record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown RSF record type '{0}'")]
pub struct UnknownRecordType(pub char);

impl RecordType {
    /// All record types, in canonical tag order.
    pub const ALL: [RecordType; 7] = [
        RecordType::A,
        RecordType::B,
        RecordType::C,
        RecordType::H,
        RecordType::M,
        RecordType::P,
        RecordType::L,
    ];

    pub fn from_char(tag: char) -> Option<Self> {
        match tag {
            'A' => Some(RecordType::A),
            'B' => Some(RecordType::B),
            'C' => Some(RecordType::C),
            'H' => Some(RecordType::H),
            'M' => Some(RecordType::M),
            'P' => Some(RecordType::P),
            'L' => Some(RecordType::L),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            RecordType::A => 'A',
            RecordType::B => 'B',
            RecordType::C => 'C',
            RecordType::H => 'H',
            RecordType::M => 'M',
            RecordType::P => 'P',
            RecordType::L => 'L',
        }
    }
}

impl TryFrom<char> for RecordType {
    type Error = UnknownRecordType;

    fn try_from(tag: char) -> Result<Self, UnknownRecordType> {
        Self::from_char(tag).ok_or(UnknownRecordType(tag))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One decoded RSF line (or spreadsheet row).
///
/// Field values are always trimmed strings; a field that was absent or ran
/// past the end of its source line holds the empty string. `parent` is the
/// dataset index of the `A` record whose block this record was decoded in,
/// when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub record_type: RecordType,
    /// 1-based line number in the source file, or row number in the source
    /// sheet for spreadsheet-ingested records.
    pub line_number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
    pub fields: IndexMap<String, String>,
}

impl Record {
    pub fn new(record_type: RecordType, line_number: usize) -> Self {
        Self {
            record_type,
            line_number,
            parent: None,
            fields: IndexMap::new(),
        }
    }

    /// Value of the named field, or `""` when the field is absent.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_round_trips_through_char() {
        for record_type in RecordType::ALL {
            assert_eq!(
                RecordType::from_char(record_type.as_char()),
                Some(record_type)
            );
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(RecordType::from_char('Z'), None);
        assert_eq!(RecordType::try_from('x'), Err(UnknownRecordType('x')));
    }

    #[test]
    fn absent_field_reads_as_empty() {
        let mut record = Record::new(RecordType::B, 3);
        record.set_field("CODE_ACTE", "C0051");
        assert_eq!(record.field("CODE_ACTE"), "C0051");
        assert_eq!(record.field("QUANTITE"), "");
    }
}
