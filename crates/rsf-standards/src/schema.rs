use std::collections::BTreeMap;

use serde::Serialize;

use rsf_model::RecordType;

/// Content class of a field, used by spreadsheet ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Any characters.
    Alphanumeric,
    /// Digits only.
    Numeric,
    /// Optional sign, digits, optional fractional part (`.` or `,`).
    NumericDecimal,
    /// Tolerant date grammar, normalized to `YYYYMMDD`.
    Date,
}

/// Content class used by the rule engine's hand-authored constraints.
///
/// These predate the [`ValueKind`] table and intentionally keep their own
/// semantics: `Date` here means `ddMMyyyy` under strict calendar rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    Text,
    Numeric,
    Decimal,
    Date,
    Boolean,
}

/// Hand-authored business constraint for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldConstraint {
    pub mandatory: bool,
    pub kind: ConstraintKind,
    pub min_length: Option<u16>,
    pub max_length: Option<u16>,
    pub regex: Option<&'static str>,
    /// Human label used in error messages.
    pub label: &'static str,
}

impl FieldConstraint {
    pub const fn required(
        kind: ConstraintKind,
        min_length: Option<u16>,
        max_length: Option<u16>,
        label: &'static str,
    ) -> Self {
        Self {
            mandatory: true,
            kind,
            min_length,
            max_length,
            regex: None,
            label,
        }
    }

    pub const fn optional(
        kind: ConstraintKind,
        min_length: Option<u16>,
        max_length: Option<u16>,
        label: &'static str,
    ) -> Self {
        Self {
            mandatory: false,
            kind,
            min_length,
            max_length,
            regex: None,
            label,
        }
    }
}

/// One field of a record layout.
///
/// `start` is 1-based; `start`/`length` position the field on a fixed-width
/// line, and the same entry order defines spreadsheet column order. A zero
/// `length` would mean "no exact-length check" during ingestion; the 2017
/// tables have none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    pub name: &'static str,
    pub start: u16,
    pub length: u16,
    pub kind: ValueKind,
    /// Whether spreadsheet ingestion requires a non-empty value.
    pub mandatory: bool,
    /// Business constraint applied by the rule engine, when one exists.
    pub constraint: Option<FieldConstraint>,
}

impl FieldSchema {
    pub(crate) fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub(crate) fn rule(mut self, constraint: FieldConstraint) -> Self {
        self.constraint = Some(constraint);
        self
    }
}

/// Shorthand constructor used by the year tables.
pub(crate) fn field(name: &'static str, start: u16, length: u16, kind: ValueKind) -> FieldSchema {
    FieldSchema {
        name,
        start,
        length,
        kind,
        mandatory: false,
        constraint: None,
    }
}

/// Ordered field layout of one record type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSchema {
    pub record_type: RecordType,
    fields: Vec<FieldSchema>,
}

impl RecordSchema {
    pub(crate) fn new(record_type: RecordType, fields: Vec<FieldSchema>) -> Self {
        Self {
            record_type,
            fields,
        }
    }

    /// Fields in layout order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Expected spreadsheet header row: the field names, in layout order.
    pub fn headers(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Names of fields that spreadsheet ingestion requires non-empty.
    pub fn mandatory_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|f| f.mandatory)
            .map(|f| f.name)
    }

    /// Value kind and exact expected length for ingest-time checks.
    pub fn value_spec(&self, name: &str) -> Option<(ValueKind, u16)> {
        self.field(name).map(|f| (f.kind, f.length))
    }

    /// Hand-authored rule-engine constraint for the named field.
    pub fn constraint(&self, name: &str) -> Option<&FieldConstraint> {
        self.field(name).and_then(|f| f.constraint.as_ref())
    }
}

/// All record layouts for one exchange-format year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSchema {
    pub year: u16,
    records: BTreeMap<RecordType, RecordSchema>,
}

impl YearSchema {
    pub(crate) fn new(year: u16, records: Vec<RecordSchema>) -> Self {
        let records = records
            .into_iter()
            .map(|schema| (schema.record_type, schema))
            .collect();
        Self { year, records }
    }

    /// Layout of the given record type.
    ///
    /// Every registered year carries all record types, so this cannot miss.
    pub fn record(&self, record_type: RecordType) -> &RecordSchema {
        &self.records[&record_type]
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordSchema> {
        self.records.values()
    }
}
