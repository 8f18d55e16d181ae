use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::record::{Record, RecordType};

/// The decoded form of one RSF file.
///
/// Records are stored in source order; a derived per-type index gives the
/// cheap type-bucket access the validation rules need, and each non-`A`
/// record keeps a link to the `A` record whose block it appeared in. Both
/// views stay consistent because all mutation goes through this type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    records: Vec<Record>,
    #[serde(skip)]
    index: BTreeMap<RecordType, Vec<usize>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns its dataset index.
    pub fn push(&mut self, record: Record) -> usize {
        let idx = self.records.len();
        self.index.entry(record.record_type).or_default().push(idx);
        self.records.push(record);
        idx
    }

    /// All records, in original source order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, idx: usize) -> Option<&Record> {
        self.records.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Record> {
        self.records.get_mut(idx)
    }

    /// Dataset indices of all records of the given type, in source order.
    pub fn indices_of(&self, record_type: RecordType) -> &[usize] {
        self.index
            .get(&record_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Records of the given type, in source order.
    pub fn of_type(&self, record_type: RecordType) -> impl Iterator<Item = &Record> {
        self.indices_of(record_type).iter().map(|&i| &self.records[i])
    }

    pub fn count_of(&self, record_type: RecordType) -> usize {
        self.indices_of(record_type).len()
    }

    pub fn has_type(&self, record_type: RecordType) -> bool {
        self.count_of(record_type) > 0
    }

    /// Record types present in the dataset, in canonical tag order.
    pub fn record_types(&self) -> impl Iterator<Item = RecordType> + '_ {
        RecordType::ALL
            .into_iter()
            .filter(|record_type| self.has_type(*record_type))
    }

    /// Replaces the field content of the record at `idx`, keeping its
    /// structural metadata (type, source line, parent link) intact.
    ///
    /// Returns false when `idx` is out of bounds.
    pub fn replace_fields(&mut self, idx: usize, fields: IndexMap<String, String>) -> bool {
        match self.records.get_mut(idx) {
            Some(record) => {
                record.fields = fields;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
