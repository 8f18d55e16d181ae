//! Fixed-width RSF text decoder.

use std::io::BufRead;

use tracing::debug;

use rsf_model::{Dataset, Record, RecordType};

use crate::error::IngestError;

/// Decodes a line-oriented fixed-width RSF stream into a [`Dataset`].
///
/// The first character of each non-blank line selects the record type; lines
/// with an unknown tag are skipped, not reported. Field extraction clamps to
/// the actual line length, so short lines decode trailing fields to the
/// empty string rather than failing — content validation is the rule
/// engine's job, not the decoder's. Non-`A` records are linked to the most
/// recent `A` record so block-structure rules can be evaluated later.
///
/// Decoding aborts only on an unregistered year or an I/O failure on the
/// stream; the error carries the last successfully read line number.
pub fn decode_rsf<R: BufRead>(reader: R, year: u16) -> Result<Dataset, IngestError> {
    let schema = rsf_standards::year(year)?;

    let mut dataset = Dataset::new();
    let mut current_block: Option<usize> = None;
    let mut line_number = 0usize;

    for line in reader.lines() {
        let line = line.map_err(|source| IngestError::Io {
            line: line_number,
            source,
        })?;
        line_number += 1;

        if line.trim().is_empty() {
            continue;
        }

        let tag = line.chars().next().unwrap_or(' ');
        let Some(record_type) = RecordType::from_char(tag) else {
            debug!(line = line_number, tag = %tag, "skipping line with unmapped record type");
            continue;
        };

        let mut record = Record::new(record_type, line_number);
        let bytes = line.as_bytes();
        for field in schema.record(record_type).fields() {
            let start = usize::from(field.start) - 1;
            let end = start + usize::from(field.length);
            let value = if start >= bytes.len() {
                String::new()
            } else {
                let end = end.min(bytes.len());
                String::from_utf8_lossy(&bytes[start..end]).trim().to_string()
            };
            record.set_field(field.name, value);
        }

        if record_type == RecordType::A {
            let idx = dataset.push(record);
            current_block = Some(idx);
        } else {
            record.parent = current_block;
            dataset.push(record);
        }
    }

    Ok(dataset)
}
