//! Property tests for the fixed-width decoder.

use proptest::prelude::*;

use rsf_ingest::decode_rsf;
use rsf_model::RecordType;

/// Builds one line by writing a value of exactly `length` characters into
/// every field slot of the given record type.
fn build_full_line(record_type: RecordType, values: &[String]) -> String {
    let schema = rsf_standards::year(2017).unwrap();
    let fields = schema.record(record_type).fields();
    assert_eq!(fields.len(), values.len());

    let width: usize = fields
        .iter()
        .map(|f| usize::from(f.start) - 1 + usize::from(f.length))
        .max()
        .unwrap();
    let mut line = vec![b' '; width];
    line[0] = record_type.as_char() as u8;
    for (field, value) in fields.iter().zip(values) {
        let start = usize::from(field.start) - 1;
        line[start..start + value.len()].copy_from_slice(value.as_bytes());
    }
    String::from_utf8(line).unwrap()
}

fn record_type_strategy() -> impl Strategy<Value = RecordType> {
    prop::sample::select(RecordType::ALL.to_vec())
}

fn values_strategy(record_type: RecordType) -> impl Strategy<Value = Vec<String>> {
    let schema = rsf_standards::year(2017).unwrap();
    let lengths: Vec<usize> = schema
        .record(record_type)
        .fields()
        .iter()
        .map(|f| usize::from(f.length))
        .collect();
    lengths
        .into_iter()
        .map(|len| {
            // Uppercase alphanumerics avoid whitespace so trimming is a no-op
            // and the round trip stays byte-exact.
            proptest::string::string_regex(&format!("[A-Z0-9]{{{len}}}")).unwrap()
        })
        .collect::<Vec<_>>()
}

proptest! {
    /// Decoding a full-width line reproduces every field byte-for-byte.
    #[test]
    fn offset_length_round_trip(
        (record_type, mut values) in record_type_strategy()
            .prop_flat_map(|rt| values_strategy(rt).prop_map(move |vs| (rt, vs)))
    ) {
        // The first slot is the tag itself.
        values[0] = record_type.as_char().to_string();
        let line = build_full_line(record_type, &values);
        let dataset = decode_rsf(line.as_bytes(), 2017).unwrap();

        prop_assert_eq!(dataset.len(), 1);
        let record = &dataset.records()[0];
        prop_assert_eq!(record.record_type, record_type);
        let schema = rsf_standards::year(2017).unwrap();
        for (field, expected) in schema.record(record_type).fields().iter().zip(&values) {
            prop_assert_eq!(record.field(field.name), expected.as_str());
        }
    }

    /// Truncating a line anywhere never panics, and fields that start past
    /// the cut decode to the empty string.
    #[test]
    fn truncated_lines_decode_to_empty_fields(
        (record_type, mut values) in record_type_strategy()
            .prop_flat_map(|rt| values_strategy(rt).prop_map(move |vs| (rt, vs))),
        cut in 1usize..100,
    ) {
        values[0] = record_type.as_char().to_string();
        let line = build_full_line(record_type, &values);
        let cut = cut.min(line.len());
        let truncated = &line[..cut];
        let dataset = decode_rsf(truncated.as_bytes(), 2017).unwrap();

        prop_assert_eq!(dataset.len(), 1);
        let record = &dataset.records()[0];
        let schema = rsf_standards::year(2017).unwrap();
        for field in schema.record(record_type).fields() {
            let start = usize::from(field.start) - 1;
            if start >= cut {
                prop_assert_eq!(record.field(field.name), "");
            }
        }
    }
}
