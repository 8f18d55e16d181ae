//! Spreadsheet cell to string conversion.

use calamine::Data;

/// Renders one cell the way the import format expects.
///
/// Strings are trimmed; date-formatted numerics render as `YYYYMMDD`; other
/// numerics use plain locale-neutral formatting (no scientific notation, no
/// decimals on integral values); booleans render `true`/`false`; error cells
/// render as a literal `#ERROR#` marker; blanks render empty. Formula cells
/// arrive here already resolved to their cached result value.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.trim().to_string(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => format_plain_number(*value),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => match value.as_datetime() {
            Some(datetime) => datetime.format("%Y%m%d").to_string(),
            None => format_plain_number(value.as_f64()),
        },
        Data::DateTimeIso(value) | Data::DurationIso(value) => value.trim().to_string(),
        Data::Error(_) => "#ERROR#".to_string(),
    }
}

fn format_plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
