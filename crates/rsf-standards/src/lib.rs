//! Versioned RSF record layouts.
//!
//! One table per (year, record type) drives everything downstream: byte
//! offsets for fixed-width decoding, column order and value kinds for
//! spreadsheet ingestion, mandatory sets, and the hand-authored business
//! constraints applied by the rule engine. Keeping a single ordered field
//! list per record type is what prevents the two ingestion paths from
//! drifting apart.
//!
//! The registry is built once as static data and is read-only afterwards;
//! sharing it across threads is safe.

mod error;
pub mod fields;
pub mod horaire;
mod registry;
mod schema;
mod year2017;

pub use error::StandardsError;
pub use registry::{year, years};
pub use schema::{
    ConstraintKind, FieldConstraint, FieldSchema, RecordSchema, ValueKind, YearSchema,
};
