//! Core data model for the RSF billing exchange format.
//!
//! Everything in this crate is plain data: decoded records, the ordered
//! dataset they live in, and the report types produced by validation and
//! integration. No I/O happens here.

mod dataset;
mod integration;
mod record;
mod update;
mod validation;

pub use dataset::Dataset;
pub use integration::IntegrationReport;
pub use record::{Record, RecordType, UnknownRecordType};
pub use update::HoraireUpdate;
pub use validation::{ErrorKind, ValidationError, ValidationReport};
