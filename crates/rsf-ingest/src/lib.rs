//! RSF ingestion.
//!
//! Two paths produce the same canonical [`rsf_model::Dataset`]: the
//! fixed-width text decoder ([`decode_rsf`]) and the archive/spreadsheet
//! ingestor ([`parse_archive`]). Both work from in-memory bytes handed in by
//! the caller; nothing here opens files or sockets.

mod cell;
mod dates;
mod error;
mod excel;
mod fixed;

pub use cell::cell_to_string;
pub use dates::{is_valid_date, normalize_date};
pub use error::IngestError;
pub use excel::{ExcelImport, ImportPayload, parse_archive};
pub use fixed::decode_rsf;
