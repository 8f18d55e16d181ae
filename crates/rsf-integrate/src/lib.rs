//! Integration of externally supplied corrections into a decoded dataset.
//!
//! Two merge operations exist: schedule updates, which set one field on an
//! already-present billed line, and record imports, which replace or append
//! whole records matched by a per-type composite business key. Both mutate
//! the caller's [`rsf_model::Dataset`] in place and return an
//! [`rsf_model::IntegrationReport`].

mod records;
mod schedule;

pub use records::apply_records;
pub use schedule::apply_schedule;
