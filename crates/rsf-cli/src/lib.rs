//! Library surface of the RSF CLI: logging bootstrap shared with tests.

pub mod logging;
