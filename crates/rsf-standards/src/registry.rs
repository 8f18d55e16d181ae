use std::sync::LazyLock;

use crate::error::StandardsError;
use crate::schema::YearSchema;
use crate::year2017;

static YEAR_2017: LazyLock<YearSchema> = LazyLock::new(year2017::build);

/// Exchange-format years with registered layouts.
pub fn years() -> &'static [u16] {
    &[2017]
}

/// Layouts for the given year.
///
/// Lookup by an unregistered year is a hard failure; callers must not guess
/// a fallback layout.
pub fn year(year: u16) -> Result<&'static YearSchema, StandardsError> {
    match year {
        2017 => Ok(&YEAR_2017),
        other => Err(StandardsError::UnknownYear(other)),
    }
}
