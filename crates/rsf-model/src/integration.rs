use serde::Serialize;

/// Outcome of merging externally supplied updates into a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrationReport {
    /// Number of incoming updates/records examined, valid or not.
    pub total_processed: usize,
    /// Records appended to the dataset.
    pub added: usize,
    /// Records updated or replaced in place.
    pub updated: usize,
    /// One message per update that could not be applied.
    pub errors: Vec<String>,
}

impl IntegrationReport {
    pub fn new(total_processed: usize) -> Self {
        Self {
            total_processed,
            ..Self::default()
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
