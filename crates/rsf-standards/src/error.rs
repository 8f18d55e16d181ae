use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StandardsError {
    #[error("no RSF field mappings registered for year {0}")]
    UnknownYear(u16),
}
