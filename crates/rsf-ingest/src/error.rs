use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// The input stream failed mid-read; `line` is the last line that was
    /// read successfully.
    #[error("failed to read RSF input after line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Standards(#[from] rsf_standards::StandardsError),
}
