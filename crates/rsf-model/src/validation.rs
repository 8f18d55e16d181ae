use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Line number used for errors that apply to the whole file.
pub const FILE_LEVEL: i64 = 0;
/// Line number used when a validation rule itself failed to run.
pub const RULE_FAILURE: i64 = -1;

/// Category of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Field content is missing or malformed.
    Data,
    /// Required records are absent or misplaced.
    Structural,
    /// Identifier mismatch across related records.
    Sequence,
    /// A record type is present without its required companion type.
    Dependency,
    /// Archive or spreadsheet naming/selection failure.
    FileName,
    /// Header or shape mismatch.
    Format,
    /// Internal rule-execution failure.
    System,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Data => "data",
            ErrorKind::Structural => "structural",
            ErrorKind::Sequence => "sequence",
            ErrorKind::Dependency => "dependency",
            ErrorKind::FileName => "file name",
            ErrorKind::Format => "format",
            ErrorKind::System => "system",
        };
        f.write_str(name)
    }
}

/// One validation finding.
///
/// `line` is 1-based; [`FILE_LEVEL`] marks file-level findings and
/// [`RULE_FAILURE`] marks a rule that could not be executed at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub line: i64,
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl ValidationError {
    pub fn new(line: i64, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            field: None,
            message: message.into(),
            snippet: None,
        }
    }

    pub fn file_level(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(FILE_LEVEL, kind, message)
    }

    /// Reports that the named rule failed to execute.
    pub fn rule_failure(rule: &str, message: impl Into<String>) -> Self {
        Self::new(RULE_FAILURE, ErrorKind::System, message.into()).with_field(rule)
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}, {} error", self.line, self.kind)?;
        if let Some(field) = &self.field {
            write!(f, ", field {field}")?;
        }
        write!(f, "] {}", self.message)?;
        if let Some(snippet) = &self.snippet {
            write!(f, " | '{snippet}'")?;
        }
        Ok(())
    }
}

/// Ordered collection of validation findings for one input file.
///
/// Errors are kept exactly as reported: no deduplication, no reordering.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_file(file_name: impl Into<String>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            errors: Vec::new(),
        }
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        self.errors.extend(errors);
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Error counts grouped by kind, in kind order.
    pub fn counts_by_kind(&self) -> BTreeMap<ErrorKind, usize> {
        let mut counts = BTreeMap::new();
        for error in &self.errors {
            *counts.entry(error.kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn summary(&self) -> String {
        if self.errors.is_empty() {
            return "validation successful: no errors found".to_string();
        }
        let breakdown = self
            .counts_by_kind()
            .into_iter()
            .map(|(kind, count)| format!("{count} {kind}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "validation failed: {} error(s) found ({breakdown})",
            self.errors.len()
        )
    }
}
