use thiserror::Error;
use tracing::debug;

use rsf_model::{Dataset, ValidationError, ValidationReport};
use rsf_standards::{StandardsError, YearSchema};

use crate::rules;

/// The closed set of validation rules.
///
/// No new rule kinds appear without a code change, so rules are a tagged
/// variant set dispatched by `match` rather than an open trait: that keeps
/// the failure-to-system-error wrapper uniform and the registration order
/// explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Per-field constraints (mandatory, type, length bounds, pattern).
    Field,
    /// The file must contain at least one B or C record.
    ExpectedLineCount,
    /// `N_ENTREE` grouping: key presence, insured-id consistency, B/C
    /// presence, L/M-requires-C inside the group.
    Sequence,
    /// File-wide and per-group L/M-requires-C dependency.
    Dependency,
    /// Original file order: first record is A, M/L preceded by a C within
    /// the same A block.
    LineOrder,
    /// Child records must carry their parent A record's key fields.
    KeyFieldMatch,
}

impl Rule {
    /// Default registration order.
    pub const DEFAULT: [Rule; 6] = [
        Rule::Field,
        Rule::ExpectedLineCount,
        Rule::Sequence,
        Rule::Dependency,
        Rule::LineOrder,
        Rule::KeyFieldMatch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rule::Field => "FieldRule",
            Rule::ExpectedLineCount => "ExpectedLineCountRule",
            Rule::Sequence => "SequenceRule",
            Rule::Dependency => "DependencyRule",
            Rule::LineOrder => "LineOrderRule",
            Rule::KeyFieldMatch => "KeyFieldMatchRule",
        }
    }
}

/// Why a rule could not be executed at all.
#[derive(Debug, Error)]
pub enum RuleFailure {
    #[error("invalid constraint pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Runs every registered rule over a dataset and aggregates the findings.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    schema: &'static YearSchema,
    rules: Vec<Rule>,
}

impl RuleEngine {
    /// Engine with the default rule set for the given exchange-format year.
    pub fn new(year: u16) -> Result<Self, StandardsError> {
        Self::with_rules(year, Rule::DEFAULT.to_vec())
    }

    pub fn with_rules(year: u16, rules: Vec<Rule>) -> Result<Self, StandardsError> {
        Ok(Self {
            schema: rsf_standards::year(year)?,
            rules,
        })
    }

    /// Validates the dataset against every registered rule.
    ///
    /// Findings keep rule registration order, then within-rule emission
    /// order. A rule-level failure becomes one system error naming the rule
    /// so a single bad rule cannot abort the whole report.
    pub fn validate(&self, dataset: &Dataset) -> ValidationReport {
        let mut report = ValidationReport::new();
        for rule in &self.rules {
            match self.run_rule(*rule, dataset) {
                Ok(errors) => {
                    debug!(rule = rule.name(), errors = errors.len(), "rule executed");
                    report.extend(errors);
                }
                Err(failure) => {
                    report.push(ValidationError::rule_failure(
                        rule.name(),
                        format!("failed to execute validation rule: {failure}"),
                    ));
                }
            }
        }
        report
    }

    fn run_rule(&self, rule: Rule, dataset: &Dataset) -> Result<Vec<ValidationError>, RuleFailure> {
        match rule {
            Rule::Field => rules::field::check(dataset, self.schema),
            Rule::ExpectedLineCount => Ok(rules::structure::check(dataset)),
            Rule::Sequence => Ok(rules::sequence::check(dataset)),
            Rule::Dependency => Ok(rules::dependency::check(dataset)),
            Rule::LineOrder => Ok(rules::line_order::check(dataset)),
            Rule::KeyFieldMatch => Ok(rules::key_match::check(dataset)),
        }
    }
}
