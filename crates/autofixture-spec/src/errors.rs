use thiserror::Error;

use autofixture_core::Category;

/// Errors raised while parsing or checking spec strings and override trees.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    #[error("invalid spec '{spec}': {reason}")]
    InvalidSpecGrammar { spec: String, reason: String },
    #[error("spec '{spec}' not compatible with type '{category}'")]
    IncompatibleSpec { spec: String, category: Category },
    #[error("integer spec '{spec}' contains real value {literal}")]
    NonIntegerBound { spec: String, literal: String },
    #[error("lower bound {lower} must be lower than upper bound {upper}")]
    BoundOrder { lower: String, upper: String },
    #[error("spec '{spec}' leaves no integer between its bounds")]
    EmptyRange { spec: String },
    #[error("invalid overrides: {0}")]
    InvalidOverrides(String),
}

impl SpecError {
    pub(crate) fn grammar(spec: &str, reason: impl Into<String>) -> Self {
        SpecError::InvalidSpecGrammar {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }
}

/// Severity level for override validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// A problem found in an override tree, located by field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: &'static str,
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        severity: IssueSeverity,
        code: &'static str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Issues collected while checking overrides against a template.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true when there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            IssueSeverity::Error => self.errors.push(issue),
            IssueSeverity::Warning => self.warnings.push(issue),
        }
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .map(|issue| issue.code)
            .collect()
    }
}
