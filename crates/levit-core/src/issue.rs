use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// IssueType / IssueCode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Error,
    Warning,
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IssueType::Error => "error",
            IssueType::Warning => "warning",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    MissingFile,
    MissingDirectory,
    InvalidFrontmatter,
    InvalidStructure,
    InvalidDependency,
    CircularDependency,
    ValidationFailed,
    NoFeatures,
    FileTooLarge,
    ForbiddenPattern,
    DisallowedDependency,
}

impl IssueCode {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueCode::MissingFile => "MISSING_FILE",
            IssueCode::MissingDirectory => "MISSING_DIRECTORY",
            IssueCode::InvalidFrontmatter => "INVALID_FRONTMATTER",
            IssueCode::InvalidStructure => "INVALID_STRUCTURE",
            IssueCode::InvalidDependency => "INVALID_DEPENDENCY",
            IssueCode::CircularDependency => "CIRCULAR_DEPENDENCY",
            IssueCode::ValidationFailed => "VALIDATION_FAILED",
            IssueCode::NoFeatures => "NO_FEATURES",
            IssueCode::FileTooLarge => "FILE_TOO_LARGE",
            IssueCode::ForbiddenPattern => "FORBIDDEN_PATTERN",
            IssueCode::DisallowedDependency => "DISALLOWED_DEPENDENCY",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ValidationIssue
// ---------------------------------------------------------------------------

/// One finding from a validation run. Ephemeral: produced and consumed
/// within a single invocation, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub code: IssueCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ValidationIssue {
    pub fn error(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            issue_type: IssueType::Error,
            code,
            message: message.into(),
            file: None,
            details: None,
        }
    }

    pub fn warning(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            issue_type: IssueType::Warning,
            code,
            message: message.into(),
            file: None,
            details: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn is_error(&self) -> bool {
        self.issue_type == IssueType::Error
    }
}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMetrics {
    pub errors: usize,
    pub warnings: usize,
    pub files_scanned: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
    pub metrics: ValidationMetrics,
}

impl ValidationResult {
    /// Derive `valid` and the counts from the issue list so the metric
    /// invariants hold by construction.
    pub fn from_issues(issues: Vec<ValidationIssue>, files_scanned: usize) -> Self {
        let errors = issues.iter().filter(|i| i.is_error()).count();
        let warnings = issues.len() - errors;
        Self {
            valid: errors == 0,
            issues,
            metrics: ValidationMetrics {
                errors,
                warnings,
                files_scanned,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
