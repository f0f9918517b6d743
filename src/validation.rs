//! Structured validation errors for request bodies and path parameters.

use std::fmt::Display;

use serde::Serialize;

/// A single problem with one field of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// The name of the offending field, e.g. "amount".
    pub field: String,
    /// What was wrong with the field.
    pub message: String,
}

impl FieldIssue {
    /// Create an issue for `field`.
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_owned(),
            message: message.to_owned(),
        }
    }
}

/// The request failed validation, `issues` holds one entry per violated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Every problem found in the request.
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// A validation error for a single field.
    pub fn single(field: &str, message: &str) -> Self {
        Self {
            issues: vec![FieldIssue::new(field, message)],
        }
    }

    /// Whether `field` is among the offending fields.
    #[cfg(test)]
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid request:")?;

        for issue in &self.issues {
            write!(f, " {}: {};", issue.field, issue.message)?;
        }

        Ok(())
    }
}
