// src/core/error.rs
use thiserror::Error;

use crate::validators::IdIssue;

/// Failure taxonomy shared by every tool.
///
/// Each variant carries enough data to render a message at the edge
/// (terminal or HTTP body); nothing inside the tools formats text for users.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ToolError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("A non-empty key is required for this scheme")]
    MissingKey,

    #[error("No character class selected")]
    EmptyCharset,

    #[error("Length must be between {min} and {max}, got {actual}")]
    LengthOutOfRange {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Content size {size} bytes exceeds the limit of {limit} bytes")]
    ContentTooLarge { size: u64, limit: u64 },

    #[error("Nothing to save")]
    EmptyContent,

    #[error("Validation failed: {}", render_issues(.0))]
    ValidationFailed(Vec<IdIssue>),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, ToolError>;

fn render_issues(issues: &[IdIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ToolError {
    /// Stable machine-readable kind, used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::MalformedInput(_) => "malformed_input",
            ToolError::UnsupportedOperation(_) => "unsupported_operation",
            ToolError::MissingKey => "missing_key",
            ToolError::EmptyCharset => "empty_charset",
            ToolError::LengthOutOfRange { .. } => "length_out_of_range",
            ToolError::ContentTooLarge { .. } => "content_too_large",
            ToolError::EmptyContent => "empty_content",
            ToolError::ValidationFailed(_) => "validation_failed",
            ToolError::UnknownTimezone(_) => "unknown_timezone",
            ToolError::EntryNotFound(_) => "entry_not_found",
            ToolError::Storage(_) => "storage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failed_lists_every_issue() {
        let err = ToolError::ValidationFailed(vec![
            IdIssue::UnknownRegion { code: "00".into() },
            IdIssue::ChecksumMismatch {
                expected: 'X',
                actual: 'Y',
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("00"));
        assert!(text.contains("expected X"));
        assert_eq!(err.kind(), "validation_failed");
    }
}
