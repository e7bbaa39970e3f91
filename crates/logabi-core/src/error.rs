//! Error types for the logabi pipeline.
//!
//! One enum per stage: type grammar, catalog build, decode, encode and
//! batch processing. Every variant is a distinct, inspectable kind; nothing
//! is downgraded to a default value.

use alloy_primitives::B256;
use thiserror::Error;

/// Errors raised while parsing an ABI type string or component list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("Invalid type '{ty}': {reason}")]
    InvalidType { ty: String, reason: String },
}

impl TypeError {
    pub fn invalid(ty: impl Into<String>, reason: impl Into<String>) -> Self {
        TypeError::InvalidType {
            ty: ty.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while building an ABI catalog.
/// Fatal for that catalog only; the caller may retry with corrected input.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    InvalidType(#[from] TypeError),

    #[error("Invalid ABI document: {reason}")]
    InvalidDocument { reason: String },

    #[error("Malformed ABI entry #{index}: {reason}")]
    MalformedAbiEntry { index: usize, reason: String },

    #[error("Duplicate signature hash {selector}: '{first}' collides with '{second}'")]
    DuplicateSignatureHash {
        selector: B256,
        first: String,
        second: String,
    },

    #[error("Invalid ABI JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while decoding a single log.
/// Per-log: a failure never affects other logs in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("No event in the catalog matches selector {}", display_selector(.selector))]
    NoMatchingEvent { selector: Option<B256> },

    #[error("Event '{event}' expects {expected} indexed topics, log has {got}")]
    TopicCountMismatch {
        event: String,
        expected: usize,
        got: usize,
    },

    #[error("Truncated input: need {needed} bytes at offset {offset}, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Invalid offset {offset} into buffer of {len} bytes")]
    InvalidOffset { offset: String, len: usize },

    #[error("Declared length {length} overflows addressable size")]
    LengthOverflow { length: String },

    #[error("String payload at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    #[error("Event '{event}' declares parameter '{name}' more than once")]
    DuplicateParam { event: String, name: String },
}

impl DecodeError {
    /// Stable snake_case label, used as a metrics tag.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::NoMatchingEvent { .. } => "no_matching_event",
            DecodeError::TopicCountMismatch { .. } => "topic_count_mismatch",
            DecodeError::TruncatedInput { .. } => "truncated_input",
            DecodeError::InvalidOffset { .. } => "invalid_offset",
            DecodeError::LengthOverflow { .. } => "length_overflow",
            DecodeError::InvalidUtf8 { .. } => "invalid_utf8",
            DecodeError::DuplicateParam { .. } => "duplicate_param",
        }
    }
}

fn display_selector(selector: &Option<B256>) -> String {
    match selector {
        Some(s) => s.to_string(),
        None => "<none>".to_string(),
    }
}

/// Errors that can occur while ABI-encoding a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Value out of range for {ty}")]
    ValueOutOfRange { ty: String },
}

/// Errors that can occur during batch decoding.
#[derive(Debug, Error)]
pub enum BatchDecodeError {
    #[error("Decode error at index {index}: {source}")]
    ItemFailed {
        index: usize,
        #[source]
        source: DecodeError,
    },

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_kinds_are_distinct() {
        let errs = [
            DecodeError::NoMatchingEvent { selector: None },
            DecodeError::TopicCountMismatch {
                event: "Transfer".into(),
                expected: 2,
                got: 1,
            },
            DecodeError::TruncatedInput {
                offset: 0,
                needed: 32,
                available: 5,
            },
            DecodeError::InvalidOffset {
                offset: "64".into(),
                len: 32,
            },
            DecodeError::LengthOverflow {
                length: "1".into(),
            },
            DecodeError::InvalidUtf8 { offset: 0 },
            DecodeError::DuplicateParam {
                event: "Dup".into(),
                name: "x".into(),
            },
        ];
        let mut kinds: Vec<_> = errs.iter().map(|e| e.kind()).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), errs.len());
    }

    #[test]
    fn no_matching_event_display() {
        let err = DecodeError::NoMatchingEvent { selector: None };
        assert_eq!(
            err.to_string(),
            "No event in the catalog matches selector <none>"
        );
    }
}
