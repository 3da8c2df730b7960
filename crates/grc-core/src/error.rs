//! # Error Types
//!
//! Validation errors for the core primitives. Engine-level errors live in
//! `grc-policy`; this crate only reports malformed input to its own
//! constructors.

use thiserror::Error;

/// Rejected input to a core constructor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A client identifier string was not a valid UUID.
    #[error("invalid client id {input:?}: {reason}")]
    InvalidClientId {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A template identifier string was not a valid UUID.
    #[error("invalid template id {input:?}: {reason}")]
    InvalidTemplateId {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A calendar date string could not be parsed or does not exist.
    #[error("invalid date {input:?}: expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// Adding one calendar year to the effective date overflowed the
    /// supported date range.
    #[error("review date out of range for effective date {effective}")]
    ReviewDateOutOfRange {
        /// The effective date that could not be advanced.
        effective: String,
    },
}
