//! # grc-core: Foundational Types for the GRC Policy Stack
//!
//! This crate is the leaf of the workspace. It defines the small set of
//! primitives every other crate agrees on: tenant and template identifiers,
//! the policy language table, and the effective/review date pair stamped
//! into generated policies.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `ClientId` and `TemplateId` are
//!    distinct types. A template id cannot be passed where a client id is
//!    expected.
//!
//! 2. **Immutable language table.** The code-to-name mapping is a `const`
//!    slice. There is no registration API and nothing to invalidate.
//!
//! 3. **Calendar-correct review dates.** The review date is the effective
//!    date plus one calendar year, not plus 365 days.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `grc-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod language;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::ValidationError;
pub use identity::{ClientId, TemplateId};
pub use language::{language_name, resolve_language, DEFAULT_LANGUAGE, DEFAULT_LANGUAGE_NAME};
pub use temporal::{format_long_date, PolicyDates};
