//! # grc-cli: GRC Policy Command-Line Interface
//!
//! Loads a policy library from disk and exposes the generation engine as
//! subcommands.
//!
//! ## Subcommands
//!
//! - `policy generate`: Generate a policy from a stored template
//! - `policy skeleton`: Build a placeholder document from section names
//! - `policy prompt`: Print the generation prompt pair as JSON
//! - `policy suggest`: Suggest section names for a new policy
//! - `policy list`: List the templates visible to a client
//! - `languages`: Print the supported policy languages
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to `grc-policy`; generated content goes to stdout,
//!   logs go to stderr.

pub mod config;
pub mod language;
pub mod policy;
