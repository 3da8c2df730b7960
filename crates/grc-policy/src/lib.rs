//! # grc-policy: Policy Generation Engine
//!
//! Turns reusable policy templates into client-specific documents:
//!
//! - **Substitution** (`substitution.rs`): an ordered catalog of literal
//!   placeholder patterns resolved from a client profile and the
//!   effective/review dates.
//!
//! - **Composition** (`composer.rs`): joins a template's enabled sections
//!   into one Markdown document, or builds a placeholder skeleton from a
//!   list of section names.
//!
//! - **Prompts** (`prompt.rs`): the system/user prompt pair for an
//!   external text-generation collaborator.
//!
//! - **Enhancement** (`enhance.rs`): the pluggable tailoring step. The
//!   default implementation returns content unchanged.
//!
//! - **Library** (`store.rs`, `parser.rs`): template store and client
//!   profile provider traits, with an in-memory implementation that can be
//!   loaded from a directory of YAML/JSON records.
//!
//! [`PolicyGenerator`] ties these together.
//!
//! ## Crate Policy
//!
//! - Depends only on `grc-core` internally.
//! - Substitution, composition, and prompt building never fail. Missing
//!   values become bracketed placeholders.
//! - Only unresolved ids and collaborator failures are reported as errors.

pub mod composer;
pub mod enhance;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod store;
pub mod substitution;

pub use composer::{compose, compose_skeleton, SKELETON_PLACEHOLDER};
pub use enhance::{EnhancementContext, PassthroughEnhancer, TextEnhancer};
pub use error::{PolicyError, PolicyResult};
pub use generator::{PolicyGenerator, SUGGESTED_SECTIONS};
pub use model::{ClientProfile, GenerationOptions, SectionSpec, Template, TemplateSection};
pub use prompt::{build_prompt, GenerationPrompt, PromptInput};
pub use store::{ClientProfileProvider, InMemoryLibrary, TemplateStore};
pub use substitution::{substitute, substitute_on, PlaceholderField, SubstitutionCatalog};
