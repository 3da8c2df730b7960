//! # Generation Orchestrator
//!
//! The public entry point of the engine. A [`PolicyGenerator`] resolves the
//! client profile and template through its collaborators, picks the content
//! source, substitutes placeholders, and optionally hands the result to a
//! [`TextEnhancer`].
//!
//! ```text
//! client ──┐
//!          ├─> content source ─> substitution ─> [enhance] ─> content
//! template ┘    (content | composed sections | "")
//! ```
//!
//! Each call reads fresh snapshots and builds its own substitution
//! catalog; the generator holds no mutable state and is `Send + Sync`.

use std::sync::Arc;

use chrono::NaiveDate;
use grc_core::language::is_supported;
use grc_core::{language_name, resolve_language, ClientId, PolicyDates, TemplateId};

use crate::composer::{compose, compose_skeleton};
use crate::enhance::{EnhancementContext, PassthroughEnhancer, TextEnhancer};
use crate::error::{PolicyError, PolicyResult};
use crate::model::{non_blank, ClientProfile, GenerationOptions, Template};
use crate::prompt::{build_prompt, GenerationPrompt, PromptInput, DEFAULT_POLICY_NAME};
use crate::store::{ClientProfileProvider, InMemoryLibrary, TemplateStore};
use crate::substitution::substitute_on;

/// Sections suggested for every new policy.
pub const SUGGESTED_SECTIONS: [&str; 5] = [
    "Introduction",
    "Scope",
    "Policy Statement",
    "Roles and Responsibilities",
    "Compliance",
];

/// Orchestrates policy generation over pluggable collaborators.
#[derive(Clone)]
pub struct PolicyGenerator {
    templates: Arc<dyn TemplateStore>,
    clients: Arc<dyn ClientProfileProvider>,
    enhancer: Arc<dyn TextEnhancer>,
    effective_date: Option<NaiveDate>,
}

impl std::fmt::Debug for PolicyGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyGenerator")
            .field("effective_date", &self.effective_date)
            .finish_non_exhaustive()
    }
}

impl PolicyGenerator {
    /// A generator over separate stores, with the passthrough enhancer and
    /// today's date.
    pub fn new(templates: Arc<dyn TemplateStore>, clients: Arc<dyn ClientProfileProvider>) -> Self {
        Self {
            templates,
            clients,
            enhancer: Arc::new(PassthroughEnhancer),
            effective_date: None,
        }
    }

    /// A generator whose templates and clients both come from `library`.
    pub fn from_library(library: InMemoryLibrary) -> Self {
        let library = Arc::new(library);
        Self::new(library.clone(), library)
    }

    /// Replace the text enhancer.
    pub fn with_enhancer(mut self, enhancer: Arc<dyn TextEnhancer>) -> Self {
        self.enhancer = enhancer;
        self
    }

    /// Pin the effective date instead of using today.
    pub fn with_effective_date(mut self, date: NaiveDate) -> Self {
        self.effective_date = Some(date);
        self
    }

    /// Generate a policy from a stored template.
    ///
    /// # Errors
    ///
    /// [`PolicyError::ClientNotFound`] or [`PolicyError::TemplateNotFound`]
    /// when an id does not resolve; collaborator failures are passed
    /// through.
    pub fn generate(
        &self,
        client_id: &ClientId,
        template_id: &TemplateId,
        options: &GenerationOptions,
    ) -> PolicyResult<String> {
        let profile = self.client(client_id)?;
        let template = self.template(template_id)?;
        let (language_code, language) = self.language(&profile, options);

        let source = source_content(&template);
        let dates = self.dates()?;
        let content = substitute_on(&source, &profile, &dates);

        let content = if options.wants_tailoring() {
            let prompt = build_prompt(&PromptInput {
                profile: &profile,
                policy_name: &template.name,
                language_name: language,
                content: &content,
                options,
            });
            self.enhance(&content, prompt, language_code, language, options)?
        } else {
            content
        };

        tracing::info!(
            client = %client_id,
            template = %template_id,
            language = language_code,
            bytes = content.len(),
            "policy generated"
        );
        Ok(content)
    }

    /// Generate a placeholder document from a list of section names.
    ///
    /// The skeleton is returned without placeholder substitution; the
    /// enhancer, when tailoring is requested, receives it raw.
    pub fn generate_from_sections<S: AsRef<str>>(
        &self,
        client_id: &ClientId,
        policy_name: &str,
        section_names: &[S],
        options: &GenerationOptions,
    ) -> PolicyResult<String> {
        let profile = self.client(client_id)?;
        let (language_code, language) = self.language(&profile, options);

        let skeleton = compose_skeleton(policy_name, section_names);

        let content = if options.wants_tailoring() {
            let prompt = build_prompt(&PromptInput {
                profile: &profile,
                policy_name,
                language_name: language,
                content: &skeleton,
                options,
            });
            self.enhance(&skeleton, prompt, language_code, language, options)?
        } else {
            skeleton
        };

        tracing::info!(
            client = %client_id,
            policy = policy_name,
            sections = section_names.len(),
            language = language_code,
            "policy skeleton generated"
        );
        Ok(content)
    }

    /// Section names to suggest for a new policy.
    ///
    /// Currently the same five sections regardless of input.
    pub fn suggest_sections(&self, policy_name: &str, industry: Option<&str>) -> Vec<String> {
        tracing::debug!(policy = policy_name, industry, "suggesting default sections");
        SUGGESTED_SECTIONS.iter().map(|s| s.to_string()).collect()
    }

    /// Build the prompt pair for an external text-generation collaborator.
    ///
    /// With a template, its substituted content is embedded and its name is
    /// the policy name. Without one, a skeleton of `section_names` titled
    /// `options.policy_name` (default `Custom Policy`) is embedded instead.
    pub fn generation_prompt<S: AsRef<str>>(
        &self,
        client_id: &ClientId,
        template_id: Option<&TemplateId>,
        section_names: &[S],
        options: &GenerationOptions,
    ) -> PolicyResult<GenerationPrompt> {
        let profile = self.client(client_id)?;
        let (_, language) = self.language(&profile, options);

        let (policy_name, source) = match template_id {
            Some(id) => {
                let template = self.template(id)?;
                let source = source_content(&template);
                (template.name, source)
            }
            None => {
                let name = non_blank(options.policy_name.as_ref())
                    .unwrap_or(DEFAULT_POLICY_NAME)
                    .to_string();
                let skeleton = compose_skeleton(&name, section_names);
                (name, skeleton)
            }
        };

        let dates = self.dates()?;
        let content = substitute_on(&source, &profile, &dates);

        Ok(build_prompt(&PromptInput {
            profile: &profile,
            policy_name: &policy_name,
            language_name: language,
            content: &content,
            options,
        }))
    }

    fn client(&self, id: &ClientId) -> PolicyResult<ClientProfile> {
        self.clients
            .client_profile(id)?
            .ok_or(PolicyError::ClientNotFound { id: *id })
    }

    fn template(&self, id: &TemplateId) -> PolicyResult<Template> {
        self.templates
            .template(id)?
            .ok_or(PolicyError::TemplateNotFound { id: *id })
    }

    fn language<'a>(
        &self,
        profile: &'a ClientProfile,
        options: &'a GenerationOptions,
    ) -> (&'a str, &'static str) {
        let code = resolve_language(
            non_blank(options.language.as_ref()),
            profile.policy_language(),
        );
        if !is_supported(code) {
            tracing::warn!(language = code, "unsupported policy language, writing in English");
        }
        (code, language_name(code))
    }

    fn dates(&self) -> PolicyResult<PolicyDates> {
        let dates = match self.effective_date {
            Some(date) => PolicyDates::from_effective(date)?,
            None => PolicyDates::today()?,
        };
        Ok(dates)
    }

    fn enhance(
        &self,
        content: &str,
        prompt: GenerationPrompt,
        language_code: &str,
        language: &str,
        options: &GenerationOptions,
    ) -> PolicyResult<String> {
        let context = EnhancementContext {
            prompt,
            language_code: language_code.to_string(),
            language_name: language.to_string(),
            model_override: options.model_override.clone(),
            provider_override: options.provider_override.clone(),
        };
        self.enhancer.enhance(content, &context)
    }
}

/// Monolithic content when present, else the composed enabled sections.
fn source_content(template: &Template) -> String {
    match template.monolithic_content() {
        Some(content) => {
            tracing::debug!(template = %template.id, "using monolithic content");
            content.to_string()
        }
        None => {
            tracing::debug!(
                template = %template.id,
                sections = template.sections.len(),
                "composing content from sections"
            );
            compose(&template.sections)
        }
    }
}
