//! # Generation Prompt Builder
//!
//! Builds the system/user prompt pair handed to an external
//! text-generation collaborator. No model is called here; the prompt text
//! itself is the output.
//!
//! The user prompt is laid out as:
//!
//! ```text
//! context       industry, organization size, policy name
//! instruction   custom instruction, flagged highest priority (optional)
//! directives    numbered, fixed
//! document      substituted source content between --- fences
//! ```

use serde::{Deserialize, Serialize};

use crate::model::{ClientProfile, GenerationOptions};

/// Size descriptor used when the client profile has none.
pub const DEFAULT_ORGANIZATION_SIZE: &str = "mid-sized";

/// Industry descriptor used when the client profile has none.
pub const DEFAULT_INDUSTRY: &str = "general business";

/// Policy name used when neither a template nor the options name one.
pub const DEFAULT_POLICY_NAME: &str = "Custom Policy";

/// The prompt pair consumed by a text-generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPrompt {
    pub user_prompt: String,
    pub system_prompt: String,
}

/// Inputs for one prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptInput<'a> {
    pub profile: &'a ClientProfile,
    pub policy_name: &'a str,
    /// Display name of the target language, e.g. `German`.
    pub language_name: &'a str,
    /// Source document after placeholder substitution.
    pub content: &'a str,
    pub options: &'a GenerationOptions,
}

/// Build the prompt pair.
pub fn build_prompt(input: &PromptInput<'_>) -> GenerationPrompt {
    GenerationPrompt {
        user_prompt: user_prompt(input),
        system_prompt: system_prompt(input.language_name),
    }
}

/// Persona plus the output-language mandate.
pub fn system_prompt(language_name: &str) -> String {
    format!(
        "You are an expert governance, risk, and compliance consultant who writes \
         clear, audit-ready organizational policies.\n\
         You MUST write all output in {language_name}. Do not use any other language, \
         even if the source document is written in one."
    )
}

fn user_prompt(input: &PromptInput<'_>) -> String {
    let industry = input.profile.industry().unwrap_or(DEFAULT_INDUSTRY);
    let size = input
        .profile
        .size
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_ORGANIZATION_SIZE);
    let language = input.language_name;

    let mut prompt = format!(
        "Tailor the following policy for a {size} organization in the {industry} industry.\n\
         Policy name: {}\n",
        input.policy_name
    );

    if let Some(instruction) = input.options.custom_instruction() {
        prompt.push_str(&format!(
            "\nCUSTOM INSTRUCTION (HIGHEST PRIORITY):\n{instruction}\n\
             Follow the custom instruction above all other directives when they conflict.\n"
        ));
    }

    prompt.push_str(&format!(
        "\nDirectives:\n\
         1. Preserve the existing structure, headings, and section order.\n\
         2. Add industry-specific regulatory references where relevant \
         (for example HIPAA for healthcare, PCI DSS for retail, SOC 2 or ISO 27001 for technology).\n\
         3. Do not remove any requirement; only enhance and clarify.\n\
         4. Write the entire document in {language}.\n\
         5. Return only the policy document as Markdown, with no commentary.\n"
    ));

    prompt.push_str(&format!("\nSource document:\n---\n{}\n---\n", input.content));
    prompt
}
