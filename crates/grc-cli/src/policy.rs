//! # Policy CLI: generate policies, skeletons, and prompts.
//!
//! ## Usage
//!
//! ```bash
//! # Generate a policy from a stored template:
//! grc policy generate --client <uuid> --template <uuid>
//!
//! # Build a placeholder document:
//! grc policy skeleton --client <uuid> --name "Access Policy" --section Purpose --section Scope
//!
//! # Print the prompt pair for an external text-generation service:
//! grc policy prompt --client <uuid> --template <uuid> --language de
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use grc_core::{ClientId, TemplateId};
use grc_policy::{
    ClientProfileProvider, GenerationOptions, InMemoryLibrary, PolicyGenerator, TemplateStore,
};

use crate::config::CliConfig;

/// Policy subcommand arguments.
#[derive(Args, Debug)]
pub struct PolicyArgs {
    #[command(subcommand)]
    pub command: PolicyCommand,
}

/// Options forwarded to the generation engine.
#[derive(Args, Debug, Clone, Default)]
pub struct TailoringArgs {
    /// Output language code (e.g. de, pt-BR). Defaults to the client's language.
    #[arg(long)]
    pub language: Option<String>,

    /// Request industry-specific tailoring.
    #[arg(long)]
    pub tailor: bool,

    /// Custom instruction; takes precedence over the standard directives.
    #[arg(long)]
    pub instruction: Option<String>,

    /// Model identifier passed through to the text enhancer.
    #[arg(long)]
    pub model: Option<String>,

    /// Provider identifier passed through to the text enhancer.
    #[arg(long)]
    pub provider: Option<String>,
}

impl TailoringArgs {
    fn options(&self, policy_name: Option<&str>) -> GenerationOptions {
        GenerationOptions {
            tailor_to_industry: self.tailor,
            custom_instruction: self.instruction.clone(),
            model_override: self.model.clone(),
            provider_override: self.provider.clone(),
            language: self.language.clone(),
            policy_name: policy_name.map(str::to_string),
        }
    }
}

/// Available policy subcommands.
#[derive(Subcommand, Debug)]
pub enum PolicyCommand {
    /// Generate a client-specific policy from a stored template.
    Generate {
        #[arg(long)]
        client: ClientId,

        #[arg(long)]
        template: TemplateId,

        #[command(flatten)]
        tailoring: TailoringArgs,

        /// Write the policy to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Build a placeholder document from section names.
    Skeleton {
        #[arg(long)]
        client: ClientId,

        /// Policy name, used as the document title.
        #[arg(long)]
        name: String,

        /// Section name. Repeat for each section, in order.
        #[arg(long = "section", required = true)]
        sections: Vec<String>,

        #[command(flatten)]
        tailoring: TailoringArgs,

        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the generation prompt pair as JSON.
    Prompt {
        #[arg(long)]
        client: ClientId,

        /// Template to embed. Without it, a skeleton of --section names is embedded.
        #[arg(long)]
        template: Option<TemplateId>,

        #[arg(long = "section")]
        sections: Vec<String>,

        /// Policy name used when no template is given.
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        tailoring: TailoringArgs,
    },

    /// Suggest section names for a new policy.
    Suggest {
        #[arg(long)]
        name: String,

        #[arg(long)]
        industry: Option<String>,
    },

    /// List templates visible to a client.
    List {
        #[arg(long)]
        client: ClientId,
    },
}

/// Execute the policy subcommand.
pub fn run_policy(args: &PolicyArgs, config: &CliConfig) -> Result<u8> {
    match &args.command {
        PolicyCommand::Generate {
            client,
            template,
            tailoring,
            out,
        } => {
            let generator = load_generator(config)?;
            let content = generator
                .generate(client, template, &tailoring.options(None))
                .with_context(|| format!("failed to generate policy for client {client}"))?;
            emit(&content, out.as_deref())
        }
        PolicyCommand::Skeleton {
            client,
            name,
            sections,
            tailoring,
            out,
        } => {
            let generator = load_generator(config)?;
            let content = generator
                .generate_from_sections(client, name, sections, &tailoring.options(Some(name.as_str())))
                .with_context(|| format!("failed to build skeleton for client {client}"))?;
            emit(&content, out.as_deref())
        }
        PolicyCommand::Prompt {
            client,
            template,
            sections,
            name,
            tailoring,
        } => {
            let generator = load_generator(config)?;
            let prompt = generator
                .generation_prompt(
                    client,
                    template.as_ref(),
                    sections,
                    &tailoring.options(name.as_deref()),
                )
                .with_context(|| format!("failed to build prompt for client {client}"))?;
            let json = serde_json::to_string_pretty(&prompt).context("failed to serialize prompt")?;
            println!("{json}");
            Ok(0)
        }
        PolicyCommand::Suggest { name, industry } => {
            let generator = PolicyGenerator::from_library(InMemoryLibrary::new());
            for section in generator.suggest_sections(name, industry.as_deref()) {
                println!("{section}");
            }
            Ok(0)
        }
        PolicyCommand::List { client } => run_list(client, config),
    }
}

fn run_list(client: &ClientId, config: &CliConfig) -> Result<u8> {
    let library = load_library(config)?;
    let profile = library
        .client_profile(client)?
        .with_context(|| format!("client not found: {client}"))?;
    let templates = library.templates_for_client(client)?;

    println!("Templates available to {}:", profile.name);
    println!();
    for template in &templates {
        let scope = if template.is_global() { "global" } else { "client" };
        if template.frameworks.is_empty() {
            println!("  {}  {:<40} [{scope}]", template.id, template.name);
        } else {
            println!(
                "  {}  {:<40} [{scope}] ({})",
                template.id,
                template.name,
                template.frameworks.join(", ")
            );
        }
    }
    println!();
    println!("Total: {} templates", templates.len());
    Ok(0)
}

fn load_library(config: &CliConfig) -> Result<InMemoryLibrary> {
    InMemoryLibrary::load_dir(&config.library_dir).with_context(|| {
        format!(
            "failed to load policy library: {}",
            config.library_dir.display()
        )
    })
}

fn load_generator(config: &CliConfig) -> Result<PolicyGenerator> {
    let generator = PolicyGenerator::from_library(load_library(config)?);
    Ok(match config.effective_date {
        Some(date) => generator.with_effective_date(date),
        None => generator,
    })
}

/// Print content to stdout, or write it to `out`.
fn emit(content: &str, out: Option<&Path>) -> Result<u8> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory: {}", parent.display())
                })?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("failed to write policy: {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = content.len(), "policy written");
        }
        None => println!("{content}"),
    }
    Ok(0)
}
