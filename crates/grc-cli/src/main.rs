//! # grc CLI entry point
//!
//! Parses command-line arguments, loads configuration, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use grc_cli::config::{CliConfig, LogFormat};
use grc_cli::language::run_languages;
use grc_cli::policy::{run_policy, PolicyArgs};

/// GRC policy toolchain.
///
/// Generates client-specific policies from a template library, builds
/// placeholder skeletons, and prepares prompts for external
/// text-generation services.
#[derive(Parser, Debug)]
#[command(name = "grc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (default: ./grc.yaml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Policy library directory. Overrides config and GRC_LIBRARY_DIR.
    #[arg(long, global = true)]
    library: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate policies, skeletons, and prompts.
    Policy(PolicyArgs),

    /// List supported policy languages.
    Languages,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref());
    let log_format = config.as_ref().map(|c| c.log_format).unwrap_or_default();
    init_tracing(cli.verbose, log_format);

    let mut config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    if let Some(library) = cli.library {
        config.library_dir = library;
    }

    tracing::debug!(library_dir = %config.library_dir.display(), "configuration resolved");

    let result = match cli.command {
        Commands::Policy(args) => run_policy(&args, &config),
        Commands::Languages => run_languages(),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Install the global subscriber. Logs go to stderr so stdout carries only
/// command output.
fn init_tracing(verbose: u8, format: LogFormat) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grc_cli::policy::PolicyCommand;

    const ACME: &str = "6f9619ff-8b86-d011-b42d-00cf4fc964ff";
    const TEMPLATE: &str = "3b241101-e2bb-4255-8caf-4136c566a962";

    #[test]
    fn cli_parse_policy_generate() {
        let cli = Cli::try_parse_from([
            "grc", "policy", "generate", "--client", ACME, "--template", TEMPLATE,
        ])
        .unwrap();
        let Commands::Policy(args) = cli.command else {
            panic!("expected policy command");
        };
        match args.command {
            PolicyCommand::Generate {
                client,
                template,
                tailoring,
                out,
            } => {
                assert_eq!(client.to_string(), ACME);
                assert_eq!(template.to_string(), TEMPLATE);
                assert!(!tailoring.tailor);
                assert!(tailoring.language.is_none());
                assert!(out.is_none());
            }
            other => panic!("expected generate, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_policy_generate_with_tailoring() {
        let cli = Cli::try_parse_from([
            "grc",
            "policy",
            "generate",
            "--client",
            ACME,
            "--template",
            TEMPLATE,
            "--language",
            "de",
            "--tailor",
            "--instruction",
            "Reference HIPAA.",
            "--model",
            "model-x",
            "--provider",
            "provider-y",
            "--out",
            "policy.md",
        ])
        .unwrap();
        if let Commands::Policy(args) = cli.command {
            if let PolicyCommand::Generate { tailoring, out, .. } = args.command {
                assert!(tailoring.tailor);
                assert_eq!(tailoring.language.as_deref(), Some("de"));
                assert_eq!(tailoring.instruction.as_deref(), Some("Reference HIPAA."));
                assert_eq!(tailoring.model.as_deref(), Some("model-x"));
                assert_eq!(tailoring.provider.as_deref(), Some("provider-y"));
                assert_eq!(out, Some(PathBuf::from("policy.md")));
            }
        }
    }

    #[test]
    fn cli_parse_rejects_malformed_client_id() {
        let result = Cli::try_parse_from([
            "grc", "policy", "generate", "--client", "acme", "--template", TEMPLATE,
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_policy_skeleton_sections_in_order() {
        let cli = Cli::try_parse_from([
            "grc",
            "policy",
            "skeleton",
            "--client",
            ACME,
            "--name",
            "Access Policy",
            "--section",
            "Purpose",
            "--section",
            "Scope",
        ])
        .unwrap();
        if let Commands::Policy(args) = cli.command {
            if let PolicyCommand::Skeleton { name, sections, .. } = args.command {
                assert_eq!(name, "Access Policy");
                assert_eq!(sections, vec!["Purpose", "Scope"]);
            }
        }
    }

    #[test]
    fn cli_parse_policy_skeleton_requires_a_section() {
        let result = Cli::try_parse_from([
            "grc", "policy", "skeleton", "--client", ACME, "--name", "Access Policy",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_policy_prompt_without_template() {
        let cli = Cli::try_parse_from([
            "grc", "policy", "prompt", "--client", ACME, "--section", "Scope", "--name", "Custom",
        ])
        .unwrap();
        if let Commands::Policy(args) = cli.command {
            if let PolicyCommand::Prompt {
                template,
                sections,
                name,
                ..
            } = args.command
            {
                assert!(template.is_none());
                assert_eq!(sections, vec!["Scope"]);
                assert_eq!(name.as_deref(), Some("Custom"));
            }
        }
    }

    #[test]
    fn cli_parse_policy_suggest_and_list() {
        let cli = Cli::try_parse_from([
            "grc", "policy", "suggest", "--name", "Privacy", "--industry", "Healthcare",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Policy(_)));

        let cli = Cli::try_parse_from(["grc", "policy", "list", "--client", ACME]).unwrap();
        assert!(matches!(cli.command, Commands::Policy(_)));
    }

    #[test]
    fn cli_parse_languages() {
        let cli = Cli::try_parse_from(["grc", "languages"]).unwrap();
        assert!(matches!(cli.command, Commands::Languages));
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["grc", "languages"]).unwrap();
        assert_eq!(cli0.verbose, 0);

        let cli2 = Cli::try_parse_from(["grc", "-vv", "languages"]).unwrap();
        assert_eq!(cli2.verbose, 2);

        let cli3 = Cli::try_parse_from(["grc", "languages", "-vvv"]).unwrap();
        assert_eq!(cli3.verbose, 3);
    }

    #[test]
    fn cli_parse_global_paths() {
        let cli = Cli::try_parse_from([
            "grc",
            "--config",
            "grc.yaml",
            "--library",
            "/srv/policies",
            "languages",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("grc.yaml")));
        assert_eq!(cli.library, Some(PathBuf::from("/srv/policies")));
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["grc"]).is_err());
    }
}
