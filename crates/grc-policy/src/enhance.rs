//! # Text Enhancement
//!
//! The seam where generated content is handed to an external
//! text-generation collaborator for industry tailoring or custom
//! instructions. The orchestrator calls the enhancer only when the caller
//! asked for tailoring; [`PassthroughEnhancer`] returns content unchanged.

use serde::{Deserialize, Serialize};

use crate::error::PolicyResult;
use crate::prompt::GenerationPrompt;

/// Everything an enhancer needs to tailor one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementContext {
    /// The prompt pair describing the tailoring request.
    pub prompt: GenerationPrompt,
    /// Resolved language code, e.g. `de`.
    pub language_code: String,
    /// Display name of the language, e.g. `German`.
    pub language_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_override: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_override: Option<String>,
}

/// Tailors generated content.
pub trait TextEnhancer: Send + Sync {
    /// Return the enhanced content.
    fn enhance(&self, content: &str, context: &EnhancementContext) -> PolicyResult<String>;
}

/// Returns content unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughEnhancer;

impl TextEnhancer for PassthroughEnhancer {
    fn enhance(&self, content: &str, context: &EnhancementContext) -> PolicyResult<String> {
        tracing::debug!(
            language = %context.language_code,
            model = ?context.model_override,
            provider = ?context.provider_override,
            "text enhancement not configured; returning content unchanged"
        );
        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> EnhancementContext {
        EnhancementContext {
            prompt: GenerationPrompt {
                user_prompt: "user".to_string(),
                system_prompt: "system".to_string(),
            },
            language_code: "en".to_string(),
            language_name: "English".to_string(),
            model_override: Some("model-x".to_string()),
            provider_override: None,
        }
    }

    #[test]
    fn passthrough_returns_content_unchanged() {
        let out = PassthroughEnhancer.enhance("# Policy\n\nBody", &context()).unwrap();
        assert_eq!(out, "# Policy\n\nBody");
    }

    #[test]
    fn enhancer_is_object_safe() {
        let enhancer: Box<dyn TextEnhancer> = Box::new(PassthroughEnhancer);
        assert_eq!(enhancer.enhance("", &context()).unwrap(), "");
    }

    #[test]
    fn context_serializes_without_empty_overrides() {
        let json = serde_json::to_value(context()).unwrap();
        assert_eq!(json["modelOverride"], "model-x");
        assert!(json.get("providerOverride").is_none());
    }
}
