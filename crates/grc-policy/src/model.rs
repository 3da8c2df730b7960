//! # Policy Data Model
//!
//! Records read by the generation engine. Field names serialize in
//! camelCase to match the records the template store and client profile
//! provider hand over (`defaultEnabled`, `cisoName`, `policyLanguage`).
//!
//! Every record here is a read-only snapshot for the duration of a
//! generation call; the engine never writes back.

use grc_core::{ClientId, TemplateId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Title used for structured sections that carry no title.
pub const UNTITLED_SECTION: &str = "Untitled Section";

/// Name used for templates that carry no name.
pub const UNTITLED_POLICY: &str = "Untitled Policy";

fn default_template_name() -> String {
    UNTITLED_POLICY.to_string()
}

/// Trimmed value of an optional field, or `None` when absent or blank.
pub(crate) fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

// -------------------------------------------------------------------------
// Template
// -------------------------------------------------------------------------

/// A reusable policy document: monolithic text, named sections, or both.
///
/// When both are present the monolithic `content` wins. When neither is
/// present generation still succeeds with empty content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Template identifier.
    pub id: TemplateId,
    /// Policy name, used as the document title in prompts.
    #[serde(default = "default_template_name")]
    pub name: String,
    /// Owning client. `None` marks a global template visible to every client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    /// Monolithic document body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Ordered section list, used when `content` is empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<TemplateSection>,
    /// Framework tags (e.g. `NIST CSF`, `ISO 27001`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frameworks: Vec<String>,
}

impl Template {
    /// A global template with monolithic content.
    pub fn with_content(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: TemplateId::new(),
            name: name.into(),
            client_id: None,
            content: Some(content.into()),
            sections: Vec::new(),
            frameworks: Vec::new(),
        }
    }

    /// A global template built from sections.
    pub fn with_sections(name: impl Into<String>, sections: Vec<TemplateSection>) -> Self {
        Self {
            id: TemplateId::new(),
            name: name.into(),
            client_id: None,
            content: None,
            sections,
            frameworks: Vec::new(),
        }
    }

    /// Monolithic content, if present and non-empty.
    pub fn monolithic_content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }

    /// Whether the template is shared across all clients.
    pub fn is_global(&self) -> bool {
        self.client_id.is_none()
    }

    /// Whether a client may see this template: global, or owned by the client.
    pub fn is_visible_to(&self, client: &ClientId) -> bool {
        self.client_id.map_or(true, |owner| owner == *client)
    }
}

// -------------------------------------------------------------------------
// Sections
// -------------------------------------------------------------------------

/// One entry of a template's section list.
///
/// Deserialization is permissive: a bare string is a headingless section,
/// an object is a structured section, and anything else is kept as
/// [`TemplateSection::Unrecognized`] so a malformed entry never prevents the
/// template from loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateSection {
    /// Raw text rendered without a heading.
    Bare(String),
    /// A titled section with an optional enable flag.
    Structured(SectionSpec),
    /// An entry of unexpected shape. Skipped during composition.
    Unrecognized(Value),
}

impl TemplateSection {
    /// Shorthand for an enabled structured section.
    pub fn titled(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Structured(SectionSpec {
            title: Some(title.into()),
            content: Some(content.into()),
            text: None,
            default_enabled: None,
        })
    }

    /// Whether the section is included in composed output.
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Bare(_) => true,
            Self::Structured(spec) => spec.is_enabled(),
            Self::Unrecognized(_) => false,
        }
    }
}

/// A structured section record.
///
/// Any JSON object deserializes into a `SectionSpec`. Text fields holding a
/// number or boolean are read as their string form; other shapes count as
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct SectionSpec {
    /// Heading text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body text (preferred).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Body text (legacy field name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Only an explicit `false` disables the section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_enabled: Option<bool>,
}

impl From<Map<String, Value>> for SectionSpec {
    fn from(record: Map<String, Value>) -> Self {
        Self {
            title: lenient_text(record.get("title")),
            content: lenient_text(record.get("content")),
            text: lenient_text(record.get("text")),
            default_enabled: match record.get("defaultEnabled") {
                Some(Value::Bool(enabled)) => Some(*enabled),
                _ => None,
            },
        }
    }
}

fn lenient_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl SectionSpec {
    /// Enabled unless explicitly switched off.
    pub fn is_enabled(&self) -> bool {
        self.default_enabled != Some(false)
    }

    /// Heading text, or [`UNTITLED_SECTION`] when missing or empty.
    pub fn title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED_SECTION)
    }

    /// Body from `content`, else `text`, else empty.
    pub fn body(&self) -> &str {
        self.content
            .as_deref()
            .filter(|b| !b.is_empty())
            .or_else(|| self.text.as_deref().filter(|b| !b.is_empty()))
            .unwrap_or_default()
    }
}

// -------------------------------------------------------------------------
// Client Profile
// -------------------------------------------------------------------------

/// Tenant attributes consumed as substitution values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    /// Client identifier.
    pub id: ClientId,
    /// Display name. Resolves company/organization placeholders.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// Organization size descriptor (e.g. `small`, `enterprise`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ciso_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpo_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headquarters: Option<String>,
    /// Preferred over `region` when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_service_region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_contact_email: Option<String>,
    /// Falls back to `name` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_entity_name: Option<String>,
    /// ISO 639-1 code; `en` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_language: Option<String>,
}

impl ClientProfile {
    /// A profile with only an id and a display name.
    pub fn new(id: ClientId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            industry: None,
            size: None,
            ciso_name: None,
            dpo_name: None,
            headquarters: None,
            main_service_region: None,
            region: None,
            primary_contact_email: None,
            legal_entity_name: None,
            policy_language: None,
        }
    }

    pub fn industry(&self) -> Option<&str> {
        non_blank(self.industry.as_ref())
    }

    /// Service region: the main service region, else the generic region.
    pub fn service_region(&self) -> Option<&str> {
        non_blank(self.main_service_region.as_ref()).or_else(|| non_blank(self.region.as_ref()))
    }

    /// Legal entity name, else the display name.
    pub fn legal_entity(&self) -> &str {
        non_blank(self.legal_entity_name.as_ref()).unwrap_or(&self.name)
    }

    pub fn policy_language(&self) -> Option<&str> {
        non_blank(self.policy_language.as_ref())
    }
}

// -------------------------------------------------------------------------
// Generation Options
// -------------------------------------------------------------------------

/// Caller-supplied knobs for one generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    /// Request industry-specific tailoring.
    pub tailor_to_industry: bool,
    /// Free-text instruction that takes precedence over the standard directives.
    pub custom_instruction: Option<String>,
    /// Passed through to the text-generation collaborator untouched.
    pub model_override: Option<String>,
    /// Passed through to the text-generation collaborator untouched.
    pub provider_override: Option<String>,
    /// Overrides the client's stored policy language.
    pub language: Option<String>,
    /// Policy name for prompts built without a template.
    pub policy_name: Option<String>,
}

impl GenerationOptions {
    /// Custom instruction, if present and not blank.
    pub fn custom_instruction(&self) -> Option<&str> {
        non_blank(self.custom_instruction.as_ref())
    }

    /// Whether the enhancement step should run.
    pub fn wants_tailoring(&self) -> bool {
        self.tailor_to_industry || self.custom_instruction().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_section_enabled_by_default() {
        let spec = SectionSpec::default();
        assert!(spec.is_enabled());
        let off = SectionSpec {
            default_enabled: Some(false),
            ..SectionSpec::default()
        };
        assert!(!off.is_enabled());
    }

    #[test]
    fn section_body_prefers_content_then_text() {
        let both = SectionSpec {
            content: Some("from content".to_string()),
            text: Some("from text".to_string()),
            ..SectionSpec::default()
        };
        assert_eq!(both.body(), "from content");

        let text_only = SectionSpec {
            content: Some(String::new()),
            text: Some("from text".to_string()),
            ..SectionSpec::default()
        };
        assert_eq!(text_only.body(), "from text");
        assert_eq!(SectionSpec::default().body(), "");
    }

    #[test]
    fn section_title_defaults_when_missing_or_empty() {
        assert_eq!(SectionSpec::default().title(), UNTITLED_SECTION);
        let empty = SectionSpec {
            title: Some(String::new()),
            ..SectionSpec::default()
        };
        assert_eq!(empty.title(), UNTITLED_SECTION);
    }

    #[test]
    fn sections_deserialize_permissively() {
        let json = r#"[
            "Plain preamble",
            {"title": "Scope", "text": "All staff.", "defaultEnabled": true},
            {"title": "Legacy", "defaultEnabled": false},
            42
        ]"#;
        let sections: Vec<TemplateSection> = serde_json::from_str(json).unwrap();
        assert!(matches!(sections[0], TemplateSection::Bare(_)));
        assert!(matches!(sections[1], TemplateSection::Structured(_)));
        assert!(!sections[2].is_enabled());
        assert!(matches!(sections[3], TemplateSection::Unrecognized(_)));
        assert!(!sections[3].is_enabled());
    }

    #[test]
    fn mistyped_section_fields_stay_structured() {
        let json = r#"[
            {"title": "Scope", "content": "All staff must comply.", "defaultEnabled": "true"},
            {"title": 7, "content": "Numbered title body."},
            {"title": null, "text": ["not", "text"], "content": false, "defaultEnabled": 0}
        ]"#;
        let sections: Vec<TemplateSection> = serde_json::from_str(json).unwrap();
        let specs: Vec<&SectionSpec> = sections
            .iter()
            .map(|s| match s {
                TemplateSection::Structured(spec) => spec,
                other => panic!("expected structured section, got {other:?}"),
            })
            .collect();

        assert!(specs[0].is_enabled());
        assert_eq!(specs[0].default_enabled, None);
        assert_eq!(specs[0].body(), "All staff must comply.");

        assert_eq!(specs[1].title(), "7");
        assert_eq!(specs[1].body(), "Numbered title body.");

        assert_eq!(specs[2].title(), UNTITLED_SECTION);
        assert_eq!(specs[2].text, None);
        assert_eq!(specs[2].body(), "false");
        assert!(specs[2].is_enabled());
    }

    #[test]
    fn yaml_sections_deserialize_leniently() {
        let yaml = "- title: 2024\n  content: Yearly review.\n  defaultEnabled: false\n- Plain\n";
        let sections: Vec<TemplateSection> = serde_yaml::from_str(yaml).unwrap();
        match &sections[0] {
            TemplateSection::Structured(spec) => {
                assert_eq!(spec.title(), "2024");
                assert!(!spec.is_enabled());
            }
            other => panic!("expected structured section, got {other:?}"),
        }
        assert!(matches!(sections[1], TemplateSection::Bare(_)));
    }

    #[test]
    fn template_monolithic_content_ignores_empty_string() {
        let mut tmpl = Template::with_content("Access Policy", "");
        assert!(tmpl.monolithic_content().is_none());
        tmpl.content = Some("Body".to_string());
        assert_eq!(tmpl.monolithic_content(), Some("Body"));
    }

    #[test]
    fn template_visibility_follows_ownership() {
        let owner = ClientId::new();
        let other = ClientId::new();
        let mut tmpl = Template::with_content("Access Policy", "Body");
        assert!(tmpl.is_global());
        assert!(tmpl.is_visible_to(&other));

        tmpl.client_id = Some(owner);
        assert!(tmpl.is_visible_to(&owner));
        assert!(!tmpl.is_visible_to(&other));
    }

    #[test]
    fn template_name_defaults_when_absent() {
        let yaml = "id: 6f9619ff-8b86-d011-b42d-00cf4fc964ff\ncontent: Body\n";
        let tmpl: Template = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(tmpl.name, UNTITLED_POLICY);
        assert!(tmpl.sections.is_empty());
    }

    #[test]
    fn client_profile_region_prefers_main_service_region() {
        let mut profile = ClientProfile::new(ClientId::new(), "Acme Corp");
        assert_eq!(profile.service_region(), None);
        profile.region = Some("EU".to_string());
        assert_eq!(profile.service_region(), Some("EU"));
        profile.main_service_region = Some("EU-West".to_string());
        assert_eq!(profile.service_region(), Some("EU-West"));
    }

    #[test]
    fn client_profile_legal_entity_falls_back_to_name() {
        let mut profile = ClientProfile::new(ClientId::new(), "Acme Corp");
        assert_eq!(profile.legal_entity(), "Acme Corp");
        profile.legal_entity_name = Some("  ".to_string());
        assert_eq!(profile.legal_entity(), "Acme Corp");
        profile.legal_entity_name = Some("Acme Corporation Ltd.".to_string());
        assert_eq!(profile.legal_entity(), "Acme Corporation Ltd.");
    }

    #[test]
    fn client_profile_reads_camel_case_fields() {
        let json = r#"{
            "id": "6f9619ff-8b86-d011-b42d-00cf4fc964ff",
            "name": "Acme Corp",
            "cisoName": "Jane Doe",
            "mainServiceRegion": "EU-West",
            "policyLanguage": "de"
        }"#;
        let profile: ClientProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.ciso_name.as_deref(), Some("Jane Doe"));
        assert_eq!(profile.service_region(), Some("EU-West"));
        assert_eq!(profile.policy_language(), Some("de"));
    }

    #[test]
    fn options_want_tailoring_only_when_requested() {
        assert!(!GenerationOptions::default().wants_tailoring());

        let blank = GenerationOptions {
            custom_instruction: Some("   ".to_string()),
            ..GenerationOptions::default()
        };
        assert!(!blank.wants_tailoring());

        let instructed = GenerationOptions {
            custom_instruction: Some("Keep it short".to_string()),
            ..GenerationOptions::default()
        };
        assert!(instructed.wants_tailoring());

        let tailored = GenerationOptions {
            tailor_to_industry: true,
            ..GenerationOptions::default()
        };
        assert!(tailored.wants_tailoring());
    }
}
