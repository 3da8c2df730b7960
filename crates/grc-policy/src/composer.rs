//! # Section Composer
//!
//! Assembles a template's section list into a single Markdown document,
//! and builds placeholder skeletons from a bare list of section names.
//!
//! ```text
//! ## Purpose
//!
//! <body>
//!
//! ## Scope
//!
//! <body>
//! ```

use crate::model::TemplateSection;

/// Body written under every heading of a skeleton.
pub const SKELETON_PLACEHOLDER: &str = "[Content to be generated]";

/// Separator between composed sections.
const SECTION_SEPARATOR: &str = "\n\n";

/// Compose enabled sections in input order.
///
/// Bare strings render as-is; structured sections render as
/// `## <title>\n\n<body>`. Sections with `defaultEnabled: false` and
/// entries of unrecognized shape are skipped.
pub fn compose(sections: &[TemplateSection]) -> String {
    let mut rendered = Vec::with_capacity(sections.len());
    for (index, section) in sections.iter().enumerate() {
        match section {
            TemplateSection::Bare(text) => rendered.push(text.clone()),
            TemplateSection::Structured(spec) if spec.is_enabled() => {
                rendered.push(format!("## {}\n\n{}", spec.title(), spec.body()));
            }
            TemplateSection::Structured(spec) => {
                tracing::debug!(index, title = spec.title(), "section disabled, skipping");
            }
            TemplateSection::Unrecognized(value) => {
                tracing::warn!(index, value = %value, "section has unexpected shape, skipping");
            }
        }
    }
    rendered.join(SECTION_SEPARATOR)
}

/// Build a placeholder document: a `# <policy name>` title followed by one
/// `## <name>` heading per section, each with [`SKELETON_PLACEHOLDER`] as
/// its body.
pub fn compose_skeleton<S: AsRef<str>>(policy_name: &str, section_names: &[S]) -> String {
    std::iter::once(format!("# {policy_name}"))
        .chain(
            section_names
                .iter()
                .map(|name| format!("## {}\n\n{SKELETON_PLACEHOLDER}", name.as_ref())),
        )
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SectionSpec;
    use proptest::prelude::*;

    fn structured(title: Option<&str>, body: Option<&str>, enabled: Option<bool>) -> TemplateSection {
        TemplateSection::Structured(SectionSpec {
            title: title.map(str::to_string),
            content: body.map(str::to_string),
            text: None,
            default_enabled: enabled,
        })
    }

    #[test]
    fn disabled_sections_are_filtered() {
        let sections = vec![
            structured(Some("A"), Some("alpha"), Some(false)),
            structured(Some("B"), Some("beta"), None),
        ];
        let out = compose(&sections);
        assert!(out.contains("## B"));
        assert!(!out.contains("## A"));
        assert_eq!(out, "## B\n\nbeta");
    }

    #[test]
    fn sections_are_joined_with_blank_line_in_order() {
        let sections = vec![
            structured(Some("Purpose"), Some("Why."), Some(true)),
            TemplateSection::Bare("Free text".to_string()),
            structured(Some("Scope"), Some("Who."), None),
        ];
        assert_eq!(
            compose(&sections),
            "## Purpose\n\nWhy.\n\nFree text\n\n## Scope\n\nWho."
        );
    }

    #[test]
    fn missing_title_and_body_use_defaults() {
        let sections = vec![structured(None, None, None)];
        assert_eq!(compose(&sections), "## Untitled Section\n\n");
    }

    #[test]
    fn body_falls_back_to_text_field() {
        let sections = vec![TemplateSection::Structured(SectionSpec {
            title: Some("Scope".to_string()),
            content: None,
            text: Some("Legacy body".to_string()),
            default_enabled: None,
        })];
        assert_eq!(compose(&sections), "## Scope\n\nLegacy body");
    }

    #[test]
    fn unrecognized_sections_are_skipped() {
        let sections = vec![
            TemplateSection::Unrecognized(serde_json::json!(42)),
            structured(Some("Scope"), Some("Who."), None),
        ];
        assert_eq!(compose(&sections), "## Scope\n\nWho.");
    }

    #[test]
    fn sections_with_mistyped_fields_are_still_composed() {
        let sections: Vec<TemplateSection> = serde_json::from_str(
            r#"[{"title":"Scope","content":"All staff must comply.","defaultEnabled":"true"},{"title":7,"content":"Numbered title body."}]"#,
        )
        .unwrap();
        assert_eq!(
            compose(&sections),
            "## Scope\n\nAll staff must comply.\n\n## 7\n\nNumbered title body."
        );
    }

    #[test]
    fn empty_section_list_composes_to_empty_string() {
        assert_eq!(compose(&[]), "");
    }

    #[test]
    fn skeleton_has_title_and_placeholders_in_order() {
        let out = compose_skeleton("Access Policy", &["Purpose", "Scope"]);
        assert_eq!(
            out,
            "# Access Policy\n\n## Purpose\n\n[Content to be generated]\n\n## Scope\n\n[Content to be generated]"
        );
    }

    #[test]
    fn skeleton_without_sections_is_just_the_title() {
        let names: [&str; 0] = [];
        assert_eq!(compose_skeleton("Access Policy", &names), "# Access Policy");
    }

    #[test]
    fn skeleton_accepts_owned_strings() {
        let names = vec!["Purpose".to_string()];
        assert!(compose_skeleton("Access Policy", &names).contains("## Purpose"));
    }

    proptest! {
        /// Composition is deterministic and emits one heading per enabled section.
        #[test]
        fn compose_counts_enabled_headings(
            flags in prop::collection::vec(prop::option::of(any::<bool>()), 0..12)
        ) {
            let sections: Vec<TemplateSection> = flags
                .iter()
                .enumerate()
                .map(|(i, flag)| structured(Some(format!("S{i}").as_str()), Some("body"), *flag))
                .collect();
            let out = compose(&sections);
            prop_assert_eq!(&out, &compose(&sections));
            let expected = flags.iter().filter(|f| **f != Some(false)).count();
            prop_assert_eq!(out.matches("## S").count(), expected);
        }
    }
}
