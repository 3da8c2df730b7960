//! # Variable Substitution Engine
//!
//! Replaces placeholder text in policy content with values from a client
//! profile and the generation dates.
//!
//! ## Catalog
//!
//! Every logical field contributes four groups of literal patterns, in
//! this order:
//!
//! ```text
//! (a) phrases          Approved By: [CISO Name]
//! (b) curly tokens     {{CISO_NAME}}
//! (c) bracket keys     [CISO_NAME]
//! (d) bracket labels   [CISO Name]
//! ```
//!
//! Patterns are matched case-insensitively and every occurrence is
//! replaced. Each pattern runs over the output of the previous one, so a
//! pattern must never run after a shorter pattern it contains: once
//! `[Date]` has been replaced, `Next Review Date: [Date]` can no longer
//! match. The patterns are therefore ordered so that every pattern
//! precedes the patterns it contains, keeping catalog order otherwise.
//! They are compiled and ordered once per process; each
//! [`SubstitutionCatalog`] pairs them with one profile's values.
//!
//! ## Fallbacks
//!
//! A field with no value resolves to its own bracket label (`[Industry]`,
//! `[CISO Name]`). Those labels are catalog patterns that resolve to the
//! same text, which makes substitution idempotent. An empty client name
//! resolves to `[Missing Company Name]`.
//!
//! Phrase patterns keep the label as written in the document and replace
//! only the placeholder, so a second pass never rewrites the label's case.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use grc_core::PolicyDates;
use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex, RegexBuilder};

use crate::model::{non_blank, ClientProfile};

/// Version stamped into every generated policy.
pub const POLICY_VERSION: &str = "1.0";

// -------------------------------------------------------------------------
// Fields
// -------------------------------------------------------------------------

/// A logical value that placeholders can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderField {
    CompanyName,
    Industry,
    CisoName,
    DpoName,
    Headquarters,
    Region,
    ContactEmail,
    LegalEntityName,
    EffectiveDate,
    ReviewDate,
    Version,
}

/// A label immediately followed by a placeholder, e.g. `Approved By: [CISO Name]`.
#[derive(Debug, Clone, Copy)]
struct Phrase {
    label: &'static str,
    token: &'static str,
}

impl PlaceholderField {
    /// All fields in catalog order.
    pub fn all() -> &'static [PlaceholderField] {
        &[
            Self::CompanyName,
            Self::Industry,
            Self::CisoName,
            Self::DpoName,
            Self::Headquarters,
            Self::Region,
            Self::ContactEmail,
            Self::LegalEntityName,
            Self::EffectiveDate,
            Self::ReviewDate,
            Self::Version,
        ]
    }

    /// Primary Title Case label. `[<label>]` is the field's fallback text.
    pub fn label(&self) -> &'static str {
        self.labels()[0]
    }

    /// Bracketed fallback text for a field with no value.
    pub fn placeholder(&self) -> String {
        format!("[{}]", self.label())
    }

    fn phrases(&self) -> &'static [Phrase] {
        match self {
            Self::CisoName => &[Phrase {
                label: "Approved By: ",
                token: "[CISO Name]",
            }],
            Self::DpoName => &[Phrase {
                label: "Data Protection Officer: ",
                token: "[DPO Name]",
            }],
            Self::EffectiveDate => &[Phrase {
                label: "Effective Date: ",
                token: "[Date]",
            }],
            Self::ReviewDate => &[
                Phrase {
                    label: "Review Date: ",
                    token: "[Date + 1 Year]",
                },
                Phrase {
                    label: "Next Review Date: ",
                    token: "[Date]",
                },
                Phrase {
                    label: "Next Review: ",
                    token: "[Date]",
                },
            ],
            _ => &[],
        }
    }

    fn keys(&self) -> &'static [&'static str] {
        match self {
            Self::CompanyName => &["CLIENT_NAME", "COMPANY_NAME", "ORGANIZATION_NAME"],
            Self::Industry => &["INDUSTRY"],
            Self::CisoName => &["CISO_NAME"],
            Self::DpoName => &["DPO_NAME"],
            Self::Headquarters => &["HEADQUARTERS", "HQ_LOCATION"],
            Self::Region => &["REGION", "SERVICE_REGION"],
            Self::ContactEmail => &["CONTACT_EMAIL"],
            Self::LegalEntityName => &["LEGAL_ENTITY_NAME", "LEGAL_ENTITY"],
            Self::EffectiveDate => &["EFFECTIVE_DATE"],
            Self::ReviewDate => &["REVIEW_DATE", "NEXT_REVIEW_DATE"],
            Self::Version => &["VERSION"],
        }
    }

    fn labels(&self) -> &'static [&'static str] {
        match self {
            Self::CompanyName => &["Company Name", "Organization Name", "Client Name"],
            Self::Industry => &["Industry"],
            Self::CisoName => &["CISO Name"],
            Self::DpoName => &["DPO Name"],
            Self::Headquarters => &["Headquarters"],
            Self::Region => &["Region", "Service Region"],
            Self::ContactEmail => &["Contact Email"],
            Self::LegalEntityName => &["Legal Entity Name"],
            Self::EffectiveDate => &["Effective Date", "Date"],
            Self::ReviewDate => &["Review Date", "Date + 1 Year"],
            Self::Version => &["Version"],
        }
    }

    /// Resolve the field for a profile and date pair.
    pub fn resolve(&self, profile: &ClientProfile, dates: &PolicyDates) -> String {
        let optional = |value: Option<&str>| {
            value
                .map(str::to_string)
                .unwrap_or_else(|| self.placeholder())
        };
        match self {
            Self::CompanyName => {
                if profile.name.trim().is_empty() {
                    format!("[Missing {}]", self.label())
                } else {
                    profile.name.clone()
                }
            }
            Self::Industry => optional(profile.industry()),
            Self::CisoName => optional(non_blank(profile.ciso_name.as_ref())),
            Self::DpoName => optional(non_blank(profile.dpo_name.as_ref())),
            Self::Headquarters => optional(non_blank(profile.headquarters.as_ref())),
            Self::Region => optional(profile.service_region()),
            Self::ContactEmail => optional(non_blank(profile.primary_contact_email.as_ref())),
            Self::LegalEntityName => {
                let entity = profile.legal_entity();
                if entity.trim().is_empty() {
                    format!("[Missing {}]", self.label())
                } else {
                    entity.to_string()
                }
            }
            Self::EffectiveDate => dates.effective_long(),
            Self::ReviewDate => dates.review_long(),
            Self::Version => POLICY_VERSION.to_string(),
        }
    }
}

// -------------------------------------------------------------------------
// Compiled patterns
// -------------------------------------------------------------------------

/// Which catalog group an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Label plus placeholder; only the placeholder is replaced.
    Phrase,
    /// `{{KEY}}`
    CurlyToken,
    /// `[KEY]`
    BracketKey,
    /// `[Title Case Label]`
    BracketLabel,
}

/// A compiled matcher. Patterns do not depend on the profile, so the
/// whole list is compiled once per process.
#[derive(Debug)]
struct CompiledPattern {
    field: PlaceholderField,
    kind: PatternKind,
    pattern: String,
    regex: Regex,
}

impl CompiledPattern {
    fn compile(
        field: PlaceholderField,
        kind: PatternKind,
        pattern: String,
        regex_source: String,
    ) -> Option<Self> {
        match RegexBuilder::new(&regex_source).case_insensitive(true).build() {
            Ok(regex) => Some(Self {
                field,
                kind,
                pattern,
                regex,
            }),
            Err(e) => {
                tracing::warn!(pattern = %pattern, error = %e, "skipping placeholder pattern that failed to compile");
                None
            }
        }
    }
}

/// Every pattern in application order, deduplicated and ordered by
/// specificity.
static PATTERNS: Lazy<Vec<CompiledPattern>> = Lazy::new(|| {
    let mut patterns = Vec::new();
    for field in PlaceholderField::all() {
        patterns.extend(field_patterns(*field));
    }
    let patterns = order_by_specificity(dedup_patterns(patterns));
    tracing::debug!(patterns = patterns.len(), "compiled substitution patterns");
    patterns
});

fn field_patterns(field: PlaceholderField) -> Vec<CompiledPattern> {
    let mut patterns = Vec::new();
    for phrase in field.phrases() {
        let pattern = format!("{}{}", phrase.label, phrase.token);
        let source = format!(
            "({}){}",
            regex::escape(phrase.label),
            regex::escape(phrase.token)
        );
        patterns.extend(CompiledPattern::compile(
            field,
            PatternKind::Phrase,
            pattern,
            source,
        ));
    }
    let literal_groups = [
        (PatternKind::CurlyToken, field.keys(), "{{", "}}"),
        (PatternKind::BracketKey, field.keys(), "[", "]"),
        (PatternKind::BracketLabel, field.labels(), "[", "]"),
    ];
    for (kind, names, open, close) in literal_groups {
        for name in names {
            let pattern = format!("{open}{name}{close}");
            let source = regex::escape(&pattern);
            patterns.extend(CompiledPattern::compile(field, kind, pattern, source));
        }
    }
    patterns
}

/// Drop patterns equal to an earlier one case-insensitively.
/// `[INDUSTRY]` and `[Industry]` compile to the same matcher.
fn dedup_patterns(patterns: Vec<CompiledPattern>) -> Vec<CompiledPattern> {
    let mut seen = HashSet::new();
    patterns
        .into_iter()
        .filter(|p| seen.insert(p.pattern.to_lowercase()))
        .collect()
}

/// Stable topological order: a pattern that contains another pattern is
/// moved ahead of it; unrelated patterns keep their relative order.
///
/// Containment between distinct strings implies a strictly longer pattern,
/// so the relation has no cycles.
fn order_by_specificity(patterns: Vec<CompiledPattern>) -> Vec<CompiledPattern> {
    let keys: Vec<String> = patterns.iter().map(|p| p.pattern.to_lowercase()).collect();
    let n = keys.len();
    let contains = |outer: usize, inner: usize| outer != inner && keys[outer].contains(&keys[inner]);

    let mut pending = vec![0usize; n];
    for inner in 0..n {
        pending[inner] = (0..n).filter(|&outer| contains(outer, inner)).count();
    }

    let mut placed = vec![false; n];
    let mut order = Vec::with_capacity(n);
    while let Some(next) = (0..n).find(|&k| !placed[k] && pending[k] == 0) {
        placed[next] = true;
        order.push(next);
        for inner in 0..n {
            if !placed[inner] && contains(next, inner) {
                pending[inner] -= 1;
            }
        }
    }

    let mut slots: Vec<Option<CompiledPattern>> = patterns.into_iter().map(Some).collect();
    order.into_iter().filter_map(|k| slots[k].take()).collect()
}

// -------------------------------------------------------------------------
// Catalog
// -------------------------------------------------------------------------

/// A compiled pattern paired with its resolved value.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    compiled: &'static CompiledPattern,
    value: String,
}

impl CatalogEntry {
    /// The field this entry resolves.
    pub fn field(&self) -> PlaceholderField {
        self.compiled.field
    }

    /// The catalog group this entry belongs to.
    pub fn kind(&self) -> PatternKind {
        self.compiled.kind
    }

    /// The literal text this entry matches (case-insensitively).
    pub fn pattern(&self) -> &str {
        &self.compiled.pattern
    }

    /// The replacement value.
    pub fn value(&self) -> &str {
        &self.value
    }

    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let regex = &self.compiled.regex;
        match self.compiled.kind {
            PatternKind::Phrase => regex.replace_all(text, |caps: &Captures<'_>| {
                let label = caps.get(1).map_or("", |m| m.as_str());
                format!("{label}{}", self.value)
            }),
            _ => regex.replace_all(text, NoExpand(&self.value)),
        }
    }
}

/// The ordered substitution catalog for one client profile and date pair.
///
/// Built per generation call from the shared compiled patterns. The same
/// catalog can be applied to any number of documents.
#[derive(Debug, Clone)]
pub struct SubstitutionCatalog {
    entries: Vec<CatalogEntry>,
}

impl SubstitutionCatalog {
    /// Build the catalog for a profile, resolving every field up front.
    pub fn build(profile: &ClientProfile, dates: &PolicyDates) -> Self {
        let values: HashMap<PlaceholderField, String> = PlaceholderField::all()
            .iter()
            .map(|field| (*field, field.resolve(profile, dates)))
            .collect();
        let entries: Vec<CatalogEntry> = PATTERNS
            .iter()
            .filter_map(|compiled| {
                values.get(&compiled.field).map(|value| CatalogEntry {
                    compiled,
                    value: value.clone(),
                })
            })
            .collect();
        tracing::debug!(entries = entries.len(), client = %profile.id, "built substitution catalog");
        Self { entries }
    }

    /// Entries in application order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every entry, in order, to `content`.
    pub fn apply(&self, content: &str) -> String {
        let mut text = content.to_string();
        for entry in &self.entries {
            let replaced = match entry.apply(&text) {
                Cow::Owned(replaced) => Some(replaced),
                Cow::Borrowed(_) => None,
            };
            if let Some(replaced) = replaced {
                text = replaced;
            }
        }
        text
    }
}

// -------------------------------------------------------------------------
// Public API
// -------------------------------------------------------------------------

/// Substitute placeholders using today's date as the effective date.
///
/// Never fails: if the dates cannot be computed the content is returned
/// unchanged and a warning is logged.
pub fn substitute(content: &str, profile: &ClientProfile) -> String {
    match PolicyDates::today() {
        Ok(dates) => substitute_on(content, profile, &dates),
        Err(e) => {
            tracing::warn!(error = %e, "could not compute policy dates; returning content unchanged");
            content.to_string()
        }
    }
}

/// Substitute placeholders with a pinned date pair.
pub fn substitute_on(content: &str, profile: &ClientProfile, dates: &PolicyDates) -> String {
    if content.is_empty() {
        return String::new();
    }
    let catalog = SubstitutionCatalog::build(profile, dates);
    if catalog.is_empty() {
        tracing::warn!("no placeholder patterns compiled; returning content unchanged");
        return content.to_string();
    }
    catalog.apply(content)
}
