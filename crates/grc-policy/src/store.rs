//! # Policy Library
//!
//! The template store and client profile provider are external
//! collaborators. The engine only sees them through [`TemplateStore`] and
//! [`ClientProfileProvider`]; a production deployment backs both with its
//! database, while [`InMemoryLibrary`] serves tests and the CLI.
//!
//! ## File layout
//!
//! ```text
//! <library>/
//!   templates/   one template per *.yaml | *.yml | *.json
//!   clients/     one client profile per *.yaml | *.yml | *.json
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use grc_core::{ClientId, TemplateId};

use crate::error::{PolicyError, PolicyResult};
use crate::model::{ClientProfile, Template};
use crate::parser::{load_record, record_files};

/// Subdirectory holding template records.
pub const TEMPLATES_DIR: &str = "templates";

/// Subdirectory holding client profile records.
pub const CLIENTS_DIR: &str = "clients";

/// Read access to policy templates.
///
/// `Ok(None)` means the id does not resolve; `Err` means the store itself
/// failed.
pub trait TemplateStore: Send + Sync {
    /// Fetch one template by id.
    fn template(&self, id: &TemplateId) -> PolicyResult<Option<Template>>;

    /// Templates a client may use: global ones plus those it owns, ordered
    /// by name.
    fn templates_for_client(&self, client: &ClientId) -> PolicyResult<Vec<Template>>;
}

/// Read access to client profiles.
pub trait ClientProfileProvider: Send + Sync {
    /// Fetch one client profile by id.
    fn client_profile(&self, id: &ClientId) -> PolicyResult<Option<ClientProfile>>;
}

/// A `BTreeMap`-backed library implementing both collaborator traits.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLibrary {
    templates: BTreeMap<TemplateId, Template>,
    clients: BTreeMap<ClientId, ClientProfile>,
}

impl InMemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a template. Returns the previous record, if any.
    pub fn insert_template(&mut self, template: Template) -> Option<Template> {
        self.templates.insert(template.id, template)
    }

    /// Insert or replace a client profile. Returns the previous record, if any.
    pub fn insert_client(&mut self, profile: ClientProfile) -> Option<ClientProfile> {
        self.clients.insert(profile.id, profile)
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Load a library directory.
    ///
    /// A missing `templates/` or `clients/` subdirectory is treated as
    /// empty. Two records sharing an id fail the whole load.
    pub fn load_dir(root: &Path) -> PolicyResult<Self> {
        if !root.is_dir() {
            return Err(PolicyError::FileNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut library = Self::new();

        for path in record_files(&root.join(TEMPLATES_DIR))? {
            let template: Template = load_record(&path)?;
            let id = template.id;
            if library.insert_template(template).is_some() {
                tracing::warn!(template = %id, path = %path.display(), "duplicate template id");
                return Err(PolicyError::Validation(format!(
                    "duplicate template id {id} in {}",
                    path.display()
                )));
            }
        }

        for path in record_files(&root.join(CLIENTS_DIR))? {
            let profile: ClientProfile = load_record(&path)?;
            let id = profile.id;
            if library.insert_client(profile).is_some() {
                tracing::warn!(client = %id, path = %path.display(), "duplicate client id");
                return Err(PolicyError::Validation(format!(
                    "duplicate client id {id} in {}",
                    path.display()
                )));
            }
        }

        tracing::debug!(
            root = %root.display(),
            templates = library.template_count(),
            clients = library.client_count(),
            "policy library loaded"
        );
        Ok(library)
    }
}

impl TemplateStore for InMemoryLibrary {
    fn template(&self, id: &TemplateId) -> PolicyResult<Option<Template>> {
        Ok(self.templates.get(id).cloned())
    }

    fn templates_for_client(&self, client: &ClientId) -> PolicyResult<Vec<Template>> {
        let mut visible: Vec<Template> = self
            .templates
            .values()
            .filter(|t| t.is_visible_to(client))
            .cloned()
            .collect();
        visible.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(visible)
    }
}

impl ClientProfileProvider for InMemoryLibrary {
    fn client_profile(&self, id: &ClientId) -> PolicyResult<Option<ClientProfile>> {
        Ok(self.clients.get(id).cloned())
    }
}
