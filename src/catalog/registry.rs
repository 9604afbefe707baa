//! Template registry
//!
//! Read-only lookup over a set of templates. The registry is sealed at
//! construction time: there is no way to add or change templates afterwards,
//! and every access that leaves the registry hands out a copy.

use std::collections::HashMap;
use thiserror::Error;

use crate::catalog::builtin::builtin_templates;
use crate::catalog::template::Template;
use crate::model::TierList;

/// Read-only registry of tier-list templates
///
/// Templates keep their declaration order; names are unique.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    /// Templates in catalog order
    templates: Vec<Template>,
    /// Name to position lookup
    name_to_index: HashMap<String, usize>,
}

impl TemplateRegistry {
    /// Build a registry from a set of templates
    ///
    /// Fails if two templates share a name.
    pub fn new(templates: Vec<Template>) -> Result<Self, CatalogError> {
        let mut registry = Self {
            templates: Vec::with_capacity(templates.len()),
            name_to_index: HashMap::new(),
        };
        for template in templates {
            if registry.name_to_index.contains_key(&template.name) {
                return Err(CatalogError::DuplicateName(template.name));
            }
            registry
                .name_to_index
                .insert(template.name.clone(), registry.templates.len());
            registry.templates.push(template);
        }
        Ok(registry)
    }

    /// Registry holding the shipped catalog (Blank, TierMaker, Cute)
    pub fn builtin() -> Self {
        let mut registry = Self {
            templates: Vec::new(),
            name_to_index: HashMap::new(),
        };
        // Builtin names are unique by construction
        for template in builtin_templates() {
            registry
                .name_to_index
                .insert(template.name.clone(), registry.templates.len());
            registry.templates.push(template);
        }
        registry
    }

    /// Look up a template by name
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.name_to_index
            .get(name)
            .and_then(|&i| self.templates.get(i))
    }

    /// All templates in catalog order
    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    /// Template names in catalog order
    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name.as_str()).collect()
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the registry holds no templates
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Start a new tier list from the named template
    ///
    /// The returned list is an independent deep copy (see
    /// [`Template::instantiate`]); editing it never touches the catalog.
    pub fn instantiate(
        &self,
        template_name: &str,
        list_id: u32,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<TierList, CatalogError> {
        let template = self
            .get(template_name)
            .ok_or_else(|| CatalogError::TemplateNotFound(template_name.to_string()))?;

        tracing::debug!(template = %template_name, list_id, "Instantiating template");
        Ok(template.instantiate(list_id, name, description))
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Errors that can occur in the template catalog
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Lookup with a name the catalog does not contain
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Two templates with the same name at construction
    #[error("Duplicate template name: {0}")]
    DuplicateName(String),
}
