use super::method::MethodEntity;
use super::Named;
use crate::docs::DocTags;
use crate::errors::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Represents a PHP interface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterfaceEntity {
    /// Interface name
    pub name: String,

    /// Enclosing namespace, if the file declared one
    pub namespace: Option<String>,

    /// Line of the header (1-indexed)
    pub line: Option<usize>,

    /// Category classification (doc block or inherited from the file)
    pub category: Option<String>,

    /// Package classification
    pub package: Option<String>,

    /// Subpackage classification
    pub subpackage: Option<String>,

    /// Declared final
    pub is_final: bool,

    /// Documentation attributes
    pub docs: DocTags,

    /// Extended parent interface, by name
    pub extends: Option<String>,

    /// Methods, keyed by name
    pub methods: Vec<MethodEntity>,

    /// Names of interfaces extending this one (reverse relation,
    /// populated by a separate indexing pass)
    pub extended_by: Vec<String>,

    /// Names of classes implementing this one (reverse relation)
    pub implemented_by: Vec<String>,
}

impl InterfaceEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Full ID of this interface: category-package-name.
    pub fn id(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref category) = self.category {
            parts.push(category.as_str());
        }
        if let Some(ref package) = self.package {
            parts.push(package.as_str());
        }
        parts.push(&self.name);
        parts.join("-")
    }

    /// Look up a method by name.
    pub fn method(&self, name: &str) -> ModelResult<&MethodEntity> {
        super::find_named(&self.methods, name)
            .ok_or_else(|| ModelError::UnknownMethod(name.to_string()))
    }

    pub fn method_mut(&mut self, name: &str) -> ModelResult<&mut MethodEntity> {
        super::find_named_mut(&mut self.methods, name)
            .ok_or_else(|| ModelError::UnknownMethod(name.to_string()))
    }

    /// Add or replace a method, keyed by name. The method must be named.
    pub fn set_method(&mut self, method: MethodEntity) -> ModelResult<()> {
        method.ensure_named(&self.name)?;
        super::upsert(&mut self.methods, method);
        Ok(())
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = Some(category.into().trim().to_string());
    }

    /// Sets the package; path-ish separators are normalized to `_`.
    pub fn set_package(&mut self, package: impl Into<String>) {
        self.package = Some(normalize_package(&package.into()));
    }

    pub fn add_extending_interface(&mut self, name: impl Into<String>) {
        push_unique(&mut self.extended_by, name.into());
    }

    pub fn add_implementing_class(&mut self, name: impl Into<String>) {
        push_unique(&mut self.implemented_by, name.into());
    }

    /// Merge another record describing the same interface into this one.
    pub fn merge(&mut self, other: &InterfaceEntity) -> ModelResult<()> {
        if self.name != other.name {
            return Err(ModelError::NotMergeable {
                target: self.name.clone(),
                incoming: other.name.clone(),
            });
        }
        if other.namespace.is_some() {
            self.namespace = other.namespace.clone();
        }
        if other.line.is_some() {
            self.line = other.line;
        }
        if other.category.is_some() {
            self.category = other.category.clone();
        }
        if other.package.is_some() {
            self.package = other.package.clone();
        }
        if other.subpackage.is_some() {
            self.subpackage = other.subpackage.clone();
        }
        self.docs.merge_from(&other.docs);
        if other.is_final {
            self.is_final = true;
        }
        if other.extends.is_some() {
            self.extends = other.extends.clone();
        }
        for method in &other.methods {
            match super::find_named_mut(&mut self.methods, method.name()) {
                Some(existing) => existing.merge(method)?,
                None => self.methods.push(method.clone()),
            }
        }
        for name in &other.extended_by {
            push_unique(&mut self.extended_by, name.clone());
        }
        for name in &other.implemented_by {
            push_unique(&mut self.implemented_by, name.clone());
        }
        Ok(())
    }
}

impl Named for InterfaceEntity {
    fn entity_name(&self) -> &str {
        &self.name
    }
}

/// Package names may arrive with path or scope separators; the id scheme
/// expects underscores.
pub(crate) fn normalize_package(package: &str) -> String {
    package
        .replace("::", "_")
        .replace(['/', ':', '.'], "_")
}

pub(crate) fn push_unique(list: &mut Vec<String>, name: String) {
    if !list.iter().any(|n| *n == name) {
        list.push(name);
    }
}
