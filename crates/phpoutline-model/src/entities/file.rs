use super::class::ClassEntity;
use super::function::FunctionEntity;
use super::interface::{normalize_package, InterfaceEntity};
use super::trait_::TraitEntity;
use super::Named;
use crate::docs::DocTags;
use crate::errors::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Represents one scanned source file
///
/// Built incrementally during a single scan pass, read-mostly afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileEntity {
    /// File name without directories
    pub basename: String,

    /// Path relative to the supplied root
    pub pathname: String,

    /// Absolute URI with forward slashes
    pub uri: String,

    /// Namespace declared by the file, if any
    pub namespace: Option<String>,

    /// Category classification from the file-level doc block
    pub category: Option<String>,

    /// Package classification
    pub package: Option<String>,

    /// Subpackage classification
    pub subpackage: Option<String>,

    /// Documentation attributes from the file-level doc block
    pub docs: DocTags,

    /// Top-level classes, keyed by name, last definition wins
    pub classes: Vec<ClassEntity>,

    /// Top-level interfaces, keyed by name
    pub interfaces: Vec<InterfaceEntity>,

    /// Top-level traits, keyed by name
    pub traits: Vec<TraitEntity>,

    /// Top-level functions, keyed by name
    pub functions: Vec<FunctionEntity>,

    /// Full raw source text, when capture is enabled
    pub source_code: Option<String>,
}

impl FileEntity {
    pub fn new(basename: impl Into<String>) -> Self {
        Self {
            basename: basename.into(),
            ..Default::default()
        }
    }

    /// Full ID of this file: category-package-basename.
    pub fn id(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref category) = self.category {
            parts.push(category.as_str());
        }
        if let Some(ref package) = self.package {
            parts.push(package.as_str());
        }
        parts.push(&self.basename);
        parts.join("-")
    }

    /// Look up a class by name.
    pub fn class(&self, name: &str) -> ModelResult<&ClassEntity> {
        super::find_named(&self.classes, name)
            .ok_or_else(|| ModelError::UnknownClass(name.to_string()))
    }

    pub fn class_mut(&mut self, name: &str) -> ModelResult<&mut ClassEntity> {
        super::find_named_mut(&mut self.classes, name)
            .ok_or_else(|| ModelError::UnknownClass(name.to_string()))
    }

    /// Look up an interface by name.
    pub fn interface(&self, name: &str) -> ModelResult<&InterfaceEntity> {
        super::find_named(&self.interfaces, name)
            .ok_or_else(|| ModelError::UnknownInterface(name.to_string()))
    }

    /// Look up a trait by name.
    pub fn trait_(&self, name: &str) -> ModelResult<&TraitEntity> {
        super::find_named(&self.traits, name)
            .ok_or_else(|| ModelError::UnknownTrait(name.to_string()))
    }

    /// Look up a top-level function by name.
    pub fn function(&self, name: &str) -> ModelResult<&FunctionEntity> {
        super::find_named(&self.functions, name)
            .ok_or_else(|| ModelError::UnknownFunction(name.to_string()))
    }

    /// Add or replace a class, keyed by name.
    pub fn add_class(&mut self, class: ClassEntity) {
        super::upsert(&mut self.classes, class);
    }

    /// Add or replace an interface, keyed by name.
    pub fn add_interface(&mut self, interface: InterfaceEntity) {
        super::upsert(&mut self.interfaces, interface);
    }

    /// Add or replace a trait, keyed by name.
    pub fn add_trait(&mut self, trait_entity: TraitEntity) {
        super::upsert(&mut self.traits, trait_entity);
    }

    /// Add or replace a top-level function, keyed by name.
    pub fn set_function(&mut self, function: FunctionEntity) {
        super::upsert(&mut self.functions, function);
    }

    pub fn has_classes(&self) -> bool {
        !self.classes.is_empty()
    }

    pub fn has_interfaces(&self) -> bool {
        !self.interfaces.is_empty()
    }

    pub fn has_traits(&self) -> bool {
        !self.traits.is_empty()
    }

    pub fn has_functions(&self) -> bool {
        !self.functions.is_empty()
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = Some(category.into().trim().to_string());
    }

    /// Sets the package; path-ish separators are normalized to `_`.
    pub fn set_package(&mut self, package: impl Into<String>) {
        self.package = Some(normalize_package(&package.into()));
    }

    /// Merge another record describing the same file into this one.
    /// Identity is the basename.
    pub fn merge(&mut self, other: &FileEntity) -> ModelResult<()> {
        if self.basename != other.basename {
            return Err(ModelError::NotMergeable {
                target: self.basename.clone(),
                incoming: other.basename.clone(),
            });
        }
        if !other.pathname.is_empty() {
            self.pathname = other.pathname.clone();
        }
        if !other.uri.is_empty() {
            self.uri = other.uri.clone();
        }
        if other.namespace.is_some() {
            self.namespace = other.namespace.clone();
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
        for class in &other.classes {
            match super::find_named_mut(&mut self.classes, &class.name) {
                Some(existing) => existing.merge(class)?,
                None => self.classes.push(class.clone()),
            }
        }
        for interface in &other.interfaces {
            match super::find_named_mut(&mut self.interfaces, &interface.name) {
                Some(existing) => existing.merge(interface)?,
                None => self.interfaces.push(interface.clone()),
            }
        }
        for trait_entity in &other.traits {
            match super::find_named_mut(&mut self.traits, &trait_entity.name) {
                Some(existing) => existing.merge(trait_entity)?,
                None => self.traits.push(trait_entity.clone()),
            }
        }
        for function in &other.functions {
            match super::find_named_mut(&mut self.functions, &function.name) {
                Some(existing) => existing.merge(function)?,
                None => self.functions.push(function.clone()),
            }
        }
        if other.source_code.is_some() {
            self.source_code = other.source_code.clone();
        }
        Ok(())
    }
}

impl Named for FileEntity {
    fn entity_name(&self) -> &str {
        &self.basename
    }
}
