use super::interface::{normalize_package, push_unique};
use super::method::MethodEntity;
use super::Named;
use crate::docs::{DocTags, Visibility};
use crate::errors::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Represents a class member variable (field)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Member name, without the leading `$`
    pub name: String,

    /// Type from a `@var` annotation
    pub type_annotation: Option<String>,

    /// Description from a `@var` annotation
    pub description: Option<String>,

    /// Access level; `None` for bare `var` declarations
    pub access: Option<Visibility>,

    /// Declared static
    pub is_static: bool,

    /// Default value as captured source text, never evaluated
    pub default_value: Option<String>,

    /// Line of the declaration (1-indexed)
    pub line: Option<usize>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, type_ann: impl Into<String>) -> Self {
        self.type_annotation = Some(type_ann.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_access(mut self, access: Visibility) -> Self {
        self.access = Some(access);
        self
    }

    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_value = Some(default.into());
        self
    }

    /// Merge another record describing the same member into this one,
    /// typically a `@var` annotation onto a signature-derived member.
    pub fn merge(&mut self, other: &Member) -> ModelResult<()> {
        if self.name != other.name {
            return Err(ModelError::NotMergeable {
                target: self.name.clone(),
                incoming: other.name.clone(),
            });
        }
        if other.type_annotation.is_some() {
            self.type_annotation = other.type_annotation.clone();
        }
        if other.description.is_some() {
            self.description = other.description.clone();
        }
        if other.access.is_some() {
            self.access = other.access;
        }
        if other.default_value.is_some() {
            self.default_value = other.default_value.clone();
        }
        if other.is_static {
            self.is_static = true;
        }
        if other.line.is_some() {
            self.line = other.line;
        }
        Ok(())
    }
}

impl Named for Member {
    fn entity_name(&self) -> &str {
        &self.name
    }
}

/// Represents a PHP class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassEntity {
    /// Class name
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

    /// Declared abstract; mutually exclusive with `is_final`
    pub is_abstract: bool,

    /// Declared final; mutually exclusive with `is_abstract`
    pub is_final: bool,

    /// Documentation attributes
    pub docs: DocTags,

    /// Extended parent class, by name
    pub extends: Option<String>,

    /// Implemented interface names, unique, in discovery order
    pub implements: Vec<String>,

    /// Used trait names, unique, in discovery order
    pub uses: Vec<String>,

    /// Methods, keyed by name
    pub methods: Vec<MethodEntity>,

    /// Member variables, keyed by name
    pub members: Vec<Member>,

    /// Names of classes extending this one (reverse relation,
    /// populated by a separate indexing pass)
    pub extended_by: Vec<String>,
}

impl ClassEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Full ID of this class: category-package-name.
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

    /// Flag the class abstract. Fails if it is already final.
    pub fn set_abstract(&mut self, is_abstract: bool) -> ModelResult<()> {
        if is_abstract && self.is_final {
            return Err(ModelError::FinalAbstractClass(self.name.clone()));
        }
        self.is_abstract = is_abstract;
        Ok(())
    }

    /// Flag the class final. Fails if it is already abstract.
    pub fn set_final(&mut self, is_final: bool) -> ModelResult<()> {
        if is_final && self.is_abstract {
            return Err(ModelError::FinalAbstractClass(self.name.clone()));
        }
        self.is_final = is_final;
        Ok(())
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

    /// Look up a member by name.
    pub fn member(&self, name: &str) -> ModelResult<&Member> {
        super::find_named(&self.members, name)
            .ok_or_else(|| ModelError::UnknownMember(name.to_string()))
    }

    /// Add or replace a member, keyed by name.
    pub fn set_member(&mut self, member: Member) {
        super::upsert(&mut self.members, member);
    }

    pub fn add_implemented_interface(&mut self, name: impl Into<String>) {
        push_unique(&mut self.implements, name.into());
    }

    pub fn add_used_trait(&mut self, name: impl Into<String>) {
        push_unique(&mut self.uses, name.into());
    }

    pub fn add_extending_class(&mut self, name: impl Into<String>) {
        push_unique(&mut self.extended_by, name.into());
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = Some(category.into().trim().to_string());
    }

    /// Sets the package; path-ish separators are normalized to `_`.
    pub fn set_package(&mut self, package: impl Into<String>) {
        self.package = Some(normalize_package(&package.into()));
    }

    /// Merge another record describing the same class into this one.
    pub fn merge(&mut self, other: &ClassEntity) -> ModelResult<()> {
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
        if other.is_abstract {
            self.set_abstract(true)?;
        }
        if other.is_final {
            self.set_final(true)?;
        }
        if other.extends.is_some() {
            self.extends = other.extends.clone();
        }
        for name in &other.implements {
            push_unique(&mut self.implements, name.clone());
        }
        for name in &other.uses {
            push_unique(&mut self.uses, name.clone());
        }
        for method in &other.methods {
            match super::find_named_mut(&mut self.methods, method.name()) {
                Some(existing) => existing.merge(method)?,
                None => self.methods.push(method.clone()),
            }
        }
        for member in &other.members {
            match super::find_named_mut(&mut self.members, &member.name) {
                Some(existing) => existing.merge(member)?,
                None => self.members.push(member.clone()),
            }
        }
        for name in &other.extended_by {
            push_unique(&mut self.extended_by, name.clone());
        }
        Ok(())
    }
}

impl Named for ClassEntity {
    fn entity_name(&self) -> &str {
        &self.name
    }
}
