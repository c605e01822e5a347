use super::class::Member;
use super::interface::{normalize_package, push_unique};
use super::method::MethodEntity;
use super::Named;
use crate::docs::DocTags;
use crate::errors::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Represents a PHP trait
///
/// Carries the member/method capability of a class plus its own
/// used-traits list, but no implements or extends-class surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitEntity {
    /// Trait name
    pub name: String,

    /// Enclosing namespace, if the file declared one
    pub namespace: Option<String>,

    /// Line of the header (1-indexed)
    pub line: Option<usize>,

    /// Category classification
    pub category: Option<String>,

    /// Package classification
    pub package: Option<String>,

    /// Subpackage classification
    pub subpackage: Option<String>,

    /// Documentation attributes
    pub docs: DocTags,

    /// Methods, keyed by name
    pub methods: Vec<MethodEntity>,

    /// Member variables, keyed by name
    pub members: Vec<Member>,

    /// Used trait names, unique, in discovery order
    pub used_traits: Vec<String>,
}

impl TraitEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Full ID of this trait: category-package-name.
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

    /// Look up a member by name.
    pub fn member(&self, name: &str) -> ModelResult<&Member> {
        super::find_named(&self.members, name)
            .ok_or_else(|| ModelError::UnknownMember(name.to_string()))
    }

    /// Add or replace a member, keyed by name.
    pub fn set_member(&mut self, member: Member) {
        super::upsert(&mut self.members, member);
    }

    pub fn add_used_trait(&mut self, name: impl Into<String>) {
        push_unique(&mut self.used_traits, name.into());
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = Some(category.into().trim().to_string());
    }

    /// Sets the package; path-ish separators are normalized to `_`.
    pub fn set_package(&mut self, package: impl Into<String>) {
        self.package = Some(normalize_package(&package.into()));
    }

    /// Merge another record describing the same trait into this one.
    pub fn merge(&mut self, other: &TraitEntity) -> ModelResult<()> {
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
        for name in &other.used_traits {
            push_unique(&mut self.used_traits, name.clone());
        }
        Ok(())
    }
}

impl Named for TraitEntity {
    fn entity_name(&self) -> &str {
        &self.name
    }
}
