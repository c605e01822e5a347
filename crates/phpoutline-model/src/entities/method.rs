use super::function::FunctionEntity;
use super::Named;
use crate::docs::Visibility;
use crate::errors::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Represents a method of a class, interface or trait
///
/// Composes a [`FunctionEntity`] (parameters, return, throws, body)
/// instead of inheriting from it; the method-only surface is the
/// qualifier set below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodEntity {
    /// The function part: name, parameters, return, throws, body
    pub function: FunctionEntity,

    /// Declared abstract
    pub is_abstract: bool,

    /// Declared final
    pub is_final: bool,

    /// Declared static
    pub is_static: bool,

    /// Access level; `None` when neither signature nor doc block set one
    pub access: Option<Visibility>,
}

impl MethodEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            function: FunctionEntity::new(name),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    pub fn abstract_method(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn final_method(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_access(mut self, access: Visibility) -> Self {
        self.access = Some(access);
        self
    }

    /// Merge another record describing the same method into this one.
    pub fn merge(&mut self, other: &MethodEntity) -> ModelResult<()> {
        // The inner merge enforces name identity.
        self.function.merge(&other.function)?;
        if other.access.is_some() {
            self.access = other.access;
        }
        if other.is_abstract {
            self.is_abstract = true;
        }
        if other.is_final {
            self.is_final = true;
        }
        if other.is_static {
            self.is_static = true;
        }
        Ok(())
    }

    pub(crate) fn ensure_named(&self, parent: &str) -> ModelResult<()> {
        if self.function.name.is_empty() {
            return Err(ModelError::UnnamedMethod(parent.to_string()));
        }
        Ok(())
    }
}

impl Named for MethodEntity {
    fn entity_name(&self) -> &str {
        &self.function.name
    }
}
