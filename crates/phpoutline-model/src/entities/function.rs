use super::Named;
use crate::docs::DocTags;
use crate::errors::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Represents a function or method parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name, without the leading `$` or `&`
    pub name: String,

    /// Type hint from the signature (`function f(float $a)`)
    pub cast: Option<String>,

    /// Type from the doc block (`@param float $a`)
    pub type_annotation: Option<String>,

    /// Description from the doc block
    pub description: Option<String>,

    /// Default value as captured source text, never evaluated
    pub default_value: Option<String>,

    /// Declared by reference (`&$name`)
    pub by_reference: bool,

    /// Line of the declaring signature (1-indexed)
    pub line: Option<usize>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_cast(mut self, cast: impl Into<String>) -> Self {
        self.cast = Some(cast.into());
        self
    }

    pub fn with_type(mut self, type_ann: impl Into<String>) -> Self {
        self.type_annotation = Some(type_ann.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_value = Some(default.into());
        self
    }

    pub fn by_reference(mut self) -> Self {
        self.by_reference = true;
        self
    }

    /// Merge a parameter record describing the same parameter into this
    /// one. Used to reconcile a doc-block `@param` with the
    /// signature-derived parameter of the same name.
    pub fn merge(&mut self, other: &Parameter) -> ModelResult<()> {
        if self.name != other.name {
            return Err(ModelError::NotMergeable {
                target: self.name.clone(),
                incoming: other.name.clone(),
            });
        }
        if other.cast.is_some() {
            self.cast = other.cast.clone();
        }
        if other.type_annotation.is_some() {
            self.type_annotation = other.type_annotation.clone();
        }
        if other.description.is_some() {
            self.description = other.description.clone();
        }
        if other.default_value.is_some() {
            self.default_value = other.default_value.clone();
        }
        if other.by_reference {
            self.by_reference = true;
        }
        if other.line.is_some() {
            self.line = other.line;
        }
        Ok(())
    }
}

impl Named for Parameter {
    fn entity_name(&self) -> &str {
        &self.name
    }
}

/// Return descriptor of a function or method
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnValue {
    /// Return type as written (signature hint or doc-block type)
    pub type_annotation: Option<String>,

    /// Description from the doc block
    pub description: Option<String>,
}

impl ReturnValue {
    pub fn new(type_annotation: impl Into<String>) -> Self {
        Self {
            type_annotation: Some(type_annotation.into()),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Fill type and description from another return record.
    ///
    /// Returns carry no name, so unlike every other merge this one has no
    /// identity requirement: the doc-block `@return` is expected to
    /// overwrite a differently-typed signature default.
    pub fn merge(&mut self, other: &ReturnValue) {
        if other.type_annotation.is_some() {
            self.type_annotation = other.type_annotation.clone();
        }
        if other.description.is_some() {
            self.description = other.description.clone();
        }
    }
}

/// A thrown exception (`@throws Type [reason]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowsClause {
    /// Exception type name
    pub name: String,

    /// Condition under which it is thrown
    pub reason: Option<String>,
}

impl ThrowsClause {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn merge(&mut self, other: &ThrowsClause) -> ModelResult<()> {
        if self.name != other.name {
            return Err(ModelError::NotMergeable {
                target: self.name.clone(),
                incoming: other.name.clone(),
            });
        }
        if other.reason.is_some() {
            self.reason = other.reason.clone();
        }
        Ok(())
    }
}

/// A triggered error or event (`@trigger key [condition]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerClause {
    /// Trigger key
    pub key: String,

    /// Condition under which it fires
    pub condition: Option<String>,
}

impl TriggerClause {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn merge(&mut self, other: &TriggerClause) -> ModelResult<()> {
        if self.key != other.key {
            return Err(ModelError::NotMergeable {
                target: self.key.clone(),
                incoming: other.key.clone(),
            });
        }
        if other.condition.is_some() {
            self.condition = other.condition.clone();
        }
        Ok(())
    }
}

/// Represents a top-level PHP function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionEntity {
    /// Function name
    pub name: String,

    /// Line of the signature (1-indexed)
    pub line: Option<usize>,

    /// Documentation attributes
    pub docs: DocTags,

    /// Parameters in signature order; lookup is by name
    pub parameters: Vec<Parameter>,

    /// Return descriptor, if a signature hint or doc block supplied one
    pub return_value: Option<ReturnValue>,

    /// Thrown exceptions
    pub throws: Vec<ThrowsClause>,

    /// Triggered errors/events
    pub triggers: Vec<TriggerClause>,

    /// Raw body lines captured between the braces
    pub source_code: Vec<String>,
}

impl FunctionEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> ModelResult<&Parameter> {
        super::find_named(&self.parameters, name)
            .ok_or_else(|| ModelError::UnknownParameter(name.to_string()))
    }

    pub fn parameter_mut(&mut self, name: &str) -> ModelResult<&mut Parameter> {
        super::find_named_mut(&mut self.parameters, name)
            .ok_or_else(|| ModelError::UnknownParameter(name.to_string()))
    }

    /// Add or replace a parameter, keyed by name.
    pub fn set_parameter(&mut self, parameter: Parameter) {
        super::upsert(&mut self.parameters, parameter);
    }

    pub fn set_return(&mut self, return_value: ReturnValue) {
        self.return_value = Some(return_value);
    }

    pub fn add_throws(&mut self, throws: ThrowsClause) {
        self.throws.push(throws);
    }

    pub fn add_trigger(&mut self, trigger: TriggerClause) {
        self.triggers.push(trigger);
    }

    /// Merge another record describing the same function into this one.
    pub fn merge(&mut self, other: &FunctionEntity) -> ModelResult<()> {
        if self.name != other.name {
            return Err(ModelError::NotMergeable {
                target: self.name.clone(),
                incoming: other.name.clone(),
            });
        }
        if other.line.is_some() {
            self.line = other.line;
        }
        self.docs.merge_from(&other.docs);
        if let Some(ref ret) = other.return_value {
            match self.return_value {
                Some(ref mut existing) => existing.merge(ret),
                None => self.return_value = Some(ret.clone()),
            }
        }
        for parameter in &other.parameters {
            match super::find_named_mut(&mut self.parameters, &parameter.name) {
                Some(existing) => existing.merge(parameter)?,
                None => self.parameters.push(parameter.clone()),
            }
        }
        self.throws.extend(other.throws.iter().cloned());
        self.triggers.extend(other.triggers.iter().cloned());
        self.source_code.extend(other.source_code.iter().cloned());
        Ok(())
    }
}

impl Named for FunctionEntity {
    fn entity_name(&self) -> &str {
        &self.name
    }
}
