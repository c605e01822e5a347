use crate::errors::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access level of a method or member
///
/// Kept as a tri-state plus "unset" (`Option<Visibility>`) because the
/// decorator must distinguish "signature said nothing" from any explicit
/// level when reconciling with doc-block `@access` tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

impl FromStr for Visibility {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "public" => Ok(Visibility::Public),
            "protected" => Ok(Visibility::Protected),
            "private" => Ok(Visibility::Private),
            _ => Err(()),
        }
    }
}

/// A documentation author (`@author Name <email>`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Author name
    pub name: String,

    /// Email address, parsed out of angle brackets when present
    pub email: Option<String>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Merge another author record into this one.
    ///
    /// Identity is the author name; the email is copied when the source
    /// side has one.
    pub fn merge(&mut self, other: &Author) -> ModelResult<()> {
        if self.name != other.name {
            return Err(ModelError::NotMergeable {
                target: self.name.clone(),
                incoming: other.name.clone(),
            });
        }
        if other.email.is_some() {
            self.email = other.email.clone();
        }
        Ok(())
    }
}

/// A documentation license (`@license urlOrName [urlOrName]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// License name
    pub name: String,

    /// License URL, whichever positional slot carried an http(s) prefix
    pub url: Option<String>,
}

impl License {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn merge(&mut self, other: &License) -> ModelResult<()> {
        if self.name != other.name {
            return Err(ModelError::NotMergeable {
                target: self.name.clone(),
                incoming: other.name.clone(),
            });
        }
        if other.url.is_some() {
            self.url = other.url.clone();
        }
        Ok(())
    }
}

/// Documentation attributes shared by files, types, functions and methods
///
/// One flat field group instead of the per-concern trait stacking the
/// data originates from; entities embed this by value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocTags {
    /// Free-text description, lines joined by newline and trimmed
    pub description: Option<String>,

    /// `@since`
    pub since: Option<String>,

    /// `@version`
    pub version: Option<String>,

    /// `@author` entries, in source order
    pub authors: Vec<Author>,

    /// `@license` entries
    pub licenses: Vec<License>,

    /// `@copyright` entries (raw text)
    pub copyrights: Vec<String>,

    /// `@link` entries
    pub links: Vec<String>,

    /// `@see` entries
    pub sees: Vec<String>,

    /// `@deprecated` entries
    pub deprecations: Vec<String>,

    /// `@todo` entries
    pub todos: Vec<String>,
}

impl DocTags {
    /// Apply the general merge contract to this field group: scalar
    /// attributes are overwritten when the source side is set, list
    /// attributes are appended (never replaced).
    pub fn merge_from(&mut self, other: &DocTags) {
        if other.description.is_some() {
            self.description = other.description.clone();
        }
        if other.since.is_some() {
            self.since = other.since.clone();
        }
        if other.version.is_some() {
            self.version = other.version.clone();
        }
        self.authors.extend(other.authors.iter().cloned());
        self.licenses.extend(other.licenses.iter().cloned());
        self.copyrights.extend(other.copyrights.iter().cloned());
        self.links.extend(other.links.iter().cloned());
        self.sees.extend(other.sees.iter().cloned());
        self.deprecations.extend(other.deprecations.iter().cloned());
        self.todos.extend(other.todos.iter().cloned());
    }
}
