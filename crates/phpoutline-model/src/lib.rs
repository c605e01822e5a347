//! phpoutline structural model
//!
//! Entity types describing the structure of PHP source files: files,
//! classes, interfaces, traits, functions, methods, members, parameters
//! and the small documentation records attached to them. This crate
//! defines:
//!
//! - **Entity types**: mutable records built incrementally by a scan
//!   pass, read-mostly afterwards
//! - **Merge contracts**: combining two records that describe the same
//!   declaration (signature data vs. doc-block data, or records from
//!   separate discovery passes)
//! - **Error handling**: typed lookup, merge-identity and construction
//!   invariant errors
//!
//! Collections are name-keyed with last-write-wins collision semantics
//! while preserving insertion order; by-name getters fail with a
//! [`ModelError`] lookup variant when the key is absent.

pub mod docs;
pub mod entities;
pub mod errors;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use docs::{Author, DocTags, License, Visibility};
pub use entities::{
    ClassEntity, FileEntity, FunctionEntity, InterfaceEntity, Member, MethodEntity, Parameter,
    ReturnValue, ThrowsClause, TraitEntity, TriggerClause,
};
pub use errors::{ModelError, ModelResult};
