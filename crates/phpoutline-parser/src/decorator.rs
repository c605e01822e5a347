//! Doc-block decoration.
//!
//! Applies a parsed [`DocBlock`] onto an already-built structural entity.
//! Signatures and doc blocks are independent, possibly inconsistent
//! descriptions of the same declaration; decoration merges rather than
//! replaces, so whichever source has data wins. The one exception is a
//! method's access level, where the signature takes precedence.

use crate::docblock::DocBlock;
use log::trace;
use phpoutline_model::{
    ClassEntity, FileEntity, FunctionEntity, InterfaceEntity, MethodEntity, TraitEntity,
};

/// Apply file-level doc data: classification, versioning and the
/// shared documentation lists.
pub fn decorate_file(file: &mut FileEntity, block: &DocBlock) {
    if let Some(ref category) = block.category {
        file.set_category(category.clone());
    }
    if let Some(ref package) = block.package {
        file.set_package(package.clone());
    }
    if let Some(ref subpackage) = block.subpackage {
        file.subpackage = Some(subpackage.clone());
    }
    apply_doc_tags(&mut file.docs, block);
}

pub fn decorate_interface(interface: &mut InterfaceEntity, block: &DocBlock) {
    if let Some(ref category) = block.category {
        interface.set_category(category.clone());
    }
    if let Some(ref package) = block.package {
        interface.set_package(package.clone());
    }
    if let Some(ref subpackage) = block.subpackage {
        interface.subpackage = Some(subpackage.clone());
    }
    if let Some(ref extends) = block.extends {
        interface.extends = Some(extends.clone());
    }
    apply_doc_tags(&mut interface.docs, block);
}

pub fn decorate_class(class: &mut ClassEntity, block: &DocBlock) {
    if let Some(ref category) = block.category {
        class.set_category(category.clone());
    }
    if let Some(ref package) = block.package {
        class.set_package(package.clone());
    }
    if let Some(ref subpackage) = block.subpackage {
        class.subpackage = Some(subpackage.clone());
    }
    if let Some(ref extends) = block.extends {
        class.extends = Some(extends.clone());
    }
    for name in &block.implements {
        class.add_implemented_interface(name.clone());
    }
    for name in &block.uses {
        class.add_used_trait(name.clone());
    }
    apply_doc_tags(&mut class.docs, block);
}

pub fn decorate_trait(trait_entity: &mut TraitEntity, block: &DocBlock) {
    if let Some(ref category) = block.category {
        trait_entity.set_category(category.clone());
    }
    if let Some(ref package) = block.package {
        trait_entity.set_package(package.clone());
    }
    if let Some(ref subpackage) = block.subpackage {
        trait_entity.subpackage = Some(subpackage.clone());
    }
    for name in &block.uses {
        trait_entity.add_used_trait(name.clone());
    }
    apply_doc_tags(&mut trait_entity.docs, block);
}

/// Apply function-level doc data: return, throws, triggers and the
/// by-name parameter merge.
pub fn decorate_function(function: &mut FunctionEntity, block: &DocBlock) {
    if let Some(ref ret) = block.return_value {
        match function.return_value {
            Some(ref mut existing) => existing.merge(ret),
            None => function.return_value = Some(ret.clone()),
        }
    }
    for param in &block.params {
        // Correlation is strictly by name; a documented parameter absent
        // from the signature never creates one.
        match function.parameter_mut(&param.name) {
            Ok(existing) => {
                // Names match by construction, the merge cannot fail.
                let _ = existing.merge(param);
            }
            Err(_) => {
                trace!(
                    "dropping doc @param '{}' not present in signature of '{}'",
                    param.name,
                    function.name
                );
            }
        }
    }
    for throws in &block.throws {
        function.add_throws(throws.clone());
    }
    for trigger in &block.triggers {
        function.add_trigger(trigger.clone());
    }
    apply_doc_tags(&mut function.docs, block);
}

pub fn decorate_method(method: &mut MethodEntity, block: &DocBlock) {
    decorate_function(&mut method.function, block);
    if method.access.is_none() {
        // Signature access wins; the doc tag only fills a gap.
        if let Some(ref access) = block.access {
            method.access = access.trim().parse().ok();
        }
    }
}

fn apply_doc_tags(docs: &mut phpoutline_model::DocTags, block: &DocBlock) {
    if let Some(ref description) = block.description {
        docs.description = Some(description.clone());
    }
    if let Some(ref since) = block.since {
        docs.since = Some(since.clone());
    }
    if let Some(ref version) = block.version {
        docs.version = Some(version.clone());
    }
    docs.authors.extend(block.authors.iter().cloned());
    docs.licenses.extend(block.licenses.iter().cloned());
    docs.copyrights.extend(block.copyrights.iter().cloned());
    docs.links.extend(block.links.iter().cloned());
    docs.sees.extend(block.sees.iter().cloned());
    docs.deprecations.extend(block.deprecations.iter().cloned());
    docs.todos.extend(block.todos.iter().cloned());
}
