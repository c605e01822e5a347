pub mod class;
pub mod file;
pub mod function;
pub mod interface;
pub mod method;
pub mod trait_;

pub use class::{ClassEntity, Member};
pub use file::FileEntity;
pub use function::{FunctionEntity, Parameter, ReturnValue, ThrowsClause, TriggerClause};
pub use interface::InterfaceEntity;
pub use method::MethodEntity;
pub use trait_::TraitEntity;

/// Anything stored in a name-keyed entity collection.
pub(crate) trait Named {
    fn entity_name(&self) -> &str;
}

/// Insert into a name-keyed collection with last-write-wins semantics:
/// an existing entry with the same name is replaced in place (keeping its
/// position), otherwise the item is appended. Mirrors PHP array overwrite
/// behavior the scan pass relies on.
pub(crate) fn upsert<T: Named>(list: &mut Vec<T>, item: T) {
    match list.iter().position(|e| e.entity_name() == item.entity_name()) {
        Some(idx) => list[idx] = item,
        None => list.push(item),
    }
}

pub(crate) fn find_named<'a, T: Named>(list: &'a [T], name: &str) -> Option<&'a T> {
    list.iter().find(|e| e.entity_name() == name)
}

pub(crate) fn find_named_mut<'a, T: Named>(list: &'a mut [T], name: &str) -> Option<&'a mut T> {
    list.iter_mut().find(|e| e.entity_name() == name)
}
