//! Tests for the entity model: lookup, merge and invariant contracts

use crate::*;

fn sample_class() -> ClassEntity {
    let mut class = ClassEntity::new("Foo");
    class.extends = Some("Bar".to_string());
    class.add_implemented_interface("Baz");
    let mut method = MethodEntity::new("run").with_access(Visibility::Public);
    method.function.set_parameter(Parameter::new("input").with_cast("string"));
    class.set_method(method).unwrap();
    class.set_member(Member::new("count").with_type("int"));
    class
}

#[test]
fn test_round_trip_lookup_returns_identical_instance() {
    let mut file = FileEntity::new("Foo.php");
    file.add_class(sample_class());

    let class = file.class("Foo").unwrap();
    assert_eq!(class.name, "Foo");

    let method = class.method("run").unwrap();
    assert_eq!(method.name(), "run");
    assert_eq!(
        method.function.parameter("input").unwrap().cast.as_deref(),
        Some("string")
    );

    let member = class.member("count").unwrap();
    assert_eq!(member.type_annotation.as_deref(), Some("int"));
}

#[test]
fn test_lookup_errors_for_absent_names() {
    let file = FileEntity::new("Foo.php");
    assert!(matches!(file.class("Nope"), Err(ModelError::UnknownClass(_))));
    assert!(matches!(
        file.interface("Nope"),
        Err(ModelError::UnknownInterface(_))
    ));
    assert!(matches!(file.trait_("Nope"), Err(ModelError::UnknownTrait(_))));
    assert!(matches!(
        file.function("nope"),
        Err(ModelError::UnknownFunction(_))
    ));

    let class = sample_class();
    assert!(matches!(class.method("nope"), Err(ModelError::UnknownMethod(_))));
    assert!(matches!(class.member("nope"), Err(ModelError::UnknownMember(_))));
    assert!(matches!(
        FunctionEntity::new("f").parameter("nope"),
        Err(ModelError::UnknownParameter(_))
    ));
}

#[test]
fn test_name_collision_last_write_wins() {
    let mut file = FileEntity::new("Foo.php");
    let mut first = ClassEntity::new("Foo");
    first.set_category("old");
    file.add_class(first);

    let mut second = ClassEntity::new("Foo");
    second.set_category("new");
    file.add_class(second);

    assert_eq!(file.classes.len(), 1);
    assert_eq!(file.class("Foo").unwrap().category.as_deref(), Some("new"));
}

#[test]
fn test_merge_identity_law() {
    // Every named entity refuses to merge with a differently-named record.
    let mut class = ClassEntity::new("A");
    assert!(matches!(
        class.merge(&ClassEntity::new("B")),
        Err(ModelError::NotMergeable { .. })
    ));

    let mut interface = InterfaceEntity::new("A");
    assert!(interface.merge(&InterfaceEntity::new("B")).is_err());

    let mut trait_entity = TraitEntity::new("A");
    assert!(trait_entity.merge(&TraitEntity::new("B")).is_err());

    let mut function = FunctionEntity::new("a");
    assert!(function.merge(&FunctionEntity::new("b")).is_err());

    let mut method = MethodEntity::new("a");
    assert!(method.merge(&MethodEntity::new("b")).is_err());

    let mut parameter = Parameter::new("a");
    assert!(parameter.merge(&Parameter::new("b")).is_err());

    let mut member = Member::new("a");
    assert!(member.merge(&Member::new("b")).is_err());

    let mut throws = ThrowsClause::new("A");
    assert!(throws.merge(&ThrowsClause::new("B")).is_err());

    let mut trigger = TriggerClause::new("a");
    assert!(trigger.merge(&TriggerClause::new("b")).is_err());

    let mut author = Author::new("a");
    assert!(author.merge(&Author::new("b")).is_err());

    let mut license = License::new("a");
    assert!(license.merge(&License::new("b")).is_err());

    let mut file = FileEntity::new("a.php");
    assert!(file.merge(&FileEntity::new("b.php")).is_err());
}

#[test]
fn test_merge_self_copy_duplicates_lists() {
    // Merge always appends list values; merging an identical copy
    // duplicates them. Scalars stay unchanged. This pins the documented
    // append semantics, it is not a bug.
    let mut function = FunctionEntity::new("f");
    function.docs.description = Some("does things".into());
    function.docs.todos.push("clean up".into());
    function.add_throws(ThrowsClause::new("RuntimeException"));

    let copy = function.clone();
    function.merge(&copy).unwrap();

    assert_eq!(function.docs.description.as_deref(), Some("does things"));
    assert_eq!(function.docs.todos.len(), 2);
    assert_eq!(function.throws.len(), 2);
    // Parameters are name-keyed, so they do not duplicate.
    assert_eq!(function.parameters.len(), 0);
}

#[test]
fn test_merge_fills_scalar_gaps() {
    let mut target = FunctionEntity::new("f");
    let mut source = FunctionEntity::new("f");
    source.docs.description = Some("desc".into());
    source.set_return(ReturnValue::new("int").with_description("count"));
    source.set_parameter(Parameter::new("x").with_type("int"));

    target.merge(&source).unwrap();
    assert_eq!(target.docs.description.as_deref(), Some("desc"));
    assert_eq!(
        target.return_value.as_ref().unwrap().type_annotation.as_deref(),
        Some("int")
    );
    assert_eq!(target.parameter("x").unwrap().type_annotation.as_deref(), Some("int"));
}

#[test]
fn test_return_merge_overwrites_type() {
    // The doc-block @return wins over a signature default when present.
    let mut ret = ReturnValue::new("void");
    ret.merge(&ReturnValue::new("float").with_description("Sum"));
    assert_eq!(ret.type_annotation.as_deref(), Some("float"));
    assert_eq!(ret.description.as_deref(), Some("Sum"));

    // An empty source leaves the target untouched.
    ret.merge(&ReturnValue::default());
    assert_eq!(ret.type_annotation.as_deref(), Some("float"));
}

#[test]
fn test_final_abstract_exclusive() {
    let mut class = ClassEntity::new("Foo");
    class.set_abstract(true).unwrap();
    assert!(matches!(
        class.set_final(true),
        Err(ModelError::FinalAbstractClass(_))
    ));

    let mut class = ClassEntity::new("Bar");
    class.set_final(true).unwrap();
    assert!(class.set_abstract(true).is_err());

    // Clearing one flag unblocks the other.
    class.set_final(false).unwrap();
    class.set_abstract(true).unwrap();
    assert!(class.is_abstract);
}

#[test]
fn test_unnamed_method_rejected() {
    let mut class = ClassEntity::new("Foo");
    let unnamed = MethodEntity::new("");
    assert!(matches!(
        class.set_method(unnamed),
        Err(ModelError::UnnamedMethod(_))
    ));
}

#[test]
fn test_method_merge_keeps_existing_access() {
    // Access is a scalar: the source overwrites only when set.
    let mut method = MethodEntity::new("run").with_access(Visibility::Protected);
    let other = MethodEntity::new("run");
    method.merge(&other).unwrap();
    assert_eq!(method.access, Some(Visibility::Protected));

    let other = MethodEntity::new("run").with_access(Visibility::Private);
    method.merge(&other).unwrap();
    assert_eq!(method.access, Some(Visibility::Private));
}

#[test]
fn test_entity_ids() {
    let mut class = sample_class();
    class.set_category("Library");
    class.set_package("Test/Package");
    assert_eq!(class.id(), "Library-Test_Package-Foo");

    let bare = ClassEntity::new("Solo");
    assert_eq!(bare.id(), "Solo");

    let mut file = FileEntity::new("Foo.php");
    file.set_category("Library");
    assert_eq!(file.id(), "Library-Foo.php");
}

#[test]
fn test_file_serde_round_trip() {
    let mut file = FileEntity::new("Foo.php");
    file.namespace = Some("App\\Models".to_string());
    file.add_class(sample_class());
    let mut function = FunctionEntity::new("add");
    function.set_return(ReturnValue::new("float"));
    file.set_function(function);

    let json = serde_json::to_string(&file).unwrap();
    let back: FileEntity = serde_json::from_str(&json).unwrap();
    assert_eq!(file, back);
}
