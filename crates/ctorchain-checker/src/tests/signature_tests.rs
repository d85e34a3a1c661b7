use ctorchain_model::{HierarchyBuilder, TypeDescriptor};

use crate::signature::{ICON, STRING_SUPPLIER, TEMPLATE_PRESENTATION_CLASS, TargetSignature, matches};
use crate::test_fixtures::add_action_base;

#[test]
fn template_constructor_matches_preset() {
    let mut b = HierarchyBuilder::new();
    let base = add_action_base(&mut b);
    let h = b.build().unwrap();
    let target = TargetSignature::template_presentation();

    assert!(matches(&h, base.template, &target));
    assert!(target.matches(&h, base.template));
    for other in [base.no_arg, base.icon, base.text, base.supplier_icon] {
        assert!(!matches(&h, other, &target));
    }
}

#[test]
fn declaring_class_must_match() {
    let mut b = HierarchyBuilder::new();
    let imposter = b.add_class("com.example.AnAction");
    let ctor = b.add_constructor(imposter, [STRING_SUPPLIER, STRING_SUPPLIER, ICON]);
    let h = b.build().unwrap();

    assert!(!matches(&h, ctor, &TargetSignature::template_presentation()));
}

#[test]
fn parameter_count_must_match() {
    let mut b = HierarchyBuilder::new();
    let class = b.add_class("p.A");
    let two = b.add_constructor(class, ["int", "int"]);
    let h = b.build().unwrap();

    assert!(!matches(&h, two, &TargetSignature::new("p.A", ["int"])));
    assert!(!matches(&h, two, &TargetSignature::new("p.A", ["int", "int", "int"])));
    assert!(matches(&h, two, &TargetSignature::new("p.A", ["int", "int"])));
}

#[test]
fn parameter_text_is_compared_exactly_by_position() {
    let mut b = HierarchyBuilder::new();
    let class = b.add_class("p.A");
    let ctor = b.add_constructor(class, ["int", "java.lang.String"]);
    let h = b.build().unwrap();

    assert!(!matches(&h, ctor, &TargetSignature::new("p.A", ["java.lang.String", "int"])));
    assert!(!matches(&h, ctor, &TargetSignature::new("p.A", ["int", "String"])));
}

#[test]
fn unresolved_parameter_types_never_match() {
    let mut b = HierarchyBuilder::new();
    let class = b.add_class("p.A");
    let ctor = b.add_constructor(class, [TypeDescriptor::Unresolved]);
    let h = b.build().unwrap();

    assert!(!matches(&h, ctor, &TargetSignature::new("p.A", ["<unresolved>"])));
    assert!(!matches(&h, ctor, &TargetSignature::new("p.A", [""])));
}

#[test]
fn no_arg_signature_matches_no_arg_constructor() {
    let mut b = HierarchyBuilder::new();
    let class = b.add_class("p.A");
    let ctor = b.add_constructor(class, Vec::<&str>::new());
    let h = b.build().unwrap();

    assert!(matches(&h, ctor, &TargetSignature::new("p.A", Vec::<String>::new())));
}

#[test]
fn display_prints_class_and_parameters() {
    assert_eq!(
        TargetSignature::new("p.A", ["int", "long"]).to_string(),
        "p.A(int, long)"
    );
    assert_eq!(
        TargetSignature::new("p.A", Vec::<String>::new()).to_string(),
        "p.A()"
    );
}

#[test]
fn deserializes_from_class_and_parameters() {
    let target: TargetSignature =
        serde_json::from_str(r#"{ "class": "p.A", "parameters": ["int"] }"#).unwrap();
    assert_eq!(target, TargetSignature::new("p.A", ["int"]));

    let no_params: TargetSignature = serde_json::from_str(r#"{ "class": "p.A" }"#).unwrap();
    assert!(no_params.parameter_types.is_empty());
}

#[test]
fn default_target_is_template_presentation() {
    let target = TargetSignature::default();
    assert_eq!(target.qualified_name, TEMPLATE_PRESENTATION_CLASS);
    assert_eq!(target.parameter_types, vec![STRING_SUPPLIER, STRING_SUPPLIER, ICON]);
}
