//! Shared hierarchies for checker unit tests.

use ctorchain_model::{ClassId, ConstructorId, FirstStatement, HierarchyBuilder};

use crate::signature::{ICON, STRING_SUPPLIER, TEMPLATE_PRESENTATION_CLASS};

pub(crate) const STRING: &str = "java.lang.String";

/// `java.lang.Object` and an `AnAction` with the constructor overloads of
/// the real class; every overload except `AnAction()` ends up in the
/// template-presentation constructor.
pub(crate) struct ActionBase {
    pub object: ClassId,
    pub action: ClassId,
    pub no_arg: ConstructorId,
    pub icon: ConstructorId,
    pub text: ConstructorId,
    pub supplier: ConstructorId,
    pub text_description_icon: ConstructorId,
    pub template: ConstructorId,
    pub supplier_icon: ConstructorId,
}

pub(crate) fn add_action_base(b: &mut HierarchyBuilder) -> ActionBase {
    let object = b.add_class("java.lang.Object");
    b.add_constructor(object, Vec::<&str>::new());

    let action = b.add_class(TEMPLATE_PRESENTATION_CLASS);
    b.set_superclass(action, object);

    let no_arg = b.add_constructor(action, Vec::<&str>::new());
    let icon = b.add_constructor(action, [ICON]);
    let text = b.add_constructor(action, [STRING]);
    let supplier = b.add_constructor(action, [STRING_SUPPLIER]);
    let text_description_icon = b.add_constructor(action, [STRING, STRING, ICON]);
    let template = b.add_constructor(action, [STRING_SUPPLIER, STRING_SUPPLIER, ICON]);
    let supplier_icon = b.add_constructor(action, [STRING_SUPPLIER, ICON]);

    b.set_first_statement(icon, FirstStatement::this_call(template));
    b.set_first_statement(text, FirstStatement::this_call(text_description_icon));
    b.set_first_statement(supplier, FirstStatement::this_call(template));
    b.set_first_statement(text_description_icon, FirstStatement::this_call(template));
    b.set_first_statement(template, FirstStatement::Other);
    b.set_first_statement(supplier_icon, FirstStatement::this_call(template));

    ActionBase {
        object,
        action,
        no_arg,
        icon,
        text,
        supplier,
        text_description_icon,
        template,
        supplier_icon,
    }
}

/// `p.C0 <- p.C1 <- ... <- p.C{depth}`, each with an empty no-arg constructor.
pub(crate) fn linear_chain(b: &mut HierarchyBuilder, depth: usize) -> Vec<(ClassId, ConstructorId)> {
    let mut chain = Vec::with_capacity(depth + 1);
    for i in 0..=depth {
        let class = b.add_class(&format!("p.C{i}"));
        if let Some(&(parent, _)) = chain.last() {
            b.set_superclass(class, parent);
        }
        let ctor = b.add_constructor(class, Vec::<&str>::new());
        chain.push((class, ctor));
    }
    chain
}
