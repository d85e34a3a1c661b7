//! Recognizing the ancestor constructor the analysis searches for.

use ctorchain_model::{ClassModel, ConstructorId};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TEMPLATE_PRESENTATION_CLASS: &str = "com.intellij.openapi.actionSystem.AnAction";
pub const STRING_SUPPLIER: &str = "java.util.function.Supplier<java.lang.String>";
pub const ICON: &str = "javax.swing.Icon";

/// Declaring type plus parameter types of one constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetSignature {
    #[serde(rename = "class")]
    pub qualified_name: String,
    #[serde(rename = "parameters", default)]
    pub parameter_types: Vec<String>,
}

impl TargetSignature {
    pub fn new<I, S>(qualified_name: impl Into<String>, parameter_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            qualified_name: qualified_name.into(),
            parameter_types: parameter_types.into_iter().map(Into::into).collect(),
        }
    }

    /// `AnAction(Supplier<String>, Supplier<String>, Icon)`, the constructor
    /// that initializes an action's template presentation.
    pub fn template_presentation() -> Self {
        Self::new(
            TEMPLATE_PRESENTATION_CLASS,
            [STRING_SUPPLIER, STRING_SUPPLIER, ICON],
        )
    }

    pub fn matches(&self, model: &dyn ClassModel, ctor: ConstructorId) -> bool {
        matches(model, ctor, self)
    }
}

impl Default for TargetSignature {
    fn default() -> Self {
        Self::template_presentation()
    }
}

impl fmt::Display for TargetSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({})",
            self.qualified_name,
            self.parameter_types.join(", ")
        )
    }
}

/// True iff `ctor` is declared by `target`'s class and its parameter types
/// print exactly as `target`'s, position for position.
///
/// Unresolved parameter types never match.
pub fn matches(model: &dyn ClassModel, ctor: ConstructorId, target: &TargetSignature) -> bool {
    let class = model.declaring_class_of(ctor);
    if model.qualified_name(class) != target.qualified_name {
        return false;
    }
    let params = model.parameter_types_of(ctor);
    params.len() == target.parameter_types.len()
        && params
            .iter()
            .zip(&target.parameter_types)
            .all(|(param, expected)| param.canonical_text() == Some(expected.as_str()))
}
