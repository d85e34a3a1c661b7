use serde::Serialize;

use crate::position::SourceLocation;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl DiagnosticCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Suggestion => "suggestion",
            Self::Message => "message",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const CONSTRUCTOR_INITIALIZES_TEMPLATE_PRESENTATION: u32 = 9001;
    pub const CONSTRUCTOR_CHAIN_ANCESTOR: u32 = 9002;
}

pub mod diagnostic_messages {
    pub const CONSTRUCTOR_INITIALIZES_TEMPLATE_PRESENTATION: &str =
        "Constructor of '{0}' initializes the template presentation through '{1}'";
    pub const CONSTRUCTOR_CHAIN_ANCESTOR: &str = "The constructor chain reaches '{0}' here";
}

pub const DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::CONSTRUCTOR_INITIALIZES_TEMPLATE_PRESENTATION,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::CONSTRUCTOR_INITIALIZES_TEMPLATE_PRESENTATION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONSTRUCTOR_CHAIN_ANCESTOR,
        category: DiagnosticCategory::Message,
        message: diagnostic_messages::CONSTRUCTOR_CHAIN_ANCESTOR,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub location: Option<SourceLocation>,
    pub message_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub location: Option<SourceLocation>,
    pub message_text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    pub fn warning(
        location: Option<SourceLocation>,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Warning,
            code,
            location,
            message_text: message.into(),
            related_information: Vec::new(),
        }
    }

    pub fn with_related(
        mut self,
        location: Option<SourceLocation>,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            category: DiagnosticCategory::Message,
            code,
            location,
            message_text: message.into(),
        });
        self
    }
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
