use crate::diagnostics::{
    Diagnostic, DiagnosticCategory, diagnostic_codes, diagnostic_messages, format_message,
    get_message_template,
};
use crate::position::SourceLocation;

#[test]
fn format_message_substitutes_positional_args() {
    let text = format_message(
        diagnostic_messages::CONSTRUCTOR_INITIALIZES_TEMPLATE_PRESENTATION,
        &["com.example.MyAction", "AnAction(Icon)"],
    );
    assert_eq!(
        text,
        "Constructor of 'com.example.MyAction' initializes the template presentation through 'AnAction(Icon)'"
    );
}

#[test]
fn format_message_leaves_unknown_placeholders() {
    assert_eq!(format_message("{0} and {1}", &["a"]), "a and {1}");
}

#[test]
fn message_templates_are_registered_by_code() {
    assert_eq!(
        get_message_template(diagnostic_codes::CONSTRUCTOR_CHAIN_ANCESTOR),
        Some(diagnostic_messages::CONSTRUCTOR_CHAIN_ANCESTOR)
    );
    assert_eq!(get_message_template(1), None);
}

#[test]
fn diagnostic_serializes_without_empty_related_information() {
    let diagnostic = Diagnostic::warning(
        Some(SourceLocation::new("A.java", 3, 5)),
        "message",
        diagnostic_codes::CONSTRUCTOR_INITIALIZES_TEMPLATE_PRESENTATION,
    );
    assert_eq!(diagnostic.category, DiagnosticCategory::Warning);

    let json = serde_json::to_value(&diagnostic).unwrap();
    assert_eq!(json["category"], "warning");
    assert_eq!(json["location"]["line"], 3);
    assert!(json.get("related_information").is_none());

    let with_related = diagnostic.with_related(None, "here", 9002);
    let json = serde_json::to_value(&with_related).unwrap();
    assert_eq!(json["related_information"][0]["message_text"], "here");
}

#[test]
fn source_location_display() {
    assert_eq!(SourceLocation::new("A.java", 3, 5).to_string(), "A.java:3:5");
}
