use anyhow::{Context, Result};
use colored::Colorize;
use ctorchain_common::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation};
use serde::Serialize;

use crate::driver::{ClassExplanation, RunResult};

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diagnostic in diagnostics {
            out.push_str(&self.format_diagnostic(diagnostic));
            out.push('\n');
        }
        out
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = match &diagnostic.location {
            Some(location) => location.to_string(),
            None => "<unknown>".to_string(),
        };

        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        let code = self.format_code(diagnostic.code);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        for related in &diagnostic.related_information {
            output.push('\n');
            output.push_str(&self.format_related(related));
        }
        output
    }

    fn format_related(&self, related: &DiagnosticRelatedInformation) -> String {
        let location = related
            .location
            .as_ref()
            .map_or_else(|| "<unknown>".to_string(), ToString::to_string);
        let prefix = if self.color {
            "  Related".dimmed().to_string()
        } else {
            "  Related".to_string()
        };

        format!("{prefix}: {location} - {}", related.message_text)
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }

        let label = format!("CC{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }

    /// One block per checked class: each entry point, its steps, and why the walk stopped.
    pub fn render_explanations(&self, explanations: &[ClassExplanation]) -> String {
        let mut out = String::new();
        for class in explanations {
            let name = if self.color {
                class.class.bold().to_string()
            } else {
                class.class.clone()
            };
            out.push_str(&name);
            out.push('\n');
            for entry in &class.entry_points {
                out.push_str(&format!("  {}\n", entry.entry_point));
                for step in &entry.steps {
                    out.push_str(&format!("    -> {step}\n"));
                }
                let outcome = if self.color {
                    entry.outcome.dimmed().to_string()
                } else {
                    entry.outcome.clone()
                };
                out.push_str(&format!("    {outcome}\n"));
            }
        }
        out
    }

    pub fn render_summary(&self, result: &RunResult) -> String {
        let found = result.diagnostics.len();
        let text = format!(
            "Found {found} {} in {} of {} checked {} ({} loaded from {} {}).",
            plural(found, "violation", "violations"),
            result.classes_reported,
            result.classes_checked,
            plural(result.classes_checked, "class", "classes"),
            result.classes_loaded,
            result.files_read.len(),
            plural(result.files_read.len(), "file", "files"),
        );
        if self.color && found > 0 {
            text.yellow().to_string()
        } else {
            text
        }
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    diagnostics: &'a [Diagnostic],
    #[serde(skip_serializing_if = "Option::is_none")]
    explanations: Option<&'a [ClassExplanation]>,
    classes_checked: usize,
    classes_reported: usize,
    classes_loaded: usize,
    files: usize,
}

/// The whole run as one pretty-printed JSON document.
pub fn render_json(result: &RunResult) -> Result<String> {
    let report = JsonReport {
        diagnostics: &result.diagnostics,
        explanations: (!result.explanations.is_empty()).then_some(result.explanations.as_slice()),
        classes_checked: result.classes_checked,
        classes_reported: result.classes_reported,
        classes_loaded: result.classes_loaded,
        files: result.files_read.len(),
    };
    serde_json::to_string_pretty(&report).context("failed to serialize report")
}
