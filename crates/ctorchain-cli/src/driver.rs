use anyhow::{Context, Result, bail};
use ctorchain_checker::{
    AllClasses, CandidateFilter, ChainOutcome, ChainStep, ChainTrace, LintDriver, NameFilter,
    Violation,
};
use ctorchain_common::Diagnostic;
use ctorchain_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use ctorchain_model::{ClassHierarchy, ClassId, ClassModel, ConstructorId, ModelSources};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span};

use crate::args::CliArgs;
use crate::config::{CandidateSelection, ResolvedConfig, load_resolved_config};
use crate::fs::discover_snapshot_files;

/// Everything one run produced, ready for the reporter.
#[derive(Debug, Default)]
pub struct RunResult {
    pub diagnostics: Vec<Diagnostic>,
    pub explanations: Vec<ClassExplanation>,
    pub files_read: Vec<PathBuf>,
    pub classes_loaded: usize,
    pub classes_checked: usize,
    /// Classes with at least one diagnostic.
    pub classes_reported: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassExplanation {
    pub class: String,
    pub entry_points: Vec<EntryExplanation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryExplanation {
    pub entry_point: String,
    pub steps: Vec<String>,
    pub outcome: String,
}

pub fn run(args: &CliArgs, cwd: &Path) -> Result<RunResult> {
    let config = load_resolved_config(args, cwd)?;
    let files = discover_snapshot_files(&args.inputs, cwd)?;
    if files.is_empty() {
        bail!("no snapshot files found in the given inputs");
    }
    let hierarchy = load_hierarchy(&files)?;
    info!(
        files = files.len(),
        classes = hierarchy.class_count(),
        signature = %config.target,
        "loaded class hierarchy"
    );

    let mut result = match args.jobs {
        Some(jobs) if jobs > 1 => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .context("failed to start worker threads")?;
            pool.install(|| check_hierarchy(&hierarchy, &config, args.explain))?
        }
        _ => check_hierarchy(&hierarchy, &config, args.explain)?,
    };
    result.files_read = files;
    Ok(result)
}

pub fn load_hierarchy(files: &[PathBuf]) -> Result<ClassHierarchy> {
    let mut sources = ModelSources::new();
    for file in files {
        sources.add_file(file)?;
    }
    sources.build()
}

/// Run the lint driver over every candidate class of `hierarchy`.
pub fn check_hierarchy(
    hierarchy: &ClassHierarchy,
    config: &ResolvedConfig,
    explain: bool,
) -> Result<RunResult> {
    let filter = build_candidate_filter(&config.candidates)?;
    Ok(check_candidates(hierarchy, config, filter.as_ref(), explain))
}

/// Like [`check_hierarchy`] with an explicit filter. `filter` is asked
/// once per class.
pub fn check_candidates(
    hierarchy: &ClassHierarchy,
    config: &ResolvedConfig,
    filter: &dyn CandidateFilter,
    explain: bool,
) -> RunResult {
    let driver = LintDriver::new(hierarchy, &config.target, config.checker);

    let candidates: Vec<ClassId> = hierarchy
        .classes()
        .filter(|&class| filter.is_candidate(hierarchy, class))
        .collect();
    let selected = |_: &dyn ClassModel, _: ClassId| true;

    let _span = info_span!("check", candidates = candidates.len()).entered();
    let reports = driver.check_classes(&candidates, &selected);
    let diagnostics: Vec<Diagnostic> = reports
        .iter()
        .flat_map(|report| {
            report
                .violations
                .iter()
                .map(|violation| violation_diagnostic(hierarchy, report.class, violation))
        })
        .collect();
    debug!(
        reported = reports.len(),
        diagnostics = diagnostics.len(),
        "check finished"
    );

    let explanations = if explain {
        candidates
            .iter()
            .map(|&class| explain_class(hierarchy, &driver, class))
            .collect()
    } else {
        Vec::new()
    };

    RunResult {
        diagnostics,
        explanations,
        files_read: Vec::new(),
        classes_loaded: hierarchy.class_count(),
        classes_checked: candidates.len(),
        classes_reported: reports.len(),
    }
}

/// `--all-classes` or the registered-subclass rule, optionally narrowed by
/// `--include` globs.
pub fn build_candidate_filter(selection: &CandidateSelection) -> Result<Box<dyn CandidateFilter>> {
    let names = build_include_set(&selection.include)?;
    let filter: Box<dyn CandidateFilter> = match (selection.all_classes, names) {
        (true, None) => Box::new(AllClasses),
        (true, Some(names)) => Box::new(NameFilter::new(AllClasses, names)),
        (false, None) => Box::new(selection.registered.clone()),
        (false, Some(names)) => Box::new(NameFilter::new(selection.registered.clone(), names)),
    };
    Ok(filter)
}

fn build_include_set(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid include pattern '{pattern}'"))?;
        builder.add(glob);
    }
    Ok(Some(builder.build().context("failed to build include patterns")?))
}

/// The diagnostic for one violation.
///
/// Declared constructors carry the diagnostic; the default entry point and
/// synthetic constructors have no source of their own, so the class does.
pub fn violation_diagnostic(
    hierarchy: &ClassHierarchy,
    class: ClassId,
    violation: &Violation,
) -> Diagnostic {
    let location = match violation.entry_point {
        Some(ctor) if !hierarchy.is_synthetic(ctor) => hierarchy
            .constructor_location(ctor)
            .or_else(|| hierarchy.class_location(class)),
        _ => hierarchy.class_location(class),
    };

    let matched = describe_step(hierarchy, violation.matched);
    let message = format_message(
        diagnostic_messages::CONSTRUCTOR_INITIALIZES_TEMPLATE_PRESENTATION,
        &[hierarchy.qualified_name(class), &matched],
    );
    let related_location = violation
        .matched
        .constructor
        .and_then(|ctor| hierarchy.constructor_location(ctor))
        .or_else(|| hierarchy.class_location(violation.matched.class));

    Diagnostic::warning(
        location.cloned(),
        message,
        diagnostic_codes::CONSTRUCTOR_INITIALIZES_TEMPLATE_PRESENTATION,
    )
    .with_related(
        related_location.cloned(),
        format_message(diagnostic_messages::CONSTRUCTOR_CHAIN_ANCESTOR, &[&matched]),
        diagnostic_codes::CONSTRUCTOR_CHAIN_ANCESTOR,
    )
}

fn explain_class(hierarchy: &ClassHierarchy, driver: &LintDriver<'_>, class: ClassId) -> ClassExplanation {
    let entry_points = driver
        .explain(class)
        .into_iter()
        .map(|(entry_point, trace)| EntryExplanation {
            entry_point: describe_entry_point(hierarchy, class, entry_point),
            steps: trace
                .steps
                .iter()
                .map(|&step| describe_step(hierarchy, step))
                .collect(),
            outcome: describe_outcome(&trace),
        })
        .collect();
    ClassExplanation {
        class: hierarchy.qualified_name(class).to_string(),
        entry_points,
    }
}

fn describe_entry_point(
    hierarchy: &ClassHierarchy,
    class: ClassId,
    entry_point: Option<ConstructorId>,
) -> String {
    describe_step(hierarchy, ChainStep::new(class, entry_point))
}

/// `Name(T1, T2)` for a declared constructor, `Name() <default>` otherwise.
pub fn describe_step(hierarchy: &ClassHierarchy, step: ChainStep) -> String {
    match step.constructor {
        Some(ctor) => hierarchy.describe_constructor(ctor),
        None => format!("{}() <default>", hierarchy.qualified_name(step.class)),
    }
}

fn describe_outcome(trace: &ChainTrace) -> String {
    let text = match trace.outcome {
        ChainOutcome::Matched(_) => "reaches the target constructor",
        ChainOutcome::Exhausted => "reaches the hierarchy root without a match",
        ChainOutcome::Unresolved => "stops at an unresolved delegation",
        ChainOutcome::Cycle => "revisits a step",
        ChainOutcome::LimitExceeded => "exceeds the step limit",
        ChainOutcome::KnownNoMatch => "joins a chain already known not to match",
    };
    text.to_string()
}
