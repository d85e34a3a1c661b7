use anyhow::{Context, Result};
use ctorchain_checker::{CheckerOptions, RegisteredSubclassFilter, TargetSignature};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use crate::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "ctorchain.json";

/// Custom deserializer for boolean options that accepts both bool and string values.
/// This handles cases where ctorchain.json contains `"allClasses": "true"` instead of `"allClasses": true`.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => {
            let normalized = s.trim().to_lowercase();
            match normalized.as_str() {
                "true" | "1" | "yes" | "on" => Ok(Some(true)),
                "false" | "0" | "no" | "off" => Ok(Some(false)),
                _ => Err(Error::custom(format!(
                    "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
                ))),
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default)]
    pub target: Option<TargetSignature>,
    #[serde(default)]
    pub candidates: Option<CandidatesConfig>,
    #[serde(default)]
    pub max_chain_steps: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub cache: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CandidatesConfig {
    #[serde(default)]
    pub base_class: Option<String>,
    #[serde(default)]
    pub registration: Option<String>,
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub all_classes: Option<bool>,
}

/// Which classes get checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateSelection {
    pub registered: RegisteredSubclassFilter,
    pub all_classes: bool,
    pub include: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedConfig {
    pub target: TargetSignature,
    pub candidates: CandidateSelection,
    pub checker: CheckerOptions,
}

pub fn parse_config(source: &str) -> Result<ConfigFile> {
    let config = serde_json::from_str(source).context("failed to parse ctorchain.json")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// The explicit `--config` path, or `ctorchain.json` in `cwd` when it exists.
pub fn find_config(args: &CliArgs, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = &args.config {
        return Some(cwd.join(path));
    }
    let default = cwd.join(CONFIG_FILE_NAME);
    default.is_file().then_some(default)
}

/// Apply a config file on top of the built-in defaults.
pub fn resolve_config(file: Option<&ConfigFile>) -> ResolvedConfig {
    let mut resolved = ResolvedConfig::default();
    let Some(file) = file else {
        return resolved;
    };

    if let Some(target) = &file.target {
        resolved.target = target.clone();
    }
    if let Some(max_chain_steps) = file.max_chain_steps {
        resolved.checker.max_chain_steps = max_chain_steps;
    }
    if let Some(cache) = file.cache {
        resolved.checker.memoize = cache;
    }
    if let Some(candidates) = &file.candidates {
        if let Some(base_class) = &candidates.base_class {
            resolved.candidates.registered.base_class = base_class.clone();
        }
        if let Some(registration) = &candidates.registration {
            resolved.candidates.registered.registration = registration.clone();
        }
        if let Some(include) = &candidates.include {
            resolved.candidates.include = include.clone();
        }
        if let Some(all_classes) = candidates.all_classes {
            resolved.candidates.all_classes = all_classes;
        }
    }
    resolved
}

/// Command-line flags win over the config file.
///
/// `--target-class` replaces the whole target signature with the given
/// class and `--target-param` list. `--target-param` alone keeps the
/// configured class and replaces only the parameter list.
pub fn apply_cli_overrides(resolved: &mut ResolvedConfig, args: &CliArgs) {
    if let Some(class) = &args.target_class {
        resolved.target = TargetSignature::new(class.clone(), args.target_params.iter().cloned());
    } else if !args.target_params.is_empty() {
        resolved.target.parameter_types = args.target_params.clone();
    }
    if let Some(base_class) = &args.base_class {
        resolved.candidates.registered.base_class = base_class.clone();
    }
    if let Some(registration) = &args.registration {
        resolved.candidates.registered.registration = registration.clone();
    }
    if args.all_classes {
        resolved.candidates.all_classes = true;
    }
    if !args.include.is_empty() {
        resolved.candidates.include = args.include.clone();
    }
    if let Some(max_chain_steps) = args.max_chain_steps {
        resolved.checker.max_chain_steps = max_chain_steps;
    }
    if args.no_cache {
        resolved.checker.memoize = false;
    }
    resolved.checker.parallel = args.jobs != Some(1);
}

/// Defaults, then the config file (if any), then flags.
pub fn load_resolved_config(args: &CliArgs, cwd: &Path) -> Result<ResolvedConfig> {
    let file = find_config(args, cwd).map(|path| load_config(&path)).transpose()?;
    let mut resolved = resolve_config(file.as_ref());
    apply_cli_overrides(&mut resolved, args);
    Ok(resolved)
}
