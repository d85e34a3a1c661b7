//! Snapshot discovery.

use anyhow::{Context, Result, bail};
use ctorchain_common::limits::MAX_SNAPSHOT_FILES;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::CONFIG_FILE_NAME;

/// Expand `inputs` into snapshot files.
///
/// Files are taken as given. Directories are walked recursively for
/// `*.json` files other than `ctorchain.json`, in sorted order. The result
/// is deduplicated and keeps the order of `inputs`.
pub fn discover_snapshot_files(inputs: &[PathBuf], cwd: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let path = cwd.join(input);
        if path.is_dir() {
            collect_from_dir(&path, &mut files)?;
        } else if path.is_file() {
            files.push(path);
        } else {
            bail!("input not found: {}", input.display());
        }
    }

    let mut seen = FxHashSet::default();
    files.retain(|path| seen.insert(path.clone()));

    if files.len() > MAX_SNAPSHOT_FILES {
        bail!(
            "too many snapshot files ({}); at most {MAX_SNAPSHOT_FILES} are supported",
            files.len()
        );
    }
    debug!(files = files.len(), "discovered snapshot files");
    Ok(files)
}

fn collect_from_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let walker = WalkDir::new(dir).sort_by_file_name().into_iter();
    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_snapshot_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(())
}

pub(crate) fn is_snapshot_file(path: &Path) -> bool {
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let is_config = path
        .file_name()
        .is_some_and(|name| name == CONFIG_FILE_NAME);
    is_json && !is_config
}
