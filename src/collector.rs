//! # Collector Module
//!
//! Enumerates the files to check under a target path. Directories are walked
//! with the `ignore` crate, so `.gitignore` and `.ignore` files are honored
//! whether or not the tree is a git repository.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use tracing::debug;

use crate::templates::TemplateMap;
use crate::verbose_log;

/// File names that are never checked.
const SKIPPED_FILE_NAMES: &[&str] = &["go.mod", "go.sum", "go.work", "go.work.sum"];

/// Prefix of generated file names that are never checked.
const GENERATED_FILE_PREFIX: &str = "zz_generated";

/// Decides which directories are pruned from the walk.
///
/// An entry of the skip list matches a directory either by name, anywhere in
/// the tree, or as a prefix of the directory's path relative to the target.
#[derive(Debug, Clone)]
pub struct SkipList {
  names: HashSet<String>,
  prefixes: Vec<PathBuf>,
}

impl SkipList {
  pub fn new(entries: &[String]) -> Self {
    let mut names = HashSet::new();
    let mut prefixes = Vec::new();

    for entry in entries {
      if entry.contains('/') {
        prefixes.push(PathBuf::from(entry));
      } else {
        names.insert(entry.clone());
      }
    }

    Self { names, prefixes }
  }

  /// Returns `true` when the directory at `relative` should not be walked.
  pub fn skips_dir(&self, relative: &Path) -> bool {
    let by_name = relative
      .file_name()
      .and_then(|name| name.to_str())
      .is_some_and(|name| self.names.contains(name));

    by_name || self.prefixes.iter().any(|prefix| relative.starts_with(prefix))
  }
}

/// Returns `true` for files that are exempt by name.
pub fn is_skipped_file(path: &Path) -> bool {
  let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
    return false;
  };

  SKIPPED_FILE_NAMES.contains(&name) || name.starts_with(GENERATED_FILE_PREFIX)
}

/// Collects the files under `target` that have a template.
///
/// A regular file is returned on its own when a template applies to it. The
/// result is sorted so output is stable.
///
/// # Errors
///
/// Returns an error if `target` doesn't exist or the walk fails.
pub fn collect_targets(target: &Path, templates: &TemplateMap, skip: &SkipList) -> Result<Vec<PathBuf>> {
  let metadata = std::fs::metadata(target).with_context(|| format!("failed to stat {}", target.display()))?;

  if metadata.is_file() {
    if templates.template_for(target).is_some() {
      return Ok(vec![target.to_path_buf()]);
    }
    debug!("No template for {}", target.display());
    return Ok(Vec::new());
  }

  let start_time = std::time::Instant::now();
  let base = Arc::new(target.to_path_buf());
  let skip = Arc::new(skip.clone());

  let walker = {
    let base = Arc::clone(&base);
    let skip = Arc::clone(&skip);
    WalkBuilder::new(target)
      .hidden(false)
      .require_git(false)
      .filter_entry(move |entry| {
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        if !is_dir || entry.depth() == 0 {
          return true;
        }
        let relative = entry.path().strip_prefix(base.as_path()).unwrap_or(entry.path());
        if skip.skips_dir(relative) {
          verbose_log!("skipping directory {:?}", entry.path().display().to_string());
          return false;
        }
        true
      })
      .build()
  };

  let mut targets = Vec::new();
  for entry in walker {
    let entry = entry.with_context(|| format!("failed to walk {}", target.display()))?;
    if !entry.file_type().is_some_and(|ft| ft.is_file()) {
      continue;
    }

    let path = entry.into_path();
    if is_skipped_file(&path) {
      verbose_log!("skipping file {:?}", path.display().to_string());
      continue;
    }

    // Files without a template are silently left out.
    if templates.template_for(&path).is_some() {
      targets.push(path);
    }
  }

  targets.sort();
  debug!(
    "Found {} files to check in {}ms",
    targets.len(),
    start_time.elapsed().as_millis()
  );

  Ok(targets)
}
