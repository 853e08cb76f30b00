//! # Processor Module
//!
//! Reads every collected file and validates it against the template for its
//! category. Files are checked in parallel with `rayon`; each outcome becomes
//! a [`FileReport`], so an unreadable or failing file never stops the scan.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::report::FileReport;
use crate::templates::TemplateMap;
use crate::verbose_log;
use crate::verdict::CheckError;

/// Validates files against a set of templates.
#[derive(Debug)]
pub struct Processor {
  templates: TemplateMap,
  want_patch: bool,
}

impl Processor {
  /// Creates a processor; with `want_patch` every failure carries a patch.
  pub const fn new(templates: TemplateMap, want_patch: bool) -> Self {
    Self { templates, want_patch }
  }

  /// Checks a single file.
  ///
  /// A file that no template applies to is accepted.
  ///
  /// # Errors
  ///
  /// Returns [`CheckError::Read`] if the file can't be read or isn't UTF-8,
  /// and [`CheckError::Validation`] if its boilerplate is missing or wrong.
  pub fn check_file(&self, path: &Path) -> Result<(), CheckError> {
    let Some(template) = self.templates.template_for(path) else {
      trace!("Skipping: {} (no template)", path.display());
      return Ok(());
    };

    let content = read_utf8(path).map_err(|source| CheckError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    template.validate(&content, &path.display().to_string(), self.want_patch)?;
    Ok(())
  }

  /// Checks every file in `targets` and returns one report per file, sorted
  /// by path.
  pub fn process(&self, targets: &[PathBuf]) -> Vec<FileReport> {
    if targets.is_empty() {
      debug!("No files to process");
      return Vec::new();
    }

    debug!("Processing {} files with rayon", targets.len());
    let start = Instant::now();

    let mut reports: Vec<FileReport> = targets
      .par_iter()
      .map(|path| match self.check_file(path) {
        Ok(()) => {
          verbose_log!("validated {:?} successfully", path.display().to_string());
          FileReport::valid(path.clone())
        }
        Err(e) => {
          trace!("{}: {}", path.display(), e);
          FileReport::from_error(path.clone(), e)
        }
      })
      .collect();

    reports.sort_by(|a, b| a.path.cmp(&b.path));

    debug!("Processed {} files in {}ms", reports.len(), start.elapsed().as_millis());
    reports
  }
}

fn read_utf8(path: &Path) -> io::Result<String> {
  let bytes = std::fs::read(path)?;
  String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
