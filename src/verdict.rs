//! # Verdict Module
//!
//! Outcome types for checking a single file. A failed check is an expected
//! result and is returned as a value, never raised as a panic; the caller
//! collects failures across all files before reporting.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Why a file failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reason {
  /// No boilerplate block was found in the file
  MissingBoilerplate,
  /// A boilerplate block was found but doesn't match the template
  IncorrectBoilerplate,
}

impl fmt::Display for Reason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Reason::MissingBoilerplate => write!(f, "missing boilerplate"),
      Reason::IncorrectBoilerplate => write!(f, "incorrect boilerplate"),
    }
  }
}

/// A failed validation, optionally carrying a unified diff that turns the
/// actual content into the expected content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct Failure {
  pub reason: Reason,
  pub patch: Option<String>,
}

impl Failure {
  pub const fn new(reason: Reason) -> Self {
    Self { reason, patch: None }
  }

  pub fn with_patch(mut self, patch: String) -> Self {
    self.patch = Some(patch);
    self
  }
}

/// Error for a single file, either a failed validation or a failure to read
/// the file in the first place.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
  #[error(transparent)]
  Validation(#[from] Failure),

  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },
}
