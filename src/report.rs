//! # Report Module
//!
//! Per-file results of a run, the summary derived from them, and the optional
//! JSON report written to disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::verdict::{CheckError, Reason};

/// Result of checking one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// What happened to it
  #[serde(flatten)]
  pub status: FileStatus,
}

/// Outcome of checking one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileStatus {
  /// The boilerplate is correct, or the file is exempt
  Valid,
  /// The boilerplate is missing or incorrect
  Failed { reason: Reason, patch: Option<String> },
  /// The file couldn't be read
  Unreadable { message: String },
}

impl FileReport {
  pub fn valid(path: PathBuf) -> Self {
    Self {
      path,
      status: FileStatus::Valid,
    }
  }

  /// Builds the report for a file that didn't pass.
  pub fn from_error(path: PathBuf, error: CheckError) -> Self {
    let status = match error {
      CheckError::Validation(failure) => FileStatus::Failed {
        reason: failure.reason,
        patch: failure.patch,
      },
      CheckError::Read { .. } => FileStatus::Unreadable {
        message: error.to_string(),
      },
    };
    Self { path, status }
  }

  pub const fn is_failure(&self) -> bool {
    !matches!(self.status, FileStatus::Valid)
  }
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Counts for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSummary {
  pub total: usize,
  pub valid: usize,
  pub missing: usize,
  pub incorrect: usize,
  pub unreadable: usize,
  /// Wall time in milliseconds
  pub elapsed_ms: u64,
}

impl ProcessingSummary {
  pub fn from_reports(reports: &[FileReport], elapsed: Duration) -> Self {
    let mut summary = Self {
      total: reports.len(),
      elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
      ..Self::default()
    };

    for report in reports {
      match &report.status {
        FileStatus::Valid => summary.valid += 1,
        FileStatus::Failed {
          reason: Reason::MissingBoilerplate,
          ..
        } => summary.missing += 1,
        FileStatus::Failed {
          reason: Reason::IncorrectBoilerplate,
          ..
        } => summary.incorrect += 1,
        FileStatus::Unreadable { .. } => summary.unreadable += 1,
      }
    }

    summary
  }

  pub const fn failed(&self) -> usize {
    self.missing + self.incorrect + self.unreadable
  }

  pub const fn has_failures(&self) -> bool {
    self.failed() > 0
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  summary: &'a ProcessingSummary,
  files: &'a [FileReport],
}

/// Writes a JSON report of the run to `output_path`.
pub fn write_json_report(output_path: &Path, reports: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
  let report = JsonReport {
    summary,
    files: reports,
  };
  let json = serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")?;
  fs::write(output_path, json).with_context(|| format!("Failed to write report to {}", output_path.display()))
}
