//! # Output Module
//!
//! All user-facing terminal output for boilersuite. Failures and patches go to
//! stdout so they can be piped; progress and summary lines are suppressed by
//! `-q`, and `-v` adds timing.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileReport, FileStatus, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Every file passed
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// At least one file failed
  pub const FAILURE: &str = "\u{2717}"; // ✗
}

/// Final line when any file failed.
pub const FAILURE_FOOTER: &str = "at least one file had errors";

/// Print the initial "Checking N files..." message.
pub fn print_start_message(file_count: usize) {
  if is_quiet() {
    return;
  }

  let files_word = if file_count == 1 { "file" } else { "files" };
  println!("Checking {} {}...", file_count, files_word);
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print one line per failed file, followed by its patch when there is one.
///
/// In quiet mode only the paths are printed, for scripting.
pub fn print_failures(reports: &[&FileReport], base: Option<&Path>) {
  for report in reports {
    let display_path = make_relative_path(&report.path, base);

    if is_quiet() {
      println!("{}", display_path);
      continue;
    }

    match &report.status {
      FileStatus::Valid => {}
      FileStatus::Failed { reason, patch } => {
        println!(
          "{:?}: {}",
          display_path,
          reason.if_supports_color(Stream::Stdout, |s| s.red())
        );
        if let Some(patch) = patch {
          print_patch(patch);
        }
      }
      FileStatus::Unreadable { message } => {
        println!(
          "{:?}: {}",
          display_path,
          message.if_supports_color(Stream::Stdout, |s| s.red())
        );
      }
    }
  }
}

/// Print a unified diff, coloring added and removed lines.
///
/// Line endings are written back exactly as they appear in the patch, so a
/// patch for a CRLF file keeps its `\r\n` and can still be applied.
fn print_patch(patch: &str) {
  let mut in_hunk = false;
  for line in patch.split_inclusive('\n') {
    let (text, ending) = split_line_ending(line);
    if text.starts_with("@@") {
      in_hunk = true;
    }

    match line_style(text, in_hunk) {
      LineStyle::Header => print!("{}{}", text.if_supports_color(Stream::Stdout, |s| s.bold()), ending),
      LineStyle::Added => print!("{}{}", text.if_supports_color(Stream::Stdout, |s| s.green()), ending),
      LineStyle::Removed => print!("{}{}", text.if_supports_color(Stream::Stdout, |s| s.red()), ending),
      LineStyle::Hunk => print!("{}{}", text.if_supports_color(Stream::Stdout, |s| s.cyan()), ending),
      LineStyle::Plain => print!("{}", line),
    }
  }
  if !patch.is_empty() && !patch.ends_with('\n') {
    println!();
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStyle {
  Header,
  Hunk,
  Added,
  Removed,
  Plain,
}

/// File headers only appear before the first hunk; inside a hunk a line
/// starting with `---` is a removed line.
fn line_style(text: &str, in_hunk: bool) -> LineStyle {
  if text.starts_with("@@") {
    LineStyle::Hunk
  } else if !in_hunk && (text.starts_with("+++") || text.starts_with("---")) {
    LineStyle::Header
  } else if text.starts_with('+') {
    LineStyle::Added
  } else if text.starts_with('-') {
    LineStyle::Removed
  } else {
    LineStyle::Plain
  }
}

/// Splits a line into its text and its terminator (`\r\n`, `\n` or nothing).
fn split_line_ending(line: &str) -> (&str, &str) {
  if let Some(text) = line.strip_suffix("\r\n") {
    (text, &line[text.len()..])
  } else if let Some(text) = line.strip_suffix('\n') {
    (text, &line[text.len()..])
  } else {
    (line, "")
  }
}

/// Print the success message when every file passed.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All files have correct boilerplate.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the processing summary.
///
/// Format: "Summary: X OK, Y missing, Z incorrect, W unreadable"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let ok_str = summary.valid.if_supports_color(Stream::Stdout, |s| s.cyan());
  let missing_str = highlight_count(summary.missing);
  let incorrect_str = highlight_count(summary.incorrect);
  let unreadable_str = highlight_count(summary.unreadable);

  let mut summary_line = format!(
    "Summary: {} OK, {} missing, {} incorrect, {} unreadable",
    ok_str, missing_str, incorrect_str, unreadable_str
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({}ms)", summary.elapsed_ms));
  }

  println!("{}", summary_line);
}

fn highlight_count(count: usize) -> String {
  if count > 0 {
    count.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    count.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  }
}

/// Print the closing line of a failed run to stderr. Shown even when quiet.
pub fn print_failure_footer() {
  eprintln!(
    "{} {}",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    FAILURE_FOOTER
  );
}

/// Selects the reports that failed, in their original order.
pub fn failed_reports(reports: &[FileReport]) -> Vec<&FileReport> {
  reports.iter().filter(|report| report.is_failure()).collect()
}

/// Make a path relative to `base` for display.
fn make_relative_path(path: &Path, base: Option<&Path>) -> String {
  if let Some(base) = base {
    path
      .strip_prefix(base)
      .ok()
      .filter(|p| !p.as_os_str().is_empty())
      .map(|p| p.to_string_lossy().to_string())
      .unwrap_or_else(|| path.to_string_lossy().to_string())
  } else {
    path.to_string_lossy().to_string()
  }
}
