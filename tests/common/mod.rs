#![allow(dead_code)]

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Shell template used throughout the validation tests.
pub const TMPL_HASH: &str = "#header\n#Copyright <<YEAR>> by <<AUTHOR>>\n#footer";

/// Author the test templates are rendered for.
pub const AUTHOR: &str = "Unittest";

/// Applies a unified diff produced for `original` and returns the patched
/// text.
///
/// Only what the validator emits is supported: a single file, hunks with
/// context, and the "No newline at end of file" marker. Line terminators,
/// `\r` included, are carried by the patch lines themselves.
pub fn apply_patch(original: &str, patch: &str) -> Result<String> {
  let source: Vec<&str> = original.split_inclusive('\n').collect();
  let mut out = String::with_capacity(original.len() + patch.len());
  let mut cursor = 0;
  let mut in_hunk = false;
  let mut last_emitted = false;

  for line in patch.split_inclusive('\n') {
    if let Some(header) = line.strip_prefix("@@ ") {
      let old_start = parse_old_start(header)?;
      if old_start < cursor || old_start > source.len() {
        bail!("hunk starts at line {old_start}, cursor is at {cursor}");
      }
      source[cursor..old_start].iter().for_each(|l| out.push_str(l));
      cursor = old_start;
      in_hunk = true;
      continue;
    }

    if !in_hunk {
      // File headers.
      continue;
    }

    let (tag, body) = line.split_at(1);
    match tag {
      " " => {
        let expected = source.get(cursor).context("context line past end of input")?;
        if expected.trim_end_matches('\n') != body.trim_end_matches('\n') {
          bail!("context mismatch at line {}: {expected:?} != {body:?}", cursor + 1);
        }
        out.push_str(body);
        cursor += 1;
        last_emitted = true;
      }
      "-" => {
        cursor += 1;
        last_emitted = false;
      }
      "+" => {
        out.push_str(body);
        last_emitted = true;
      }
      "\\" => {
        if last_emitted && out.ends_with('\n') {
          out.pop();
        }
      }
      _ => bail!("unexpected patch line {line:?}"),
    }
  }

  if cursor > source.len() {
    bail!("patch consumed more lines than the input has");
  }
  source[cursor..].iter().for_each(|l| out.push_str(l));

  Ok(out)
}

/// Returns the 0-based index of the first original line a hunk touches.
fn parse_old_start(header: &str) -> Result<usize> {
  let range = header
    .split_whitespace()
    .next()
    .and_then(|r| r.strip_prefix('-'))
    .with_context(|| format!("malformed hunk header {header:?}"))?;

  let (start, len) = match range.split_once(',') {
    Some((start, len)) => (start.parse::<usize>()?, len.parse::<usize>()?),
    None => (range.parse::<usize>()?, 1),
  };

  Ok(if len == 0 { start } else { start.saturating_sub(1) })
}

/// Returns the part of a patch after its first hunk header.
pub fn patch_body(patch: &str) -> &str {
  patch
    .find("@@\n")
    .map_or(patch, |at| &patch[at + "@@\n".len()..])
}

/// Writes `content` to `relative` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}
