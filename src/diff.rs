//! # Diff Module
//!
//! Renders the difference between a file's actual content and the content
//! the validator expects as a unified diff, suitable for `patch -p0`.

use similar::{Algorithm, TextDiff};

/// Label used for the expected side of the patch.
pub const EXPECTED_LABEL: &str = "expected";

/// Lines of unchanged context around each hunk.
const CONTEXT_RADIUS: usize = 3;

/// Builds a unified diff turning `actual` into `expected`.
///
/// The diff is computed line by line with the Myers algorithm. `path` labels
/// the original side and [`EXPECTED_LABEL`] the expected one.
pub fn unified_patch(path: &str, actual: &str, expected: &str) -> String {
  let diff = TextDiff::configure()
    .algorithm(Algorithm::Myers)
    .diff_lines(actual, expected);

  diff
    .unified_diff()
    .context_radius(CONTEXT_RADIUS)
    .header(path, EXPECTED_LABEL)
    .to_string()
}
