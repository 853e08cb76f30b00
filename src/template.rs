//! # Template Module
//!
//! A [`Template`] is the canonical boilerplate for one file category, already
//! rendered for the expected author. It validates file content against itself
//! and can produce a patch for content that doesn't match.
//!
//! ## Example
//!
//! ```rust
//! use boilersuite::template::Template;
//! use boilersuite::verdict::Reason;
//!
//! let template = Template::new("# Copyright <<YEAR>> <<AUTHOR>>", "sh", "Example").unwrap();
//!
//! assert!(template.validate("# Copyright 2020 Example\n\necho hi\n", "hi.sh", false).is_ok());
//!
//! let failure = template.validate("echo hi\n", "hi.sh", true).unwrap_err();
//! assert_eq!(failure.reason, Reason::MissingBoilerplate);
//! assert!(failure.patch.is_some());
//! ```

use chrono::Datelike;

use crate::diff::unified_patch;
use crate::locator::find_existing_boilerplate;
use crate::patterns::{
  AUTHOR_MARKER, AUTHOR_MARKER_REGEX, BUILD_CONSTRAINTS_REGEX, COPYRIGHT_MARKER, SHEBANG_REGEX, YEAR_MARKER,
  YEAR_MARKER_REGEX, is_exempt,
};
use crate::verdict::{Failure, Reason};

/// Error returned when a template source is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
  #[error("couldn't find replacement marker {0:?}")]
  MissingMarker(&'static str),

  #[error("template has Windows style line endings, Unix style are required")]
  WindowsLineEndings,
}

/// Content that may precede the boilerplate of a file category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderSkip {
  /// The boilerplate must start the file
  #[default]
  None,
  /// Go build constraints come first
  BuildConstraints,
  /// An interpreter line comes first
  Shebang,
}

impl HeaderSkip {
  /// Selects the header rule for a file category.
  pub fn for_category(category: &str) -> Self {
    match category {
      "go" => Self::BuildConstraints,
      "sh" | "bash" | "py" => Self::Shebang,
      _ => Self::None,
    }
  }

  /// Returns the byte offset where the exempt header of `content` ends, or 0
  /// when there is none.
  pub fn skip(self, content: &str) -> usize {
    let regex = match self {
      Self::None => return 0,
      Self::BuildConstraints => &*BUILD_CONSTRAINTS_REGEX,
      Self::Shebang => &*SHEBANG_REGEX,
    };
    regex.find(content).map_or(0, |m| m.end())
  }
}

/// A pre-processed boilerplate template for one file category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
  /// Boilerplate with the author substituted, ending in exactly one newline
  text: String,
  header_skip: HeaderSkip,
}

impl Template {
  /// Builds a template from its raw source.
  ///
  /// # Parameters
  ///
  /// * `raw` - Template source containing the copyright and author markers
  /// * `category` - File extension or file name prefix the template applies to
  /// * `expected_author` - Substituted for the author marker
  ///
  /// # Errors
  ///
  /// Returns an error if a marker is missing or if the source uses Windows
  /// style line endings.
  pub fn new(raw: &str, category: &str, expected_author: &str) -> Result<Self, TemplateError> {
    if !YEAR_MARKER_REGEX.is_match(raw) {
      return Err(TemplateError::MissingMarker(YEAR_MARKER));
    }

    // The locator only recognizes the rendered header by its copyright line.
    if !raw.contains(COPYRIGHT_MARKER) {
      return Err(TemplateError::MissingMarker(COPYRIGHT_MARKER));
    }

    if !AUTHOR_MARKER_REGEX.is_match(raw) {
      return Err(TemplateError::MissingMarker(AUTHOR_MARKER));
    }

    if raw.contains('\r') {
      return Err(TemplateError::WindowsLineEndings);
    }

    let mut text = raw.replace(AUTHOR_MARKER, expected_author).trim().to_string();
    text.push('\n');

    Ok(Self {
      text,
      header_skip: HeaderSkip::for_category(category),
    })
  }

  /// The rendered boilerplate, still holding the year marker.
  pub fn text(&self) -> &str {
    &self.text
  }

  pub const fn header_skip(&self) -> HeaderSkip {
    self.header_skip
  }

  /// Checks file content against the template.
  ///
  /// Files without boilerplate are expected to carry the current year.
  /// `path` is only used to label the patch.
  pub fn validate(&self, content: &str, path: &str, want_patch: bool) -> Result<(), Failure> {
    let current_year = chrono::Local::now().year().to_string();
    self.validate_with_year(content, path, want_patch, &current_year)
  }

  /// Same as [`Template::validate`], with the year used for files that have no
  /// boilerplate yet given explicitly.
  pub fn validate_with_year(&self, content: &str, path: &str, want_patch: bool, new_year: &str) -> Result<(), Failure> {
    if is_exempt(content) {
      return Ok(());
    }

    let expected = self.expected_content(content, new_year);
    if expected.content == content {
      return Ok(());
    }

    let reason = if expected.located {
      Reason::IncorrectBoilerplate
    } else {
      Reason::MissingBoilerplate
    };
    let failure = Failure::new(reason);

    if want_patch {
      return Err(failure.with_patch(unified_patch(path, content, &expected.content)));
    }
    Err(failure)
  }

  /// Assembles what `content` should look like with correct boilerplate.
  fn expected_content(&self, content: &str, new_year: &str) -> Expected {
    let (start, stop, year, located) = match find_existing_boilerplate(content) {
      Some(span) => {
        let start = span.start + self.header_skip.skip(&content[span.start..span.stop]);
        (start, span.stop, span.year, true)
      }
      None => {
        let at = self.header_skip.skip(content);
        (at, at, new_year.to_string(), false)
      }
    };

    let head = content[..start].trim();
    let foot = &content[stop..];

    let crlf = content.contains("\r\n");
    let newline = if crlf { "\r\n" } else { "\n" };

    let mut boilerplate = self.text.replace(YEAR_MARKER, &year);
    if crlf {
      boilerplate = boilerplate.replace('\n', "\r\n");
    }

    let mut expected = String::with_capacity(content.len() + boilerplate.len());
    if !head.is_empty() {
      expected.push_str(head);
      expected.push_str(newline);
      expected.push_str(newline);
    }
    expected.push_str(&boilerplate);
    if !foot.is_empty() {
      expected.push_str(newline);
      expected.push_str(strip_leading_blank_lines(foot));
    }

    Expected {
      content: expected,
      located,
    }
  }
}

struct Expected {
  content: String,
  /// Whether an existing boilerplate block was found
  located: bool,
}

/// Drops whitespace-only lines from the start of `text`.
fn strip_leading_blank_lines(text: &str) -> &str {
  let mut offset = 0;
  for line in text.split_inclusive('\n') {
    if !line.trim().is_empty() {
      break;
    }
    offset += line.len();
  }
  &text[offset..]
}

#[cfg(test)]
mod tests {
  use super::*;

  const TMPL_HASH: &str = "#header\n#Copyright <<YEAR>> by <<AUTHOR>>\n#footer";
  const TMPL_TRIM: &str = "  \n// header\n// Copyright <<YEAR>> by <<AUTHOR>>\n//\n// footer\n\n\n";
  const TMPL_ONELINE: &str = "/*Copyright <<YEAR>> by <<AUTHOR>>*/";

  fn load(content: &str, category: &str) -> Template {
    Template::new(content, category, "Unittest").expect("test template must load")
  }

  #[test]
  fn test_new_good_template() {
    for content in [TMPL_HASH, TMPL_TRIM, TMPL_ONELINE] {
      let template = load(content, "sh");
      let text = template.text();
      assert!(text.contains("Unittest"));
      assert!(!text.contains(AUTHOR_MARKER));
      assert!(text.contains(YEAR_MARKER));
      assert!(!text.starts_with(char::is_whitespace));
      assert!(text.ends_with('\n'));
      assert!(!text[..text.len() - 1].ends_with(char::is_whitespace));
    }
  }

  #[test]
  fn test_new_bad_template() {
    assert_eq!(
      Template::new("# Copyright <<YEAH>> by <<AUTHOR>>", "sh", "Unittest"),
      Err(TemplateError::MissingMarker(YEAR_MARKER))
    );
    assert_eq!(
      Template::new("# Copyright <<YEAR>> by <<AUTH>>", "sh", "Unittest"),
      Err(TemplateError::MissingMarker(AUTHOR_MARKER))
    );
    assert_eq!(
      Template::new("# <<YEAR>> by <<AUTHOR>>", "sh", "Unittest"),
      Err(TemplateError::MissingMarker(COPYRIGHT_MARKER))
    );
    assert_eq!(
      Template::new("# Copyright <<YEAR>> by <<AUTHOR>>\r\n", "sh", "Unittest"),
      Err(TemplateError::WindowsLineEndings)
    );
  }

  #[test]
  fn test_header_skip_for_category() {
    assert_eq!(HeaderSkip::for_category("go"), HeaderSkip::BuildConstraints);
    assert_eq!(HeaderSkip::for_category("sh"), HeaderSkip::Shebang);
    assert_eq!(HeaderSkip::for_category("bash"), HeaderSkip::Shebang);
    assert_eq!(HeaderSkip::for_category("py"), HeaderSkip::Shebang);
    assert_eq!(HeaderSkip::for_category("Dockerfile"), HeaderSkip::None);
    assert_eq!(load(TMPL_TRIM, "go").header_skip(), HeaderSkip::BuildConstraints);
  }

  #[test]
  fn test_header_skip_offsets() {
    assert_eq!(HeaderSkip::Shebang.skip("#!/bin/sh\necho\n"), "#!/bin/sh\n".len());
    assert_eq!(HeaderSkip::Shebang.skip("echo\n"), 0);
    assert_eq!(HeaderSkip::BuildConstraints.skip("//go:build linux\npackage a\n"), "//go:build linux\n".len());
    assert_eq!(HeaderSkip::None.skip("#!/bin/sh\n"), 0);
  }

  #[test]
  fn test_strip_leading_blank_lines() {
    assert_eq!(strip_leading_blank_lines("\n\n  \nfoo\n"), "foo\n");
    assert_eq!(strip_leading_blank_lines("    indented\n"), "    indented\n");
    assert_eq!(strip_leading_blank_lines("\r\n\r\nfoo\r\n"), "foo\r\n");
    assert_eq!(strip_leading_blank_lines("\n \n"), "");
  }

  #[test]
  fn test_validate_exact_template() {
    let template = load(TMPL_HASH, "sh");
    let content = template.text().replace(YEAR_MARKER, "2011");
    assert_eq!(template.validate_with_year(&content, "a.sh", true, "2030"), Ok(()));
  }

  #[test]
  fn test_validate_keeps_found_year() {
    let template = load(TMPL_HASH, "sh");
    let content = "#header\n#Copyright 2000 by Unittest\n#footer\n\nfoo\n";
    assert_eq!(template.validate_with_year(content, "a.sh", false, "2030"), Ok(()));
  }

  #[test]
  fn test_validate_reasons_without_patch() {
    let template = load(TMPL_HASH, "sh");

    let failure = template.validate_with_year("foo\n", "a.sh", false, "2030").unwrap_err();
    assert_eq!(failure, Failure::new(Reason::MissingBoilerplate));

    let failure = template
      .validate_with_year("#header\n#Copyright 2000\n#footer\n\nfoo\n", "a.sh", false, "2030")
      .unwrap_err();
    assert_eq!(failure, Failure::new(Reason::IncorrectBoilerplate));
  }

  #[test]
  fn test_validate_exempt_files() {
    let template = load(TMPL_TRIM, "go");
    assert_eq!(template.validate("package foo\n// +skip_license_check\n", "a.go", true), Ok(()));

    let template = load(TMPL_HASH, "sh");
    assert_eq!(template.validate("#!/bin/sh\n#DO NOT EDIT.\n", "a.sh", true), Ok(()));
  }

  #[test]
  fn test_expected_content_collapses_blank_lines() {
    let template = load(TMPL_HASH, "sh");
    let expected = template.expected_content("\n\n\nfoo\nbar\n", "2030");
    assert!(!expected.located);
    assert_eq!(expected.content, "#header\n#Copyright 2030 by Unittest\n#footer\n\nfoo\nbar\n");
  }

  #[test]
  fn test_expected_content_uses_crlf() {
    let template = load(TMPL_HASH, "sh");
    let expected = template.expected_content("#!/bin/bash\r\n\r\nfoo\r\n", "2030");
    assert_eq!(
      expected.content,
      "#!/bin/bash\r\n\r\n#header\r\n#Copyright 2030 by Unittest\r\n#footer\r\n\r\nfoo\r\n"
    );
    assert!(!expected.content.replace("\r\n", "").contains('\n'));
  }

  #[test]
  fn test_expected_content_after_build_constraints() {
    let template = load(TMPL_TRIM, "go");
    let expected = template.expected_content("// +build linux\n//go:build linux\npackage foo\n", "2030");
    assert_eq!(
      expected.content,
      "// +build linux\n//go:build linux\n\n// header\n// Copyright 2030 by Unittest\n//\n// footer\n\npackage foo\n"
    );
  }

  #[test]
  fn test_expected_content_advances_past_shebang_in_block() {
    let template = load(TMPL_HASH, "sh");
    let expected = template.expected_content("#!/bin/sh\n#header\n#Copyright 2000 by Unittest\n#footer\nfoo\n", "2030");
    assert!(expected.located);
    assert_eq!(
      expected.content,
      "#!/bin/sh\n\n#header\n#Copyright 2000 by Unittest\n#footer\n\nfoo\n"
    );
  }
}
