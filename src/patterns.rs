//! # Patterns Module
//!
//! Process-wide markers and regular expressions used by the template loader,
//! the boilerplate locator and the validator. Everything here is compiled on
//! first use and never mutated afterwards, so it can be shared freely between
//! threads.

use std::sync::LazyLock;

use regex::Regex;

/// Marker replaced by the copyright year when a template is rendered.
pub const YEAR_MARKER: &str = "<<YEAR>>";

/// Marker replaced by the expected author when a template is loaded.
pub const AUTHOR_MARKER: &str = "<<AUTHOR>>";

/// The copyright line every template must carry, so that the locator can
/// recognise the rendered header in a checked file.
pub const COPYRIGHT_MARKER: &str = "Copyright <<YEAR>>";

/// Matches the year marker inside template sources.
pub static YEAR_MARKER_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"<<YEAR>>").expect("year marker regex must compile"));

/// Matches the author marker inside template sources.
pub static AUTHOR_MARKER_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"<<AUTHOR>>").expect("author marker regex must compile"));

/// Matches a copyright line in a checked file and captures its year.
pub static COPYRIGHT_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"Copyright (20\d\d)").expect("copyright regex must compile"));

/// Matches the Go build constraint lines at the very top of a file.
///
/// Both the `//go:build` and the legacy `// +build` forms are accepted, and a
/// run of them is consumed as one block.
pub static BUILD_CONSTRAINTS_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\A(//(go:build| \+build).*\n)+").expect("build constraints regex must compile"));

/// Matches an interpreter line (`#!...`) at the very top of a script.
///
/// The line break is part of the match, so a file made of a lone shebang
/// without a trailing newline doesn't match.
pub static SHEBANG_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\A#!.*\n").expect("shebang regex must compile"));

/// Matches the explicit opt-out marker.
pub static SKIP_FILE_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?mR)^(//|#) \+skip_license_check$").expect("skip file regex must compile"));

/// Matches the comments left behind by code generators.
pub static GENERATED_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?mR)^[/*#]+.*DO NOT EDIT\.$").expect("generated regex must compile"));

/// Returns `true` when the content opts out of validation, either through the
/// skip marker or because it was produced by a code generator.
pub fn is_exempt(content: &str) -> bool {
  SKIP_FILE_REGEX.is_match(content) || GENERATED_REGEX.is_match(content)
}

#[cfg(test)]
mod tests {
  use super::*;

  // Also a shebang file, but carries neither constraints nor generator comments.
  const SKIP_FILE_LONG: &str = r#"#!/usr/bin/env python

# +skip_license_check

# Copyright 2015 The Kubernetes Authors.
#
# Licensed under the Apache License, Version 2.0 (the "License");
# you may not use this file except in compliance with the License.

from __future__ import print_function

import argparse
"#;

  const GENERATED_FILE_LONG: &str = r#"/*
Copyright The boilersuite Authors.

Licensed under the Apache License, Version 2.0 (the "License");
*/

// Code generated by lister-gen. DO NOT EDIT.
"#;

  #[test]
  fn test_shebang_regex() {
    let cases = [
      ("sh shebang", "#!/bin/sh\n", true),
      ("python3 shebang", "#!/usr/bin/env python3\n", true),
      ("bash shebang", "#!/usr/bin/env bash\n", true),
      ("no shebang", "package main\n\nfunc main() {}", false),
      ("no newline on shebang", "#!/bin/sh", false),
      ("many newlines on shebang", "#!/bin/sh\n\n\n\n\ntest", true),
      ("longer file python shebang", SKIP_FILE_LONG, true),
      ("shebang not on first line", "echo hi\n#!/bin/sh\n", false),
    ];

    for (name, input, should_match) in cases {
      assert_eq!(SHEBANG_REGEX.is_match(input), should_match, "case {name:?}");
    }
  }

  #[test]
  fn test_shebang_regex_consumes_crlf() {
    let found = SHEBANG_REGEX.find("#!/bin/bash\r\n\r\nfoo\r\n").map(|m| m.end());
    assert_eq!(found, Some("#!/bin/bash\r\n".len()));
  }

  #[test]
  fn test_build_constraints_regex() {
    let cases = [
      ("old style build constraint", "// +build linux\n", true),
      ("new style build constraint", "//go:build linux\n", true),
      ("both styles of build constraint", "// +build linux\n//go:build linux\n", true),
      ("constraint after package clause", "package foo\n//go:build linux\n", false),
      ("longer non-go file without build constraints", SKIP_FILE_LONG, false),
    ];

    for (name, input, should_match) in cases {
      assert_eq!(BUILD_CONSTRAINTS_REGEX.is_match(input), should_match, "case {name:?}");
    }
  }

  #[test]
  fn test_build_constraints_regex_consumes_whole_block() {
    let content = "// +build linux\n//go:build linux\npackage foo\n";
    let end = BUILD_CONSTRAINTS_REGEX.find(content).map(|m| m.end());
    assert_eq!(end, Some(content.find("package").unwrap_or_default()));
  }

  #[test]
  fn test_generated_regex() {
    let cases = [
      ("MockGen", "// Code generated by MockGen. DO NOT EDIT.\n", true),
      ("swagger", "// AUTO-GENERATED FUNCTIONS START HERE. DO NOT EDIT.\n", true),
      ("deepcopy-gen", "// Code generated by deepcopy-gen. DO NOT EDIT.\n", true),
      ("informer-gen but in python", "# Code generated by informer-gen. DO NOT EDIT.\n", true),
      ("crlf line ending", "// Code generated by client-gen. DO NOT EDIT.\r\n", true),
      ("not a comment", "Code generated. DO NOT EDIT.\n", false),
      ("longer file with no matches", SKIP_FILE_LONG, false),
      ("longer file with a match", GENERATED_FILE_LONG, true),
    ];

    for (name, input, should_match) in cases {
      assert_eq!(GENERATED_REGEX.is_match(input), should_match, "case {name:?}");
    }
  }

  #[test]
  fn test_skip_file_regex() {
    let cases = [
      ("golang style comment", "// +skip_license_check\n", true),
      ("python / bash style comment", "# +skip_license_check\n", true),
      ("crlf line ending", "# +skip_license_check\r\n", true),
      ("trailing text", "# +skip_license_check please\n", false),
      ("longer file", SKIP_FILE_LONG, true),
    ];

    for (name, input, should_match) in cases {
      assert_eq!(SKIP_FILE_REGEX.is_match(input), should_match, "case {name:?}");
    }
  }

  #[test]
  fn test_copyright_regex_captures_year() {
    let caps = COPYRIGHT_REGEX.captures("// Copyright 2023 The Authors.");
    assert_eq!(caps.map(|c| c[1].to_string()), Some("2023".to_string()));
    assert!(!COPYRIGHT_REGEX.is_match("// Copyright 1999 The Authors."));
    assert!(!COPYRIGHT_REGEX.is_match("// copyright 2023 The Authors."));
  }

  #[test]
  fn test_marker_regexes() {
    assert!(YEAR_MARKER_REGEX.is_match(COPYRIGHT_MARKER));
    assert!(AUTHOR_MARKER_REGEX.is_match("The <<AUTHOR>> Authors"));
    assert!(!AUTHOR_MARKER_REGEX.is_match("The <<AUTH>> Authors"));
  }

  #[test]
  fn test_is_exempt() {
    assert!(is_exempt("package foo\n// +skip_license_check\n"));
    assert!(is_exempt("#!/bin/sh\n#DO NOT EDIT.\n"));
    assert!(!is_exempt("#!/bin/sh\necho hi\n"));
    assert!(!is_exempt(""));
  }
}
