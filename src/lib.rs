//! # boilersuite
//!
//! Checks that source files start with the expected copyright boilerplate.
//!
//! Each file category (`go`, `sh`, `py`, `Dockerfile`, ...) has a template.
//! A file passes when its content equals what the template says it should be:
//! any exempt header (a shebang or Go build constraints) first, then the
//! boilerplate with the file's own copyright year, then the rest of the file.
//! Files that fail get a reason and, on request, a unified diff that fixes
//! them.
//!
//! ## Features
//!
//! * Built-in Apache-2.0 templates compiled into the binary
//! * Existing boilerplate located in `/* */`, `//` and `#` comment blocks
//! * The existing copyright year is kept; new boilerplate gets the current year
//! * Files marked `+skip_license_check` or `DO NOT EDIT.` are exempt
//! * CRLF files are compared with CRLF boilerplate
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use boilersuite::collector::{SkipList, collect_targets};
//! use boilersuite::processor::Processor;
//! use boilersuite::templates::TemplateMap;
//!
//! fn main() -> anyhow::Result<()> {
//!     let templates = TemplateMap::builtin("Example")?;
//!     let skip = SkipList::new(&["vendor".to_string()]);
//!
//!     let targets = collect_targets(Path::new("."), &templates, &skip)?;
//!     let reports = Processor::new(templates, true).process(&targets);
//!
//!     for report in reports.iter().filter(|r| r.is_failure()) {
//!         println!("{:?}: {:?}", report.path, report.status);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`template`] - Validation of one file against one template
//! * [`templates`] - Built-in templates and the path → template lookup
//! * [`locator`] - Finding an existing boilerplate block
//! * [`processor`] - Checking many files in parallel
//! * [`logging`] - Logging utilities for verbose output

pub mod collector;
pub mod config;
pub mod diff;
pub mod locator;
pub mod logging;
pub mod output;
pub mod patterns;
pub mod processor;
pub mod report;
pub mod template;
pub mod templates;
pub mod verdict;
