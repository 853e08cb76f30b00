//! # Check Command
//!
//! Validates the boilerplate of every file under a path.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use boilersuite::collector::{SkipList, collect_targets};
use boilersuite::config::{CliOverrides, DEFAULT_AUTHOR, Settings, load_config};
use boilersuite::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use boilersuite::output::{
  failed_reports, print_all_files_ok, print_blank_line, print_failure_footer, print_failures, print_start_message,
  print_summary,
};
use boilersuite::processor::Processor;
use boilersuite::report::{ProcessingSummary, write_json_report};
use boilersuite::templates::TemplateMap;
use boilersuite::{info_log, verbose_log};
use clap::Args;
use tracing::debug;

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
  /// File or directory to check. Directories are walked recursively.
  #[arg(required_unless_present = "list_templates")]
  pub path: Option<PathBuf>,

  /// Space-separated directory names or relative path prefixes to skip
  /// (repeatable)
  #[arg(long, value_name = "PREFIXES")]
  pub skip: Vec<String>,

  /// Author expected in the boilerplate [default: boilersuite]
  #[arg(long, value_name = "NAME")]
  pub author: Option<String>,

  /// Print a patch that fixes each failing file
  #[arg(long)]
  pub patch: bool,

  /// Path to config file (default: .boilersuite.toml in the checked
  /// directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors and failing paths
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// Write a JSON report of every checked file to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Print the file categories that have a built-in template and exit
  #[arg(long)]
  pub list_templates: bool,
}

impl CheckArgs {
  /// Values that override the config file.
  pub fn overrides(&self) -> CliOverrides {
    CliOverrides {
      author: self.author.clone(),
      skip: self
        .skip
        .iter()
        .flat_map(|entry| entry.split_whitespace())
        .map(str::to_string)
        .collect(),
      patch: self.patch,
    }
  }
}

/// Run the check command with the given arguments
pub fn run_check(args: CheckArgs) -> Result<ExitCode> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  if args.list_templates {
    let templates = TemplateMap::builtin(DEFAULT_AUTHOR).context("failed to load templates")?;
    for category in templates.categories() {
      println!("{category}");
    }
    return Ok(ExitCode::SUCCESS);
  }

  let target = args.path.as_deref().context("Missing required argument: <PATH>")?;
  let base_dir = if target.is_dir() {
    target
  } else {
    target.parent().unwrap_or(Path::new("."))
  };

  let config = load_config(args.config.as_deref(), base_dir, args.no_config)?;
  let settings = Settings::resolve(config, args.overrides());
  debug!(
    "Expecting author {:?}, skipping {:?}, patch: {}",
    settings.author, settings.skip, settings.patch
  );

  let templates = TemplateMap::builtin(&settings.author).context("failed to load templates")?;
  let skip = SkipList::new(&settings.skip);

  let targets = collect_targets(target, &templates, &skip)
    .with_context(|| format!("failed to list targets in {:?}", target.display().to_string()))?;

  print_start_message(targets.len());

  let start_time = Instant::now();
  let processor = Processor::new(templates, settings.patch);
  let reports = processor.process(&targets);
  let summary = ProcessingSummary::from_reports(&reports, start_time.elapsed());

  print_blank_line();

  let failed = failed_reports(&reports);
  if failed.is_empty() {
    verbose_log!("all files validated successfully");
    print_all_files_ok();
  } else {
    let display_base = target.is_dir().then_some(target);
    print_failures(&failed, display_base);
  }

  print_blank_line();
  print_summary(&summary);

  if let Some(ref output_path) = args.report_json {
    if let Err(e) = write_json_report(output_path, &reports, &summary) {
      eprintln!("Error generating JSON report: {e:#}");
    } else {
      info_log!("Generated JSON report at {}", output_path.display());
    }
  }

  if summary.has_failures() {
    print_failure_footer();
    return Ok(ExitCode::FAILURE);
  }

  Ok(ExitCode::SUCCESS)
}
