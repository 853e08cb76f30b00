//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod check;

pub use check::{CheckArgs, run_check};
use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Version string with the commit the binary was built from.
const VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (commit ",
  env!("GIT_HASH"),
  ", ",
  env!("GIT_DATE"),
  ")"
);

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "boilersuite",
  author,
  version = VERSION,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Check every file with a template under the current directory
  boilersuite .

  # Expect a different author and show how to fix failing files
  boilersuite --author \"Example\" --patch .

  # Skip generated code and a tools directory
  boilersuite --skip \"hack/tools generated\" .

  # Write a JSON report for CI
  boilersuite --report-json boilersuite.json .
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub check_args: CheckArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_flags() {
    let cli = Cli::try_parse_from([
      "boilersuite",
      "--skip",
      "hack/tools testdata",
      "--skip",
      "generated",
      "--author",
      "Example",
      "--patch",
      "-vv",
      ".",
    ])
    .expect("valid arguments");

    let args = cli.check_args;
    assert_eq!(args.path.as_deref(), Some(std::path::Path::new(".")));
    assert_eq!(args.verbose, 2);
    assert!(args.patch);

    let overrides = args.overrides();
    assert_eq!(overrides.author.as_deref(), Some("Example"));
    assert_eq!(overrides.skip, vec!["hack/tools", "testdata", "generated"]);
  }

  #[test]
  fn test_path_required() {
    assert!(Cli::try_parse_from(["boilersuite"]).is_err());
    assert!(Cli::try_parse_from(["boilersuite", "--list-templates"]).is_ok());
  }

  #[test]
  fn test_quiet_conflicts_with_verbose() {
    assert!(Cli::try_parse_from(["boilersuite", "-q", "-v", "."]).is_err());
  }
}
