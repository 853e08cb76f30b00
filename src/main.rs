//! # boilersuite
//!
//! Checks that source files carry the expected copyright boilerplate.

mod cli;

use std::process::ExitCode;

use anyhow::Result;

use crate::cli::{Cli, run_check};

fn main() -> Result<ExitCode> {
  let cli = Cli::parse_args();
  run_check(cli.check_args)
}
