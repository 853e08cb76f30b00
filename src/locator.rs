//! # Locator Module
//!
//! Finds an existing boilerplate block in a file. A boilerplate block is a
//! comment block (C-style `/* */`, `//` lines or `#` lines) that contains a
//! copyright line; any other comment is left alone and ends up in the head or
//! the foot of the file.
//!
//! The scan is a small line-driven state machine, see [`Locator`].

use crate::patterns::COPYRIGHT_REGEX;

/// Byte range of a detected boilerplate block, plus the year found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
  /// Offset of the first byte of the block's first line
  pub start: usize,
  /// Offset just past the block's last line
  pub stop: usize,
  /// The copyright year captured inside the block
  pub year: String,
}

/// State of the scan with respect to comment blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
  /// Not inside a comment block
  #[default]
  Outside,
  /// Inside a `/* ... */` block
  Star,
  /// Inside a run of `//` lines
  Slash,
  /// Inside a run of `#` lines
  Hash,
}

impl BlockState {
  /// Picks the block a line opens, if any. `/*` wins over `//`.
  fn opened_by(line: &str) -> Self {
    if line.starts_with("/*") {
      Self::Star
    } else if line.starts_with("//") {
      Self::Slash
    } else if line.starts_with('#') {
      Self::Hash
    } else {
      Self::Outside
    }
  }

  /// Prefix every line of a line-comment block starts with.
  const fn line_lead(self) -> Option<&'static str> {
    match self {
      Self::Slash => Some("//"),
      Self::Hash => Some("#"),
      Self::Outside | Self::Star => None,
    }
  }
}

/// Incremental boilerplate scanner.
///
/// Lines are fed in order, with their line terminators, through
/// [`Locator::feed`]; the first qualifying block is returned as soon as it is
/// closed. [`Locator::finish`] handles a block that runs to end of input.
#[derive(Debug, Default)]
pub struct Locator {
  state: BlockState,
  start: Option<usize>,
  is_boiler: bool,
  year: String,
  pos: usize,
}

impl Locator {
  pub fn new() -> Self {
    Self::default()
  }

  /// Current state of the scan.
  pub const fn state(&self) -> BlockState {
    self.state
  }

  /// Consumes one line (terminator included) and returns the boilerplate span
  /// if this line completes one.
  pub fn feed(&mut self, line: &str) -> Option<Span> {
    let trimmed = line.trim();
    let line_start = self.pos;
    self.pos += line.len();

    // Any copyright line marks the current block, last one wins for the year.
    if let Some(caps) = COPYRIGHT_REGEX.captures(trimmed) {
      self.is_boiler = true;
      self.year = caps[1].to_string();
    }

    match self.state {
      BlockState::Outside => {
        let opened = BlockState::opened_by(trimmed);
        if opened == BlockState::Outside {
          return None;
        }
        self.state = opened;
        self.start = Some(line_start);

        // A one-line `/* ... */` block closes right away.
        if opened == BlockState::Star && trimmed[2..].ends_with("*/") {
          return self.close(self.pos);
        }
        None
      }
      BlockState::Slash | BlockState::Hash => {
        let lead = self.state.line_lead().unwrap_or_default();
        if trimmed.starts_with(lead) {
          return None;
        }
        // The block ended on the previous line. This line is not looked at
        // again as the opener of a new block.
        self.close(line_start)
      }
      BlockState::Star => {
        if trimmed.ends_with("*/") {
          return self.close(self.pos);
        }
        None
      }
    }
  }

  /// Ends the scan, returning a boilerplate block that reaches end of input.
  pub fn finish(self) -> Option<Span> {
    if self.state == BlockState::Outside || !self.is_boiler {
      return None;
    }
    self.start.map(|start| Span {
      start,
      stop: self.pos,
      year: self.year,
    })
  }

  fn close(&mut self, stop: usize) -> Option<Span> {
    self.state = BlockState::Outside;
    if self.is_boiler
      && let Some(start) = self.start
    {
      return Some(Span {
        start,
        stop,
        year: self.year.clone(),
      });
    }
    self.start = None;
    self.is_boiler = false;
    None
  }
}

/// Looks for a boilerplate block and returns its byte span and year.
///
/// Returns `None` when the content has no comment block containing a
/// copyright line.
pub fn find_existing_boilerplate(content: &str) -> Option<Span> {
  let mut locator = Locator::new();
  for line in content.split_inclusive('\n') {
    if let Some(span) = locator.feed(line) {
      return Some(span);
    }
  }
  locator.finish()
}
