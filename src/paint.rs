// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use getset::CopyGetters;


/// Foreground colours used in reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
  White,
  Green,
  Red,
  Magenta,
}

impl Color {
  fn code(self) -> u8 {
    match self {
      Self::White => 37,
      Self::Green => 32,
      Self::Red => 31,
      Self::Magenta => 35,
    }
  }
}

/// Text intensity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weight {
  Normal,
  Bright,
  Dim,
}

impl Weight {
  fn code(self) -> Option<u8> {
    match self {
      Self::Normal => None,
      Self::Bright => Some(1),
      Self::Dim => Some(2),
    }
  }
}


/// Applies colour and weight to text, either as ANSI escape sequences or not
/// at all.
///
/// A foreground-only style resets just the foreground colour and a
/// weight-only style resets just the intensity, so coloured fields can be
/// nested inside a bright or dim line without cancelling it. A combined style
/// resets both, never the whole line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Painter {
  escapes: bool,
}

impl Painter {
  pub fn new(escapes: bool) -> Self {
    Self { escapes }
  }

  pub fn ansi() -> Self {
    Self::new(true)
  }

  pub fn plain() -> Self {
    Self::new(false)
  }

  pub fn style(&self, text: &str, fg: Option<Color>, weight: Weight) -> String {
    if !self.escapes || text.is_empty() {
      return text.to_string();
    }

    match (fg.map(Color::code), weight.code()) {
      (None, None) => text.to_string(),
      (Some(fg), None) => format!("\x1b[{}m{}\x1b[39m", fg, text),
      (None, Some(weight)) => format!("\x1b[{}m{}\x1b[22m", weight, text),
      (Some(fg), Some(weight)) => {
        format!("\x1b[{};{}m{}\x1b[39;22m", weight, fg, text)
      }
    }
  }

  pub fn fg(&self, text: &str, color: Color) -> String {
    self.style(text, Some(color), Weight::Normal)
  }

  pub fn weight(&self, text: &str, weight: Weight) -> String {
    self.style(text, None, weight)
  }
}

impl Default for Painter {
  fn default() -> Self {
    Self::ansi()
  }
}
