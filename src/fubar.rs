// Copyright 2020 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <jonas@bmc-labs.com>
//   Jannik Schütz <jannik@bmc-labs.com>

use std::{error, fmt, io, path::Path, result};


/// stintstats' result type `Result` carries a `Fubar` on failure.
pub type Result<T> = result::Result<T, Fubar>;


#[derive(Clone, Debug, PartialEq)]
/// Error to be used throughout stintstats to bubble errors back to the main
/// function.
///
/// Every variant is fatal: the report is built in full before anything is
/// printed, so any `Fubar` means no output at all. Where an error stems from
/// the laps file, `line` holds the 1-based line number.
///
/// FUBAR: Fucked Up Beyond All {Recognition, Repair, Reason}
pub enum Fubar {
  /// Malformed timestamp or malformed laps file line.
  Parse {
    line:   Option<usize>,
    field:  String,
    reason: String,
  },
  /// Two laps (or a lap and a reference) disagree on their sector count.
  SectorArityMismatch {
    line:     Option<usize>,
    expected: usize,
    found:    usize,
  },
  /// Nothing to aggregate.
  EmptyInput { what: String },
  /// A duration left the `[0, 24h)` range.
  OutOfRange { millis: i64 },
  Io { path: String, reason: String },
  Config { reason: String },
}

impl Fubar {
  pub fn parse(field: &str, reason: &str) -> Self {
    Self::Parse { line:   None,
                  field:  field.to_string(),
                  reason: reason.to_string(), }
  }

  pub fn empty(what: &str) -> Self {
    Self::EmptyInput { what: what.to_string() }
  }

  pub fn io(path: &Path, error: io::Error) -> Self {
    Self::Io { path:   path.display().to_string(),
               reason: error.to_string(), }
  }

  pub fn config(reason: &str) -> Self {
    Self::Config { reason: reason.to_string() }
  }

  /// Attaches a laps file line number to errors which can carry one. Other
  /// variants pass through untouched.
  pub fn at_line(self, number: usize) -> Self {
    match self {
      Self::Parse { field, reason, .. } => Self::Parse { line: Some(number),
                                                         field,
                                                         reason },
      Self::SectorArityMismatch { expected, found, .. } => {
        Self::SectorArityMismatch { line: Some(number),
                                    expected,
                                    found }
      }
      other => other,
    }
  }
}

fn line_prefix(line: &Option<usize>) -> String {
  match line {
    Some(number) => format!("line {}: ", number),
    None => String::new(),
  }
}

/// The following traits - `fmt::Display` and `error::Error` - are required in
/// addition to deriving the `Debug` trait for `Fubar` to implement the
/// `error::Error` trait fully.
impl fmt::Display for Fubar {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Parse { line, field, reason } => {
        write!(f, "{}could not parse '{}': {}", line_prefix(line), field, reason)
      }
      Self::SectorArityMismatch { line,
                                  expected,
                                  found, } => write!(f,
                                                     "{}expected {} sectors, \
                                                      found {}",
                                                     line_prefix(line),
                                                     expected,
                                                     found),
      Self::EmptyInput { what } => write!(f, "no laps to build {} from", what),
      Self::OutOfRange { millis } => {
        write!(f, "{} ms is outside of the supported range [0, 24h)", millis)
      }
      Self::Io { path, reason } => write!(f, "{}: {}", path, reason),
      Self::Config { reason } => write!(f, "invalid configuration: {}", reason),
    }
  }
}

impl error::Error for Fubar {}


/// This macro - internal use only - generates the implementation of the
/// `From` trait for `Fubar` for a given list of types, mapping each onto the
/// variant given alongside it.
macro_rules! implement_from {
  ($($ErrType:ty => $variant:ident),*) => {$(
    impl From<$ErrType> for Fubar {
      fn from(error: $ErrType) -> Self {
        Self::$variant { reason: error.to_string() }
      }
    }
  )*}
}

// here the macro is called with a list of types used in our codebase
implement_from!(toml::de::Error => Config);


/// The `ensure!` macro provides and easy way to make sure a condition is true,
/// and if not, return the given error. Use it as follows:
///
/// ```ignore
/// fn my_function(&self) -> Result<()> {
///   ensure!(!self.laps.is_empty(), Fubar::empty("a stint"));
/// }
/// ```
#[macro_export]
macro_rules! ensure {
  ($cond:expr, $err:expr) => {
    if !($cond) {
      return Err($err.into());
    }
  };
}
