// Copyright 2020 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <jonas@bmc-labs.com>

use crate::{fubar::{Fubar, Result},
            lap::Lap};
use getset::Getters;
use std::{fs,
          path::{Path, PathBuf}};


/// Holds the laps read from a laps file.
///
/// A laps file has one lap per line, made of whitespace separated fields:
///
/// ```text
/// 1 01:30.500 00:30.000 00:30.000 00:30.500
/// 2 01:29.000 00:29.500 00:29.500 00:30.000
/// ```
///
/// i.e. the lap number, the lap time and the sector times. Every line needs
/// the same number of sectors as the first one. Blank lines and lines starting
/// with `#` are skipped. Any other line that doesn't parse fails the whole
/// file.
#[derive(Debug, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct LapsFile {
  path: PathBuf,
  laps: Vec<Lap>,
}

impl LapsFile {
  /// Reads and parses the file at `path`.
  pub fn load(path: &Path) -> Result<Self> {
    let text = fs::read_to_string(path).map_err(|err| Fubar::io(path, err))?;
    let laps = parse(&text)?;
    log::info!("read {} laps from {}", laps.len(), path.display());

    Ok(Self { path: path.to_owned(),
              laps })
  }

  pub fn into_laps(self) -> Vec<Lap> {
    self.laps
  }
}

/// Parses laps from the contents of a laps file.
pub fn parse(text: &str) -> Result<Vec<Lap>> {
  let mut laps: Vec<Lap> = Vec::new();

  for (idx, line) in text.lines().enumerate() {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
      continue;
    }

    let lap = parse_line(line).map_err(|err| err.at_line(idx + 1))?;
    if let Some(first) = laps.first() {
      crate::ensure!(first.n_sectors() == lap.n_sectors(),
                     Fubar::SectorArityMismatch { line:     Some(idx + 1),
                                                  expected: first.n_sectors(),
                                                  found:    lap.n_sectors(), });
    }
    laps.push(lap);
  }

  crate::ensure!(!laps.is_empty(), Fubar::empty("a session"));
  Ok(laps)
}

fn parse_line(line: &str) -> Result<Lap> {
  let fields: Vec<&str> = line.split_whitespace().collect();
  let (number, total, sectors) = match fields.as_slice() {
    [number, total, sectors @ ..] if !sectors.is_empty() => (*number, *total, sectors),
    _ => {
      return Err(Fubar::parse(line,
                              "expected a lap number, a lap time and at least \
                               one sector time"))
    }
  };

  let number = number.parse::<u32>()
                     .ok()
                     .filter(|&number| number > 0)
                     .ok_or_else(|| Fubar::parse(number, "expected a lap number > 0"))?;
  Lap::from_fields(number, total, sectors)
}
