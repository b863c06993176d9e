// Copyright 2020 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Jonas Reitemeyer <jonas@bmc-labs.com>
//   Florian Eich <florian@bmc-labs.com>

use crate::{driver_changes::DriverChanges,
            fubar::{Fubar, Result},
            laptime::LapTime,
            paint::{Color, Painter}};
use getset::{CopyGetters, Getters};
use std::cmp::Ordering;


/// Width of sector columns for which no width was given.
pub const DEFAULT_COLUMN_WIDTH: usize = 10;


/// How a lap (or one of its sectors) compares to a reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
  Neutral,
  Faster,
  Slower,
}

impl Verdict {
  pub fn of(time: LapTime, reference: LapTime) -> Self {
    match time.cmp(&reference) {
      Ordering::Greater => Self::Slower,
      Ordering::Less => Self::Faster,
      Ordering::Equal => Self::Neutral,
    }
  }

  pub fn color(self) -> Color {
    match self {
      Self::Neutral => Color::White,
      Self::Faster => Color::Green,
      Self::Slower => Color::Red,
    }
  }
}

impl Default for Verdict {
  fn default() -> Self {
    Self::Neutral
  }
}


/// One timed lap: the lap time and its sector times.
///
/// Lap number 0 marks synthetic laps such as sums and averages. `verdict`
/// and `sector_verdicts` are display state, set by `annotate` right before a
/// lap is rendered.
#[derive(Clone, Debug, PartialEq, CopyGetters, Getters)]
pub struct Lap {
  #[getset(get_copy = "pub")]
  number:          u32,
  #[getset(get_copy = "pub")]
  total:           LapTime,
  #[getset(get = "pub")]
  sectors:         Vec<LapTime>,
  #[getset(get_copy = "pub")]
  verdict:         Verdict,
  #[getset(get = "pub")]
  sector_verdicts: Vec<Verdict>,
}

impl Lap {
  pub fn new(number: u32, total: LapTime, sectors: Vec<LapTime>) -> Self {
    let sector_verdicts = vec![Verdict::Neutral; sectors.len()];
    Self { number,
           total,
           sectors,
           verdict: Verdict::Neutral,
           sector_verdicts }
  }

  /// Builds a lap from its textual fields, all in `MM:SS.mmm` format.
  pub fn from_fields<S: AsRef<str>>(number: u32,
                                    total: &str,
                                    sectors: &[S])
                                    -> Result<Self> {
    let sectors = sectors.iter()
                         .map(|sector| LapTime::parse(sector.as_ref(), false))
                         .collect::<Result<Vec<_>>>()?;
    Ok(Self::new(number, LapTime::parse(total, false)?, sectors))
  }

  /// The identity for `add`: lap 0, all times zero.
  pub fn zero(n_sectors: usize) -> Self {
    Self::new(0, LapTime::zero(), vec![LapTime::zero(); n_sectors])
  }

  pub fn n_sectors(&self) -> usize {
    self.sectors.len()
  }

  fn check_arity(&self, other: &Self) -> Result<()> {
    crate::ensure!(self.n_sectors() == other.n_sectors(),
                   Fubar::SectorArityMismatch { line:     None,
                                                expected: self.n_sectors(),
                                                found:    other.n_sectors(), });
    Ok(())
  }

  /// Adds lap and sector times position by position. The result is a
  /// synthetic lap (number 0).
  pub fn add(&self, other: &Self) -> Result<Self> {
    self.check_arity(other)?;

    let sectors = self.sectors
                      .iter()
                      .zip(other.sectors.iter())
                      .map(|(&mine, &theirs)| mine.add(theirs))
                      .collect::<Result<Vec<_>>>()?;
    Ok(Self::new(0, self.total.add(other.total)?, sectors))
  }

  /// Folds `laps` into their sum, starting from `Lap::zero(n_sectors)`.
  pub fn sum<'a, I>(laps: I, n_sectors: usize) -> Result<Self>
    where I: IntoIterator<Item = &'a Lap>
  {
    laps.into_iter()
        .try_fold(Self::zero(n_sectors), |acc, lap| acc.add(lap))
  }

  /// Averages lap time and every sector position independently. Fails with
  /// `Fubar::EmptyInput` if there are no laps.
  pub fn mean<'a, I>(laps: I) -> Result<Self>
    where I: IntoIterator<Item = &'a Lap>
  {
    let laps: Vec<&Lap> = laps.into_iter().collect();
    let first = laps.first().ok_or_else(|| Fubar::empty("an average lap"))?;
    for lap in &laps {
      first.check_arity(lap)?;
    }

    let total = column_mean(&laps, |lap| lap.total)?;
    let sectors = (0..first.n_sectors()).map(|idx| {
                                          column_mean(&laps, |lap| lap.sectors[idx])
                                        })
                                        .collect::<Result<Vec<_>>>()?;
    Ok(Self::new(0, total, sectors))
  }

  /// In-laps and out-laps: the lap starting a stint, and the lap right before
  /// it.
  pub fn is_pit_lap(&self, changes: &DriverChanges) -> bool {
    changes.is_stint_start(self.number)
    || changes.is_stint_start(self.number.saturating_add(1))
  }

  /// Compares the lap time against `reference`.
  pub fn compare_to(&self, reference: &Self) -> Verdict {
    Verdict::of(self.total, reference.total)
  }

  /// Sets `verdict` and `sector_verdicts` against `reference`.
  pub fn annotate(&mut self, reference: &Self) -> Result<()> {
    self.check_arity(reference)?;

    self.verdict = self.compare_to(reference);
    self.sector_verdicts = self.sectors
                               .iter()
                               .zip(reference.sectors.iter())
                               .map(|(&mine, &theirs)| Verdict::of(mine, theirs))
                               .collect();
    Ok(())
  }

  /// Renders the lap as one row: the lap number (blank for synthetic laps),
  /// then the lap time and each sector, coloured by their verdicts. Column
  /// `i` is left-justified to `widths[i]`; sectors without a width get
  /// `DEFAULT_COLUMN_WIDTH`.
  pub fn render(&self,
                widths: &[usize],
                with_hours: bool,
                painter: &Painter)
                -> String {
    let width = |idx: usize| widths.get(idx).copied().unwrap_or(DEFAULT_COLUMN_WIDTH);
    let number = if self.number > 0 {
      self.number.to_string()
    } else {
      String::new()
    };

    let mut output = painter.fg(&pad(&number, width(0)), Color::White);
    output += &painter.fg(&pad(&self.total.format(with_hours), width(1)),
                          self.verdict.color());

    for (idx, sector) in self.sectors.iter().enumerate() {
      let verdict = self.sector_verdicts
                        .get(idx)
                        .copied()
                        .unwrap_or_default();
      output += &painter.fg(&pad(&sector.format(with_hours), width(2 + idx)),
                            verdict.color());
    }
    output
  }
}

fn column_mean<F>(laps: &[&Lap], pick: F) -> Result<LapTime>
  where F: Fn(&Lap) -> LapTime
{
  LapTime::mean(&laps.iter().map(|&lap| pick(lap)).collect::<Vec<_>>())
}

fn pad(text: &str, width: usize) -> String {
  format!("{:<width$}", text, width = width)
}
