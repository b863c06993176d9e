// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use crate::fubar::{Fubar, Result};
use chrono::Duration;
use std::{fmt, str::FromStr};


const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;


/// Elapsed time with millisecond precision, in the range `[0, 24h)`.
///
/// This is a plain duration - there is no date or epoch hiding behind it, so
/// adding two `LapTime`s never wraps around midnight. Operations which would
/// leave the range fail with `Fubar::OutOfRange` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LapTime(Duration);

impl LapTime {
  pub fn zero() -> Self {
    Self(Duration::zero())
  }

  /// Parses `MM:SS.mmm`, or `HH:MM:SS.mmm` if `with_hours` is set.
  ///
  /// Each integer field takes one or two digits, the fraction one to six
  /// digits. Anything below a millisecond is rounded to the nearest
  /// millisecond, so `00:01.0005` becomes `00:01.001`.
  pub fn parse(text: &str, with_hours: bool) -> Result<Self> {
    let expected = if with_hours {
      "expected HH:MM:SS.mmm"
    } else {
      "expected MM:SS.mmm"
    };
    let fail = || Fubar::parse(text, expected);

    let fields: Vec<&str> = text.split(':').collect();
    let (hours, minutes, rest) = match (with_hours, fields.as_slice()) {
      (true, [h, m, rest]) => (number_field(h, 24).ok_or_else(fail)?, *m, *rest),
      (false, [m, rest]) => (0, *m, *rest),
      _ => return Err(fail()),
    };
    let minutes = number_field(minutes, 60).ok_or_else(fail)?;

    let mut parts = rest.split('.');
    let (seconds, fraction) = match (parts.next(), parts.next(), parts.next()) {
      (Some(s), Some(f), None) => (number_field(s, 60).ok_or_else(fail)?, f),
      _ => return Err(fail()),
    };
    let micros = fraction_micros(fraction).ok_or_else(fail)?;

    Self::from_millis(hours * MILLIS_PER_HOUR
                      + minutes * MILLIS_PER_MINUTE
                      + seconds * MILLIS_PER_SECOND
                      + (micros + 500) / 1_000)
  }

  /// Zero padded, fixed width inverse of `parse`. Without hours only the
  /// minute within the hour is shown.
  pub fn format(&self, with_hours: bool) -> String {
    let millis = self.to_millis();
    let (hours, minutes, seconds, fraction) = (millis / MILLIS_PER_HOUR,
                                               millis / MILLIS_PER_MINUTE % 60,
                                               millis / MILLIS_PER_SECOND % 60,
                                               millis % MILLIS_PER_SECOND);
    if with_hours {
      format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, fraction)
    } else {
      format!("{:02}:{:02}.{:03}", minutes, seconds, fraction)
    }
  }

  pub fn to_millis(&self) -> i64 {
    self.0.num_milliseconds()
  }

  pub fn from_millis(millis: i64) -> Result<Self> {
    crate::ensure!((0..MILLIS_PER_DAY).contains(&millis),
                   Fubar::OutOfRange { millis });
    Ok(Self(Duration::milliseconds(millis)))
  }

  /// Adds in the millisecond domain.
  pub fn add(self, other: Self) -> Result<Self> {
    Self::from_millis(self.to_millis() + other.to_millis())
  }

  pub fn sum(times: &[Self]) -> Result<Self> {
    times.iter()
         .try_fold(Self::zero(), |acc, &time| acc.add(time))
  }

  /// Arithmetic mean, rounded to the nearest millisecond. An empty slice has
  /// no mean and yields `Fubar::EmptyInput`.
  pub fn mean(times: &[Self]) -> Result<Self> {
    crate::ensure!(!times.is_empty(), Fubar::empty("an average"));

    let count = times.len() as i64;
    let total: i64 = times.iter().map(Self::to_millis).sum();
    Self::from_millis((2 * total + count) / (2 * count))
  }
}

/// One or two ASCII digits, strictly below `limit`.
fn number_field(text: &str, limit: i64) -> Option<i64> {
  if text.is_empty() || text.len() > 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  text.parse().ok().filter(|&value| value < limit)
}

/// One to six ASCII digits, read as a fraction of a second in microseconds.
fn fraction_micros(text: &str) -> Option<i64> {
  if text.is_empty() || text.len() > 6 || !text.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  let value: i64 = text.parse().ok()?;
  Some(value * 10_i64.pow(6 - text.len() as u32))
}

impl fmt::Display for LapTime {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.format(false))
  }
}

impl FromStr for LapTime {
  type Err = Fubar;

  fn from_str(text: &str) -> Result<Self> {
    Self::parse(text, false)
  }
}
