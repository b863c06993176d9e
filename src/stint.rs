// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use crate::{driver_changes::DriverChanges,
            fubar::{Fubar, Result},
            lap::Lap,
            paint::{Color, Painter, Weight}};
use getset::Getters;


/// Marks pit laps in lap tables.
pub const PIT_LAP_MARKER: char = '*';


/// A run of consecutive laps by one driver.
#[derive(Clone, Debug, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct Stint {
  name:             String,
  laps:             Vec<Lap>,
  average_all:      Lap,
  /// `None` if every lap of the stint is a pit lap.
  average_included: Option<Lap>,
}

impl Stint {
  /// Takes `laps` in the given order, which should be ascending by lap
  /// number. If `ignore_pit_laps` is unset, the included average covers pit
  /// laps as well.
  pub fn build(name: &str,
               laps: Vec<Lap>,
               changes: &DriverChanges,
               ignore_pit_laps: bool)
               -> Result<Self> {
    crate::ensure!(!laps.is_empty(),
                   Fubar::empty(&format!("stint '{}'", name)));

    let average_all = Lap::mean(&laps)?;
    let average_included = if ignore_pit_laps {
      let included: Vec<&Lap> =
        laps.iter().filter(|lap| !lap.is_pit_lap(changes)).collect();
      if included.is_empty() {
        log::warn!("stint '{}' only consists of pit laps", name);
        None
      } else {
        Some(Lap::mean(included)?)
      }
    } else {
      Some(average_all.clone())
    };

    Ok(Self { name: name.to_string(),
              laps,
              average_all,
              average_included })
  }

  /// The stint's own pace: the included average, or the average over all
  /// laps if there is none.
  pub fn reference(&self) -> &Lap {
    self.average_included.as_ref().unwrap_or(&self.average_all)
  }

  pub fn first_lap(&self) -> u32 {
    self.laps.first().map(Lap::number).unwrap_or_default()
  }

  pub fn last_lap(&self) -> u32 {
    self.laps.last().map(Lap::number).unwrap_or_default()
  }

  /// Renders the driver name followed by one row per lap, each compared to
  /// `reference`. Pit laps are dimmed and marked, or left out entirely
  /// unless `show_pit_laps` is set.
  ///
  /// This sets the verdicts of all laps in the stint.
  pub fn render(&mut self,
                reference: &Lap,
                changes: &DriverChanges,
                show_pit_laps: bool,
                widths: &[usize],
                painter: &Painter)
                -> Result<String> {
    let mut output = painter.fg(&self.name, Color::Magenta);
    output.push('\n');

    for lap in self.laps.iter_mut() {
      lap.annotate(reference)?;

      if !lap.is_pit_lap(changes) {
        output += &painter.weight(&lap.render(widths, false, painter),
                                  Weight::Bright);
      } else if show_pit_laps {
        let row = format!("{}{}",
                          lap.render(widths, false, painter),
                          PIT_LAP_MARKER);
        output += &painter.weight(&row, Weight::Dim);
      } else {
        continue;
      }
      output.push('\n');
    }
    Ok(output)
  }
}
