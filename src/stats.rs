// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use crate::{driver_changes::DriverChanges,
            fubar::{Fubar, Result},
            lap::Lap,
            stint::Stint};
use getset::{CopyGetters, Getters, MutGetters};
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};


/// Splits `laps` into stints at every lap number in `changes`.
///
/// Lap numbers from the first stint start up to the number of the *last* lap
/// in `laps` are walked in order, visiting only numbers that hold a lap or a
/// stint start; a stint start closes the running stint and
/// opens one for the new driver. Gaps in the lap numbers are skipped. Laps
/// numbered below the first stint start belong to no driver and are dropped,
/// as are laps numbered above the last lap. If a lap number appears twice,
/// the later lap wins.
pub fn stints(laps: &[Lap],
              changes: &DriverChanges,
              ignore_pit_laps: bool)
              -> Result<Vec<Stint>> {
  let last = match laps.last() {
    Some(lap) => lap.number(),
    None => return Ok(vec![]),
  };
  let first = changes.first_lap();

  let mut by_number = BTreeMap::new();
  for lap in laps {
    if by_number.insert(lap.number(), lap).is_some() {
      warn!("lap {} appears more than once, using the last one", lap.number());
    }
  }
  let dropped = by_number.keys()
                         .filter(|&&number| number < first || number > last)
                         .count();
  if dropped > 0 {
    warn!("{} lap(s) outside of laps {}..={} belong to no stint",
          dropped,
          first,
          last);
  }

  if first > last {
    return Ok(vec![]);
  }

  // only lap numbers that carry a lap or a driver change matter
  let numbers: BTreeSet<u32> =
    by_number.range(first..=last)
             .map(|(&number, _)| number)
             .chain(changes.iter()
                           .map(|(&number, _)| number)
                           .filter(|number| (first..=last).contains(number)))
             .collect();

  let mut stints = Vec::with_capacity(changes.len());
  let mut driver: Option<&str> = None;
  let mut stint_laps = Vec::new();

  for number in numbers {
    if let Some(next_driver) = changes.driver_at(number) {
      if let Some(name) = driver {
        if !stint_laps.is_empty() {
          debug!("closing stint '{}' before lap {}", name, number);
          stints.push(Stint::build(name, stint_laps, changes, ignore_pit_laps)?);
          stint_laps = Vec::new();
        }
      }
      driver = Some(next_driver);
    }

    if let Some(&lap) = by_number.get(&number) {
      stint_laps.push(lap.clone());
    }
  }

  if let Some(name) = driver {
    if !stint_laps.is_empty() {
      stints.push(Stint::build(name, stint_laps, changes, ignore_pit_laps)?);
    }
  }
  Ok(stints)
}


/// Stints and session-wide aggregates, computed once on construction.
#[derive(Clone, Debug, PartialEq, CopyGetters, Getters, MutGetters)]
pub struct Stats {
  #[getset(get = "pub")]
  laps:            Vec<Lap>,
  #[getset(get = "pub")]
  changes:         DriverChanges,
  #[getset(get = "pub", get_mut = "pub")]
  stints:          Vec<Stint>,
  #[getset(get = "pub")]
  all_avg:         Lap,
  #[getset(get = "pub")]
  included_avg:    Lap,
  #[getset(get = "pub")]
  all_total:       Lap,
  #[getset(get = "pub")]
  included_total:  Lap,
  #[getset(get_copy = "pub")]
  ignore_pit_laps: bool,
}

impl Stats {
  /// Builds stints and aggregates from `laps`.
  ///
  /// "Included" aggregates leave out pit laps if `ignore_pit_laps` is set
  /// and equal the "all" aggregates otherwise. Fails with
  /// `Fubar::EmptyInput` if there are no laps (or no laps besides pit laps),
  /// with `Fubar::SectorArityMismatch` if the laps disagree on their sector
  /// count and with `Fubar::OutOfRange` if the session adds up to a day or
  /// more.
  pub fn new(laps: Vec<Lap>,
             changes: DriverChanges,
             ignore_pit_laps: bool)
             -> Result<Self> {
    let n_sectors = laps.first()
                        .map(Lap::n_sectors)
                        .ok_or_else(|| Fubar::empty("a session"))?;

    let included: Vec<&Lap> = laps.iter()
                                  .filter(|lap| {
                                    !ignore_pit_laps || !lap.is_pit_lap(&changes)
                                  })
                                  .collect();
    let all_avg = Lap::mean(&laps)?;
    let included_avg = Lap::mean(included.iter().copied())?;
    let all_total = Lap::sum(&laps, n_sectors)?;
    let included_total = Lap::sum(included.iter().copied(), n_sectors)?;

    let stints = stints(&laps, &changes, ignore_pit_laps)?;
    debug!("{} laps in {} stints, {} laps included",
           laps.len(),
           stints.len(),
           included.len());

    Ok(Self { laps,
              changes,
              stints,
              all_avg,
              included_avg,
              all_total,
              included_total,
              ignore_pit_laps })
  }
}
