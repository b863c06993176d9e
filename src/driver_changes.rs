// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use crate::fubar::{Fubar, Result};
use std::collections::{btree_map, BTreeMap};


/// Maps the first lap of every stint to the driver of that stint.
///
/// The map is ordered by lap number and never empty. Lap number 0 is
/// reserved for synthetic laps and can't start a stint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverChanges(BTreeMap<u32, String>);

impl DriverChanges {
  /// Takes `(first lap, driver)` pairs in ascending lap order.
  ///
  /// Fails with `Fubar::Config` if there are none, if a stint starts on lap
  /// 0 or if the laps aren't strictly ascending.
  pub fn new<I, S>(changes: I) -> Result<Self>
    where I: IntoIterator<Item = (u32, S)>,
          S: Into<String>
  {
    let mut map: BTreeMap<u32, String> = BTreeMap::new();
    for (first_lap, driver) in changes {
      crate::ensure!(first_lap > 0,
                     Fubar::config("stints can't start on lap 0"));
      if let Some((&previous, _)) = map.iter().next_back() {
        crate::ensure!(previous != first_lap,
                       Fubar::config(&format!("more than one stint starts on \
                                               lap {}",
                                              first_lap)));
        crate::ensure!(previous < first_lap,
                       Fubar::config(&format!("stint on lap {} is listed \
                                               after stint on lap {}",
                                              first_lap, previous)));
      }
      map.insert(first_lap, driver.into());
    }
    crate::ensure!(!map.is_empty(), Fubar::config("no stints configured"));
    Ok(Self(map))
  }

  pub fn is_stint_start(&self, number: u32) -> bool {
    self.0.contains_key(&number)
  }

  /// The driver taking over on lap `number`, if a stint starts there.
  pub fn driver_at(&self, number: u32) -> Option<&str> {
    self.0.get(&number).map(String::as_str)
  }

  /// Lap number of the first stint start.
  pub fn first_lap(&self) -> u32 {
    // `new` guarantees at least one entry
    self.0.keys().next().copied().unwrap_or(1)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> btree_map::Iter<u32, String> {
    self.0.iter()
  }
}

impl Default for DriverChanges {
  /// Two drivers, six stints.
  fn default() -> Self {
    let map = vec![(1, "A"),
                   (22, "B"),
                   (44, "Bb"),
                   (67, "Aa"),
                   (90, "Aaa"),
                   (113, "Bbb")].into_iter()
                                .map(|(lap, driver)| (lap, driver.to_string()))
                                .collect();
    Self(map)
  }
}

impl<'a> IntoIterator for &'a DriverChanges {
  type IntoIter = btree_map::Iter<'a, u32, String>;
  type Item = (&'a u32, &'a String);

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn driver_changes_test() {
    let changes = DriverChanges::new(vec![(1, "A"), (22, "B")]).unwrap();
    assert_eq!(2, changes.len());
    assert_eq!(1, changes.first_lap());
    assert_eq!(true, changes.is_stint_start(22));
    assert_eq!(false, changes.is_stint_start(21));
    assert_eq!(Some("B"), changes.driver_at(22));
    assert_eq!(None, changes.driver_at(2));

    let laps: Vec<u32> = changes.iter().map(|(&lap, _)| lap).collect();
    assert_eq!(vec![1, 22], laps);
  }

  #[test]
  fn driver_changes_rejects_test() {
    assert_eq!(Err(Fubar::config("no stints configured")),
               DriverChanges::new(Vec::<(u32, String)>::new()));
    assert!(DriverChanges::new(vec![(0, "A")]).is_err());
    assert!(DriverChanges::new(vec![(1, "A"), (1, "B")]).is_err());
    assert_eq!(Err(Fubar::config("stint on lap 1 is listed after stint on lap \
                                  22")),
               DriverChanges::new(vec![(22, "B"), (1, "A")]));
    assert_eq!(Err(Fubar::config("more than one stint starts on lap 22")),
               DriverChanges::new(vec![(1, "A"), (22, "B"), (22, "C")]));
  }

  #[test]
  fn default_test() {
    let changes = DriverChanges::default();
    assert_eq!(6, changes.len());
    assert_eq!(Some("Bbb"), changes.driver_at(113));
  }
}
