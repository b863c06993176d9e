// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use crate::{driver_changes::DriverChanges,
            fubar::{Fubar, Result},
            report::ReportConfig};
use getset::Getters;
use serde::Deserialize;
use std::{fs, path::Path};


/// One `[[stint]]` entry: the lap a driver takes over on.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StintStart {
  pub first_lap: u32,
  pub driver:    String,
}


/// Contents of a configuration file.
///
/// ```toml
/// [report]
/// compare_against = "session"
/// column_widths = [8, 12, 10, 10, 10]
///
/// [[stint]]
/// first_lap = 1
/// driver = "A"
///
/// [[stint]]
/// first_lap = 22
/// driver = "B"
/// ```
///
/// Everything is optional. Without `[[stint]]` entries the default driver
/// changes apply. `[[stint]]` entries must be listed in ascending `first_lap`
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Getters)]
#[serde(default, deny_unknown_fields)]
#[getset(get = "pub")]
pub struct Config {
  report: ReportConfig,
  #[serde(rename = "stint")]
  stints: Vec<StintStart>,
}

impl Config {
  pub fn load(path: &Path) -> Result<Self> {
    let text = fs::read_to_string(path).map_err(|err| Fubar::io(path, err))?;
    let config = Self::from_toml(&text)?;
    log::info!("loaded configuration from {}", path.display());
    Ok(config)
  }

  pub fn from_toml(text: &str) -> Result<Self> {
    let config: Self = toml::from_str(text)?;
    config.report.validate()?;
    Ok(config)
  }

  pub fn report_mut(&mut self) -> &mut ReportConfig {
    &mut self.report
  }

  pub fn into_report(self) -> ReportConfig {
    self.report
  }

  pub fn driver_changes(&self) -> Result<DriverChanges> {
    if self.stints.is_empty() {
      return Ok(DriverChanges::default());
    }
    DriverChanges::new(self.stints
                           .iter()
                           .map(|start| (start.first_lap, start.driver.clone())))
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::report::{CompareAgainst, Sections};
  use pretty_assertions::assert_eq;
  use std::io::Write;


  #[test]
  fn from_toml_test() {
    let config = Config::from_toml(r#"
      [report]
      compare_against = "session"
      column_widths = [8, 12, 10]
      color = false
      sections = { stints = false }

      [[stint]]
      first_lap = 1
      driver = "Anna"

      [[stint]]
      first_lap = 30
      driver = "Bert"
    "#).unwrap();

    let report = config.report();
    assert_eq!(CompareAgainst::Session, report.compare_against);
    assert_eq!(vec![8, 12, 10], report.column_widths);
    assert_eq!(false, report.color);
    assert_eq!(true, report.ignore_pit_laps);
    assert_eq!(Sections { stints: false,
                          ..Sections::default() },
               report.sections);

    let changes = config.driver_changes().unwrap();
    assert_eq!(Some("Bert"), changes.driver_at(30));
    assert_eq!(2, changes.len());
  }

  #[test]
  fn defaults_test() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(&ReportConfig::default(), config.report());
    assert_eq!(DriverChanges::default(), config.driver_changes().unwrap());
  }

  #[test]
  fn rejects_test() {
    assert!(Config::from_toml("[report]\nwarbl = 1\n").is_err());
    assert!(Config::from_toml("[report]\ncompare_against = \"lap\"\n").is_err());
    assert!(Config::from_toml("[report]\ncolumn_widths = [14]\n").is_err());

    let config = Config::from_toml("[[stint]]\nfirst_lap = 0\ndriver = \"A\"\n");
    assert!(config.unwrap().driver_changes().is_err());

    let config = Config::from_toml(r#"
      [[stint]]
      first_lap = 30
      driver = "Bert"

      [[stint]]
      first_lap = 1
      driver = "Anna"
    "#).unwrap();
    assert_eq!(Err(Fubar::config("stint on lap 1 is listed after stint on lap \
                                  30")),
               config.driver_changes());
  }

  #[test]
  fn load_test() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[[stint]]\nfirst_lap = 5\ndriver = \"C\"").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(5, config.driver_changes().unwrap().first_lap());

    match Config::load(Path::new("./does/not/exist.toml")) {
      Err(Fubar::Io { path, .. }) => assert_eq!("./does/not/exist.toml", path),
      other => panic!("unexpected {:?}", other),
    }
  }
}
