// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use crate::{fubar::{Fubar, Result},
            lap::Lap,
            paint::{Color, Painter},
            stats::Stats,
            stint::PIT_LAP_MARKER};
use serde::Deserialize;
use std::{fmt, str::FromStr};


/// Column widths of lap tables: lap number, lap time, then one per sector.
pub const DEFAULT_COLUMN_WIDTHS: [usize; 5] = [14, 14, 12, 12, 12];

/// Extra width of time columns in the totals table.
const TOTALS_EXTRA_WIDTH: usize = 3;


/// What laps in the lap table are coloured against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareAgainst {
  /// The included average of the lap's own stint.
  Stint,
  /// The included average of the whole session.
  Session,
}

impl Default for CompareAgainst {
  fn default() -> Self {
    Self::Stint
  }
}

impl FromStr for CompareAgainst {
  type Err = Fubar;

  fn from_str(text: &str) -> Result<Self> {
    match text.to_lowercase().as_str() {
      "stint" => Ok(Self::Stint),
      "session" => Ok(Self::Session),
      _ => Err(Fubar::config(&format!("'{}' is neither 'stint' nor 'session'",
                                      text))),
    }
  }
}

impl fmt::Display for CompareAgainst {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Stint => write!(f, "stint"),
      Self::Session => write!(f, "session"),
    }
  }
}


/// Which parts of the report are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Sections {
  pub stints:   bool,
  pub laps:     bool,
  pub averages: bool,
  pub totals:   bool,
}

impl Sections {
  pub fn none() -> Self {
    Self { stints:   false,
           laps:     false,
           averages: false,
           totals:   false, }
  }
}

impl Default for Sections {
  fn default() -> Self {
    Self { stints:   true,
           laps:     true,
           averages: true,
           totals:   true, }
  }
}


#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
  /// Leave in-laps and out-laps out of "included" aggregates.
  pub ignore_pit_laps:      bool,
  pub compare_against:      CompareAgainst,
  pub column_widths:        Vec<usize>,
  /// List pit laps in the lap table (dimmed and marked).
  pub show_pit_laps:        bool,
  pub show_hours_in_totals: bool,
  /// ANSI colours; plain text if unset.
  pub color:                bool,
  pub sections:             Sections,
}

impl ReportConfig {
  pub fn validate(&self) -> Result<()> {
    crate::ensure!(self.column_widths.len() >= 2,
                   Fubar::config("column_widths needs at least a lap number \
                                  and a lap time column"));
    Ok(())
  }

  pub fn painter(&self) -> Painter {
    Painter::new(self.color)
  }

  /// Width of the label column, which doubles as lap number column.
  fn label_width(&self) -> usize {
    self.column_widths.first().copied().unwrap_or_default()
  }

  /// Widths for rows labelled by name rather than lap number, with `extra`
  /// added to every time column.
  fn labelled_widths(&self, extra: usize) -> Vec<usize> {
    let times = self.column_widths.iter().skip(1).map(|width| width + extra);
    std::iter::once(0).chain(times).collect()
  }
}

impl Default for ReportConfig {
  fn default() -> Self {
    Self { ignore_pit_laps:      true,
           compare_against:      CompareAgainst::default(),
           column_widths:        DEFAULT_COLUMN_WIDTHS.to_vec(),
           show_pit_laps:        true,
           show_hours_in_totals: true,
           color:                true,
           sections:             Sections::default(), }
  }
}


/// Renders `Stats` into a single text.
///
/// Sections come in a fixed order: the driver changes, all laps by stint,
/// the average of every stint next to the session averages, and the session
/// totals. Lap verdicts in `stats` are overwritten along the way.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
  config:  ReportConfig,
  painter: Painter,
}

impl Report {
  pub fn new(config: ReportConfig) -> Result<Self> {
    config.validate()?;
    let painter = config.painter();
    Ok(Self { config, painter })
  }

  pub fn config(&self) -> &ReportConfig {
    &self.config
  }

  pub fn render(&self, stats: &mut Stats) -> Result<String> {
    let sections = self.config.sections;
    let mut output = String::new();

    if sections.stints {
      output += &self.render_stints(stats);
    }
    if sections.laps {
      output += &self.render_laps(stats)?;
    }
    if sections.averages {
      output += &self.render_averages(stats)?;
    }
    if sections.totals {
      output += &self.render_totals(stats);
    }
    Ok(output)
  }

  fn label(&self, text: &str) -> String {
    format!("{:<width$}", text, width = self.config.label_width())
  }

  // SECTIONS -------------------------------------------------------------- //
  fn render_stints(&self, stats: &Stats) -> String {
    let mut output = String::from("# STINTS:\n");
    for (first_lap, driver) in stats.changes() {
      output += &format!("{:>5} -> {}\n", first_lap, driver);
    }
    output.push('\n');
    output
  }

  fn render_laps(&self, stats: &mut Stats) -> Result<String> {
    let mut output = String::from("# LAPS:\n");
    let session_avg = stats.included_avg().clone();
    let changes = stats.changes().clone();

    for stint in stats.stints_mut() {
      let reference = match self.config.compare_against {
        CompareAgainst::Stint => stint.reference().clone(),
        CompareAgainst::Session => session_avg.clone(),
      };
      output += &stint.render(&reference,
                              &changes,
                              self.config.show_pit_laps,
                              &self.config.column_widths,
                              &self.painter)?;
      output.push('\n');
    }
    Ok(output)
  }

  fn render_averages(&self, stats: &Stats) -> Result<String> {
    let widths = self.config.labelled_widths(0);
    let mut output = String::from("# AVERAGES:\n");

    for stint in stats.stints() {
      // stints made of pit laps only show their plain average, marked
      let name = match stint.average_included() {
        Some(_) => stint.name().clone(),
        None => format!("{}{}", stint.name(), PIT_LAP_MARKER),
      };
      let mut average = stint.reference().clone();
      average.annotate(stats.included_avg())?;

      output += &self.painter.fg(&self.label(&name), Color::Magenta);
      output += &average.render(&widths, false, &self.painter);
      output.push('\n');
    }

    output.push('\n');
    output += &self.labelled_row("incl. avg", stats.included_avg(), &widths, false);
    output += &self.labelled_row("total avg", stats.all_avg(), &widths, false);
    output.push('\n');
    Ok(output)
  }

  fn render_totals(&self, stats: &Stats) -> String {
    let widths = self.config.labelled_widths(TOTALS_EXTRA_WIDTH);
    let hours = self.config.show_hours_in_totals;

    let mut output = String::from("# TOTALS:\n");
    output += &self.labelled_row("incl. total", stats.included_total(), &widths, hours);
    output += &self.labelled_row("full total", stats.all_total(), &widths, hours);
    output
  }

  fn labelled_row(&self,
                  label: &str,
                  lap: &Lap,
                  widths: &[usize],
                  with_hours: bool)
                  -> String {
    format!("{}{}\n",
            self.label(label),
            lap.render(widths, with_hours, &self.painter))
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::driver_changes::DriverChanges;
  use pretty_assertions::assert_eq;


  fn stats() -> Stats {
    let laps = vec![Lap::from_fields(1, "01:40.000", &["00:50.000", "00:50.000"]),
                    Lap::from_fields(2, "01:30.000", &["00:45.000", "00:45.000"]),
                    Lap::from_fields(3, "01:31.000", &["00:44.000", "00:47.000"]),
                    Lap::from_fields(4, "01:45.000", &["00:50.000", "00:55.000"])];
    let laps = laps.into_iter().collect::<Result<Vec<_>>>().unwrap();
    let changes = DriverChanges::new(vec![(1, "A"), (4, "B")]).unwrap();
    Stats::new(laps, changes, true).unwrap()
  }

  fn plain() -> ReportConfig {
    ReportConfig { column_widths: vec![6, 10, 10, 10],
                   color: false,
                   ..ReportConfig::default() }
  }

  #[test]
  fn config_test() {
    let config = ReportConfig::default();
    assert_eq!(vec![14, 14, 12, 12, 12], config.column_widths);
    assert_eq!(CompareAgainst::Stint, config.compare_against);
    assert_eq!(true, config.ignore_pit_laps && config.show_pit_laps);
    assert_eq!(vec![0, 17, 15, 15, 15], config.labelled_widths(3));

    let broken = ReportConfig { column_widths: vec![14],
                                ..ReportConfig::default() };
    assert!(Report::new(broken).is_err());

    assert_eq!(Ok(CompareAgainst::Session), "Session".parse::<CompareAgainst>());
    assert!("lap".parse::<CompareAgainst>().is_err());
  }

  #[test]
  fn render_test() {
    let mut stats = stats();
    let report = Report::new(plain()).unwrap().render(&mut stats).unwrap();

    // laps 1, 3 and 4 are pit laps; stint B has nothing but pit laps
    let expected = "# STINTS:\n\
                    \x20   1 -> A\n\
                    \x20   4 -> B\n\
                    \n\
                    # LAPS:\n\
                    A\n\
                    1     01:40.000 00:50.000 00:50.000 *\n\
                    2     01:30.000 00:45.000 00:45.000 \n\
                    3     01:31.000 00:44.000 00:47.000 *\n\
                    \n\
                    B\n\
                    4     01:45.000 00:50.000 00:55.000 *\n\
                    \n\
                    # AVERAGES:\n\
                    A     01:30.000 00:45.000 00:45.000 \n\
                    B*    01:45.000 00:50.000 00:55.000 \n\
                    \n\
                    incl. avg01:30.000 00:45.000 00:45.000 \n\
                    total avg01:36.500 00:47.250 00:49.250 \n\
                    \n\
                    # TOTALS:\n\
                    incl. total00:01:30.000 00:00:45.000 00:00:45.000 \n\
                    full total00:06:26.000 00:03:09.000 00:03:17.000 \n";
    assert_eq!(expected, report);
  }

  #[test]
  fn render_sections_test() {
    let mut stats = stats();
    let config = ReportConfig { sections: Sections { totals: true,
                                                     ..Sections::none() },
                                show_hours_in_totals: false,
                                ..plain() };
    let report = Report::new(config).unwrap().render(&mut stats).unwrap();
    assert_eq!("# TOTALS:\n\
                incl. total01:30.000    00:45.000    00:45.000    \n\
                full total06:26.000    03:09.000    03:17.000    \n",
               report);
  }

  #[test]
  fn render_laps_against_session_test() {
    let mut stats = stats();
    let config = ReportConfig { compare_against: CompareAgainst::Session,
                                sections: Sections { laps: true,
                                                     ..Sections::none() },
                                ..plain() };
    Report::new(config).unwrap().render(&mut stats).unwrap();

    // session included average is lap 2, so lap 3 is slower overall
    let lap = &stats.stints()[0].laps()[2];
    assert_eq!(crate::lap::Verdict::Slower, lap.verdict());
    assert_eq!(&vec![crate::lap::Verdict::Faster, crate::lap::Verdict::Slower],
               lap.sector_verdicts());
  }

  #[test]
  fn render_ansi_test() {
    let mut stats = stats();
    let config = ReportConfig { sections: Sections { averages: true,
                                                     ..Sections::none() },
                                ..ReportConfig::default() };
    let report = Report::new(config).unwrap().render(&mut stats).unwrap();

    let label = format!("\x1b[35m{:<14}\x1b[39m", "A");
    assert_eq!(true, report.contains(&label));
    assert_eq!(true, report.contains('\x1b'));
  }

  #[test]
  fn render_averages_verdicts_test() {
    // laps 1, 3 and 4 are pit laps, so A averages lap 2 and B laps 5 and 6
    let laps = vec![Lap::from_fields(1, "02:00.000", &["00:50.000"]),
                    Lap::from_fields(2, "01:30.000", &["00:30.000"]),
                    Lap::from_fields(3, "02:00.000", &["00:50.000"]),
                    Lap::from_fields(4, "02:00.000", &["00:50.000"]),
                    Lap::from_fields(5, "01:40.000", &["00:40.000"]),
                    Lap::from_fields(6, "01:40.000", &["00:40.000"])];
    let laps = laps.into_iter().collect::<Result<Vec<_>>>().unwrap();
    let changes = DriverChanges::new(vec![(1, "A"), (4, "B")]).unwrap();
    let mut stats = Stats::new(laps, changes, true).unwrap();
    assert_eq!("01:36.667", stats.included_avg().total().format(false));

    let config = ReportConfig { sections: Sections { averages: true,
                                                     ..Sections::none() },
                                ..ReportConfig::default() };
    let report = Report::new(config).unwrap().render(&mut stats).unwrap();

    // stint averages are coloured against the session's included average
    let row = |name: &str, color: u8, total: &str, sector: &str| {
      format!("\x1b[35m{:<14}\x1b[39m\x1b[{}m{:<14}\x1b[39m\x1b[{}m{:<12}\x1b[39m\n",
              name, color, total, color, sector)
    };
    let lines: Vec<&str> = report.split_inclusive('\n').collect();
    assert_eq!("# AVERAGES:\n", lines[0]);
    assert_eq!(row("A", 32, "01:30.000", "00:30.000"), lines[1]);
    assert_eq!(row("B", 31, "01:40.000", "00:40.000"), lines[2]);
  }
}
