// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use clap::{ArgAction, Parser, ValueEnum};
use eyre::{Result, WrapErr};
use std::path::PathBuf;
use stintstats::{CompareAgainst, Config, LapsFile, Report, Sections, Stats};


#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Section {
  Stints,
  Laps,
  Averages,
  Totals,
}

/// Groups lap times into driver stints and prints averages and totals.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
  /// Laps file, one `number total sector...` line per lap
  #[arg(default_value = "laps.txt")]
  laps: PathBuf,

  /// TOML file with report options and `[[stint]]` driver changes
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Plain text without ANSI colours
  #[arg(long)]
  no_color: bool,

  /// Colour laps against their stint's average or the session's average
  #[arg(long, value_name = "stint|session")]
  compare_against: Option<CompareAgainst>,

  /// Leave pit laps out of the lap table
  #[arg(long)]
  hide_pit_laps: bool,

  /// Count pit laps towards the "included" averages and totals
  #[arg(long)]
  include_pit_laps: bool,

  /// Print totals without the hours field
  #[arg(long)]
  no_hours: bool,

  /// Print only these sections (repeatable)
  #[arg(long, value_enum)]
  only: Vec<Section>,

  /// More log output on stderr (repeatable)
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

impl Args {
  fn config(&self) -> Result<Config> {
    let mut config = match &self.config {
      Some(path) => Config::load(path)
        .wrap_err_with(|| format!("could not load config {}", path.display()))?,
      None => Config::default(),
    };

    let report = config.report_mut();
    report.color &= !self.no_color;
    report.show_pit_laps &= !self.hide_pit_laps;
    report.ignore_pit_laps &= !self.include_pit_laps;
    report.show_hours_in_totals &= !self.no_hours;
    if let Some(compare_against) = self.compare_against {
      report.compare_against = compare_against;
    }
    if !self.only.is_empty() {
      report.sections =
        Sections { stints:   self.only.contains(&Section::Stints),
                   laps:     self.only.contains(&Section::Laps),
                   averages: self.only.contains(&Section::Averages),
                   totals:   self.only.contains(&Section::Totals), };
    }
    Ok(config)
  }
}


fn main() -> Result<()> {
  color_eyre::install()?;
  let args = Args::parse();

  let level = match args.verbose {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
    .init();

  let config = args.config()?;
  let changes = config.driver_changes()?;
  let report_config = config.into_report();
  log::debug!("comparing laps against {} averages",
              report_config.compare_against);

  let laps = LapsFile::load(&args.laps)
    .wrap_err_with(|| format!("could not read laps from {}", args.laps.display()))?
    .into_laps();
  let mut stats = Stats::new(laps, changes, report_config.ignore_pit_laps)?;
  let report = Report::new(report_config)?.render(&mut stats)?;

  println!("{}", report);
  Ok(())
}
