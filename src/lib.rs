// Copyright 2020 bmc::labs Gmbh. All rights reserved.
//
// Author: Florian Eich <florian@bmc-labs.com>

#[macro_use]
mod fubar;

mod config;
mod driver_changes;
mod lap;
mod laps_file;
mod laptime;
mod paint;
mod report;
mod stats;
mod stint;

pub use config::{Config, StintStart};
pub use driver_changes::DriverChanges;
pub use fubar::{Fubar, Result};
pub use lap::{Lap, Verdict, DEFAULT_COLUMN_WIDTH};
pub use laps_file::{parse as parse_laps, LapsFile};
pub use laptime::LapTime;
pub use paint::{Color, Painter, Weight};
pub use report::{CompareAgainst, Report, ReportConfig, Sections,
                 DEFAULT_COLUMN_WIDTHS};
pub use stats::{stints, Stats};
pub use stint::{Stint, PIT_LAP_MARKER};
