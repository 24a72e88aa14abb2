// runnerstats_plot - CI Runner Resource Usage Charts
// Copyright (C) 2024 Laurence Oberman
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # runnerstats_plot
//!
//! Charts for CI runner resource samples. Reads a `timestamp,cpu_percent,mem_percent`
//! CSV and renders either a text report with ASCII charts or a PNG/JPEG plot,
//! plus peak/average/duration figures and a threshold tier.

// Increment as tool evolves
pub const VERSION_NUMBER: &str = "1.0.2";

pub mod ascii;
pub mod cli;
pub mod commands;
pub mod error;
pub mod plot;
pub mod report;
pub mod samples;
pub mod sparkline;
pub mod stats;

use std::path::{Path, PathBuf};

pub use error::{Error, Result};

/// Output file next to `input`: its extension is replaced with `suffix`.
///
/// `runner-metrics.csv` + `-ascii.txt` gives `runner-metrics-ascii.txt`.
pub fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "runner-metrics".to_string());
    input.with_file_name(format!("{}{}", stem, suffix))
}
