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

//! The two run modes: ASCII report and image render.
//!
//! Both read and validate everything before producing output, so a failed
//! run leaves no partial chart behind.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::plot::{self, PlotStyle};
use crate::report::{self, ReportOptions};
use crate::samples::read_samples;
use crate::stats::Summary;

/// Result of an ASCII run. The report has already been written to `output`.
#[derive(Debug)]
pub struct AsciiRun {
    pub report: String,
    pub output: PathBuf,
    pub skipped: usize,
}

/// Result of an image run.
#[derive(Debug)]
pub struct ImageRun {
    pub summary: Summary,
    pub output: PathBuf,
    pub skipped: usize,
}

/// Read `input`, build the text report and save it to `output`.
pub fn run_ascii(input: &Path, output: &Path, opts: &ReportOptions) -> Result<AsciiRun> {
    let set = read_samples(input)?;
    let report = report::text_report(&set, opts)?;
    write_report(output, &report)?;
    Ok(AsciiRun {
        report,
        output: output.to_path_buf(),
        skipped: set.skipped,
    })
}

/// Read `input` and render the stacked CPU/memory plot to `output`.
///
/// The output extension is checked against `style` before the CSV is read.
pub fn run_image(input: &Path, output: &Path, style: PlotStyle) -> Result<ImageRun> {
    style.check_path(output)?;
    let set = read_samples(input)?;
    if set.len() < 2 {
        warn!("Only 1 data point found, duration will be 0");
    }
    plot::render_image(&set.samples, output, style)?;
    Ok(ImageRun {
        summary: Summary::from_samples(&set.samples),
        output: output.to_path_buf(),
        skipped: set.skipped,
    })
}

pub fn write_report(path: &Path, text: &str) -> Result<()> {
    debug!("writing {} bytes to {}", text.len(), path.display());
    fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
