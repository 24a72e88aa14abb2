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

//! Command-line arguments.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use crate::ascii::ChartConfig;
use crate::plot::PlotStyle;
use crate::report::ReportOptions;
use crate::{VERSION_NUMBER, sibling_path};

pub const ASCII_SUFFIX: &str = "-ascii.txt";

#[derive(Debug, Parser)]
#[command(name = "runnerstats_plot")]
#[command(version = VERSION_NUMBER)]
#[command(about = "Render CI runner CPU/memory samples as ASCII or image charts")]
#[command(after_help = "The CSV needs a header with timestamp,cpu_percent,mem_percent \
    (timestamp as YYYY-MM-DD HH:MM:SS). Output is written next to the input file \
    unless -o is given. Set RUST_LOG=debug for more detail.")]
pub struct Cli {
    /// Runner metrics CSV file
    pub csv_file: PathBuf,

    /// Output kind
    #[arg(short, long, value_enum, default_value_t = Format::Ascii)]
    pub format: Format,

    /// Add one-line sparklines to the ASCII report
    #[arg(long)]
    pub sparkline: bool,

    /// ASCII chart rows (default 10)
    #[arg(long)]
    pub height: Option<usize>,

    /// ASCII chart columns; later samples are dropped (default 50)
    #[arg(long)]
    pub width: Option<usize>,

    /// Value mapped to the top ASCII row (default 100.0)
    #[arg(long = "max")]
    pub max_val: Option<f64>,

    /// Write to this path instead of next to the CSV
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Text report with ASCII charts
    Ascii,
    /// Colour PNG
    Png,
    /// Small grayscale JPEG
    Compact,
}

impl Cli {
    /// Chart geometry: compiled defaults overridden by any flags given.
    pub fn chart_config(&self) -> ChartConfig {
        let base = ChartConfig::default();
        ChartConfig {
            height: self.height.unwrap_or(base.height),
            width: self.width.unwrap_or(base.width),
            max_val: self.max_val.unwrap_or(base.max_val),
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions { chart: self.chart_config(), sparkline: self.sparkline }
    }

    pub fn plot_style(&self) -> Option<PlotStyle> {
        match self.format {
            Format::Ascii => None,
            Format::Png => Some(PlotStyle::Full),
            Format::Compact => Some(PlotStyle::Compact),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        if let Some(out) = &self.output {
            return out.clone();
        }
        let suffix = match self.plot_style() {
            Some(style) => style.suffix(),
            None => ASCII_SUFFIX,
        };
        sibling_path(Path::new(&self.csv_file), suffix)
    }
}
