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

/*!
    # plot.rs

    Graphical charts via plotters.

    Two stacked panels (CPU on top, memory below), each a filled line over a
    0-100% axis with the 80% and 95% thresholds drawn across it. The x axis
    is the sample index labelled with the sample time.

    - `PlotStyle::Full`: 1800x1200 colour PNG.
    - `PlotStyle::Compact`: small grayscale JPEG with decimated series, for
      embedding in reports.
*/

use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::samples::Sample;
use crate::stats::{NOTICE_THRESHOLD, WARNING_THRESHOLD};

const FIGURE_TITLE: &str = "GitHub Runner Resource Usage";

/// Upper bound on plotted points per series in compact output.
pub const COMPACT_MAX_POINTS: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotStyle {
    Full,
    Compact,
}

struct Palette {
    cpu: RGBColor,
    mem: RGBColor,
    notice: RGBColor,
    warning: RGBColor,
}

impl PlotStyle {
    /// Suffix that replaces the input file's extension.
    pub fn suffix(&self) -> &'static str {
        match self {
            PlotStyle::Full => ".png",
            PlotStyle::Compact => "-compact.jpg",
        }
    }

    fn extensions(&self) -> &'static [&'static str] {
        match self {
            PlotStyle::Full => &["png"],
            PlotStyle::Compact => &["jpg", "jpeg"],
        }
    }

    /// Reject an output path whose extension does not match the image format.
    pub fn check_path(&self, path: &Path) -> Result<()> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        if self.extensions().contains(&ext.as_str()) {
            return Ok(());
        }
        Err(Error::InvalidConfig(format!(
            "{} output must end in .{}, got {}",
            match self {
                PlotStyle::Full => "png",
                PlotStyle::Compact => "compact",
            },
            self.extensions().join(" or ."),
            path.display()
        )))
    }

    fn size(&self) -> (u32, u32) {
        match self {
            PlotStyle::Full => (1800, 1200),
            PlotStyle::Compact => (640, 420),
        }
    }

    fn max_points(&self) -> Option<usize> {
        match self {
            PlotStyle::Full => None,
            PlotStyle::Compact => Some(COMPACT_MAX_POINTS),
        }
    }

    fn title_size(&self) -> i32 {
        match self {
            PlotStyle::Full => 40,
            PlotStyle::Compact => 18,
        }
    }

    fn label_size(&self) -> i32 {
        match self {
            PlotStyle::Full => 22,
            PlotStyle::Compact => 11,
        }
    }

    fn palette(&self) -> Palette {
        match self {
            PlotStyle::Full => Palette {
                cpu: RGBColor(0x2E, 0x86, 0xAB),
                mem: RGBColor(0xA2, 0x3B, 0x72),
                notice: RGBColor(0xFF, 0xA5, 0x00),
                warning: RGBColor(0xFF, 0x00, 0x00),
            },
            PlotStyle::Compact => Palette {
                cpu: RGBColor(0x30, 0x30, 0x30),
                mem: RGBColor(0x50, 0x50, 0x50),
                notice: RGBColor(0x90, 0x90, 0x90),
                warning: RGBColor(0x60, 0x60, 0x60),
            },
        }
    }
}

fn plot_err(e: impl std::fmt::Display) -> Error {
    Error::Plot(e.to_string())
}

/// Keep every n-th sample so at most `max_points` remain.
pub fn decimate(samples: &[Sample], max_points: Option<usize>) -> Vec<&Sample> {
    let stride = match max_points {
        Some(max) if max > 0 && samples.len() > max => samples.len().div_ceil(max),
        _ => 1,
    };
    samples.iter().step_by(stride).collect()
}

/// Render both panels and write the image to `path`.
///
/// On any failure the output file is removed again.
pub fn render_image(samples: &[Sample], path: &Path, style: PlotStyle) -> Result<()> {
    style.check_path(path)?;
    let points = decimate(samples, style.max_points());
    if points.is_empty() {
        return Err(Error::Plot("no samples to plot".into()));
    }
    debug!(
        "plotting {} of {} samples to {} ({:?})",
        points.len(),
        samples.len(),
        path.display(),
        style
    );
    check_parent_dir(path)?;

    let result = draw_figure(&points, path, style);
    if result.is_err() && path.exists() {
        let _ = fs::remove_file(path);
    }
    result
}

// Missing or non-directory parents fail before anything is drawn.
fn check_parent_dir(path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Ok(()),
    };
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let meta = fs::metadata(parent).map_err(write_err)?;
    if !meta.is_dir() {
        return Err(write_err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a directory", parent.display()),
        )));
    }
    if meta.permissions().readonly() {
        return Err(write_err(io::Error::from(io::ErrorKind::PermissionDenied)));
    }
    Ok(())
}

fn draw_figure(points: &[&Sample], path: &Path, style: PlotStyle) -> Result<()> {
    let labels: Vec<String> = points
        .iter()
        .map(|s| s.timestamp.format("%H:%M:%S").to_string())
        .collect();
    let cpu: Vec<f64> = points.iter().map(|s| s.cpu_percent).collect();
    let mem: Vec<f64> = points.iter().map(|s| s.mem_percent).collect();
    let palette = style.palette();

    let root = BitMapBackend::new(path, style.size()).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let root = root
        .titled(FIGURE_TITLE, ("sans-serif", style.title_size()))
        .map_err(plot_err)?;

    let panels = root.split_evenly((2, 1));
    draw_panel(&panels[0], &labels, &cpu, "CPU Usage (%)", None, palette.cpu, &palette, style)?;
    draw_panel(
        &panels[1],
        &labels,
        &mem,
        "Memory Usage (%)",
        Some("Time (UTC)"),
        palette.mem,
        &palette,
        style,
    )?;

    root.present().map_err(plot_err)?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    labels: &[String],
    values: &[f64],
    ylabel: &str,
    xlabel: Option<&str>,
    color: RGBColor,
    palette: &Palette,
    style: PlotStyle,
) -> Result<()> {
    let x_max = values.len().max(2) - 1;
    let label_size = style.label_size();

    let mut chart = ChartBuilder::on(area)
        .margin(12)
        .x_label_area_size(label_size * 3)
        .y_label_area_size(label_size * 3)
        .build_cartesian_2d(0..x_max, 0.0..100.0)
        .map_err(plot_err)?;

    let fmt_time = |idx: &usize| labels.get(*idx).cloned().unwrap_or_default();
    let mut mesh = chart.configure_mesh();
    mesh.x_labels(8)
        .x_label_formatter(&fmt_time)
        .y_desc(ylabel)
        .label_style(("sans-serif", label_size));
    if let Some(desc) = xlabel {
        mesh.x_desc(desc);
    }
    mesh.draw().map_err(plot_err)?;

    chart
        .draw_series(
            AreaSeries::new(values.iter().enumerate().map(|(i, v)| (i, *v)), 0.0, &color.mix(0.3))
                .border_style(color.stroke_width(2)),
        )
        .map_err(plot_err)?;
    if values.len() == 1 {
        chart
            .draw_series(std::iter::once(Circle::new((0, values[0]), 4, color.filled())))
            .map_err(plot_err)?;
    }

    for (level, line_color) in [(NOTICE_THRESHOLD, palette.notice), (WARNING_THRESHOLD, palette.warning)] {
        chart
            .draw_series(LineSeries::new(
                vec![(0, level), (x_max, level)],
                line_color.mix(0.5).stroke_width(2),
            ))
            .map_err(plot_err)?
            .label(format!("{:.0}% threshold", level))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", label_size))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;
    Ok(())
}
