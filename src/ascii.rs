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
    # ascii.rs

    Text-mode chart rasterizer.

    Each value is scaled against `max_val` into an integer level between 0 and
    `height`. Rows are drawn top-down from `height` to 0: a column is a full
    block where its level reaches the row, a half block on the row just above
    its level, blank elsewhere. Only the first `width` values are drawn.
*/

use std::fmt;

use crate::error::{Error, Result};

pub const FULL_GLYPH: char = '█';
pub const HALF_GLYPH: char = '▄';
pub const BLANK_GLYPH: char = ' ';

pub const MAX_HEIGHT: usize = 1000;
pub const MAX_WIDTH: usize = 10_000;

/// Chart geometry. Defaults match the runner report: 10 rows, 50 columns, 0-100%.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    pub height: usize,
    pub width: usize,
    pub max_val: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig { height: 10, width: 50, max_val: 100.0 }
    }
}

impl ChartConfig {
    pub fn validate(&self) -> Result<()> {
        if self.height == 0 {
            return Err(Error::InvalidConfig("height must be greater than 0".into()));
        }
        if self.height > MAX_HEIGHT {
            return Err(Error::InvalidConfig(format!("height must be at most {}", MAX_HEIGHT)));
        }
        if self.width == 0 {
            return Err(Error::InvalidConfig("width must be greater than 0".into()));
        }
        if self.width > MAX_WIDTH {
            return Err(Error::InvalidConfig(format!("width must be at most {}", MAX_WIDTH)));
        }
        if !(self.max_val.is_finite() && self.max_val > 0.0) {
            return Err(Error::InvalidConfig("max_val must be greater than 0".into()));
        }
        Ok(())
    }

    /// Integer row level of one value. Negative (and NaN) values count as 0;
    /// values above `max_val` give levels above `height`.
    pub fn level(&self, value: f64) -> i64 {
        let v = value.max(0.0);
        (v / self.max_val * self.height as f64) as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Full,
    Half,
    Blank,
}

impl Cell {
    pub fn glyph(self) -> char {
        match self {
            Cell::Full => FULL_GLYPH,
            Cell::Half => HALF_GLYPH,
            Cell::Blank => BLANK_GLYPH,
        }
    }
}

/// One labelled chart row.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub y: usize,
    pub percent: f64,
    pub cells: Vec<Cell>,
}

impl GridRow {
    pub fn label(&self) -> String {
        format!("{:5.1}% │", self.percent)
    }
}

impl fmt::Display for GridRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())?;
        for cell in &self.cells {
            write!(f, "{}", cell.glyph())?;
        }
        Ok(())
    }
}

/// `height + 1` rows, top row first, plus the column count for the axis rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGrid {
    pub rows: Vec<GridRow>,
    pub columns: usize,
}

impl ChartGrid {
    pub fn axis(&self) -> String {
        format!("       └{}", "─".repeat(self.columns))
    }
}

impl fmt::Display for ChartGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        f.write_str(&self.axis())
    }
}

/// Rasterize `values` into a grid. Values past `config.width` are dropped.
pub fn rasterize(values: &[f64], config: &ChartConfig) -> Result<ChartGrid> {
    config.validate()?;

    let columns = values.len().min(config.width);
    let levels: Vec<i64> = values[..columns].iter().map(|&v| config.level(v)).collect();

    let rows = (0..=config.height)
        .rev()
        .map(|y| {
            let yi = y as i64;
            let cells = levels
                .iter()
                .map(|&level| {
                    if level >= yi {
                        Cell::Full
                    } else if level == yi - 1 {
                        Cell::Half
                    } else {
                        Cell::Blank
                    }
                })
                .collect();
            GridRow {
                y,
                percent: y as f64 / config.height as f64 * config.max_val,
                cells,
            }
        })
        .collect();

    Ok(ChartGrid { rows, columns })
}

/// Render a chart as text, with an optional title and rule above it.
///
/// An empty series renders as `No data`.
pub fn render_chart(values: &[f64], config: &ChartConfig, title: &str) -> Result<String> {
    if values.is_empty() {
        return Ok("No data".to_string());
    }
    let grid = rasterize(values, config)?;

    let mut out = String::new();
    if !title.is_empty() {
        out.push_str(title);
        out.push('\n');
        out.push_str(&"─".repeat(config.width));
        out.push('\n');
    }
    out.push_str(&grid.to_string());
    Ok(out)
}
