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

//! Single-line sparklines scaled to the series' own min/max.

pub const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Default sparkline width in the text report.
pub const SPARK_WIDTH: usize = 60;

/// One glyph per value for the first `width` values.
pub fn sparkline(values: &[f64], width: usize) -> String {
    let shown = &values[..values.len().min(width)];
    if shown.is_empty() {
        return String::new();
    }

    let min = shown.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = shown.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = if max - min > 0.0 { max - min } else { 1.0 };

    shown
        .iter()
        .map(|&v| {
            let normalized = ((v - min) / range).max(0.0);
            let idx = ((normalized * 8.0) as usize).min(SPARK_GLYPHS.len() - 1);
            SPARK_GLYPHS[idx]
        })
        .collect()
}
