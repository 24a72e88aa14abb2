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

//! Summary statistics and threshold tiers for a run.

use crate::samples::Sample;

pub const NOTICE_THRESHOLD: f64 = 80.0;
pub const WARNING_THRESHOLD: f64 = 95.0;

/// Peak, mean and elapsed time of one set of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub samples: usize,
    pub peak_cpu: f64,
    pub peak_mem: f64,
    pub avg_cpu: f64,
    pub avg_mem: f64,
    pub duration_secs: f64,
}

/// Severity band derived from the CPU and memory peaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdTier {
    Normal,
    Notice,
    Warning,
}

impl ThresholdTier {
    /// Either peak strictly above 95 is a warning, above 80 a notice.
    pub fn classify(peak_cpu: f64, peak_mem: f64) -> Self {
        if peak_cpu > WARNING_THRESHOLD || peak_mem > WARNING_THRESHOLD {
            ThresholdTier::Warning
        } else if peak_cpu > NOTICE_THRESHOLD || peak_mem > NOTICE_THRESHOLD {
            ThresholdTier::Notice
        } else {
            ThresholdTier::Normal
        }
    }

    pub fn banner(&self) -> &'static str {
        match self {
            ThresholdTier::Warning => "⚠️  WARNING: Resource usage exceeded 95% threshold!",
            ThresholdTier::Notice => "⚡ NOTICE: Resource usage exceeded 80% threshold",
            ThresholdTier::Normal => "✅ Resource usage within normal limits",
        }
    }
}

impl Summary {
    pub fn from_samples(samples: &[Sample]) -> Self {
        let cpu: Vec<f64> = samples.iter().map(|s| s.cpu_percent).collect();
        let mem: Vec<f64> = samples.iter().map(|s| s.mem_percent).collect();
        let duration_secs = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) if samples.len() > 1 => {
                (last.timestamp - first.timestamp).num_milliseconds() as f64 / 1000.0
            }
            _ => 0.0,
        };
        Summary {
            samples: samples.len(),
            peak_cpu: peak(&cpu),
            peak_mem: peak(&mem),
            avg_cpu: mean(&cpu),
            avg_mem: mean(&mem),
            duration_secs,
        }
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_secs / 60.0
    }

    pub fn tier(&self) -> ThresholdTier {
        ThresholdTier::classify(self.peak_cpu, self.peak_mem)
    }

    /// Both peaks, printed under the banner whatever the tier.
    pub fn peak_line(&self) -> String {
        format!(
            "    CPU Peak: {:.1}%  |  Memory Peak: {:.1}%",
            self.peak_cpu, self.peak_mem
        )
    }
}

/// Largest value, 0.0 for an empty series.
pub fn peak(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
}

/// Arithmetic mean, 0.0 for an empty series.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
