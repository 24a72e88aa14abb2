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
    # samples.rs

    Sample reader for runner metrics CSV files.

    - Expects a header row with at least `timestamp`, `cpu_percent` and `mem_percent`.
      Columns are matched by name, extra columns are ignored.
    - Timestamps use the fixed `YYYY-MM-DD HH:MM:SS` format.
    - Malformed rows are skipped with a warning; reading carries on.
    - File order is kept as-is, rows are never re-sorted.
*/

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use chrono::NaiveDateTime;
use log::{debug, warn};
use serde::Deserialize;

use crate::error::{Error, Result};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One parsed CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub cpu_percent: f64,
    pub mem_percent: f64,
}

/// Parsed samples plus the number of rows that were dropped.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    pub samples: Vec<Sample>,
    pub skipped: usize,
}

impl SampleSet {
    pub fn cpu(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.cpu_percent).collect()
    }

    pub fn mem(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.mem_percent).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// A missing column is a per-row skip, not a file error.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    cpu_percent: Option<String>,
    #[serde(default)]
    mem_percent: Option<String>,
}

impl CsvRow {
    fn into_sample(self) -> std::result::Result<Sample, String> {
        let ts = self.timestamp.ok_or("missing field 'timestamp'")?;
        let timestamp = NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT)
            .map_err(|e| format!("bad timestamp '{}': {}", ts, e))?;
        let cpu_percent = parse_percent("cpu_percent", self.cpu_percent)?;
        let mem_percent = parse_percent("mem_percent", self.mem_percent)?;
        Ok(Sample { timestamp, cpu_percent, mem_percent })
    }
}

fn parse_percent(name: &str, field: Option<String>) -> std::result::Result<f64, String> {
    let raw = field.ok_or_else(|| format!("missing field '{}'", name))?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| format!("could not convert {} '{}' to float", name, raw))
}

/// Read all samples from a CSV file on disk.
///
/// Returns [`Error::NoValidData`] when no row survives parsing.
pub fn read_samples(path: &Path) -> Result<SampleSet> {
    let file = File::open(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("reading samples from {}", path.display());

    let set = read_samples_from(BufReader::new(file)).map_err(|e| match e {
        Error::Csv(err) if err.is_io_error() => Error::Read {
            path: path.to_path_buf(),
            source: io::Error::other(err),
        },
        other => other,
    })?;

    if set.is_empty() {
        return Err(Error::NoValidData(path.to_path_buf()));
    }
    debug!("{} samples read, {} rows skipped", set.len(), set.skipped);
    Ok(set)
}

/// Read samples from any CSV source. The result may be empty.
///
/// Only I/O failures are returned as errors; every other problem with a row
/// is logged and the row is skipped.
pub fn read_samples_from<R: io::Read>(input: R) -> Result<SampleSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = match rdr.headers() {
        Ok(h) => h.clone(),
        Err(e) if e.is_io_error() => return Err(Error::Csv(e)),
        Err(e) => {
            warn!("Skipping unreadable header row: {}", e);
            return Ok(SampleSet::default());
        }
    };

    let mut set = SampleSet::default();
    for record in rdr.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) if e.is_io_error() => return Err(Error::Csv(e)),
            Err(e) => {
                warn!("Skipping invalid row: {}", e);
                set.skipped += 1;
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let parsed = record
            .deserialize::<CsvRow>(Some(&headers))
            .map_err(|e| e.to_string())
            .and_then(CsvRow::into_sample);
        match parsed {
            Ok(sample) => set.samples.push(sample),
            Err(reason) => {
                warn!("Skipping invalid row at line {}: {}", line, reason);
                set.skipped += 1;
            }
        }
    }
    Ok(set)
}
