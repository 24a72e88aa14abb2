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

use std::fs;
use std::path::{Path, PathBuf};

use runnerstats_plot::{
    Error,
    ascii::{self, ChartConfig},
    commands,
    plot::PlotStyle,
    report::ReportOptions,
    samples::read_samples,
    sibling_path,
    sparkline::sparkline,
    stats::{Summary, ThresholdTier},
};

const HEADER: &str = "timestamp,cpu_percent,mem_percent\n";

fn write_csv(dir: &Path, name: &str, rows: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("{}{}", HEADER, rows)).expect("write csv");
    path
}

#[test]
fn single_row_reports_zero_duration_and_peaks() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "one.csv", "2024-01-01 00:00:00,50.0,60.0\n");

    let set = read_samples(&input).unwrap();
    let summary = Summary::from_samples(&set.samples);
    assert_eq!(summary.duration_minutes(), 0.0);
    assert_eq!(summary.peak_cpu, 50.0);
    assert_eq!(summary.peak_mem, 60.0);

    let output = sibling_path(&input, "-ascii.txt");
    let run = commands::run_ascii(&input, &output, &ReportOptions::default()).unwrap();
    assert!(run.report.contains("Test Duration: 0.0 minutes (1 data points)"));
    assert!(run.report.contains("✅ Resource usage within normal limits"));
    assert!(output.ends_with("one-ascii.txt"));
    assert_eq!(fs::read_to_string(output).unwrap(), run.report);
}

#[test]
fn malformed_row_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "mixed.csv",
        "2024-01-01 00:00:00,10.0,20.0\n\
         2024-01-01 00:00:30,not-a-number,20.0\n\
         2024-01-01 00:01:00,97.0,30.0\n",
    );

    let set = read_samples(&input).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.skipped, 1);

    let output = dir.path().join("mixed-ascii.txt");
    let run = commands::run_ascii(&input, &output, &ReportOptions::default()).unwrap();
    assert_eq!(run.skipped, 1);
    assert!(run.report.contains("(2 data points)"));
    assert!(run.report.contains("Test Duration: 1.0 minutes"));
    assert!(run.report.contains("⚠️  WARNING: Resource usage exceeded 95% threshold!"));
    assert!(run.report.contains("CPU Peak: 97.0%  |  Memory Peak: 30.0%"));
}

#[test]
fn missing_file_maps_to_not_found_status() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_samples(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn no_valid_rows_is_fatal_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "bad.csv", "yesterday,1,2\n2024-01-01 00:00:00,x,y\n");
    let output = dir.path().join("bad-ascii.txt");

    let err = commands::run_ascii(&input, &output, &ReportOptions::default()).unwrap_err();
    assert!(matches!(err, Error::NoValidData(_)));
    assert_eq!(err.exit_code(), 5);
    assert!(!output.exists());
}

#[test]
fn header_only_file_has_no_valid_data() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "empty.csv", "");
    assert!(matches!(read_samples(&input), Err(Error::NoValidData(_))));
}

#[test]
fn invalid_geometry_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "m.csv", "2024-01-01 00:00:00,1,2\n");
    let output = dir.path().join("m-ascii.txt");
    let opts = ReportOptions {
        chart: ChartConfig { width: 0, ..ChartConfig::default() },
        sparkline: false,
    };
    let err = commands::run_ascii(&input, &output, &opts).unwrap_err();
    assert_eq!(err.exit_code(), 6);
    assert!(!output.exists());
}

#[test]
fn chart_shape_matches_geometry() {
    let values: Vec<f64> = (0..75).map(|i| (i * 3 % 100) as f64).collect();
    for height in [1usize, 4, 10, 15] {
        let cfg = ChartConfig { height, width: 60, max_val: 100.0 };
        let text = ascii::render_chart(&values, &cfg, "").unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), height + 2);
        for row in &lines[..=height] {
            let glyphs = row.split_once('│').unwrap().1;
            assert_eq!(glyphs.chars().count(), 60);
        }
    }
}

#[test]
fn tiers_regardless_of_other_metric() {
    assert_eq!(ThresholdTier::classify(96.0, 0.0), ThresholdTier::Warning);
    assert_eq!(ThresholdTier::classify(85.0, 50.0), ThresholdTier::Notice);
    assert_eq!(ThresholdTier::classify(50.0, 50.0), ThresholdTier::Normal);
}

#[test]
fn sparkline_of_increasing_series() {
    let values: Vec<f64> = (0..20).map(|i| i as f64 * 2.5).collect();
    let line: Vec<char> = sparkline(&values, 60).chars().collect();
    assert_eq!(line.first(), Some(&'▁'));
    assert_eq!(line.last(), Some(&'█'));
}

#[test]
fn sparkline_flag_adds_lines_to_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "s.csv",
        "2024-01-01 00:00:00,10,90\n2024-01-01 00:00:05,20,80\n2024-01-01 00:00:10,30,70\n",
    );
    let opts = ReportOptions { sparkline: true, ..ReportOptions::default() };
    let run = commands::run_ascii(&input, &dir.path().join("s.txt"), &opts).unwrap();
    assert!(run.report.contains("CPU ▁▅█"));
    assert!(run.report.contains("MEM █▅▁"));
}

#[test]
fn image_run_with_wrong_extension_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "m.csv", "2024-01-01 00:00:00,1,2\n2024-01-01 00:00:05,3,4\n");
    let out = dir.path().join("out.txt");

    let err = commands::run_image(&input, &out, PlotStyle::Full).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
    assert!(!out.exists());
}

#[test]
fn image_run_reports_summary_and_skips() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "img.csv",
        "2024-01-01 00:00:00,40,50\n2024-01-01 00:00:10,oops,50\n2024-01-01 00:02:00,90,60\n",
    );
    let out = sibling_path(&input, PlotStyle::Full.suffix());

    let run = commands::run_image(&input, &out, PlotStyle::Full).unwrap();
    assert!(out.exists());
    assert_eq!(run.skipped, 1);
    assert_eq!(run.summary.peak_cpu, 90.0);
    assert_eq!(run.summary.duration_minutes(), 2.0);
}
