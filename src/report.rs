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
    # report.rs

    Builds the text report printed in ASCII mode and the short summary
    printed after an image is rendered.
*/

use crate::ascii::{self, ChartConfig};
use crate::error::Result;
use crate::samples::SampleSet;
use crate::sparkline::{self, SPARK_WIDTH};
use crate::stats::Summary;

const REPORT_TITLE: &str = "GitHub Runner Resource Usage";
const BANNER_WIDTH: usize = 63;

/// Options for the text report.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReportOptions {
    pub chart: ChartConfig,
    pub sparkline: bool,
}

fn banner() -> [String; 3] {
    let title = format!("          {}", REPORT_TITLE);
    [
        format!("╔{}╗", "═".repeat(BANNER_WIDTH)),
        format!("║{:<width$}║", title, width = BANNER_WIDTH),
        format!("╚{}╝", "═".repeat(BANNER_WIDTH)),
    ]
}

/// Full ASCII report: banner, duration, optional sparklines, both charts and
/// the threshold tier.
pub fn text_report(set: &SampleSet, opts: &ReportOptions) -> Result<String> {
    // bad geometry yields no output at all
    opts.chart.validate()?;

    let summary = Summary::from_samples(&set.samples);
    let cpu = set.cpu();
    let mem = set.mem();

    let mut out: Vec<String> = Vec::new();
    out.push(String::new());
    out.extend(banner());
    out.push(String::new());
    out.push(format!(
        "⏱️  Test Duration: {:.1} minutes ({} data points)",
        summary.duration_minutes(),
        summary.samples
    ));
    out.push(format!(
        "📊 Average CPU: {:.1}%  |  Average Memory: {:.1}%",
        summary.avg_cpu, summary.avg_mem
    ));
    out.push(String::new());

    if opts.sparkline {
        out.push(format!("CPU {}", sparkline::sparkline(&cpu, SPARK_WIDTH)));
        out.push(format!("MEM {}", sparkline::sparkline(&mem, SPARK_WIDTH)));
        out.push(String::new());
    }

    out.push("📉 CPU Usage".to_string());
    out.push(ascii::render_chart(&cpu, &opts.chart, "")?);
    out.push(String::new());

    out.push("📉 Memory Usage".to_string());
    out.push(ascii::render_chart(&mem, &opts.chart, "")?);
    out.push(String::new());

    out.push(summary.tier().banner().to_string());
    out.push(summary.peak_line());
    out.push(String::new());

    Ok(out.join("\n"))
}

/// Summary printed after an image has been written. Skipped rows are only
/// mentioned when there were any.
pub fn image_summary(summary: &Summary, skipped: usize) -> String {
    let mut text = format!(
        "\n=== Resource Usage Summary ===\n\
         Peak CPU: {:.1}%\n\
         Peak Memory: {:.1}%\n\
         Average CPU: {:.1}%\n\
         Average Memory: {:.1}%\n\
         Duration: {:.1} minutes",
        summary.peak_cpu,
        summary.peak_mem,
        summary.avg_cpu,
        summary.avg_mem,
        summary.duration_minutes()
    );
    if skipped > 0 {
        text.push_str(&format!("\nSkipped rows: {}", skipped));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::read_samples_from;

    fn set(rows: &str) -> SampleSet {
        let text = format!("timestamp,cpu_percent,mem_percent\n{}", rows);
        read_samples_from(text.as_bytes()).unwrap()
    }

    #[test]
    fn banner_lines_line_up() {
        let lines = banner();
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert_eq!(widths, vec![BANNER_WIDTH + 2; 3]);
        assert!(lines[1].contains(REPORT_TITLE));
    }

    #[test]
    fn report_has_duration_charts_and_tier() {
        let report = text_report(
            &set("2024-01-01 00:00:00,10.0,20.0\n2024-01-01 00:03:00,85.0,40.0\n"),
            &ReportOptions::default(),
        )
        .unwrap();
        assert!(report.contains("⏱️  Test Duration: 3.0 minutes (2 data points)"));
        assert!(report.contains("📊 Average CPU: 47.5%  |  Average Memory: 30.0%"));
        assert!(report.contains("📉 CPU Usage"));
        assert!(report.contains("📉 Memory Usage"));
        assert!(report.contains("⚡ NOTICE: Resource usage exceeded 80% threshold"));
        assert!(report.contains("    CPU Peak: 85.0%  |  Memory Peak: 40.0%"));
        assert_eq!(report.matches("       └──").count(), 2);
        assert!(!report.contains("CPU ▁"));
    }

    #[test]
    fn sparkline_block_is_optional() {
        let opts = ReportOptions { sparkline: true, ..ReportOptions::default() };
        let report = text_report(
            &set("2024-01-01 00:00:00,10.0,20.0\n2024-01-01 00:00:10,20.0,10.0\n"),
            &opts,
        )
        .unwrap();
        assert!(report.contains("CPU ▁█"));
        assert!(report.contains("MEM █▁"));
    }

    #[test]
    fn bad_geometry_fails_before_output() {
        let opts = ReportOptions {
            chart: ChartConfig { height: 0, ..ChartConfig::default() },
            sparkline: false,
        };
        assert!(text_report(&set("2024-01-01 00:00:00,1.0,1.0\n"), &opts).is_err());
    }

    #[test]
    fn image_summary_lists_peaks_and_duration() {
        let s = set("2024-01-01 00:00:00,50.0,60.0\n");
        let text = image_summary(&Summary::from_samples(&s.samples), 0);
        assert!(text.contains("Peak CPU: 50.0%"));
        assert!(text.contains("Peak Memory: 60.0%"));
        assert!(text.contains("Duration: 0.0 minutes"));
        assert!(!text.contains("Skipped"));

        let text = image_summary(&Summary::from_samples(&s.samples), 2);
        assert!(text.ends_with("Skipped rows: 2"));
    }
}
