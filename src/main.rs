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
    # main.rs

    Entry point for runnerstats_plot:
    - Parses the command line (one CSV path plus optional flags)
    - ASCII mode prints the report and saves it as `<stem>-ascii.txt`
    - PNG / compact modes save an image and print a short summary
    - Failures print one line to stderr and exit with a status per cause
*/

use std::process;

use clap::Parser;
use env_logger::Env;
use log::debug;

use runnerstats_plot::cli::Cli;
use runnerstats_plot::commands;
use runnerstats_plot::report;
use runnerstats_plot::Result;

fn run(cli: &Cli) -> Result<()> {
    let output = cli.output_path();
    debug!("input {} -> output {}", cli.csv_file.display(), output.display());

    match cli.plot_style() {
        None => {
            let run = commands::run_ascii(&cli.csv_file, &output, &cli.report_options())?;
            println!("{}", run.report);
            if run.skipped > 0 {
                eprintln!("Skipped {} invalid rows", run.skipped);
            }
            eprintln!("\nASCII chart saved to: {}", run.output.display());
        }
        Some(style) => {
            let run = commands::run_image(&cli.csv_file, &output, style)?;
            println!("Chart saved to: {}", run.output.display());
            println!("{}", report::image_summary(&run.summary, run.skipped));
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}
