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

//! Error type shared by the reader, the renderers and the CLI.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no valid data found in CSV file: {}", .0.display())]
    NoValidData(PathBuf),

    #[error("invalid chart configuration: {0}")]
    InvalidConfig(String),

    #[error("plot error: {0}")]
    Plot(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Process exit status for this failure. Status 2 is left to clap usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Read { source, .. } | Error::Write { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => 3,
                io::ErrorKind::PermissionDenied => 4,
                _ => 1,
            },
            Error::NoValidData(_) => 5,
            Error::InvalidConfig(_) => 6,
            Error::Csv(_) | Error::Plot(_) => 1,
        }
    }
}
