// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/error.rs - Error types for the Timechart decoder library.
 *  Copyright (C) 2026  Forest Crossman <cyrozap@gmail.com>
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::path::PathBuf;

use thiserror::Error;

/// The error type for every decoding and model-building operation.
#[derive(Debug, Error)]
pub enum Error {
    /// A data file could not be opened or read.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A read needed more bytes than the buffer had left.
    #[error("unexpected end of data at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// A structural assumption about the file did not hold.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// A non-zero 1-based reference pointed past the end of its table.
    #[error("{table} reference {index} is out of range (table has {len} entries)")]
    ReferenceOutOfRange {
        table: &'static str,
        index: usize,
        len: usize,
    },

    /// Any of the above, tagged with the file and stage where it happened.
    #[error("failed to decode {file} ({stage}): {source}")]
    File {
        file: String,
        stage: &'static str,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps this error with the name of the file and the decoding stage.
    pub fn in_file(self, file: &str, stage: &'static str) -> Self {
        Self::File {
            file: file.to_string(),
            stage,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping any file context.
    pub fn root(&self) -> &Self {
        match self {
            Self::File { source, .. } => source.root(),
            other => other,
        }
    }
}

/// A convenience `Result` alias using the crate's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
