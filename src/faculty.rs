// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/faculty.rs - Decoder for the Timechart faculty list.
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

/*!
 * # `faculty` Module
 *
 * `FACULTY.DAT` is a 16-bit count followed by plain text lines. A line made
 * only of digits belongs to the faculty named by the closest preceding
 * non-numeric line:
 *
 * ```text
 * Mathematics
 * 3
 * 12
 * Science
 * 4
 * ```
 */

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::reader::{ByteReader, decode_ascii};

/// A faculty name and the numbers listed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyEntry {
    pub name: String,
    pub values: Vec<u32>,
}

/// The decoded `FACULTY.DAT` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyList {
    /// The count stored in the file. Not guaranteed to match `entries`.
    pub declared_count: u16,
    pub entries: Vec<FacultyEntry>,
}

impl FacultyList {
    pub fn decode(reader: &mut ByteReader) -> Result<Self> {
        let declared_count = reader.read_u16()?;
        let body: Vec<u8> = reader
            .read_rest()
            .iter()
            .copied()
            .filter(|&b| b != b'\r')
            .collect();

        let mut lines = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .terminator(csv::Terminator::Any(b'\n'))
            .quoting(false)
            .flexible(true)
            .has_headers(false)
            .from_reader(body.as_slice());

        let mut entries: Vec<FacultyEntry> = Vec::new();
        for result in lines.byte_records() {
            let record = result.map_err(|e| Error::InvalidFormat(e.to_string()))?;
            let line = record
                .iter()
                .map(decode_ascii)
                .collect::<Vec<_>>()
                .join("\t");

            if line.is_empty() {
                continue;
            }

            if line.bytes().all(|b| b.is_ascii_digit()) {
                let value = line.parse::<u32>().map_err(|e| {
                    Error::InvalidFormat(format!("faculty value {line:?}: {e}"))
                })?;
                match entries.last_mut() {
                    Some(entry) => entry.values.push(value),
                    None => {
                        return Err(Error::InvalidFormat(format!(
                            "faculty value {value} appears before any faculty name"
                        )));
                    }
                }
            } else {
                entries.push(FacultyEntry {
                    name: line,
                    values: Vec::new(),
                });
            }
        }

        if usize::from(declared_count) != entries.len() {
            warn!(
                "Faculty file declares {declared_count} entries but contains {}",
                entries.len()
            );
        }
        debug!("Faculty list: {} entries", entries.len());

        Ok(Self {
            declared_count,
            entries,
        })
    }
}
