// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/names.rs - Decoder for the Timechart timetable label (`.NAM`) file.
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

use log::debug;

use crate::error::{Error, Result};
use crate::reader::decode_ascii;

/// Year, slot and day labels, indexed the same way as the timetable matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameIndex {
    pub years: Vec<String>,
    pub slots: Vec<String>,
    pub days: Vec<String>,
}

impl NameIndex {
    /// Reads `years`, then `slots`, then `days` lines.
    pub fn decode(data: &[u8], years: usize, slots: usize, days: usize) -> Result<Self> {
        let mut lines = Lines { data, pos: 0 };

        let years = lines.take("year", years)?;
        let slots = lines.take("slot", slots)?;
        let days = lines.take("day", days)?;

        debug!(
            "Name index: {} years, {} slots, {} days",
            years.len(),
            slots.len(),
            days.len()
        );

        Ok(Self { years, slots, days })
    }
}

struct Lines<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Lines<'_> {
    fn next_line(&mut self) -> Option<String> {
        if self.pos >= self.data.len() {
            return None;
        }
        let rest = &self.data[self.pos..];
        let (line, consumed) = match rest.iter().position(|&b| b == b'\n') {
            Some(i) => (&rest[..i], i + 1),
            None => (rest, rest.len()),
        };
        self.pos += consumed;
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        Some(decode_ascii(line))
    }

    fn take(&mut self, kind: &str, count: usize) -> Result<Vec<String>> {
        (0..count)
            .map(|i| {
                self.next_line().ok_or_else(|| {
                    Error::InvalidFormat(format!(
                        "ran out of lines reading {kind} label {} of {count}",
                        i + 1
                    ))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_labels() {
        let data = b"Year 7\r\nYear 8\r\nP1\r\n\r\nMonday\r\nTuesday";
        let names = NameIndex::decode(data, 2, 2, 2).unwrap();
        assert_eq!(names.years, vec!["Year 7", "Year 8"]);
        assert_eq!(names.slots, vec!["P1", ""]);
        assert_eq!(names.days, vec!["Monday", "Tuesday"]);
    }

    #[test]
    fn test_non_ascii_label() {
        let names = NameIndex::decode(b"Ann\xe9e 7\nP1\nLundi\n", 1, 1, 1).unwrap();
        assert_eq!(names.years, vec!["Ann?e 7"]);
    }

    #[test]
    fn test_short_file() {
        let data = b"Year 7\nP1\n";
        assert!(matches!(
            NameIndex::decode(data, 1, 1, 1),
            Err(Error::InvalidFormat(_))
        ));
    }
}
