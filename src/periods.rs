// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/periods.rs - Decoder for the Timechart period grid (`.CLS`) file.
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
 * # `periods` Module
 *
 * The period grid has no dimensions of its own, so the day and slot counts
 * come from the timetable matrix header. The file starts with an unknown
 * number of all-zero rows, each `days` 16-bit values wide. The first row with
 * a non-zero value is kept as the header row and is followed by twelve more
 * 16-bit header values, then `days * slots` period entries in day-major
 * order.
 */

use chrono::TimeDelta;
use log::{debug, trace};
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::reader::ByteReader;

const HEADER_VALUES: usize = 12;
const MILLISECONDS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// One (day, slot) cell of the period grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodEntry {
    pub name: String,
    /// Slot number marker byte.
    pub number: u8,
    pub unknown: f64,
    pub start: TimeDelta,
    pub end: TimeDelta,
}

/// The decoded `.CLS` file.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodGrid {
    /// The leading all-zero rows, flattened.
    pub padding: Vec<u16>,
    /// The first row that was not all zero.
    pub header_row: Vec<u16>,
    pub header: Vec<u16>,
    /// `entries[day][slot]`.
    pub entries: Vec<Vec<PeriodEntry>>,
}

impl PeriodGrid {
    pub fn decode(reader: &mut ByteReader, days: usize, slots: usize) -> Result<Self> {
        if days == 0 {
            return Err(Error::InvalidFormat(
                "period grid rows are empty when there are no days".to_string(),
            ));
        }

        let mut padding = Vec::new();
        let header_row = loop {
            let row = reader.read_u16_vec(days).map_err(|e| match e {
                Error::Truncated { offset, .. } => Error::InvalidFormat(format!(
                    "no non-zero row found before end of data at offset {offset}"
                )),
                other => other,
            })?;
            if row.iter().any(|&v| v != 0) {
                break row;
            }
            padding.extend(row);
        };
        trace!(
            "Period grid: skipped {} padding rows, header row {:?}",
            padding.len() / days,
            header_row
        );

        let header = reader.read_u16_vec(HEADER_VALUES)?;

        let mut entries = Vec::with_capacity(days);
        for _ in 0..days {
            let mut day = Vec::with_capacity(slots);
            for _ in 0..slots {
                day.push(PeriodEntry::decode(reader)?);
            }
            entries.push(day);
        }

        debug!("Period grid: {days} days of {slots} slots");

        Ok(Self {
            padding,
            header_row,
            header,
            entries,
        })
    }
}

impl PeriodEntry {
    fn decode(reader: &mut ByteReader) -> Result<Self> {
        let name_length = reader.read_u16()?;
        let name = reader.read_text(name_length.into())?;
        let number = reader.read_u8()?;
        let unknown = reader.read_f64()?;
        let start = time_of_day(reader.read_f64()?)?;
        let end = time_of_day(reader.read_f64()?)?;
        Ok(Self {
            name,
            number,
            unknown,
            start,
            end,
        })
    }
}

/// Converts a fraction of a day into a duration since midnight, rounded to
/// the nearest millisecond.
pub fn time_of_day(fraction: f64) -> Result<TimeDelta> {
    let invalid = || Error::InvalidFormat(format!("invalid time-of-day value {fraction}"));

    let milliseconds = Decimal::from_f64_retain(fraction)
        .and_then(|d| d.checked_mul(Decimal::from(MILLISECONDS_PER_DAY)))
        .ok_or_else(invalid)?
        .round();
    let milliseconds = i64::try_from(milliseconds).map_err(|_| invalid())?;
    TimeDelta::try_milliseconds(milliseconds).ok_or_else(invalid)
}
