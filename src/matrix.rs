// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/matrix.rs - Decoder for the Timechart timetable matrix (`.TTW`) file.
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
 * # `matrix` Module
 *
 * The `.TTW` file holds every scheduled lesson as a four-dimensional grid
 * indexed by day, slot, year and level. Its layout is:
 *
 * ```text
 * u8   weeks
 * u8   days
 * u8   slots
 * u8   years
 * u16  levels
 * u8   year_levels[years]
 * u8   year_unknown[years]
 * u8   name_length
 * u8   name[name_length]
 * u16  day_slot_unknown[days * slots * 2]
 * u8   day_slot_flags[days * slots]
 * u8   padding[...]               (whatever is left over)
 * cell cells[days][slots][years][levels]
 * ```
 *
 * Each cell is four 16-bit values: subject, teacher, room and flags. The
 * padding size is not stored anywhere and is found by subtracting the header
 * and table sizes from the file length.
 */

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::reader::ByteReader;

/// Size of one encoded [MatrixCell].
pub const CELL_SIZE: usize = 8;

/// One lesson in the grid. Index fields are 1-based; 0 means empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatrixCell {
    pub subject: u16,
    pub teacher: u16,
    pub room: u16,
    pub flags: u16,
}

/// Dimension counts and opaque metadata from the start of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixHeader {
    pub weeks: u8,
    pub days: u8,
    pub slots: u8,
    pub years: u8,
    pub levels: u16,
    pub year_levels: Vec<u8>,
    pub year_unknown: Vec<u8>,
    pub name: String,
    pub day_slot_unknown: Vec<u16>,
    pub day_slot_flags: Vec<u8>,
}

impl MatrixHeader {
    /// Number of cells in the table.
    pub fn cell_count(&self) -> usize {
        usize::from(self.days)
            * usize::from(self.slots)
            * usize::from(self.years)
            * usize::from(self.levels)
    }

    /// Byte size of the table body.
    pub fn table_size(&self) -> usize {
        self.cell_count() * CELL_SIZE
    }
}

/// The decoded `.TTW` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableMatrix {
    pub header: MatrixHeader,
    pub padding: Vec<u8>,
    cells: Vec<MatrixCell>,
}

impl TimetableMatrix {
    pub fn decode(reader: &mut ByteReader) -> Result<Self> {
        let weeks = reader.read_u8()?;
        let days = reader.read_u8()?;
        let slots = reader.read_u8()?;
        let years = reader.read_u8()?;
        let levels = reader.read_u16()?;
        let year_levels = reader.read_bytes(years.into())?.to_vec();
        let year_unknown = reader.read_bytes(years.into())?.to_vec();
        let name_length = reader.read_u8()?;
        let name = reader.read_text(name_length.into())?;
        let day_slot_count = usize::from(days) * usize::from(slots);
        let day_slot_unknown = reader.read_u16_vec(day_slot_count * 2)?;
        let day_slot_flags = reader.read_bytes(day_slot_count)?.to_vec();

        let header = MatrixHeader {
            weeks,
            days,
            slots,
            years,
            levels,
            year_levels,
            year_unknown,
            name,
            day_slot_unknown,
            day_slot_flags,
        };

        let table_size = header.table_size();
        let padding_size = reader.remaining().checked_sub(table_size).ok_or_else(|| {
            Error::InvalidFormat(format!(
                "{} bytes left after the header at offset {}, but the {}x{}x{}x{} table needs {}",
                reader.remaining(),
                reader.position(),
                days,
                slots,
                years,
                levels,
                table_size
            ))
        })?;
        trace!(
            "Timetable matrix: header ends at {}, {padding_size} bytes of padding",
            reader.position()
        );
        let padding = reader.read_bytes(padding_size)?.to_vec();

        let mut cells = Vec::with_capacity(header.cell_count());
        for _ in 0..header.cell_count() {
            cells.push(MatrixCell {
                subject: reader.read_u16()?,
                teacher: reader.read_u16()?,
                room: reader.read_u16()?,
                flags: reader.read_u16()?,
            });
        }

        debug!(
            "Timetable matrix {:?}: {} weeks, {} days, {} slots, {} years, {} levels",
            header.name, weeks, days, slots, years, levels
        );

        Ok(Self {
            header,
            padding,
            cells,
        })
    }

    fn offset(&self, day: usize, slot: usize, year: usize, level: usize) -> Option<usize> {
        let h = &self.header;
        if day >= h.days.into()
            || slot >= h.slots.into()
            || year >= h.years.into()
            || level >= h.levels.into()
        {
            return None;
        }
        let slots = usize::from(h.slots);
        let years = usize::from(h.years);
        let levels = usize::from(h.levels);
        Some(((day * slots + slot) * years + year) * levels + level)
    }

    /// Returns the cell at the given position, if it is inside the grid.
    pub fn cell(&self, day: usize, slot: usize, year: usize, level: usize) -> Option<&MatrixCell> {
        self.offset(day, slot, year, level).map(|i| &self.cells[i])
    }

    /// Iterates over every cell as `((day, slot, year, level), cell)` in file
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize, usize, usize), &MatrixCell)> + '_ {
        let slots = usize::from(self.header.slots);
        let years = usize::from(self.header.years);
        let levels = usize::from(self.header.levels);
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let level = i % levels;
            let year = (i / levels) % years;
            let slot = (i / (levels * years)) % slots;
            let day = i / (levels * years * slots);
            ((day, slot, year, level), cell)
        })
    }
}
