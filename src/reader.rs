// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/reader.rs - Little-endian byte cursor for Timechart data files.
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
 * # `reader` Module
 *
 * A forward-only cursor over an in-memory file. Every Timechart decoder is
 * built on top of [ByteReader]: all integers are little-endian, and all text
 * fields are fixed-width ASCII padded on the right.
 */

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// A forward-only cursor over a byte buffer.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// The current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Reads `count` raw bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(Error::Truncated {
                offset: self.pos,
                needed: count,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(bytes)
    }

    /// Consumes everything left in the buffer.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let bytes = &self.data[self.pos..];
        self.pos = self.data.len();
        bytes
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.read_bytes(8)?))
    }

    /// Reads `count` consecutive 16-bit values.
    pub fn read_u16_vec(&mut self, count: usize) -> Result<Vec<u16>> {
        let bytes = self.read_bytes(count.checked_mul(2).ok_or_else(|| {
            Error::InvalidFormat(format!("u16 array of {count} elements is too large"))
        })?)?;
        let mut values = vec![0u16; count];
        LittleEndian::read_u16_into(bytes, &mut values);
        Ok(values)
    }

    /// Reads a fixed-width text field, trimming the right-hand padding.
    pub fn read_text(&mut self, width: usize) -> Result<String> {
        Ok(decode_text(self.read_bytes(width)?))
    }
}

/// Decodes a padded ASCII field.
///
/// Non-ASCII bytes become `?`, and trailing whitespace and NUL padding are
/// removed.
pub fn decode_text(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|b| !(b.is_ascii_whitespace() || *b == 0))
        .map_or(0, |i| i + 1);
    decode_ascii(&bytes[..end])
}

/// Decodes ASCII text as-is, with non-ASCII bytes replaced by `?`.
pub fn decode_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect()
}
