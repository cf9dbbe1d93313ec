// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/strings.rs - Decoder for Timechart fixed-width string tables.
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
 * # `strings` Module
 *
 * Codes and names of subjects, teachers, rooms, houses and classes are all
 * stored as a 16-bit count followed by that many fixed-width text fields. The
 * field width comes from one of four places depending on the file:
 *
 * | Layout            | Files                             |
 * |-------------------|-----------------------------------|
 * | count, width      | `SUBCODE`, `TECODE`, `ROOMS`      |
 * | tag, count, width | `SUBNAME`                         |
 * | count             | `TENAME`, `ROOMNAME`, `HOUSE`     |
 * | width, count      | `CLASS`                           |
 */

use log::debug;

use crate::error::Result;
use crate::reader::ByteReader;

/// A decoded string table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTable {
    /// Width of every field in bytes.
    pub item_length: u16,
    /// The trimmed strings, in file order.
    pub items: Vec<String>,
}

impl StringTable {
    /// Decodes a table whose field width follows the count.
    pub fn decode(reader: &mut ByteReader) -> Result<Self> {
        let count = reader.read_u16()?;
        let width = reader.read_u16()?;
        Self::decode_items(reader, count, width)
    }

    /// Decodes a table whose field width is a known constant.
    pub fn decode_with_width(reader: &mut ByteReader, width: u16) -> Result<Self> {
        let count = reader.read_u16()?;
        Self::decode_items(reader, count, width)
    }

    /// Decodes a table whose field width precedes the count.
    pub fn decode_width_prefixed(reader: &mut ByteReader) -> Result<Self> {
        let width = reader.read_u16()?;
        Self::decode_with_width(reader, width)
    }

    fn decode_items(reader: &mut ByteReader, count: u16, width: u16) -> Result<Self> {
        debug!("String table: {count} items of {width} bytes");
        let items = (0..count)
            .map(|_| reader.read_text(width.into()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            item_length: width,
            items,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A string table preceded by an uninterpreted 4-byte tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedStringTable {
    pub version: [u8; 4],
    pub table: StringTable,
}

impl VersionedStringTable {
    pub fn decode(reader: &mut ByteReader) -> Result<Self> {
        let mut version = [0u8; 4];
        version.copy_from_slice(reader.read_bytes(4)?);
        let table = StringTable::decode(reader)?;
        Ok(Self { version, table })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn table_bytes(count: u16, width: u16, items: &[&[u8]]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend(count.to_le_bytes());
        data.extend(width.to_le_bytes());
        for item in items {
            data.extend_from_slice(item);
        }
        data
    }

    #[test]
    fn test_self_describing_table() {
        let data = table_bytes(3, 4, &[b"MTH ", b"ENG\0", b"SCI1"]);
        let mut reader = ByteReader::new(&data);
        let table = StringTable::decode(&mut reader).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.item_length, 4);
        assert_eq!(table.items, vec!["MTH", "ENG", "SCI1"]);
        for item in &table.items {
            assert!(item.len() <= 4);
            assert!(!item.contains('\0'));
        }
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_known_width_table() {
        let mut data = Vec::new();
        data.extend(2u16.to_le_bytes());
        data.extend_from_slice(b"Red       Blue      ");
        let mut reader = ByteReader::new(&data);
        let table = StringTable::decode_with_width(&mut reader, 10).unwrap();
        assert_eq!(table.items, vec!["Red", "Blue"]);
    }

    #[test]
    fn test_width_prefixed_table() {
        let mut data = Vec::new();
        data.extend(3u16.to_le_bytes());
        data.extend(2u16.to_le_bytes());
        data.extend_from_slice(b"7A 7B ");
        let mut reader = ByteReader::new(&data);
        let table = StringTable::decode_width_prefixed(&mut reader).unwrap();
        assert_eq!(table.item_length, 3);
        assert_eq!(table.items, vec!["7A", "7B"]);
    }

    #[test]
    fn test_versioned_table() {
        let mut data = b"V1.0".to_vec();
        data.extend(table_bytes(1, 8, &[b"Maths   "]));
        let mut reader = ByteReader::new(&data);
        let table = VersionedStringTable::decode(&mut reader).unwrap();
        assert_eq!(&table.version, b"V1.0");
        assert_eq!(table.table.items, vec!["Maths"]);
    }

    #[test]
    fn test_truncated_table() {
        let data = table_bytes(2, 4, &[b"MTH "]);
        let mut reader = ByteReader::new(&data);
        assert!(matches!(
            StringTable::decode(&mut reader),
            Err(Error::Truncated { .. })
        ));
    }
}
