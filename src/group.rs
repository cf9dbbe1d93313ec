// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/group.rs - Decoder for the Timechart student group table.
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

use crate::error::Result;
use crate::reader::ByteReader;

const DESCRIPTION_LENGTH: usize = 20;

/// One row of the group table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    pub name: String,
    pub unknown: [u16; 4],
    /// Free-text description.
    pub description: String,
}

/// The decoded `GROUP.DAT` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTable {
    pub version: [u8; 4],
    pub entries: Vec<GroupEntry>,
    pub trailer: [u16; 3],
}

impl GroupTable {
    pub fn decode(reader: &mut ByteReader) -> Result<Self> {
        let mut version = [0u8; 4];
        version.copy_from_slice(reader.read_bytes(4)?);

        let count = reader.read_u16()?;
        let mut entries = Vec::with_capacity(count.into());
        for _ in 0..count {
            let name_length = reader.read_u16()?;
            let name = reader.read_text(name_length.into())?;
            let mut unknown = [0u16; 4];
            for value in &mut unknown {
                *value = reader.read_u16()?;
            }
            let description = reader.read_text(DESCRIPTION_LENGTH)?;
            entries.push(GroupEntry {
                name,
                unknown,
                description,
            });
        }

        let mut trailer = [0u16; 3];
        for value in &mut trailer {
            *value = reader.read_u16()?;
        }

        debug!("Group table: {} entries", entries.len());

        Ok(Self {
            version,
            entries,
            trailer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_groups() {
        let mut data = b"GRP1".to_vec();
        data.extend(2u16.to_le_bytes());
        for (name, desc) in [("Band", "Senior band"), ("Chess", "")] {
            data.extend((name.len() as u16).to_le_bytes());
            data.extend_from_slice(name.as_bytes());
            for v in [1u16, 2, 3, 4] {
                data.extend(v.to_le_bytes());
            }
            data.extend_from_slice(format!("{desc:<20}").as_bytes());
        }
        for v in [7u16, 8, 9] {
            data.extend(v.to_le_bytes());
        }

        let mut reader = ByteReader::new(&data);
        let groups = GroupTable::decode(&mut reader).unwrap();

        assert_eq!(&groups.version, b"GRP1");
        assert_eq!(groups.entries.len(), 2);
        assert_eq!(groups.entries[0].name, "Band");
        assert_eq!(groups.entries[0].description, "Senior band");
        assert_eq!(groups.entries[0].unknown, [1, 2, 3, 4]);
        assert_eq!(groups.entries[1].name, "Chess");
        assert_eq!(groups.entries[1].description, "");
        assert_eq!(groups.trailer, [7, 8, 9]);
        assert_eq!(reader.remaining(), 0);
    }
}
