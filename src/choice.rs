// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/choice.rs - Decoder for Timechart student choice (`CHOICEn.ST`) files.
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
 * # `choice` Module
 *
 * One choice file exists per timetable year. Each holds a small header and a
 * list of student records whose size depends on two header fields: the number
 * of subject slots and the length of the enrolment code.
 *
 * All index fields are left as raw 1-based numbers here. They are resolved by
 * [crate::builder] once the tables they point into are loaded.
 */

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::reader::ByteReader;

const NAME_LENGTH: usize = 30;
const HEADER_SIZE: u16 = 12;

/// One student record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceEntry {
    pub surname: String,
    pub given_name: String,
    /// Non-zero subject indices in file order. May contain duplicates.
    pub subjects: Vec<u16>,
    pub gender: u8,
    pub class: u16,
    pub house: u16,
    pub code: String,
    pub tutor: u16,
    pub room: u16,
    pub unknown: [u16; 2],
}

/// The decoded choice file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceFile {
    pub version: [u8; 4],
    pub subject_slots: u16,
    pub code_length: u16,
    pub entry_size: u16,
    /// The `entry_size - 12` bytes between the header and the first record.
    pub reserved: Vec<u8>,
    pub entries: Vec<ChoiceEntry>,
}

impl ChoiceFile {
    pub fn decode(reader: &mut ByteReader) -> Result<Self> {
        let mut version = [0u8; 4];
        version.copy_from_slice(reader.read_bytes(4)?);
        let entry_count = reader.read_u16()?;
        let subject_slots = reader.read_u16()?;
        let code_length = reader.read_u16()?;
        let entry_size = reader.read_u16()?;

        let reserved_size = entry_size.checked_sub(HEADER_SIZE).ok_or_else(|| {
            Error::InvalidFormat(format!(
                "entry size {entry_size} is smaller than the {HEADER_SIZE}-byte header"
            ))
        })?;
        trace!("Choice file: skipping {reserved_size} reserved bytes");
        let reserved = reader.read_bytes(reserved_size.into())?.to_vec();

        let mut entries = Vec::with_capacity(entry_count.into());
        for _ in 0..entry_count {
            entries.push(ChoiceEntry::decode(reader, subject_slots, code_length)?);
        }

        debug!(
            "Choice file: {} students, {subject_slots} subject slots",
            entries.len()
        );

        Ok(Self {
            version,
            subject_slots,
            code_length,
            entry_size,
            reserved,
            entries,
        })
    }
}

impl ChoiceEntry {
    fn decode(reader: &mut ByteReader, subject_slots: u16, code_length: u16) -> Result<Self> {
        let surname = reader.read_text(NAME_LENGTH)?;
        let given_name = reader.read_text(NAME_LENGTH)?;
        let subjects = reader
            .read_u16_vec(subject_slots.into())?
            .into_iter()
            .filter(|&s| s != 0)
            .collect();
        let gender = reader.read_u8()?;
        let class = reader.read_u16()?;
        let house = reader.read_u16()?;
        let code = reader.read_text(code_length.into())?;
        let tutor = reader.read_u16()?;
        let room = reader.read_u16()?;
        let unknown = [reader.read_u16()?, reader.read_u16()?];

        Ok(Self {
            surname,
            given_name,
            subjects,
            gender,
            class,
            house,
            code,
            tutor,
            room,
            unknown,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Field values for one synthetic student record.
    pub(crate) struct TestStudent<'a> {
        pub surname: &'a str,
        pub given_name: &'a str,
        pub subjects: &'a [u16],
        pub gender: u8,
        pub class: u16,
        pub house: u16,
        pub code: &'a str,
        pub tutor: u16,
        pub room: u16,
    }

    /// Builds a choice file with the given subject slot count and code length.
    pub(crate) fn choice_bytes(
        subject_slots: u16,
        code_length: u16,
        entry_size: u16,
        students: &[TestStudent],
    ) -> Vec<u8> {
        let mut data = b"CH01".to_vec();
        data.extend((students.len() as u16).to_le_bytes());
        data.extend(subject_slots.to_le_bytes());
        data.extend(code_length.to_le_bytes());
        data.extend(entry_size.to_le_bytes());
        data.extend(std::iter::repeat_n(0xEEu8, usize::from(entry_size) - 12));
        for s in students {
            data.extend_from_slice(format!("{:<30}", s.surname).as_bytes());
            data.extend_from_slice(format!("{:<30}", s.given_name).as_bytes());
            for i in 0..usize::from(subject_slots) {
                let subject = s.subjects.get(i).copied().unwrap_or(0);
                data.extend(subject.to_le_bytes());
            }
            data.push(s.gender);
            data.extend(s.class.to_le_bytes());
            data.extend(s.house.to_le_bytes());
            data.extend_from_slice(
                format!("{:<width$}", s.code, width = usize::from(code_length)).as_bytes(),
            );
            data.extend(s.tutor.to_le_bytes());
            data.extend(s.room.to_le_bytes());
            data.extend([0x11, 0x00, 0x22, 0x00]);
        }
        data
    }

    #[test]
    fn test_decode_choices() {
        let data = choice_bytes(
            4,
            6,
            16,
            &[TestStudent {
                surname: "Smith",
                given_name: "Alex",
                subjects: &[3, 0, 1, 3],
                gender: b'F',
                class: 2,
                house: 1,
                code: "S001",
                tutor: 4,
                room: 0,
            }],
        );

        let mut reader = ByteReader::new(&data);
        let choices = ChoiceFile::decode(&mut reader).unwrap();

        assert_eq!(&choices.version, b"CH01");
        assert_eq!(choices.reserved, vec![0xEE; 4]);
        assert_eq!(choices.entries.len(), 1);

        let entry = &choices.entries[0];
        assert_eq!(entry.surname, "Smith");
        assert_eq!(entry.given_name, "Alex");
        assert_eq!(entry.subjects, vec![3, 1, 3]);
        assert_eq!(entry.gender, b'F');
        assert_eq!(entry.class, 2);
        assert_eq!(entry.house, 1);
        assert_eq!(entry.code, "S001");
        assert_eq!(entry.tutor, 4);
        assert_eq!(entry.room, 0);
        assert_eq!(entry.unknown, [0x11, 0x22]);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_entry_size_too_small() {
        let mut data = b"CH01".to_vec();
        for v in [0u16, 1, 1, 8] {
            data.extend(v.to_le_bytes());
        }
        let mut reader = ByteReader::new(&data);
        assert!(matches!(
            ChoiceFile::decode(&mut reader),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_truncated_entry() {
        let mut data = choice_bytes(
            1,
            2,
            12,
            &[TestStudent {
                surname: "Smith",
                given_name: "Alex",
                subjects: &[1],
                gender: b'M',
                class: 0,
                house: 0,
                code: "01",
                tutor: 0,
                room: 0,
            }],
        );
        data.truncate(data.len() - 3);
        let mut reader = ByteReader::new(&data);
        assert!(matches!(
            ChoiceFile::decode(&mut reader),
            Err(Error::Truncated { .. })
        ));
    }
}
