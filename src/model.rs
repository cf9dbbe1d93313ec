// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/model.rs - Resolved Timechart entities.
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
 * # `model` Module
 *
 * The entities produced by [crate::builder::Timechart]. Cross-references are
 * stored as typed ids holding the 0-based position of the target in its
 * table, and are looked up through the accessors on
 * [Timechart](crate::builder::Timechart).
 */

use chrono::TimeDelta;

macro_rules! table_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub usize);

        impl $name {
            /// The 0-based position in the target table.
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

table_id!(
    /// Position of a [Subject] in [Timechart::subjects](crate::builder::Timechart::subjects).
    SubjectId
);
table_id!(
    /// Position of a [Teacher] in [Timechart::teachers](crate::builder::Timechart::teachers).
    TeacherId
);
table_id!(
    /// Position of a [Room] in [Timechart::rooms](crate::builder::Timechart::rooms).
    RoomId
);
table_id!(
    /// Position of a [Class] in [Timechart::classes](crate::builder::Timechart::classes).
    ClassId
);
table_id!(
    /// Position of a [House] in [Timechart::houses](crate::builder::Timechart::houses).
    HouseId
);

/// A subject, with usage collected from the timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub code: String,
    pub name: String,
    /// Year labels this subject is timetabled in, in order of first use.
    pub years: Vec<String>,
    /// Teachers who teach this subject, in order of first use.
    pub teachers: Vec<TeacherId>,
    /// Rooms this subject is taught in, in order of first use.
    pub rooms: Vec<RoomId>,
}

impl Subject {
    pub fn new(code: String, name: String) -> Self {
        Self {
            code,
            name,
            years: Vec::new(),
            teachers: Vec::new(),
            rooms: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct House {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Faculty {
    pub name: String,
    /// Numbers listed under the faculty. Their meaning is unknown.
    pub values: Vec<u32>,
}

/// A named period at a given day and slot, with its start and end times.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetablePeriod {
    pub day: usize,
    pub slot: usize,
    pub name: String,
    /// Time since midnight.
    pub start: TimeDelta,
    /// Time since midnight.
    pub end: TimeDelta,
}

/// One scheduled lesson. Only lessons with at least one of subject, teacher
/// or room are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableSlot {
    pub day: usize,
    pub day_name: String,
    pub slot: usize,
    pub slot_name: String,
    pub year: usize,
    pub year_name: String,
    /// 0-based level within the year.
    pub level: usize,
    pub subject: Option<SubjectId>,
    pub teacher: Option<TeacherId>,
    pub room: Option<RoomId>,
    /// Raw flag bits. Not interpreted.
    pub flags: u16,
}

impl TimetableSlot {
    /// The level as shown to users, starting from 1.
    pub fn level_number(&self) -> usize {
        self.level + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub surname: String,
    pub given_name: String,
    pub gender: char,
    /// Enrolment code.
    pub code: String,
    /// Label of the timetable year this student was loaded for.
    pub year: String,
    /// 0-based position of that year in the timetable.
    pub year_index: usize,
    pub class: Option<ClassId>,
    pub tutor: Option<TeacherId>,
    pub house: Option<HouseId>,
    pub room: Option<RoomId>,
    /// Chosen subjects, without duplicates, in file order.
    pub subjects: Vec<SubjectId>,
}
