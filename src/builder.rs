// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  src/builder.rs - Assembles decoded Timechart files into one model.
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
 * # `builder` Module
 *
 * [Timechart] reads every file in a data directory in dependency order,
 * resolves the 1-based cross-references between them, and exposes the result
 * as a read-only model.
 *
 * ## Usage Example
 *
 * ```no_run
 * use timechart::builder::Timechart;
 *
 * fn main() -> Result<(), Box<dyn std::error::Error>> {
 *     let timechart = Timechart::open("DATA")?;
 *
 *     for student in timechart.students() {
 *         for subject in timechart.subjects_of(student) {
 *             println!("{} {}: {}", student.given_name, student.surname, subject.name);
 *         }
 *     }
 *
 *     Ok(())
 * }
 * ```
 */

use std::path::Path;

use log::{debug, info};

use crate::choice::ChoiceFile;
use crate::error::{Error, Result};
use crate::faculty::FacultyList;
use crate::group::GroupTable;
use crate::matrix::TimetableMatrix;
use crate::model::*;
use crate::names::NameIndex;
use crate::periods::PeriodGrid;
use crate::reader::ByteReader;
use crate::source::{DataDirectory, DataSource};
use crate::strings::{StringTable, VersionedStringTable};

/// The timetable name used when none is given.
pub const DEFAULT_TIMETABLE_NAME: &str = "TTABLE";

const SUBJECT_CODES: &str = "SUBCODE.DAT";
const SUBJECT_NAMES: &str = "SUBNAME.DAT";
const TEACHER_CODES: &str = "TECODE.DAT";
const TEACHER_NAMES: &str = "TENAME.DAT";
const ROOM_CODES: &str = "ROOMS.DAT";
const ROOM_NAMES: &str = "ROOMNAME.DAT";
const HOUSES: &str = "HOUSE.DAT";
const GROUPS: &str = "GROUP.DAT";
const FACULTIES: &str = "FACULTY.DAT";
const CLASSES: &str = "CLASS.DAT";

const TEACHER_NAME_LENGTH: u16 = 25;
const ROOM_NAME_LENGTH: u16 = 25;
const HOUSE_NAME_LENGTH: u16 = 10;

/// Name of the choice file for the 1-based timetable year `year`.
pub fn choice_file_name(year: usize) -> String {
    format!("CHOICE{year}.ST")
}

/// Dimensions and metadata of the timetable matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableInfo {
    pub name: String,
    pub weeks: u8,
    pub days: usize,
    pub slots: usize,
    pub years: usize,
    pub levels: usize,
}

/// A fully decoded Timechart data set.
#[derive(Debug, Clone)]
pub struct Timechart {
    subjects: Vec<Subject>,
    teachers: Vec<Teacher>,
    rooms: Vec<Room>,
    houses: Vec<House>,
    groups: Vec<Group>,
    faculties: Vec<Faculty>,
    classes: Vec<Class>,
    info: TimetableInfo,
    timetable_years: Vec<String>,
    timetable_slots: Vec<String>,
    timetable_days: Vec<String>,
    timetable: Vec<TimetableSlot>,
    periods: Vec<TimetablePeriod>,
    students: Vec<Student>,
}

impl Timechart {
    /// Loads the default timetable from a data directory.
    pub fn open(directory: impl AsRef<Path>) -> Result<Self> {
        Self::open_named(directory, DEFAULT_TIMETABLE_NAME)
    }

    /// Loads the named timetable from a data directory.
    pub fn open_named(directory: impl AsRef<Path>, timetable_name: &str) -> Result<Self> {
        Self::from_source(&DataDirectory::new(directory), timetable_name)
    }

    /// Loads the named timetable from any [DataSource].
    ///
    /// Either every file decodes and resolves, or an error naming the failing
    /// file is returned.
    pub fn from_source<S: DataSource + ?Sized>(source: &S, timetable_name: &str) -> Result<Self> {
        let subjects = read_subjects(source)?;
        let teachers = read_teachers(source)?;
        let rooms = read_rooms(source)?;
        let houses = read_houses(source)?;
        let faculties = read_faculties(source)?;
        let groups = read_groups(source)?;
        let classes = read_classes(source)?;

        let matrix_file = format!("{timetable_name}.TTW");
        let matrix = read_file(source, &matrix_file, "timetable matrix", |data| {
            TimetableMatrix::decode(&mut ByteReader::new(data))
        })?;
        let header = &matrix.header;
        let info = TimetableInfo {
            name: header.name.clone(),
            weeks: header.weeks,
            days: header.days.into(),
            slots: header.slots.into(),
            years: header.years.into(),
            levels: header.levels.into(),
        };

        let names_file = format!("{timetable_name}.NAM");
        let names = read_file(source, &names_file, "name index", |data| {
            NameIndex::decode(data, info.years, info.slots, info.days)
        })?;

        let references = References {
            subjects: subjects.len(),
            teachers: teachers.len(),
            rooms: rooms.len(),
            classes: classes.len(),
            houses: houses.len(),
        };

        let timetable = resolve_timetable(&matrix, &names, &references)
            .map_err(|e| e.in_file(&matrix_file, "reference resolution"))?;

        let periods_file = format!("{timetable_name}.CLS");
        let grid = read_file(source, &periods_file, "period grid", |data| {
            PeriodGrid::decode(&mut ByteReader::new(data), info.days, info.slots)
        })?;
        let periods = flatten_periods(grid);

        let mut students = Vec::new();
        for (i, year) in names.years.iter().enumerate() {
            students.extend(read_students(source, i, year, &references)?);
        }

        let mut subjects = subjects;
        collect_subject_usage(&mut subjects, &timetable);

        info!(
            "Loaded timetable {:?}: {} subjects, {} teachers, {} rooms, {} lessons, {} students",
            info.name,
            subjects.len(),
            teachers.len(),
            rooms.len(),
            timetable.len(),
            students.len()
        );

        Ok(Self {
            subjects,
            teachers,
            rooms,
            houses,
            groups,
            faculties,
            classes,
            info,
            timetable_years: names.years,
            timetable_slots: names.slots,
            timetable_days: names.days,
            timetable,
            periods,
            students,
        })
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn houses(&self) -> &[House] {
        &self.houses
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn faculties(&self) -> &[Faculty] {
        &self.faculties
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Every non-empty lesson, in day, slot, year, level order.
    pub fn timetable(&self) -> &[TimetableSlot] {
        &self.timetable
    }

    /// Every period, in day, slot order.
    pub fn periods(&self) -> &[TimetablePeriod] {
        &self.periods
    }

    pub fn timetable_info(&self) -> &TimetableInfo {
        &self.info
    }

    pub fn timetable_years(&self) -> &[String] {
        &self.timetable_years
    }

    pub fn timetable_slots(&self) -> &[String] {
        &self.timetable_slots
    }

    pub fn timetable_days(&self) -> &[String] {
        &self.timetable_days
    }

    pub fn subject(&self, id: SubjectId) -> &Subject {
        &self.subjects[id.0]
    }

    pub fn teacher(&self, id: TeacherId) -> &Teacher {
        &self.teachers[id.0]
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.0]
    }

    pub fn house(&self, id: HouseId) -> &House {
        &self.houses[id.0]
    }

    /// Looks up a subject by its code.
    pub fn subject_by_code(&self, code: &str) -> Option<(SubjectId, &Subject)> {
        self.subjects
            .iter()
            .enumerate()
            .find(|(_, s)| s.code == code)
            .map(|(i, s)| (SubjectId(i), s))
    }

    /// Returns the period scheduled at the given day and slot.
    pub fn period(&self, day: usize, slot: usize) -> Option<&TimetablePeriod> {
        if day >= self.info.days || slot >= self.info.slots {
            return None;
        }
        self.periods.get(day * self.info.slots + slot)
    }

    /// Returns the period a lesson takes place in.
    pub fn period_of(&self, lesson: &TimetableSlot) -> Option<&TimetablePeriod> {
        self.period(lesson.day, lesson.slot)
    }

    pub fn subjects_of<'a>(
        &'a self,
        student: &'a Student,
    ) -> impl Iterator<Item = &'a Subject> + 'a {
        student.subjects.iter().map(|&id| self.subject(id))
    }

    /// Lessons for one of the student's subjects in the student's year.
    pub fn lessons_for<'a>(
        &'a self,
        student: &'a Student,
    ) -> impl Iterator<Item = &'a TimetableSlot> + 'a {
        self.timetable.iter().filter(move |lesson| {
            lesson.year == student.year_index
                && lesson
                    .subject
                    .is_some_and(|subject| student.subjects.contains(&subject))
        })
    }
}

/// Lengths of the tables that 1-based references point into.
#[derive(Debug, Clone, Copy)]
struct References {
    subjects: usize,
    teachers: usize,
    rooms: usize,
    classes: usize,
    houses: usize,
}

/// Converts a 1-based reference to a 0-based index. Zero means no reference.
fn resolve(table: &'static str, index: u16, len: usize) -> Result<Option<usize>> {
    match usize::from(index) {
        0 => Ok(None),
        i if i <= len => Ok(Some(i - 1)),
        i => Err(Error::ReferenceOutOfRange {
            table,
            index: i,
            len,
        }),
    }
}

impl References {
    fn subject(&self, index: u16) -> Result<Option<SubjectId>> {
        Ok(resolve("subject", index, self.subjects)?.map(SubjectId))
    }

    fn teacher(&self, index: u16) -> Result<Option<TeacherId>> {
        Ok(resolve("teacher", index, self.teachers)?.map(TeacherId))
    }

    fn room(&self, index: u16) -> Result<Option<RoomId>> {
        Ok(resolve("room", index, self.rooms)?.map(RoomId))
    }

    fn class(&self, index: u16) -> Result<Option<ClassId>> {
        Ok(resolve("class", index, self.classes)?.map(ClassId))
    }

    fn house(&self, index: u16) -> Result<Option<HouseId>> {
        Ok(resolve("house", index, self.houses)?.map(HouseId))
    }
}

fn read_file<S, T, F>(source: &S, name: &str, stage: &'static str, decode: F) -> Result<T>
where
    S: DataSource + ?Sized,
    F: FnOnce(&[u8]) -> Result<T>,
{
    let data = source
        .read_required(name)
        .map_err(|e| e.in_file(name, stage))?;
    debug!("Decoding {name} ({} bytes)", data.len());
    decode(&data).map_err(|e| e.in_file(name, stage))
}

fn read_string_table<S: DataSource + ?Sized>(
    source: &S,
    name: &str,
    decode: impl FnOnce(&mut ByteReader) -> Result<StringTable>,
) -> Result<Vec<String>> {
    read_file(source, name, "string table", |data| {
        decode(&mut ByteReader::new(data))
    })
    .map(|table| table.items)
}

/// Joins two tables by position. Both must have the same length.
fn pair_tables<T>(
    table: &'static str,
    (codes_file, codes): (&str, Vec<String>),
    (names_file, names): (&str, Vec<String>),
    make: impl Fn(String, String) -> T,
) -> Result<Vec<T>> {
    let (code_len, name_len) = (codes.len(), names.len());
    if code_len != name_len {
        let (file, index, len) = if code_len > name_len {
            (names_file, name_len + 1, name_len)
        } else {
            (codes_file, code_len + 1, code_len)
        };
        return Err(Error::ReferenceOutOfRange { table, index, len }.in_file(file, "pairing"));
    }
    Ok(codes
        .into_iter()
        .zip(names)
        .map(|(code, name)| make(code, name))
        .collect())
}

fn read_subjects<S: DataSource + ?Sized>(source: &S) -> Result<Vec<Subject>> {
    let names = read_file(source, SUBJECT_NAMES, "string table", |data| {
        VersionedStringTable::decode(&mut ByteReader::new(data))
    })?
    .table
    .items;
    let codes = read_string_table(source, SUBJECT_CODES, StringTable::decode)?;
    pair_tables(
        "subject name",
        (SUBJECT_CODES, codes),
        (SUBJECT_NAMES, names),
        Subject::new,
    )
}

fn read_teachers<S: DataSource + ?Sized>(source: &S) -> Result<Vec<Teacher>> {
    let names = read_string_table(source, TEACHER_NAMES, |r| {
        StringTable::decode_with_width(r, TEACHER_NAME_LENGTH)
    })?;
    let codes = read_string_table(source, TEACHER_CODES, StringTable::decode)?;
    pair_tables(
        "teacher name",
        (TEACHER_CODES, codes),
        (TEACHER_NAMES, names),
        |code, name| Teacher { code, name },
    )
}

fn read_rooms<S: DataSource + ?Sized>(source: &S) -> Result<Vec<Room>> {
    let codes = read_string_table(source, ROOM_CODES, StringTable::decode)?;
    let names = read_string_table(source, ROOM_NAMES, |r| {
        StringTable::decode_with_width(r, ROOM_NAME_LENGTH)
    })?;
    pair_tables(
        "room name",
        (ROOM_CODES, codes),
        (ROOM_NAMES, names),
        |code, name| Room { code, name },
    )
}

fn read_houses<S: DataSource + ?Sized>(source: &S) -> Result<Vec<House>> {
    let names = read_string_table(source, HOUSES, |r| {
        StringTable::decode_with_width(r, HOUSE_NAME_LENGTH)
    })?;
    Ok(names.into_iter().map(|name| House { name }).collect())
}

fn read_groups<S: DataSource + ?Sized>(source: &S) -> Result<Vec<Group>> {
    let groups = read_file(source, GROUPS, "group table", |data| {
        GroupTable::decode(&mut ByteReader::new(data))
    })?;
    Ok(groups
        .entries
        .into_iter()
        .map(|g| Group {
            name: g.name,
            description: g.description,
        })
        .collect())
}

fn read_faculties<S: DataSource + ?Sized>(source: &S) -> Result<Vec<Faculty>> {
    let faculties = read_file(source, FACULTIES, "faculty list", |data| {
        FacultyList::decode(&mut ByteReader::new(data))
    })?;
    Ok(faculties
        .entries
        .into_iter()
        .map(|f| Faculty {
            name: f.name,
            values: f.values,
        })
        .collect())
}

fn read_classes<S: DataSource + ?Sized>(source: &S) -> Result<Vec<Class>> {
    let codes = read_string_table(source, CLASSES, StringTable::decode_width_prefixed)?;
    Ok(codes.into_iter().map(|code| Class { code }).collect())
}

fn resolve_timetable(
    matrix: &TimetableMatrix,
    names: &NameIndex,
    references: &References,
) -> Result<Vec<TimetableSlot>> {
    let mut timetable = Vec::new();
    for ((day, slot, year, level), cell) in matrix.iter() {
        let subject = references.subject(cell.subject)?;
        let teacher = references.teacher(cell.teacher)?;
        let room = references.room(cell.room)?;
        if subject.is_none() && teacher.is_none() && room.is_none() {
            continue;
        }

        timetable.push(TimetableSlot {
            day,
            day_name: names.days[day].clone(),
            slot,
            slot_name: names.slots[slot].clone(),
            year,
            year_name: names.years[year].clone(),
            level,
            subject,
            teacher,
            room,
            flags: cell.flags,
        });
    }
    debug!(
        "Timetable: {} of {} cells in use",
        timetable.len(),
        matrix.header.cell_count()
    );
    Ok(timetable)
}

fn flatten_periods(grid: PeriodGrid) -> Vec<TimetablePeriod> {
    grid.entries
        .into_iter()
        .enumerate()
        .flat_map(|(day, entries)| {
            entries
                .into_iter()
                .enumerate()
                .map(move |(slot, entry)| TimetablePeriod {
                    day,
                    slot,
                    name: entry.name,
                    start: entry.start,
                    end: entry.end,
                })
        })
        .collect()
}

fn read_students<S: DataSource + ?Sized>(
    source: &S,
    year_index: usize,
    year: &str,
    references: &References,
) -> Result<Vec<Student>> {
    let name = choice_file_name(year_index + 1);
    let Some(data) = source.read(&name).map_err(|e| e.in_file(&name, "student choices"))? else {
        debug!("No {name} for year {year:?}");
        return Ok(Vec::new());
    };

    let choices = ChoiceFile::decode(&mut ByteReader::new(&data))
        .map_err(|e| e.in_file(&name, "student choices"))?;

    choices
        .entries
        .into_iter()
        .map(|entry| {
            let mut subjects: Vec<SubjectId> = Vec::with_capacity(entry.subjects.len());
            for &index in &entry.subjects {
                if let Some(subject) = references.subject(index)? {
                    if !subjects.contains(&subject) {
                        subjects.push(subject);
                    }
                }
            }

            Ok(Student {
                surname: entry.surname,
                given_name: entry.given_name,
                gender: char::from(entry.gender),
                code: entry.code,
                year: year.to_string(),
                year_index,
                class: references.class(entry.class)?,
                tutor: references.teacher(entry.tutor)?,
                house: references.house(entry.house)?,
                room: references.room(entry.room)?,
                subjects,
            })
        })
        .collect::<Result<Vec<_>>>()
        .map_err(|e| e.in_file(&name, "reference resolution"))
}

/// Records, for every subject, the years, teachers and rooms it appears with
/// in the timetable. Entries are only added once, so running this again over
/// the same timetable changes nothing.
pub(crate) fn collect_subject_usage(subjects: &mut [Subject], timetable: &[TimetableSlot]) {
    for lesson in timetable {
        let Some(id) = lesson.subject else {
            continue;
        };
        let subject = &mut subjects[id.0];

        if let Some(teacher) = lesson.teacher {
            if !subject.teachers.contains(&teacher) {
                subject.teachers.push(teacher);
            }
        }
        if let Some(room) = lesson.room {
            if !subject.rooms.contains(&room) {
                subject.rooms.push(room);
            }
        }
        if !subject.years.contains(&lesson.year_name) {
            subject.years.push(lesson.year_name.clone());
        }
    }
}
