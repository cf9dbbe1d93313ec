// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  tests/end_to_end.rs - Builds a model from a synthetic data directory.
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

use std::fs;
use std::path::Path;

use chrono::TimeDelta;
use tempfile::TempDir;

use timechart::Error;
use timechart::Timechart;
use timechart::model::{SubjectId, TeacherId};

fn padded(text: &str, width: usize) -> Vec<u8> {
    format!("{text:<width$}").into_bytes()
}

fn self_describing_table(width: u16, items: &[&str]) -> Vec<u8> {
    let mut data = (items.len() as u16).to_le_bytes().to_vec();
    data.extend(width.to_le_bytes());
    for item in items {
        data.extend(padded(item, width.into()));
    }
    data
}

fn fixed_width_table(width: usize, items: &[&str]) -> Vec<u8> {
    let mut data = (items.len() as u16).to_le_bytes().to_vec();
    for item in items {
        data.extend(padded(item, width));
    }
    data
}

fn write(dir: &Path, name: &str, data: &[u8]) {
    fs::write(dir.join(name), data).unwrap();
}

/// One subject, teacher and room; a 1x1x1x1 timetable with a single lesson;
/// one student in the only year.
fn write_dataset(dir: &Path) {
    write(dir, "SUBCODE.DAT", &self_describing_table(4, &["MTH"]));
    let mut subject_names = b"0100".to_vec();
    subject_names.extend(self_describing_table(20, &["Maths"]));
    write(dir, "SUBNAME.DAT", &subject_names);

    write(dir, "TECODE.DAT", &self_describing_table(4, &["T1"]));
    write(dir, "TENAME.DAT", &fixed_width_table(25, &["Smith"]));
    write(dir, "ROOMS.DAT", &self_describing_table(4, &["R1"]));
    write(dir, "ROOMNAME.DAT", &fixed_width_table(25, &["Lab"]));
    write(dir, "HOUSE.DAT", &fixed_width_table(10, &["Blue", "Gold"]));

    let mut groups = b"0100".to_vec();
    groups.extend(1u16.to_le_bytes());
    groups.extend(4u16.to_le_bytes());
    groups.extend_from_slice(b"Band");
    groups.extend([0u8; 8]);
    groups.extend(padded("Wind band", 20));
    groups.extend([0u8; 6]);
    write(dir, "GROUP.DAT", &groups);

    let mut faculties = 1u16.to_le_bytes().to_vec();
    faculties.extend_from_slice(b"Mathematics\r\n1\r\n");
    write(dir, "FACULTY.DAT", &faculties);

    let mut classes = 4u16.to_le_bytes().to_vec();
    classes.extend(1u16.to_le_bytes());
    classes.extend(padded("10A", 4));
    write(dir, "CLASS.DAT", &classes);

    // Header for 1 week, 1 day, 1 slot, 1 year, 1 level.
    let mut matrix = vec![1, 1, 1, 1];
    matrix.extend(1u16.to_le_bytes());
    matrix.extend([1, 0]);
    matrix.push(6);
    matrix.extend_from_slice(b"Term 1");
    matrix.extend([0u8; 5]);
    matrix.extend([0xFFu8; 10]);
    for value in [1u16, 1, 0, 0] {
        matrix.extend(value.to_le_bytes());
    }
    write(dir, "TTABLE.TTW", &matrix);

    write(dir, "TTABLE.NAM", b"Year 10\r\nPeriod 1\r\nMonday\r\n");

    let mut periods = Vec::new();
    periods.extend([0u8; 2]);
    periods.extend([0u8; 2]);
    periods.extend(9u16.to_le_bytes());
    periods.extend([0u8; 24]);
    periods.extend(2u16.to_le_bytes());
    periods.extend_from_slice(b"P1");
    periods.push(b'1');
    periods.extend(0.0f64.to_le_bytes());
    periods.extend((9.0f64 / 24.0).to_le_bytes());
    periods.extend((10.0f64 / 24.0).to_le_bytes());
    write(dir, "TTABLE.CLS", &periods);

    let mut choices = b"0100".to_vec();
    for value in [1u16, 2, 5, 12] {
        choices.extend(value.to_le_bytes());
    }
    choices.extend(padded("Jones", 30));
    choices.extend(padded("Casey", 30));
    for subject in [0u16, 1] {
        choices.extend(subject.to_le_bytes());
    }
    choices.push(b'F');
    choices.extend(1u16.to_le_bytes());
    choices.extend(2u16.to_le_bytes());
    choices.extend(padded("E0042", 5));
    choices.extend(0u16.to_le_bytes());
    choices.extend(0u16.to_le_bytes());
    choices.extend([0u8; 4]);
    write(dir, "CHOICE1.ST", &choices);
}

#[test]
fn test_minimal_dataset() {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path());

    let timechart = Timechart::open(dir.path()).unwrap();

    let timetable = timechart.timetable();
    assert_eq!(timetable.len(), 1);
    let lesson = &timetable[0];
    assert_eq!(lesson.subject, Some(SubjectId(0)));
    assert_eq!(lesson.teacher, Some(TeacherId(0)));
    assert_eq!(lesson.room, None);
    assert_eq!(lesson.day_name, "Monday");
    assert_eq!(lesson.slot_name, "Period 1");
    assert_eq!(lesson.year_name, "Year 10");
    assert_eq!(timechart.subject(SubjectId(0)).name, "Maths");
    assert_eq!(timechart.teacher(TeacherId(0)).name, "Smith");

    let maths = &timechart.subjects()[0];
    assert_eq!(maths.code, "MTH");
    assert_eq!(maths.teachers, vec![TeacherId(0)]);
    assert!(maths.rooms.is_empty());
    assert_eq!(maths.years, vec!["Year 10"]);

    let students = timechart.students();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].given_name, "Casey");
    assert_eq!(students[0].code, "E0042");
    assert_eq!(students[0].subjects, vec![SubjectId(0)]);
    assert_eq!(students[0].year, "Year 10");
    assert_eq!(
        students[0].house.map(|id| timechart.house(id).name.as_str()),
        Some("Gold")
    );
    assert_eq!(
        students[0].class.map(|id| timechart.class(id).code.as_str()),
        Some("10A")
    );
    assert_eq!(students[0].tutor, None);
    assert_eq!(timechart.lessons_for(&students[0]).count(), 1);

    let period = timechart.period_of(lesson).unwrap();
    assert_eq!(period.name, "P1");
    assert_eq!(period.start, TimeDelta::hours(9));
    assert_eq!(period.end, TimeDelta::hours(10));

    assert_eq!(timechart.groups()[0].description, "Wind band");
    assert_eq!(timechart.faculties()[0].name, "Mathematics");
    assert_eq!(timechart.timetable_info().name, "Term 1");
}

#[test]
fn test_missing_choice_file() {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path());
    fs::remove_file(dir.path().join("CHOICE1.ST")).unwrap();

    let timechart = Timechart::open(dir.path()).unwrap();
    assert!(timechart.students().is_empty());
    assert_eq!(timechart.timetable().len(), 1);
}

#[test]
fn test_corrupt_file_names_the_file() {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path());
    write(dir.path(), "TTABLE.NAM", b"Year 10\r\nPeriod 1\r\n");

    match Timechart::open(dir.path()) {
        Err(Error::File { file, stage, .. }) => {
            assert_eq!(file, "TTABLE.NAM");
            assert_eq!(stage, "name index");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
